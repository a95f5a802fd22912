// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Codec resolution for scalar, list, set and map fields.
//!
//! # Scalar Resolution
//!
//! Directives are checked before the type:
//!
//! 1. `RuntimeCodec { name }` - instance from the configuration registry
//! 2. `Codec(class)` - declared codec class, validated
//! 3. `Json` - JSON document regardless of type
//!
//! Then the raw type is classified (see [`classify`]), first match wins:
//! byte, `Vec<u8>`, `Vec<i8>`, native passthrough, enum (ordinal only when
//! `Enumerated(Ordinal)` is declared), JSON fallback.
//!
//! # Custom Codec Validation
//!
//! | Check | Error |
//! |-------|-------|
//! | identity codec is the only codec | [`MappingError::IdentityCodec`] |
//! | no constructor | [`MappingError::CodecNotInstantiable`] |
//! | source type differs from the field type | [`MappingError::CodecSourceMismatch`] |
//! | target type is not native | [`MappingError::UnsupportedTargetType`] |
//!
//! Every failure happens here, at bootstrap; codecs never fail resolution
//! lazily during encode or decode.

use std::sync::Arc;

use tracing::debug;

use super::{Codec, CodecKind, JsonCodec, ListCodec, MapCodec, ScalarCodec, SetCodec, classify};
use crate::{
    annotation::{Annotation, CodecClass, EnumEncoding},
    config::ConfigurationContext,
    error::MappingError,
    introspect::{infer_element_type, infer_map_key_and_value_types, resolve_raw_class},
    reflect::{FieldDescriptor, codec_of, encoding_of},
    types::{RawType, TypeRef}
};

/// Resolves codecs for fields, using the configuration for runtime codecs
/// and the JSON service.
#[derive(Debug, Clone, Copy)]
pub struct CodecResolver<'a> {
    config: &'a ConfigurationContext
}

impl<'a> CodecResolver<'a> {
    /// Resolver bound to a configuration.
    #[must_use]
    pub const fn new(config: &'a ConfigurationContext) -> Self {
        Self {
            config
        }
    }

    /// Resolve the codec of a scalar value of type `ty` carrying
    /// `directives`.
    ///
    /// # Errors
    ///
    /// Returns a [`MappingError`] for unresolvable types and for invalid
    /// custom codecs.
    pub fn resolve(
        &self,
        field: &FieldDescriptor,
        ty: &TypeRef,
        directives: &[Annotation]
    ) -> Result<ScalarCodec, MappingError> {
        let codec = self.resolve_scalar(field, ty, directives)?;
        debug!(
            field = %field.name,
            class = %field.declaring_class,
            codec = codec.name(),
            "resolved scalar codec"
        );
        Ok(codec)
    }

    fn resolve_scalar(
        &self,
        field: &FieldDescriptor,
        ty: &TypeRef,
        directives: &[Annotation]
    ) -> Result<ScalarCodec, MappingError> {
        if let Some(name) = runtime_codec_of(directives) {
            let codec = self.config.runtime_codec(name).cloned().ok_or_else(|| {
                MappingError::UnknownRuntimeCodec {
                    field: field.name.clone(),
                    class: field.declaring_class.clone(),
                    name:  name.to_string()
                }
            })?;
            return validated(field, ty, codec);
        }
        if let Some(class) = codec_of(directives) {
            return custom(field, ty, class);
        }
        let raw = resolve_raw_class(ty)?;
        if directives.iter().any(|a| matches!(a, Annotation::Json)) {
            return Ok(self.json(raw));
        }
        Ok(match (classify(raw), raw) {
            (CodecKind::Byte, _) => ScalarCodec::Byte,
            (CodecKind::ByteArray, _) => ScalarCodec::ByteArray,
            (CodecKind::BoxedByteArray, _) => ScalarCodec::BoxedByteArray,
            (CodecKind::Native, RawType::Native(native)) => ScalarCodec::Native(*native),
            (CodecKind::Enum, RawType::Enum(e)) => match encoding_of(directives) {
                Some(EnumEncoding::Ordinal) => ScalarCodec::EnumByOrdinal(e.clone()),
                Some(EnumEncoding::Name) | None => ScalarCodec::EnumByName(e.clone())
            },
            _ => self.json(raw)
        })
    }

    /// Resolve the element codec of a list field.
    ///
    /// # Errors
    ///
    /// Returns a [`MappingError`] when the field is not parameterized or the
    /// element codec is invalid.
    pub fn resolve_list(&self, field: &FieldDescriptor) -> Result<ListCodec, MappingError> {
        self.resolve_element(field).map(ListCodec::new)
    }

    /// Resolve the element codec of a set field.
    ///
    /// # Errors
    ///
    /// Returns a [`MappingError`] when the field is not parameterized or the
    /// element codec is invalid.
    pub fn resolve_set(&self, field: &FieldDescriptor) -> Result<SetCodec, MappingError> {
        self.resolve_element(field).map(SetCodec::new)
    }

    fn resolve_element(&self, field: &FieldDescriptor) -> Result<ScalarCodec, MappingError> {
        let element = infer_element_type(&field.ty, &field.name, &field.declaring_class)?;
        match transformer_of(field) {
            Some((_, Some(class))) if !class.is_identity() => custom(field, &element.ty, class),
            Some(_) => Err(identity_error(field)),
            None => self.resolve(field, &element.ty, &element.annotations)
        }
    }

    /// Resolve the key and value codecs of a map field.
    ///
    /// With a type transformer, a side without a codec (or with the identity
    /// codec) is a native passthrough.
    ///
    /// # Errors
    ///
    /// Returns a [`MappingError`] when the field does not have two type
    /// arguments or either codec is invalid.
    pub fn resolve_map(&self, field: &FieldDescriptor) -> Result<MapCodec, MappingError> {
        let (key, value) = infer_map_key_and_value_types(field)?;
        let codec = match transformer_of(field) {
            Some((key_class, value_class)) => {
                let declared = |c: Option<&CodecClass>| c.is_some_and(|c| !c.is_identity());
                if !declared(key_class) && !declared(value_class) {
                    return Err(identity_error(field));
                }
                MapCodec::new(
                    transformed_side(field, &key.ty, key_class)?,
                    transformed_side(field, &value.ty, value_class)?
                )
            }
            None => MapCodec::new(
                self.resolve(field, &key.ty, &key.annotations)?,
                self.resolve(field, &value.ty, &value.annotations)?
            )
        };
        Ok(codec)
    }

    fn json(&self, raw: &RawType) -> ScalarCodec {
        let mapper = self.config.json_factory().mapper(&raw.type_name());
        ScalarCodec::Json(JsonCodec::new(raw.clone(), mapper))
    }
}

fn runtime_codec_of(directives: &[Annotation]) -> Option<&str> {
    directives.iter().find_map(|a| match a {
        Annotation::RuntimeCodec {
            name
        } => Some(name.as_str()),
        _ => None
    })
}

fn transformer_of(field: &FieldDescriptor) -> Option<(Option<&CodecClass>, Option<&CodecClass>)> {
    field.annotations.iter().find_map(|a| match a {
        Annotation::TypeTransformer {
            key,
            value
        } => Some((key.as_ref(), value.as_ref())),
        _ => None
    })
}

fn transformed_side(
    field: &FieldDescriptor,
    ty: &TypeRef,
    class: Option<&CodecClass>
) -> Result<ScalarCodec, MappingError> {
    match class {
        Some(class) if !class.is_identity() => custom(field, ty, class),
        _ => {
            let raw = resolve_raw_class(ty)?;
            raw.as_native()
                .map(ScalarCodec::Native)
                .ok_or_else(|| MappingError::UnsupportedTargetType {
                    field:  field.name.clone(),
                    class:  field.declaring_class.clone(),
                    codec:  CodecClass::identity().name,
                    target: raw.type_name()
                })
        }
    }
}

fn custom(
    field: &FieldDescriptor,
    ty: &TypeRef,
    class: &CodecClass
) -> Result<ScalarCodec, MappingError> {
    if class.is_identity() {
        return Err(identity_error(field));
    }
    let constructor = class
        .constructor
        .ok_or_else(|| MappingError::CodecNotInstantiable {
            field: field.name.clone(),
            class: field.declaring_class.clone(),
            codec: class.short_name().to_string()
        })?;
    validated(field, ty, constructor())
}

/// Accept `codec` for a field of type `ty`.
///
/// The codec source type must equal the field's raw type. Without subtyping,
/// equality stands in for assignability.
fn validated(
    field: &FieldDescriptor,
    ty: &TypeRef,
    codec: Arc<dyn Codec>
) -> Result<ScalarCodec, MappingError> {
    let raw = resolve_raw_class(ty)?;
    let source = codec.source_type();
    if source != *raw {
        return Err(MappingError::CodecSourceMismatch {
            field:    field.name.clone(),
            class:    field.declaring_class.clone(),
            codec:    codec.name().to_string(),
            expected: source.type_name(),
            actual:   raw.type_name()
        });
    }
    let target = codec.target_type();
    if target.as_native().is_none() {
        return Err(MappingError::UnsupportedTargetType {
            field:  field.name.clone(),
            class:  field.declaring_class.clone(),
            codec:  codec.name().to_string(),
            target: target.type_name()
        });
    }
    Ok(ScalarCodec::Custom(codec))
}

fn identity_error(field: &FieldDescriptor) -> MappingError {
    MappingError::IdentityCodec {
        field: field.name.clone(),
        class: field.declaring_class.clone()
    }
}
