// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Scalar codecs and raw type classification.

use std::sync::Arc;

use super::{Codec, JsonCodec, unexpected};
use crate::{
    error::CodecError,
    types::{EnumDescriptor, NativeType, RawType},
    value::Value
};

/// Codec family selected for a raw type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    /// Single byte.
    Byte,
    /// `Vec<u8>`.
    ByteArray,
    /// `Vec<i8>`.
    BoxedByteArray,
    /// Native passthrough.
    Native,
    /// Enum by name or ordinal.
    Enum,
    /// JSON document.
    JsonFallback,
    /// Declared codec class or runtime codec.
    Custom
}

/// Classify a raw type, first match wins: byte, byte array, boxed byte
/// array, native, enum, JSON.
///
/// [`CodecKind::Custom`] is never returned; it is chosen by annotations
/// before classification.
#[must_use]
pub const fn classify(raw: &RawType) -> CodecKind {
    match raw {
        RawType::Byte => CodecKind::Byte,
        RawType::ByteArray => CodecKind::ByteArray,
        RawType::BoxedByteArray => CodecKind::BoxedByteArray,
        RawType::Native(_) => CodecKind::Native,
        RawType::Enum(_) => CodecKind::Enum,
        RawType::List
        | RawType::Set
        | RawType::Map
        | RawType::Counter
        | RawType::Object(_) => CodecKind::JsonFallback
    }
}

/// Codec for a single non-collection value.
#[derive(Debug, Clone)]
pub enum ScalarCodec {
    /// Passthrough for a native type.
    Native(NativeType),
    /// `Value::Byte` to a one-byte blob.
    Byte,
    /// `Value::Bytes` to a blob.
    ByteArray,
    /// List of `Value::Byte` to a blob.
    BoxedByteArray,
    /// Enum variant to its name.
    EnumByName(EnumDescriptor),
    /// Enum variant to its ordinal.
    EnumByOrdinal(EnumDescriptor),
    /// Object to JSON text.
    Json(JsonCodec),
    /// User-supplied codec.
    Custom(Arc<dyn Codec>)
}

impl ScalarCodec {
    /// Codec family.
    #[must_use]
    pub const fn kind(&self) -> CodecKind {
        match self {
            Self::Native(_) => CodecKind::Native,
            Self::Byte => CodecKind::Byte,
            Self::ByteArray => CodecKind::ByteArray,
            Self::BoxedByteArray => CodecKind::BoxedByteArray,
            Self::EnumByName(_) | Self::EnumByOrdinal(_) => CodecKind::Enum,
            Self::Json(_) => CodecKind::JsonFallback,
            Self::Custom(_) => CodecKind::Custom
        }
    }

    /// Store-side native type.
    ///
    /// Every resolved scalar codec targets a native type; custom codecs are
    /// validated for it during resolution.
    #[must_use]
    pub fn target_native(&self) -> NativeType {
        self.target_type().as_native().unwrap_or(NativeType::Blob)
    }
}

impl Codec for ScalarCodec {
    fn name(&self) -> &str {
        match self {
            Self::Native(native) => native.type_name(),
            Self::Byte => "Byte",
            Self::ByteArray => "ByteArray",
            Self::BoxedByteArray => "BoxedByteArray",
            Self::EnumByName(_) => "EnumByName",
            Self::EnumByOrdinal(_) => "EnumByOrdinal",
            Self::Json(codec) => codec.name(),
            Self::Custom(codec) => codec.name()
        }
    }

    fn source_type(&self) -> RawType {
        match self {
            Self::Native(native) => RawType::Native(*native),
            Self::Byte => RawType::Byte,
            Self::ByteArray => RawType::ByteArray,
            Self::BoxedByteArray => RawType::BoxedByteArray,
            Self::EnumByName(e) | Self::EnumByOrdinal(e) => RawType::Enum(e.clone()),
            Self::Json(codec) => codec.source_type(),
            Self::Custom(codec) => codec.source_type()
        }
    }

    fn target_type(&self) -> RawType {
        match self {
            Self::Native(native) => RawType::Native(*native),
            Self::Byte | Self::ByteArray | Self::BoxedByteArray => {
                RawType::Native(NativeType::Blob)
            }
            Self::EnumByName(_) => RawType::Native(NativeType::Text),
            Self::EnumByOrdinal(_) => RawType::Native(NativeType::Int),
            Self::Json(codec) => codec.target_type(),
            Self::Custom(codec) => codec.target_type()
        }
    }

    fn encode(&self, value: &Value) -> Result<Value, CodecError> {
        if let Self::Json(codec) = self {
            return codec.encode(value);
        }
        if let Self::Custom(codec) = self {
            return codec.encode(value);
        }
        if value.is_null() {
            return Ok(Value::Null);
        }
        match (self, value) {
            (Self::Native(native), v) if v.is_native(*native) => Ok(v.clone()),
            (Self::Byte, Value::Byte(b)) => Ok(Value::Blob(vec![b.to_ne_bytes()[0]])),
            (Self::ByteArray, Value::Bytes(bytes)) => Ok(Value::Blob(bytes.clone())),
            (Self::BoxedByteArray, Value::List(items)) => items
                .iter()
                .map(|item| match item {
                    Value::Byte(b) => Ok(b.to_ne_bytes()[0]),
                    other => Err(unexpected(self.name(), "byte", other))
                })
                .collect::<Result<Vec<u8>, _>>()
                .map(Value::Blob),
            (Self::EnumByName(e), Value::Enum(variant)) => {
                e.ordinal_of(variant)
                    .map(|_| Value::Text(variant.clone()))
                    .ok_or_else(|| unknown_variant(e, variant))
            }
            (Self::EnumByOrdinal(e), Value::Enum(variant)) => e
                .ordinal_of(variant)
                .and_then(|ordinal| i32::try_from(ordinal).ok())
                .map(Value::Int)
                .ok_or_else(|| unknown_variant(e, variant)),
            (codec, other) => Err(unexpected(codec.name(), codec.source_type(), other))
        }
    }

    fn decode(&self, value: &Value) -> Result<Value, CodecError> {
        if let Self::Json(codec) = self {
            return codec.decode(value);
        }
        if let Self::Custom(codec) = self {
            return codec.decode(value);
        }
        if value.is_null() {
            return Ok(Value::Null);
        }
        match (self, value) {
            (Self::Native(native), v) if v.is_native(*native) => Ok(v.clone()),
            (Self::Byte, Value::Blob(bytes)) => match bytes.as_slice() {
                [b] => Ok(Value::Byte(i8::from_ne_bytes([*b]))),
                other => Err(CodecError::InvalidByteLength {
                    len: other.len()
                })
            },
            (Self::ByteArray, Value::Blob(bytes)) => Ok(Value::Bytes(bytes.clone())),
            (Self::BoxedByteArray, Value::Blob(bytes)) => Ok(Value::List(
                bytes
                    .iter()
                    .map(|b| Value::Byte(i8::from_ne_bytes([*b])))
                    .collect()
            )),
            (Self::EnumByName(e), Value::Text(name)) => e
                .ordinal_of(name)
                .map(|_| Value::Enum(name.clone()))
                .ok_or_else(|| unknown_variant(e, name)),
            (Self::EnumByOrdinal(e), Value::Int(ordinal)) => usize::try_from(*ordinal)
                .ok()
                .and_then(|o| e.variant_at(o))
                .map(|v| Value::Enum(v.to_string()))
                .ok_or_else(|| unknown_variant(e, &ordinal.to_string())),
            (codec, other) => Err(unexpected(codec.name(), codec.target_type(), other))
        }
    }
}

fn unknown_variant(e: &EnumDescriptor, variant: &str) -> CodecError {
    CodecError::UnknownVariant {
        enum_name: e.name.clone(),
        variant:   variant.to_string()
    }
}
