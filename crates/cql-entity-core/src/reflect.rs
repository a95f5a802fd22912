// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Reflective class and field descriptors.
//!
//! The parser never inspects Rust types directly. It reads a
//! [`ClassDescriptor`]: the class name, its class annotations, its declared
//! fields in declaration order, and an optional parent class whose fields are
//! inherited.
//!
//! Descriptors come from two places:
//!
//! - `#[derive(Entity)]` and `#[derive(CompoundKey)]` implement [`Mapped`]
//! - hand-built descriptors, mostly in tests and for dynamic schemas
//!
//! [`MappedType`] maps a Rust field type onto a [`TypeRef`]. The core
//! implements it for the std and ecosystem types the store understands;
//! `#[derive(MappedEnum)]` implements it for fieldless enums.
//!
//! # Rust Type Mapping
//!
//! | Rust type | Type reference |
//! |-----------|----------------|
//! | `bool` | `Boolean` |
//! | `i32` | `Integer` |
//! | `i64` | `Long` |
//! | `f32` / `f64` | `Float` / `Double` |
//! | `String` | `String` |
//! | `Uuid` | `Uuid` |
//! | `DateTime<Utc>` | `Timestamp` |
//! | `IpAddr` | `Inet` |
//! | `BigInt` / `Decimal` | `Varint` / `Decimal` |
//! | `u8` / `i8` | `Byte` |
//! | `Vec<T>` | `List<T>` |
//! | `HashSet<T>` / `BTreeSet<T>` | `Set<T>` |
//! | `HashMap<K, V>` / `BTreeMap<K, V>` | `Map<K, V>` |
//! | `Option<T>` | same as `T` |
//! | [`Counter`] | `Counter` |

use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    net::IpAddr
};

use chrono::{DateTime, Utc};

use crate::{
    annotation::{Annotation, ClassAnnotation, CodecClass, EnumEncoding},
    config::ConsistencyLevel,
    naming::NamingStrategy,
    types::{NativeType, RawType, TypeRef}
};

/// A mapped class: its name, class annotations, fields and parent.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDescriptor {
    /// Canonical (fully qualified) class name.
    pub name:         String,
    /// Class-level annotations.
    pub annotations:  Vec<ClassAnnotation>,
    /// Fields declared by this class, in declaration order.
    pub fields:       Vec<FieldDescriptor>,
    /// Parent class whose fields are inherited.
    pub parent:       Option<Box<ClassDescriptor>>,
    /// Whether the class can be constructed without arguments.
    pub instantiable: bool
}

impl ClassDescriptor {
    /// An instantiable class with no annotations and no fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:         name.into(),
            annotations:  Vec::new(),
            fields:       Vec::new(),
            parent:       None,
            instantiable: true
        }
    }

    /// Add a class annotation.
    #[must_use]
    pub fn with_annotation(mut self, annotation: ClassAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Declare a field on this class.
    #[must_use]
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        ty: TypeRef,
        annotations: impl IntoIterator<Item = Annotation>
    ) -> Self {
        let field = FieldDescriptor {
            name: name.into(),
            declaring_class: self.name.clone(),
            ty,
            annotations: annotations.into_iter().collect()
        };
        self.fields.push(field);
        self
    }

    /// Set the parent class.
    #[must_use]
    pub fn with_parent(mut self, parent: Self) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// Mark the class as instantiable or not.
    #[must_use]
    pub const fn with_instantiable(mut self, instantiable: bool) -> Self {
        self.instantiable = instantiable;
        self
    }

    /// Class name without its module path.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }

    /// The `Entity` class annotation, if present.
    #[must_use]
    pub fn entity_annotation(&self) -> Option<&ClassAnnotation> {
        self.annotations
            .iter()
            .find(|a| matches!(a, ClassAnnotation::Entity { .. }))
    }

    /// Find the first class annotation `f` maps to a value.
    pub fn find_annotation<T>(&self, f: impl Fn(&ClassAnnotation) -> Option<T>) -> Option<T> {
        self.annotations.iter().find_map(f)
    }
}

/// A declared field: name, declaring class, type and annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name as declared.
    pub name:            String,
    /// Canonical name of the class that declares the field.
    pub declaring_class: String,
    /// Declared type, generics included.
    pub ty:              TypeRef,
    /// Field annotations.
    pub annotations:     Vec<Annotation>
}

impl FieldDescriptor {
    /// Whether any annotation satisfies `predicate`.
    pub fn has(&self, predicate: impl Fn(&Annotation) -> bool) -> bool {
        self.annotations.iter().any(predicate)
    }

    /// Find the first annotation `f` maps to a value.
    pub fn find<T>(&self, f: impl Fn(&Annotation) -> Option<T>) -> Option<T> {
        self.annotations.iter().find_map(f)
    }

    /// Explicit physical name declared through `Id` or `Column`.
    #[must_use]
    pub fn explicit_column_name(&self) -> Option<&str> {
        self.annotations.iter().find_map(|a| match a {
            Annotation::Id {
                name: Some(name)
            }
            | Annotation::Column {
                name: Some(name)
            } => Some(name.as_str()),
            _ => None
        })
    }

    /// Physical column name: the explicit name verbatim, otherwise the field
    /// name through `naming`.
    #[must_use]
    pub fn column_name(&self, naming: NamingStrategy) -> String {
        self.explicit_column_name()
            .map_or_else(|| naming.apply(&self.name), ToString::to_string)
    }

    /// Whether the field is a static column.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.has(|a| matches!(a, Annotation::Static))
    }

    /// Whether the field is a counter, by annotation or by type.
    #[must_use]
    pub fn is_counter(&self) -> bool {
        self.has(|a| matches!(a, Annotation::Counter))
            || matches!(self.raw_type(), Some(RawType::Counter))
    }

    /// Erased field type, when it resolves.
    #[must_use]
    pub fn raw_type(&self) -> Option<&RawType> {
        match &self.ty {
            TypeRef::Raw(raw)
            | TypeRef::Parameterized {
                raw, ..
            } => Some(raw),
            TypeRef::Wildcard | TypeRef::Variable(_) => None
        }
    }

    /// Field-level consistency override.
    #[must_use]
    pub fn consistency(&self) -> Option<(Option<ConsistencyLevel>, Option<ConsistencyLevel>)> {
        self.find(|a| match a {
            Annotation::Consistency {
                read,
                write
            } => Some((*read, *write)),
            _ => None
        })
    }
}

/// The `Enumerated` directive among `annotations`.
pub(crate) fn encoding_of(annotations: &[Annotation]) -> Option<EnumEncoding> {
    annotations.iter().find_map(|a| match a {
        Annotation::Enumerated(encoding) => Some(*encoding),
        _ => None
    })
}

/// The explicit codec class among `annotations`.
pub(crate) fn codec_of(annotations: &[Annotation]) -> Option<&CodecClass> {
    annotations.iter().find_map(|a| match a {
        Annotation::Codec(codec) => Some(codec),
        _ => None
    })
}

/// A type that maps to a class descriptor.
///
/// Implemented by `#[derive(Entity)]` and `#[derive(CompoundKey)]`.
pub trait Mapped {
    /// Canonical class name, equal to the descriptor's `name`.
    const CLASS_NAME: &'static str;

    /// Describe the class.
    fn class_descriptor() -> ClassDescriptor;
}

/// A Rust type with a known [`TypeRef`].
pub trait MappedType {
    /// The type reference of `Self`.
    fn type_ref() -> TypeRef;
}

/// Distributed counter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Counter(pub i64);

impl MappedType for Counter {
    fn type_ref() -> TypeRef {
        TypeRef::Raw(RawType::Counter)
    }
}

macro_rules! native_mapped_type {
    ($($ty:ty => $native:ident),* $(,)?) => {
        $(
            impl MappedType for $ty {
                fn type_ref() -> TypeRef {
                    TypeRef::native(NativeType::$native)
                }
            }
        )*
    };
}

native_mapped_type! {
    bool => Boolean,
    i32 => Int,
    i64 => BigInt,
    f32 => Float,
    f64 => Double,
    String => Text,
    uuid::Uuid => Uuid,
    DateTime<Utc> => Timestamp,
    IpAddr => Inet,
    num_bigint::BigInt => Varint,
    rust_decimal::Decimal => Decimal
}

impl MappedType for u8 {
    fn type_ref() -> TypeRef {
        TypeRef::Raw(RawType::Byte)
    }
}

impl MappedType for i8 {
    fn type_ref() -> TypeRef {
        TypeRef::Raw(RawType::Byte)
    }
}

impl<T: MappedType> MappedType for Option<T> {
    fn type_ref() -> TypeRef {
        T::type_ref()
    }
}

impl<T: MappedType> MappedType for Vec<T> {
    fn type_ref() -> TypeRef {
        TypeRef::list(T::type_ref())
    }
}

impl<T: MappedType, S> MappedType for HashSet<T, S> {
    fn type_ref() -> TypeRef {
        TypeRef::set(T::type_ref())
    }
}

impl<T: MappedType> MappedType for BTreeSet<T> {
    fn type_ref() -> TypeRef {
        TypeRef::set(T::type_ref())
    }
}

impl<K: MappedType, V: MappedType, S> MappedType for HashMap<K, V, S> {
    fn type_ref() -> TypeRef {
        TypeRef::map(K::type_ref(), V::type_ref())
    }
}

impl<K: MappedType, V: MappedType> MappedType for BTreeMap<K, V> {
    fn type_ref() -> TypeRef {
        TypeRef::map(K::type_ref(), V::type_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_types_map_to_native_types() {
        assert_eq!(i64::type_ref(), TypeRef::native(NativeType::BigInt));
        assert_eq!(Option::<String>::type_ref(), TypeRef::native(NativeType::Text));
        assert_eq!(u8::type_ref(), TypeRef::Raw(RawType::Byte));
    }

    #[test]
    fn collections_are_parameterized() {
        assert_eq!(
            HashMap::<i32, String>::type_ref().to_string(),
            "Map<Integer, String>"
        );
        assert_eq!(Vec::<uuid::Uuid>::type_ref().to_string(), "List<Uuid>");
        assert_eq!(BTreeSet::<bool>::type_ref().to_string(), "Set<Boolean>");
    }

    #[test]
    fn with_field_records_declaring_class() {
        let class = ClassDescriptor::new("app::User").with_field(
            "name",
            TypeRef::native(NativeType::Text),
            [Annotation::Column {
                name: None
            }]
        );
        assert_eq!(class.fields[0].declaring_class, "app::User");
        assert_eq!(class.short_name(), "User");
    }

    #[test]
    fn explicit_column_name_is_verbatim() {
        let class = ClassDescriptor::new("app::User").with_field(
            "firstName",
            TypeRef::native(NativeType::Text),
            [Annotation::Column {
                name: Some("GivenName".to_string())
            }]
        );
        assert_eq!(class.fields[0].column_name(NamingStrategy::SnakeCase), "GivenName");
    }

    #[test]
    fn derived_column_name_uses_strategy() {
        let class = ClassDescriptor::new("app::User").with_field(
            "firstName",
            TypeRef::native(NativeType::Text),
            [Annotation::Column {
                name: None
            }]
        );
        assert_eq!(class.fields[0].column_name(NamingStrategy::SnakeCase), "first_name");
    }

    #[test]
    fn counter_detected_by_type_or_annotation() {
        let class = ClassDescriptor::new("app::Stats")
            .with_field("views", Counter::type_ref(), [])
            .with_field("likes", TypeRef::native(NativeType::BigInt), [Annotation::Counter]);
        assert!(class.fields[0].is_counter());
        assert!(class.fields[1].is_counter());
    }
}
