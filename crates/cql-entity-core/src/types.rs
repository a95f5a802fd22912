// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Language-neutral type descriptors.
//!
//! Field types are described by a [`TypeRef`], which is either a raw type,
//! a parameterized type with annotated arguments, or one of the shapes that
//! cannot be resolved to a concrete class (wildcards and type variables).
//!
//! ```text
//! TypeRef
//! ├── Raw(RawType)
//! ├── Parameterized { raw: RawType, args: Vec<TypeArg> }
//! │   └── TypeArg { ty: TypeRef, annotations: Vec<Annotation> }
//! ├── Wildcard
//! └── Variable(name)
//! ```
//!
//! [`RawType`] is the closed set of object-model types the codec resolver
//! understands. [`NativeType`] is the subset the store persists directly.

use std::fmt;

use crate::{annotation::Annotation, reflect::ClassDescriptor};

/// Scalar types the store persists without transcoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NativeType {
    /// `boolean`.
    Boolean,
    /// `timestamp`, milliseconds since the epoch.
    Timestamp,
    /// `double`.
    Double,
    /// `float`.
    Float,
    /// `decimal`.
    Decimal,
    /// `inet`.
    Inet,
    /// `int`, 32-bit signed.
    Int,
    /// `varint`, arbitrary precision integer.
    Varint,
    /// `bigint`, 64-bit signed.
    BigInt,
    /// `text`.
    Text,
    /// `uuid`.
    Uuid,
    /// `blob`.
    Blob
}

impl NativeType {
    /// Every native type, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Boolean,
        Self::Timestamp,
        Self::Double,
        Self::Float,
        Self::Decimal,
        Self::Inet,
        Self::Int,
        Self::Varint,
        Self::BigInt,
        Self::Text,
        Self::Uuid,
        Self::Blob
    ];

    /// The store's column type keyword.
    #[must_use]
    pub const fn cql_name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Timestamp => "timestamp",
            Self::Double => "double",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Inet => "inet",
            Self::Int => "int",
            Self::Varint => "varint",
            Self::BigInt => "bigint",
            Self::Text => "text",
            Self::Uuid => "uuid",
            Self::Blob => "blob"
        }
    }

    /// Human-readable type name used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Timestamp => "Timestamp",
            Self::Double => "Double",
            Self::Float => "Float",
            Self::Decimal => "Decimal",
            Self::Inet => "Inet",
            Self::Int => "Integer",
            Self::Varint => "Varint",
            Self::BigInt => "Long",
            Self::Text => "String",
            Self::Uuid => "Uuid",
            Self::Blob => "Blob"
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Enum type metadata: the type name and its variants in declaration order.
///
/// The position of a variant in `variants` is its ordinal.
#[derive(Debug, Clone, Eq)]
pub struct EnumDescriptor {
    /// Fully qualified enum name.
    pub name:     String,
    /// Variant names in declaration order.
    pub variants: Vec<String>
}

impl EnumDescriptor {
    /// Create an enum descriptor.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        Self {
            name:     name.into(),
            variants: variants.into_iter().map(Into::into).collect()
        }
    }

    /// Ordinal of the named variant.
    #[must_use]
    pub fn ordinal_of(&self, variant: &str) -> Option<usize> {
        self.variants.iter().position(|v| v == variant)
    }

    /// Variant name at the given ordinal.
    #[must_use]
    pub fn variant_at(&self, ordinal: usize) -> Option<&str> {
        self.variants.get(ordinal).map(String::as_str)
    }
}

impl PartialEq for EnumDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// A user-defined object type: a compound key struct or a JSON document.
#[derive(Debug, Clone)]
pub struct ObjectType {
    /// Fully qualified type name.
    pub name:  String,
    /// Class descriptor, present for mapped structs.
    pub class: Option<fn() -> ClassDescriptor>
}

impl ObjectType {
    /// An opaque object type known only by name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name:  name.into(),
            class: None
        }
    }

    /// An object type backed by a mapped class.
    #[must_use]
    pub fn mapped(name: impl Into<String>, class: fn() -> ClassDescriptor) -> Self {
        Self {
            name:  name.into(),
            class: Some(class)
        }
    }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ObjectType {}

/// Object-model types understood by the codec resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawType {
    /// A type the store persists directly.
    Native(NativeType),
    /// A single byte.
    Byte,
    /// An owned byte vector (`Vec<u8>`).
    ByteArray,
    /// A vector of boxed signed bytes (`Vec<i8>`).
    BoxedByteArray,
    /// An enum with known variants.
    Enum(EnumDescriptor),
    /// An ordered collection.
    List,
    /// A collection of unique elements.
    Set,
    /// A key/value collection.
    Map,
    /// A distributed counter.
    Counter,
    /// Any other type.
    Object(ObjectType)
}

impl RawType {
    /// Whether this is a list, set or map.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::List | Self::Set | Self::Map)
    }

    /// The native type, if this raw type is one.
    #[must_use]
    pub const fn as_native(&self) -> Option<NativeType> {
        match self {
            Self::Native(native) => Some(*native),
            _ => None
        }
    }

    /// Type name used in error messages.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Native(native) => native.type_name().to_string(),
            Self::Byte => "Byte".to_string(),
            Self::ByteArray => "ByteArray".to_string(),
            Self::BoxedByteArray => "BoxedByteArray".to_string(),
            Self::Enum(e) => e.name.clone(),
            Self::List => "List".to_string(),
            Self::Set => "Set".to_string(),
            Self::Map => "Map".to_string(),
            Self::Counter => "Counter".to_string(),
            Self::Object(o) => o.name.clone()
        }
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

impl From<NativeType> for RawType {
    fn from(native: NativeType) -> Self {
        Self::Native(native)
    }
}

/// A type argument together with the annotations attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeArg {
    /// The argument type.
    pub ty:          TypeRef,
    /// Encoding directives for this argument (`Enumerated`, `Codec`).
    pub annotations: Vec<Annotation>
}

impl TypeArg {
    /// An unannotated type argument.
    #[must_use]
    pub fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            annotations: Vec::new()
        }
    }
}

/// Which argument of a parameterized type an annotation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgPosition {
    /// The element of a list or set (the last argument).
    Element,
    /// The key of a map.
    Key,
    /// The value of a map.
    Value
}

/// A possibly parameterized type reference.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// A type without arguments.
    Raw(RawType),
    /// A generic type applied to arguments.
    Parameterized {
        /// The erased type.
        raw:  RawType,
        /// Type arguments in declaration order.
        args: Vec<TypeArg>
    },
    /// An unbounded wildcard.
    Wildcard,
    /// A type variable.
    Variable(String)
}

impl TypeRef {
    /// A native type reference.
    #[must_use]
    pub const fn native(native: NativeType) -> Self {
        Self::Raw(RawType::Native(native))
    }

    /// `List<element>`.
    #[must_use]
    pub fn list(element: Self) -> Self {
        Self::Parameterized {
            raw:  RawType::List,
            args: vec![TypeArg::new(element)]
        }
    }

    /// `Set<element>`.
    #[must_use]
    pub fn set(element: Self) -> Self {
        Self::Parameterized {
            raw:  RawType::Set,
            args: vec![TypeArg::new(element)]
        }
    }

    /// `Map<key, value>`.
    #[must_use]
    pub fn map(key: Self, value: Self) -> Self {
        Self::Parameterized {
            raw:  RawType::Map,
            args: vec![TypeArg::new(key), TypeArg::new(value)]
        }
    }

    /// An opaque object type identified by the Rust type name of `T`.
    #[must_use]
    pub fn object_of<T: ?Sized>() -> Self {
        Self::Raw(RawType::Object(ObjectType::named(std::any::type_name::<T>())))
    }

    /// Attach an annotation to the argument at `position`.
    ///
    /// Has no effect on types without arguments, which keeps derive output
    /// total; the resolver reports the missing parameterization instead.
    #[must_use]
    pub fn annotate_arg(mut self, position: ArgPosition, annotation: Annotation) -> Self {
        if let Self::Parameterized {
            args, ..
        } = &mut self
        {
            let index = match position {
                ArgPosition::Element => args.len().checked_sub(1),
                ArgPosition::Key => Some(0),
                ArgPosition::Value => Some(1)
            };
            if let Some(arg) = index.and_then(|i| args.get_mut(i)) {
                arg.annotations.push(annotation);
            }
        }
        self
    }

    /// Type name used in error messages.
    #[must_use]
    pub fn type_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(raw) => write!(f, "{raw}"),
            Self::Parameterized {
                raw,
                args
            } => {
                write!(f, "{raw}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg.ty)?;
                }
                f.write_str(">")
            }
            Self::Wildcard => f.write_str("?"),
            Self::Variable(name) => f.write_str(name)
        }
    }
}

impl From<RawType> for TypeRef {
    fn from(raw: RawType) -> Self {
        Self::Raw(raw)
    }
}

impl From<NativeType> for TypeRef {
    fn from(native: NativeType) -> Self {
        Self::native(native)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::EnumEncoding;

    #[test]
    fn enum_ordinals_follow_declaration_order() {
        let e = EnumDescriptor::new("app::Color", ["Red", "Green", "Blue"]);
        assert_eq!(e.ordinal_of("Green"), Some(1));
        assert_eq!(e.variant_at(2), Some("Blue"));
        assert_eq!(e.variant_at(3), None);
    }

    #[test]
    fn enum_equality_is_by_name() {
        let a = EnumDescriptor::new("app::Color", ["Red"]);
        let b = EnumDescriptor::new("app::Color", ["Red", "Green"]);
        assert_eq!(a, b);
    }

    #[test]
    fn display_parameterized() {
        let ty = TypeRef::map(TypeRef::native(NativeType::BigInt), TypeRef::native(NativeType::Text));
        assert_eq!(ty.to_string(), "Map<Long, String>");
    }

    #[test]
    fn annotate_element_targets_last_argument() {
        let ty = TypeRef::list(TypeRef::native(NativeType::Int))
            .annotate_arg(ArgPosition::Element, Annotation::Enumerated(EnumEncoding::Ordinal));
        match ty {
            TypeRef::Parameterized {
                args, ..
            } => assert_eq!(args[0].annotations.len(), 1),
            other => panic!("unexpected {other:?}")
        }
    }

    #[test]
    fn annotate_raw_type_is_noop() {
        let ty = TypeRef::native(NativeType::Int)
            .annotate_arg(ArgPosition::Key, Annotation::Enumerated(EnumEncoding::Name));
        assert_eq!(ty, TypeRef::native(NativeType::Int));
    }
}
