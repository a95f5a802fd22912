// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for entity parsing and value transcoding.
//!
//! Two families exist:
//!
//! - [`MappingError`] is raised while a class is parsed into an
//!   [`EntityDescriptor`](crate::EntityDescriptor). Every variant is a
//!   configuration problem that aborts bootstrap of the offending entity.
//! - [`CodecError`] is raised by [`Codec::encode`](crate::Codec::encode) and
//!   [`Codec::decode`](crate::Codec::decode) when a runtime value does not
//!   have the shape the codec was resolved for.
//!
//! Messages always carry the field name and the declaring class, and type
//! mismatches name both the expected and the actual type.

use thiserror::Error;

/// Configuration and mapping errors detected while parsing an entity class.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The entity has no `Id` or `EmbeddedId` field.
    #[error("entity '{class}' must have exactly one field annotated with Id or EmbeddedId")]
    MissingId {
        /// Canonical class name.
        class: String
    },

    /// The entity declares more than one identifier field.
    #[error("entity '{class}' declares more than one identifier: '{first}' and '{second}'")]
    DuplicateId {
        /// Canonical class name.
        class:  String,
        /// First identifier field.
        first:  String,
        /// Second identifier field.
        second: String
    },

    /// A compound key class carries neither ordering vocabulary.
    #[error(
        "compound key class '{class}' has no PartitionKey, ClusteringColumn or Order annotation"
    )]
    MissingKeyAnnotations {
        /// Compound key class name.
        class: String
    },

    /// Legacy `Order` and split `PartitionKey`/`ClusteringColumn` annotations
    /// are mixed inside one compound key class.
    #[error(
        "compound key class '{class}' mixes Order with PartitionKey/ClusteringColumn annotations"
    )]
    ConflictingKeyAnnotations {
        /// Compound key class name.
        class: String
    },

    /// Two components declare the same order value.
    #[error("the order '{order}' is duplicated in compound key class '{class}'")]
    DuplicateOrder {
        /// Duplicated order value.
        order: u32,
        /// Compound key class name.
        class: String
    },

    /// The order values of a component group are not the sequence `1..=N`.
    #[error(
        "the {group} orders of compound key class '{class}' are wrong: \
         they must form the sequence 1..={count} (sum {expected}, found {actual})"
    )]
    NonContiguousOrder {
        /// Compound key class name.
        class:    String,
        /// Component group (`partition key`, `clustering`, `component`).
        group:    &'static str,
        /// Number of components in the group.
        count:    usize,
        /// Expected sum `N(N+1)/2`.
        expected: u64,
        /// Actual sum of declared orders.
        actual:   u64
    },

    /// A compound key must have at least two components.
    #[error("compound key class '{class}' must have at least 2 components, found {count}")]
    NotEnoughComponents {
        /// Compound key class name.
        class: String,
        /// Number of components found.
        count: usize
    },

    /// A list, set or map field is used as a primary key component.
    #[error("field '{field}' of class '{class}' is a collection and cannot be a key component")]
    CollectionKeyComponent {
        /// Field name.
        field: String,
        /// Declaring class.
        class: String
    },

    /// A counter field is used as a primary key component.
    #[error("field '{field}' of class '{class}' is a counter and cannot be a key component")]
    CounterKeyComponent {
        /// Field name.
        field: String,
        /// Declaring class.
        class: String
    },

    /// The embedded key type cannot be constructed.
    #[error("embedded id '{field}' of class '{class}' has non-instantiable type '{key_type}'")]
    NonInstantiableKey {
        /// Field name.
        field:    String,
        /// Declaring class.
        class:    String,
        /// Name of the embedded key type.
        key_type: String
    },

    /// A static column participates in the primary key.
    #[error("field '{field}' of class '{class}' cannot be both static and part of the primary key")]
    StaticKeyColumn {
        /// Field name.
        field: String,
        /// Declaring class.
        class: String
    },

    /// Static columns exist on an entity without clustering columns.
    #[error(
        "entity '{class}' declares static column '{field}' but has no clustering columns"
    )]
    StaticWithoutClustering {
        /// Static field name.
        field: String,
        /// Entity class.
        class: String
    },

    /// A counter carries an attribute combination counters do not support.
    #[error("counter field '{field}' of class '{class}' is invalid: {reason}")]
    InvalidCounter {
        /// Field name.
        field:  String,
        /// Declaring class.
        class:  String,
        /// Why the counter is invalid.
        reason: &'static str
    },

    /// Two properties map to the same physical column.
    #[error("entity '{class}' maps fields '{first}' and '{second}' to the same column '{column}'")]
    DuplicateColumn {
        /// Entity class.
        class:  String,
        /// Physical column name.
        column: String,
        /// First field.
        first:  String,
        /// Second field.
        second: String
    },

    /// The identity codec was declared as the only codec of a field.
    #[error(
        "field '{field}' of class '{class}' declares the identity codec; \
         you forgot to provide a codec class"
    )]
    IdentityCodec {
        /// Field name.
        field: String,
        /// Declaring class.
        class: String
    },

    /// The declared codec source type does not match the field type.
    #[error(
        "codec '{codec}' on field '{field}' of class '{class}' has source type '{expected}' \
         but the field type is '{actual}'"
    )]
    CodecSourceMismatch {
        /// Field name.
        field:    String,
        /// Declaring class.
        class:    String,
        /// Codec name.
        codec:    String,
        /// Source type declared by the codec.
        expected: String,
        /// Actual field (or element) type.
        actual:   String
    },

    /// The declared codec target type is not a native store type.
    #[error(
        "codec '{codec}' on field '{field}' of class '{class}' targets '{target}', \
         which is not a native store type"
    )]
    UnsupportedTargetType {
        /// Field name.
        field:  String,
        /// Declaring class.
        class:  String,
        /// Codec name.
        codec:  String,
        /// Declared target type.
        target: String
    },

    /// The codec class has no usable no-argument constructor.
    #[error("cannot instantiate codec '{codec}' declared on field '{field}' of class '{class}'")]
    CodecNotInstantiable {
        /// Field name.
        field: String,
        /// Declaring class.
        class: String,
        /// Codec name.
        codec: String
    },

    /// A runtime codec name is not registered in the configuration.
    #[error("runtime codec '{name}' used by field '{field}' of class '{class}' is not registered")]
    UnknownRuntimeCodec {
        /// Field name.
        field: String,
        /// Declaring class.
        class: String,
        /// Registry key.
        name:  String
    },

    /// The entity keyspace is blank and no default keyspace is configured.
    #[error("no keyspace declared on entity '{class}' and no default keyspace configured")]
    MissingKeyspace {
        /// Entity class.
        class: String
    },

    /// The table name resolved to an empty string.
    #[error("entity '{class}' resolves to a blank table name")]
    BlankTableName {
        /// Entity class.
        class: String
    },

    /// Two entity classes share one canonical name.
    #[error("entity '{class}' is registered more than once")]
    DuplicateEntity {
        /// Canonical class name.
        class: String
    },

    /// The naming strategy value cannot be parsed.
    #[error("unknown naming strategy '{value}' declared on '{class}'")]
    UnknownNamingStrategy {
        /// Raw strategy value.
        value: String,
        /// Owning class.
        class: String
    },

    /// A collection or map type carries no type arguments.
    #[error(
        "field '{field}' of class '{class}' has type '{actual}' which is not parameterized"
    )]
    NotParameterized {
        /// Field name.
        field:  String,
        /// Declaring class.
        class:  String,
        /// Rendered field type.
        actual: String
    },

    /// A map type does not carry exactly two type arguments.
    #[error("map field '{field}' of class '{class}' must have 2 type arguments, found {found}")]
    WrongTypeArity {
        /// Field name.
        field: String,
        /// Declaring class.
        class: String,
        /// Number of arguments found.
        found: usize
    },

    /// A type variable or wildcard cannot be resolved to a raw class.
    #[error("cannot resolve a raw class from type '{actual}'")]
    UnresolvableType {
        /// Rendered type.
        actual: String
    }
}

/// Errors raised while transcoding a runtime value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The value does not match the type the codec expects.
    #[error("codec '{codec}' expected a {expected} value, got {actual}")]
    UnexpectedValue {
        /// Codec name.
        codec:    String,
        /// Expected value kind.
        expected: String,
        /// Actual value kind.
        actual:   String
    },

    /// An enum name or ordinal has no matching variant.
    #[error("enum '{enum_name}' has no variant '{variant}'")]
    UnknownVariant {
        /// Enum type name.
        enum_name: String,
        /// Offending variant name or ordinal.
        variant:   String
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON transcoding of '{type_name}' failed: {message}")]
    Json {
        /// Object type name.
        type_name: String,
        /// Serializer message.
        message:   String
    },

    /// A byte blob has the wrong length for a single byte.
    #[error("expected a single byte blob, got {len} bytes")]
    InvalidByteLength {
        /// Actual blob length.
        len: usize
    },

    /// A user codec reported a failure.
    #[error("codec '{codec}' failed: {message}")]
    Custom {
        /// Codec name.
        codec:   String,
        /// Codec message.
        message: String
    }
}
