// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! The mapping annotation vocabulary.
//!
//! Annotations are plain data attached to fields ([`Annotation`]), to type
//! arguments (the `Enumerated` and `Codec` subset) and to classes
//! ([`ClassAnnotation`]). The derive macros translate Rust attributes into
//! these values; hand-built descriptors use them directly.
//!
//! # Field Annotations
//!
//! | Annotation | Attribute | Meaning |
//! |------------|-----------|---------|
//! | `Id` | `#[id]` | Simple primary key |
//! | `EmbeddedId` | `#[embedded_id]` | Compound primary key struct |
//! | `Column` | `#[column]` | Mapped column |
//! | `PartitionKey` | `#[partition_key(n)]` | Partition component `n` |
//! | `ClusteringColumn` | `#[clustering(n, reversed)]` | Clustering component `n` |
//! | `Order` | `#[order(n, partition_key, reversed)]` | Legacy component ordering |
//! | `Static` | `#[column(static_column)]` | Partition-wide column |
//! | `Counter` | `#[counter]` | Counter column |
//! | `Transient` | `#[transient]` | Never mapped |
//! | `Enumerated` | `#[enumerated(ordinal)]` | Enum encoding |
//! | `Codec` | `#[codec(Type)]` | Custom codec |
//! | `RuntimeCodec` | `#[runtime_codec("name")]` | Codec from the registry |
//! | `TypeTransformer` | `#[type_transformer(key = K, value = V)]` | Map codecs |

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{codec::Codec, config::ConsistencyLevel};

/// How an enum value is written to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumEncoding {
    /// Store the variant name as text.
    #[default]
    Name,
    /// Store the variant position as an integer.
    Ordinal
}

/// Constructor of a codec with no arguments.
pub type CodecConstructor = fn() -> Arc<dyn Codec>;

/// A codec type reference, as declared by `#[codec(Type)]`.
///
/// `constructor` is `None` when the type offers no no-argument constructor.
/// The identity codec is a distinguished reference that means "no
/// transformation".
#[derive(Clone)]
pub struct CodecClass {
    /// Codec type name.
    pub name:        String,
    /// No-argument constructor.
    pub constructor: Option<CodecConstructor>,
    identity:        bool
}

impl CodecClass {
    /// Reference a codec type constructible through [`Default`].
    #[must_use]
    pub fn of<C>() -> Self
    where
        C: Codec + Default + 'static
    {
        Self {
            name:        std::any::type_name::<C>().to_string(),
            constructor: Some(|| Arc::new(C::default()) as Arc<dyn Codec>),
            identity:    false
        }
    }

    /// Reference a codec type by name with an explicit constructor.
    #[must_use]
    pub fn new(name: impl Into<String>, constructor: Option<CodecConstructor>) -> Self {
        Self {
            name: name.into(),
            constructor,
            identity: false
        }
    }

    /// The identity (no-op) codec reference.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            name:        "Identity".to_string(),
            constructor: None,
            identity:    true
        }
    }

    /// Whether this is the identity codec reference.
    #[must_use]
    pub const fn is_identity(&self) -> bool {
        self.identity
    }

    /// Short type name without module path.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }
}

impl fmt::Debug for CodecClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecClass")
            .field("name", &self.name)
            .field("instantiable", &self.constructor.is_some())
            .field("identity", &self.identity)
            .finish()
    }
}

impl PartialEq for CodecClass {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.identity == other.identity
    }
}

/// Field-level mapping annotations.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Simple primary key, optionally renamed.
    Id {
        /// Explicit column name.
        name: Option<String>
    },
    /// Compound primary key held in a mapped struct.
    EmbeddedId {
        /// Explicit property name.
        name: Option<String>
    },
    /// Mapped column, optionally renamed.
    Column {
        /// Explicit column name.
        name: Option<String>
    },
    /// Partition key component at `order` (split vocabulary).
    PartitionKey {
        /// 1-based position inside the partition key.
        order: u32
    },
    /// Clustering component at `order` (split vocabulary).
    ClusteringColumn {
        /// 1-based position among clustering columns.
        order:    u32,
        /// Sort descending.
        reversed: bool
    },
    /// Legacy single ordering annotation.
    Order {
        /// 1-based position inside the whole key.
        order:         u32,
        /// Sort descending.
        reversed:      bool,
        /// Component belongs to the partition key.
        partition_key: bool
    },
    /// Column shared by all rows of a partition.
    Static,
    /// Counter column.
    Counter,
    /// Field excluded from mapping.
    Transient,
    /// UUID stored as a time-based UUID.
    TimeUuid,
    /// Value stored as a JSON document.
    Json,
    /// Decode a missing collection as empty instead of null.
    EmptyCollectionIfNull,
    /// Default time-to-live in seconds.
    Ttl(u32),
    /// Secondary index, optionally named.
    Index {
        /// Explicit index name.
        name: Option<String>
    },
    /// Read/write consistency override.
    Consistency {
        /// Read consistency.
        read:  Option<ConsistencyLevel>,
        /// Write consistency.
        write: Option<ConsistencyLevel>
    },
    /// Enum encoding directive.
    Enumerated(EnumEncoding),
    /// Explicit codec class.
    Codec(CodecClass),
    /// Codec looked up by name in the configuration registry.
    RuntimeCodec {
        /// Registry key.
        name: String
    },
    /// Map key and value codec classes.
    TypeTransformer {
        /// Key codec.
        key:   Option<CodecClass>,
        /// Value codec.
        value: Option<CodecClass>
    }
}

impl Annotation {
    /// Whether this annotation makes a field eligible for mapping.
    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(
            self,
            Self::Id { .. } | Self::EmbeddedId { .. } | Self::Column { .. } | Self::Counter
        )
    }

    /// Whether this annotation orders a compound key component.
    #[must_use]
    pub const fn is_key_ordering(&self) -> bool {
        matches!(
            self,
            Self::PartitionKey { .. } | Self::ClusteringColumn { .. } | Self::Order { .. }
        )
    }
}

/// How rows are written on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertStrategy {
    /// Write every mapped column, nulls included.
    #[default]
    AllFields,
    /// Write only columns whose value is not null.
    NotNullFields
}

/// Class-level mapping annotations.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassAnnotation {
    /// Marks a class as an entity.
    Entity {
        /// Explicit table name.
        table:         Option<String>,
        /// Explicit keyspace name.
        keyspace:      Option<String>,
        /// Schema update override.
        schema_update: Option<bool>
    },
    /// Default consistency for every property of the entity.
    Consistency {
        /// Read consistency.
        read:  Option<ConsistencyLevel>,
        /// Write consistency.
        write: Option<ConsistencyLevel>
    },
    /// Naming and insert strategy overrides.
    Strategy {
        /// Raw naming strategy value, parsed at bootstrap.
        naming: Option<String>,
        /// Insert strategy.
        insert: Option<InsertStrategy>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_not_instantiable() {
        let identity = CodecClass::identity();
        assert!(identity.is_identity());
        assert!(identity.constructor.is_none());
    }

    #[test]
    fn short_name_strips_module_path() {
        let codec = CodecClass::new("app::codecs::IntToText", None);
        assert_eq!(codec.short_name(), "IntToText");
    }

    #[test]
    fn mapping_annotations() {
        assert!(Annotation::Id { name: None }.is_mapping());
        assert!(Annotation::Column { name: None }.is_mapping());
        assert!(!Annotation::Static.is_mapping());
        assert!(!Annotation::Transient.is_mapping());
    }

    #[test]
    fn key_ordering_annotations() {
        assert!(Annotation::PartitionKey { order: 1 }.is_key_ordering());
        assert!(
            Annotation::Order {
                order:         1,
                reversed:      false,
                partition_key: true
            }
            .is_key_ordering()
        );
        assert!(!Annotation::Static.is_key_ordering());
    }
}
