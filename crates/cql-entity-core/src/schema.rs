// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Table schema projection of an entity.
//!
//! The projection carries what a schema generator consumes: physical
//! columns with their store types, the primary key layout and secondary
//! indexes. Column types come from each property's codec target type.
//! Rendering statements from it is left to the caller.
//!
//! ```text
//! EntityDescriptor ──► TableSchema
//!                        ├── columns      (name, ColumnType, static)
//!                        ├── partition_key
//!                        ├── clustering_columns + clustering_order
//!                        └── indexes
//! ```

use std::fmt;

use crate::{
    key::ClusteringOrder,
    meta::{EntityDescriptor, IndexDescriptor, PropertyCodec, PropertyDescriptor},
    types::NativeType
};

/// Store column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Native scalar type.
    Native(NativeType),
    /// Time-based UUID.
    TimeUuid,
    /// Counter.
    Counter,
    /// `list<element>`.
    List(NativeType),
    /// `set<element>`.
    Set(NativeType),
    /// `map<key, value>`.
    Map(NativeType, NativeType)
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native(native) => f.write_str(native.cql_name()),
            Self::TimeUuid => f.write_str("timeuuid"),
            Self::Counter => f.write_str("counter"),
            Self::List(element) => write!(f, "list<{}>", element.cql_name()),
            Self::Set(element) => write!(f, "set<{}>", element.cql_name()),
            Self::Map(key, value) => write!(f, "map<{}, {}>", key.cql_name(), value.cql_name())
        }
    }
}

/// One physical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// Physical column name.
    pub name:          String,
    /// Store type.
    pub ty:            ColumnType,
    /// Partition-wide column.
    pub static_column: bool
}

/// Schema of one entity table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Keyspace name.
    pub keyspace:           String,
    /// Table name.
    pub table:              String,
    /// Columns, key components first.
    pub columns:            Vec<ColumnDefinition>,
    /// Partition key columns in order.
    pub partition_key:      Vec<String>,
    /// Clustering columns in order.
    pub clustering_columns: Vec<String>,
    /// Clustering directions.
    pub clustering_order:   Vec<ClusteringOrder>,
    /// Secondary indexes.
    pub indexes:            Vec<IndexDescriptor>
}

impl TableSchema {
    /// Project `entity` onto its table schema.
    #[must_use]
    pub fn of(entity: &EntityDescriptor) -> Self {
        let mut columns = Vec::with_capacity(entity.properties().len());
        let mut indexes = Vec::new();
        for property in entity.properties() {
            match property.compound_key() {
                Some(key) => columns.extend(key.components().map(column_of)),
                None => columns.push(column_of(property))
            }
            if let Some(index) = property.index() {
                indexes.push(index.clone());
            }
        }
        Self {
            keyspace: entity.keyspace().to_string(),
            table: entity.table().to_string(),
            columns,
            partition_key: owned(entity.partition_key_columns()),
            clustering_columns: owned(entity.clustering_columns()),
            clustering_order: entity.clustering_order().to_vec(),
            indexes
        }
    }

    /// Column by physical name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl EntityDescriptor {
    /// Table schema projection.
    #[must_use]
    pub fn schema(&self) -> TableSchema {
        TableSchema::of(self)
    }
}

fn owned(columns: Vec<&str>) -> Vec<String> {
    columns.into_iter().map(str::to_string).collect()
}

fn column_of(property: &PropertyDescriptor) -> ColumnDefinition {
    let ty = match property.codec() {
        PropertyCodec::Simple(codec) => match codec.target_native() {
            NativeType::Uuid if property.is_time_uuid() => ColumnType::TimeUuid,
            native => ColumnType::Native(native)
        },
        PropertyCodec::List(list) => ColumnType::List(list.element().target_native()),
        PropertyCodec::Set(set) => ColumnType::Set(set.element().target_native()),
        PropertyCodec::Map(map) => {
            ColumnType::Map(map.key().target_native(), map.value().target_native())
        }
        PropertyCodec::Counter => ColumnType::Counter,
        // compound keys are expanded by the caller
        PropertyCodec::Compound(_) => ColumnType::Native(NativeType::Blob)
    };
    ColumnDefinition {
        name: property.column().to_string(),
        ty,
        static_column: property.is_static()
    }
}
