// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Resolved compound primary key.

use super::ClusteringOrder;
use crate::{error::CodecError, meta::PropertyDescriptor, value::Value};

/// Partition and clustering components of an embedded id.
///
/// There is always at least one partition component: without an explicit
/// partition key the first clustering component is promoted.
#[derive(Debug, Clone)]
pub struct CompoundKeyDescriptor {
    class_name:            String,
    partition_components:  Vec<PropertyDescriptor>,
    clustering_components: Vec<PropertyDescriptor>,
    clustering_order:      Vec<ClusteringOrder>
}

impl CompoundKeyDescriptor {
    /// Split ordered components into partition and clustering groups.
    ///
    /// `components` pairs each descriptor with its partition-key flag, in
    /// position order.
    pub(crate) fn assemble(
        class_name: String,
        components: Vec<(bool, PropertyDescriptor)>,
        mut clustering_order: Vec<ClusteringOrder>
    ) -> Self {
        let (partition, clustering): (Vec<_>, Vec<_>) =
            components.into_iter().partition(|(partition_key, _)| *partition_key);
        let mut partition_components: Vec<PropertyDescriptor> =
            partition.into_iter().map(|(_, p)| p).collect();
        let mut clustering_components: Vec<PropertyDescriptor> =
            clustering.into_iter().map(|(_, p)| p).collect();

        if partition_components.is_empty() && !clustering_components.is_empty() {
            let mut promoted = clustering_components.remove(0);
            clustering_order.retain(|o| o.column != promoted.column);
            promoted.clustering = None;
            partition_components.push(promoted);
        }

        Self {
            class_name,
            partition_components,
            clustering_components,
            clustering_order
        }
    }

    /// Name of the compound key class.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Partition key components in order.
    #[must_use]
    pub fn partition_components(&self) -> &[PropertyDescriptor] {
        &self.partition_components
    }

    /// Clustering components in order.
    #[must_use]
    pub fn clustering_components(&self) -> &[PropertyDescriptor] {
        &self.clustering_components
    }

    /// Clustering columns with their direction.
    #[must_use]
    pub fn clustering_order(&self) -> &[ClusteringOrder] {
        &self.clustering_order
    }

    /// Every component, partition first.
    pub fn components(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.partition_components
            .iter()
            .chain(&self.clustering_components)
    }

    /// Physical partition key column names.
    #[must_use]
    pub fn partition_columns(&self) -> Vec<&str> {
        self.partition_components.iter().map(PropertyDescriptor::column).collect()
    }

    /// Physical clustering column names.
    #[must_use]
    pub fn clustering_columns(&self) -> Vec<&str> {
        self.clustering_components.iter().map(PropertyDescriptor::column).collect()
    }

    /// Encode a record keyed by component name into a record keyed by column.
    ///
    /// Missing components encode as null.
    ///
    /// # Errors
    ///
    /// Returns the first component error, or a shape error for non-records.
    pub fn encode(&self, value: &Value) -> Result<Value, CodecError> {
        let Value::Record(fields) = value else {
            return record_only(&self.class_name, value);
        };
        self.components()
            .map(|c| {
                let v = lookup(fields, c.name());
                Ok((c.column().to_string(), c.encode(v)?))
            })
            .collect::<Result<Vec<_>, CodecError>>()
            .map(Value::Record)
    }

    /// Decode a record keyed by column into a record keyed by component name.
    ///
    /// # Errors
    ///
    /// Returns the first component error, or a shape error for non-records.
    pub fn decode(&self, value: &Value) -> Result<Value, CodecError> {
        let Value::Record(columns) = value else {
            return record_only(&self.class_name, value);
        };
        self.components()
            .map(|c| {
                let v = lookup(columns, c.column());
                Ok((c.name().to_string(), c.decode(v)?))
            })
            .collect::<Result<Vec<_>, CodecError>>()
            .map(Value::Record)
    }
}

static NULL: Value = Value::Null;

fn lookup<'v>(entries: &'v [(String, Value)], name: &str) -> &'v Value {
    entries
        .iter()
        .find(|(n, _)| n == name)
        .map_or(&NULL, |(_, v)| v)
}

fn record_only(class: &str, value: &Value) -> Result<Value, CodecError> {
    match value {
        Value::Null => Ok(Value::Null),
        other => Err(CodecError::UnexpectedValue {
            codec:    class.to_string(),
            expected: "record".to_string(),
            actual:   other.kind().to_string()
        })
    }
}
