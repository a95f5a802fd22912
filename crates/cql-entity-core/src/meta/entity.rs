// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity descriptors and the entity parser.
//!
//! # Resolution Rules
//!
//! | Setting | Most specific wins |
//! |---------|--------------------|
//! | naming strategy | class `Strategy { naming }`, global configuration |
//! | table | explicit `Entity { table }` verbatim, class short name through the naming strategy |
//! | keyspace | `Entity { keyspace }`, configured default keyspace |
//! | consistency | class `Consistency`, per-table configuration, global default |
//! | insert strategy | class `Strategy { insert }`, global configuration |
//! | schema update | `Entity { schema_update }`, per-table flag, global flag |
//!
//! # Validation
//!
//! After the field walk the parser checks, in order: exactly one
//! identifier, unique physical columns, no static column in the primary
//! key, and clustering columns present whenever a static column exists.
//! Counters are then linked to the identifier.

use std::{collections::HashMap, sync::Arc};

use tracing::{debug, info, warn};

use super::{PropertyFilter, PropertyKind, PropertyMetaBuilder, property::PropertyDescriptor};
use crate::{
    annotation::{Annotation, ClassAnnotation, InsertStrategy},
    config::{ConfigurationContext, ConsistencyPair},
    error::MappingError,
    introspect::collect_fields,
    key::{ClusteringOrder, CompoundKeyDescriptor},
    naming::NamingStrategy,
    reflect::ClassDescriptor
};

/// Immutable mapping of one entity class.
#[derive(Debug, Clone)]
pub struct EntityDescriptor {
    class_name:      String,
    table:           String,
    keyspace:        String,
    consistency:     ConsistencyPair,
    insert_strategy: InsertStrategy,
    schema_update:   bool,
    naming:          NamingStrategy,
    properties:      Vec<Arc<PropertyDescriptor>>,
    id:              Arc<PropertyDescriptor>
}

impl EntityDescriptor {
    /// Canonical class name.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Physical table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Keyspace name.
    #[must_use]
    pub fn keyspace(&self) -> &str {
        &self.keyspace
    }

    /// `keyspace.table`.
    #[must_use]
    pub fn qualified_table(&self) -> String {
        format!("{}.{}", self.keyspace, self.table)
    }

    /// Default read and write consistency.
    #[must_use]
    pub const fn consistency(&self) -> ConsistencyPair {
        self.consistency
    }

    /// Insert strategy.
    #[must_use]
    pub const fn insert_strategy(&self) -> InsertStrategy {
        self.insert_strategy
    }

    /// Whether schema update is enabled for this table.
    #[must_use]
    pub const fn schema_update_enabled(&self) -> bool {
        self.schema_update
    }

    /// Naming strategy used for derived names.
    #[must_use]
    pub const fn naming_strategy(&self) -> NamingStrategy {
        self.naming
    }

    /// Properties in field order, identifier included.
    #[must_use]
    pub fn properties(&self) -> &[Arc<PropertyDescriptor>] {
        &self.properties
    }

    /// Property by logical name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties
            .iter()
            .find(|p| p.name() == name)
            .map(AsRef::as_ref)
    }

    /// The identifier property.
    #[must_use]
    pub fn id(&self) -> &PropertyDescriptor {
        &self.id
    }

    /// Compound key, when the identifier is an embedded id.
    #[must_use]
    pub fn compound_key(&self) -> Option<&CompoundKeyDescriptor> {
        self.id.compound_key()
    }

    /// Physical partition key columns.
    #[must_use]
    pub fn partition_key_columns(&self) -> Vec<&str> {
        self.compound_key()
            .map_or_else(|| vec![self.id.column()], CompoundKeyDescriptor::partition_columns)
    }

    /// Physical clustering columns.
    #[must_use]
    pub fn clustering_columns(&self) -> Vec<&str> {
        self.compound_key()
            .map(CompoundKeyDescriptor::clustering_columns)
            .unwrap_or_default()
    }

    /// Clustering columns with their direction.
    #[must_use]
    pub fn clustering_order(&self) -> &[ClusteringOrder] {
        self.compound_key()
            .map(CompoundKeyDescriptor::clustering_order)
            .unwrap_or_default()
    }

    /// Whether the table has clustering columns.
    #[must_use]
    pub fn is_clustered(&self) -> bool {
        self.compound_key()
            .is_some_and(|key| !key.clustering_components().is_empty())
    }

    /// Counter properties.
    pub fn counters(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties
            .iter()
            .filter(|p| p.kind() == PropertyKind::Counter)
            .map(AsRef::as_ref)
    }

    /// Whether every column of the table is a counter.
    #[must_use]
    pub fn is_counter_table(&self) -> bool {
        let mut columns = self
            .properties
            .iter()
            .filter(|p| !p.kind().is_id())
            .peekable();
        columns.peek().is_some() && columns.all(|p| p.kind() == PropertyKind::Counter)
    }
}

/// Parses annotated classes into [`EntityDescriptor`]s.
#[derive(Debug, Clone, Copy)]
pub struct EntityMetaBuilder<'a> {
    config: &'a ConfigurationContext
}

impl<'a> EntityMetaBuilder<'a> {
    /// Parser bound to a configuration.
    #[must_use]
    pub const fn new(config: &'a ConfigurationContext) -> Self {
        Self {
            config
        }
    }

    /// Parse `class` into an entity descriptor.
    ///
    /// # Errors
    ///
    /// Returns the first [`MappingError`] detected; nothing is partially
    /// built.
    pub fn build(&self, class: &ClassDescriptor) -> Result<EntityDescriptor, MappingError> {
        let naming = self.naming_strategy(class)?;
        let table = self.table_name(class, naming)?;
        let keyspace = self.keyspace(class)?;
        let (read, write) = class
            .find_annotation(|a| match a {
                ClassAnnotation::Consistency {
                    read,
                    write
                } => Some((*read, *write)),
                _ => None
            })
            .unwrap_or((None, None));
        let consistency = self.config.consistency_for(&table, read, write);
        let insert_strategy = class
            .find_annotation(|a| match a {
                ClassAnnotation::Strategy {
                    insert: Some(insert),
                    ..
                } => Some(*insert),
                _ => None
            })
            .unwrap_or(self.config.insert_strategy);
        let schema_update = match class.entity_annotation() {
            Some(ClassAnnotation::Entity {
                schema_update: Some(flag),
                ..
            }) => *flag,
            _ => self.config.schema_update_for(&table)
        };

        let builder = PropertyMetaBuilder::new(self.config, naming, consistency);
        let filter = PropertyFilter;
        let mut parsed: Vec<PropertyDescriptor> = Vec::new();
        let mut id_index: Option<usize> = None;
        for field in collect_fields(class, |f| filter.matches(f)) {
            let property = if field.has(|a| matches!(a, Annotation::Id { .. })) {
                builder.parse_id(field)?
            } else if field.has(|a| matches!(a, Annotation::EmbeddedId { .. })) {
                builder.parse_embedded_id(field)?
            } else {
                builder.parse_column(field)?
            };
            if property.kind().is_id() {
                if let Some(first) = id_index {
                    return Err(MappingError::DuplicateId {
                        class:  class.name.clone(),
                        first:  parsed[first].name().to_string(),
                        second: property.name().to_string()
                    });
                }
                id_index = Some(parsed.len());
            }
            parsed.push(property);
        }

        let Some(id_index) = id_index else {
            return Err(MappingError::MissingId {
                class: class.name.clone()
            });
        };
        check_unique_columns(class, &parsed)?;
        check_static_columns(class, &parsed, &parsed[id_index])?;

        let id = Arc::new(parsed[id_index].clone());
        let properties = parsed
            .into_iter()
            .enumerate()
            .map(|(i, mut property)| {
                if i == id_index {
                    return Arc::clone(&id);
                }
                if property.kind() == PropertyKind::Counter {
                    property.counter_id = Some(Arc::clone(&id));
                }
                Arc::new(property)
            })
            .collect();

        let entity = EntityDescriptor {
            class_name: class.name.clone(),
            table,
            keyspace,
            consistency,
            insert_strategy,
            schema_update,
            naming,
            properties,
            id
        };
        info!(
            entity = %entity.class_name,
            table = %entity.qualified_table(),
            properties = entity.properties.len(),
            "parsed entity"
        );
        Ok(entity)
    }

    fn naming_strategy(&self, class: &ClassDescriptor) -> Result<NamingStrategy, MappingError> {
        let declared = class.find_annotation(|a| match a {
            ClassAnnotation::Strategy {
                naming: Some(naming),
                ..
            } => Some(naming.clone()),
            _ => None
        });
        match declared {
            Some(value) => value
                .parse()
                .map_err(|value| MappingError::UnknownNamingStrategy {
                    value,
                    class: class.name.clone()
                }),
            None => Ok(self.config.naming_strategy)
        }
    }

    fn table_name(
        &self,
        class: &ClassDescriptor,
        naming: NamingStrategy
    ) -> Result<String, MappingError> {
        let table = match class.entity_annotation() {
            Some(ClassAnnotation::Entity {
                table: Some(table),
                ..
            }) => table.clone(),
            _ => naming.apply(class.short_name())
        };
        if table.trim().is_empty() {
            return Err(MappingError::BlankTableName {
                class: class.name.clone()
            });
        }
        Ok(table)
    }

    fn keyspace(&self, class: &ClassDescriptor) -> Result<String, MappingError> {
        if let Some(ClassAnnotation::Entity {
            keyspace: Some(keyspace),
            ..
        }) = class.entity_annotation()
            && !keyspace.trim().is_empty()
        {
            return Ok(keyspace.clone());
        }
        match self.config.keyspace.as_deref().map(str::trim) {
            Some(keyspace) if !keyspace.is_empty() => {
                warn!(entity = %class.name, keyspace, "no keyspace declared, using the configured default");
                Ok(keyspace.to_string())
            }
            _ => Err(MappingError::MissingKeyspace {
                class: class.name.clone()
            })
        }
    }
}

/// Physical columns of a property; an embedded id contributes its
/// components.
fn physical_columns(property: &PropertyDescriptor) -> Vec<(&str, &str)> {
    match property.compound_key() {
        Some(key) => key.components().map(|c| (c.column(), c.name())).collect(),
        None => vec![(property.column(), property.name())]
    }
}

fn check_unique_columns(
    class: &ClassDescriptor,
    properties: &[PropertyDescriptor]
) -> Result<(), MappingError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (column, field) in properties.iter().flat_map(physical_columns) {
        if let Some(first) = seen.insert(column, field) {
            return Err(MappingError::DuplicateColumn {
                class:  class.name.clone(),
                column: column.to_string(),
                first:  first.to_string(),
                second: field.to_string()
            });
        }
    }
    Ok(())
}

fn check_static_columns(
    class: &ClassDescriptor,
    properties: &[PropertyDescriptor],
    id: &PropertyDescriptor
) -> Result<(), MappingError> {
    let key_components: Vec<&PropertyDescriptor> = match id.compound_key() {
        Some(key) => key.components().collect(),
        None => vec![id]
    };
    if let Some(component) = key_components.iter().find(|c| c.is_static()) {
        return Err(MappingError::StaticKeyColumn {
            field: component.name().to_string(),
            class: class.name.clone()
        });
    }
    let clustered = id
        .compound_key()
        .is_some_and(|key| !key.clustering_components().is_empty());
    if let Some(property) = properties.iter().find(|p| p.is_static()) {
        if !clustered {
            return Err(MappingError::StaticWithoutClustering {
                field: property.name().to_string(),
                class: class.name.clone()
            });
        }
        debug!(entity = %class.name, column = %property.column(), "static column validated");
    }
    Ok(())
}
