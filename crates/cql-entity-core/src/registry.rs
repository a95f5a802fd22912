// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity discovery and the bootstrap registry.
//!
//! `#[derive(Entity)]` submits an [`EntityClass`] for every entity at link
//! time. [`EntityRegistry::bootstrap`] parses all of them once and fails on
//! the first malformed entity, so nothing is published unless every entity
//! is valid. The resulting registry is read-only and shares descriptors
//! through [`Arc`].
//!
//! ```rust,ignore
//! use cql_entity::{ConfigurationContext, EntityRegistry};
//!
//! let config = ConfigurationContext::default().with_keyspace("app");
//! let registry = EntityRegistry::bootstrap(&config)?;
//! let users = registry.get_for::<User>().expect("registered");
//! assert_eq!(users.schema().partition_key, ["id"]);
//! ```

use std::{
    collections::{HashMap, hash_map::Entry},
    fmt,
    sync::Arc
};

use tracing::info;

use crate::{
    config::ConfigurationContext,
    error::MappingError,
    meta::{EntityDescriptor, EntityMetaBuilder},
    reflect::{ClassDescriptor, Mapped}
};

/// An entity class discovered at link time.
pub struct EntityClass {
    /// Canonical type path.
    pub type_path:  &'static str,
    /// Builds the class descriptor.
    pub descriptor: fn() -> ClassDescriptor
}

impl EntityClass {
    /// Entity class entry.
    #[must_use]
    pub const fn new(type_path: &'static str, descriptor: fn() -> ClassDescriptor) -> Self {
        Self {
            type_path,
            descriptor
        }
    }
}

impl fmt::Debug for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityClass")
            .field("type_path", &self.type_path)
            .finish_non_exhaustive()
    }
}

inventory::collect!(EntityClass);

/// Every entity class linked into the binary.
pub fn entity_classes() -> impl Iterator<Item = &'static EntityClass> {
    inventory::iter::<EntityClass>()
}

/// Parsed entities keyed by canonical class name.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: HashMap<String, Arc<EntityDescriptor>>
}

impl EntityRegistry {
    /// Parse every linked entity class.
    ///
    /// # Errors
    ///
    /// Returns the first [`MappingError`]; no registry is produced.
    pub fn bootstrap(config: &ConfigurationContext) -> Result<Self, MappingError> {
        Self::from_classes(config, entity_classes().map(|class| (class.descriptor)()))
    }

    /// Parse an explicit set of classes.
    ///
    /// # Errors
    ///
    /// Returns the first [`MappingError`]; no registry is produced. Two
    /// classes with the same canonical name fail with
    /// [`MappingError::DuplicateEntity`].
    pub fn from_classes(
        config: &ConfigurationContext,
        classes: impl IntoIterator<Item = ClassDescriptor>
    ) -> Result<Self, MappingError> {
        let builder = EntityMetaBuilder::new(config);
        let mut entities = HashMap::new();
        for class in classes {
            let entity = builder.build(&class)?;
            match entities.entry(class.name) {
                Entry::Occupied(slot) => {
                    return Err(MappingError::DuplicateEntity {
                        class: slot.key().clone()
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(Arc::new(entity));
                }
            }
        }
        info!(entities = entities.len(), "entity registry ready");
        Ok(Self {
            entities
        })
    }

    /// Descriptor by canonical class name.
    #[must_use]
    pub fn get(&self, class_name: &str) -> Option<&Arc<EntityDescriptor>> {
        self.entities.get(class_name)
    }

    /// Descriptor of a mapped type.
    #[must_use]
    pub fn get_for<T: Mapped>(&self) -> Option<&Arc<EntityDescriptor>> {
        self.get(T::CLASS_NAME)
    }

    /// Number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether no entity is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All descriptors, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<EntityDescriptor>> {
        self.entities.values()
    }
}
