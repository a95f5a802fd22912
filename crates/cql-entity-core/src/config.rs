// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Bootstrap configuration consumed by the entity parser.
//!
//! The serializable part ([`ConfigurationContext`] without its injected
//! services) can be loaded from JSON:
//!
//! ```rust
//! use cql_entity_core::{ConfigurationContext, ConsistencyLevel, NamingStrategy};
//!
//! let config = ConfigurationContext::from_json(
//!     r#"{ "keyspace": "app", "naming_strategy": "snake_case",
//!          "default_write_consistency": "quorum" }"#
//! )
//! .unwrap();
//! assert_eq!(config.keyspace.as_deref(), Some("app"));
//! assert_eq!(config.naming_strategy, NamingStrategy::SnakeCase);
//! assert_eq!(config.default_write_consistency, ConsistencyLevel::Quorum);
//! ```

use std::{collections::HashMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    annotation::InsertStrategy,
    codec::{Codec, JsonMapperFactory, SerdeJsonMapperFactory},
    naming::NamingStrategy
};

/// Consistency level of a read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyLevel {
    /// Any node, hinted handoff included.
    Any,
    /// One replica.
    #[default]
    One,
    /// Two replicas.
    Two,
    /// Three replicas.
    Three,
    /// Majority of replicas.
    Quorum,
    /// All replicas.
    All,
    /// Majority in the local datacenter.
    LocalQuorum,
    /// Majority in each datacenter.
    EachQuorum,
    /// One replica in the local datacenter.
    LocalOne,
    /// Linearizable.
    Serial,
    /// Linearizable in the local datacenter.
    LocalSerial
}

/// Read and write consistency pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConsistencyPair {
    /// Read consistency.
    pub read:  ConsistencyLevel,
    /// Write consistency.
    pub write: ConsistencyLevel
}

/// Configuration shared by every entity parsed during bootstrap.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationContext {
    /// Global default read consistency.
    pub default_read_consistency:  ConsistencyLevel,
    /// Global default write consistency.
    pub default_write_consistency: ConsistencyLevel,
    /// Per-table read consistency, keyed by physical table name.
    pub read_consistency_map:      HashMap<String, ConsistencyLevel>,
    /// Per-table write consistency, keyed by physical table name.
    pub write_consistency_map:     HashMap<String, ConsistencyLevel>,
    /// Global naming strategy.
    pub naming_strategy:           NamingStrategy,
    /// Default insert strategy.
    pub insert_strategy:           InsertStrategy,
    /// Keyspace used when an entity does not declare one.
    pub keyspace:                  Option<String>,
    /// Global schema update flag.
    pub schema_update_enabled:     bool,
    /// Per-table schema update flags.
    pub schema_update_map:         HashMap<String, bool>,
    #[serde(skip, default = "default_json_factory")]
    json_factory:                  Arc<dyn JsonMapperFactory>,
    #[serde(skip)]
    runtime_codecs:                HashMap<String, Arc<dyn Codec>>
}

fn default_json_factory() -> Arc<dyn JsonMapperFactory> {
    Arc::new(SerdeJsonMapperFactory)
}

impl Default for ConfigurationContext {
    fn default() -> Self {
        Self {
            default_read_consistency:  ConsistencyLevel::One,
            default_write_consistency: ConsistencyLevel::One,
            read_consistency_map:      HashMap::new(),
            write_consistency_map:     HashMap::new(),
            naming_strategy:           NamingStrategy::default(),
            insert_strategy:           InsertStrategy::default(),
            keyspace:                  None,
            schema_update_enabled:     false,
            schema_update_map:         HashMap::new(),
            json_factory:              default_json_factory(),
            runtime_codecs:            HashMap::new()
        }
    }
}

impl ConfigurationContext {
    /// Load the serializable settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the deserializer error for malformed documents or unknown
    /// enum values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the default keyspace.
    #[must_use]
    pub fn with_keyspace(mut self, keyspace: impl Into<String>) -> Self {
        self.keyspace = Some(keyspace.into());
        self
    }

    /// Set the global naming strategy.
    #[must_use]
    pub const fn with_naming_strategy(mut self, strategy: NamingStrategy) -> Self {
        self.naming_strategy = strategy;
        self
    }

    /// Replace the JSON mapper factory used by JSON-fallback codecs.
    #[must_use]
    pub fn with_json_factory(mut self, factory: Arc<dyn JsonMapperFactory>) -> Self {
        self.json_factory = factory;
        self
    }

    /// Register a codec instance for `RuntimeCodec` lookups.
    #[must_use]
    pub fn with_runtime_codec(mut self, name: impl Into<String>, codec: Arc<dyn Codec>) -> Self {
        self.runtime_codecs.insert(name.into(), codec);
        self
    }

    /// The JSON mapper factory.
    #[must_use]
    pub fn json_factory(&self) -> &Arc<dyn JsonMapperFactory> {
        &self.json_factory
    }

    /// Look up a runtime codec by name.
    #[must_use]
    pub fn runtime_codec(&self, name: &str) -> Option<&Arc<dyn Codec>> {
        self.runtime_codecs.get(name)
    }

    /// Resolve the consistency pair of a table.
    ///
    /// Precedence, most specific first: class override, per-table setting,
    /// global default.
    #[must_use]
    pub fn consistency_for(
        &self,
        table: &str,
        read_override: Option<ConsistencyLevel>,
        write_override: Option<ConsistencyLevel>
    ) -> ConsistencyPair {
        let read = read_override
            .or_else(|| self.read_consistency_map.get(table).copied())
            .unwrap_or(self.default_read_consistency);
        let write = write_override
            .or_else(|| self.write_consistency_map.get(table).copied())
            .unwrap_or(self.default_write_consistency);
        ConsistencyPair {
            read,
            write
        }
    }

    /// Whether schema update is enabled for a table.
    #[must_use]
    pub fn schema_update_for(&self, table: &str) -> bool {
        self.schema_update_map
            .get(table)
            .copied()
            .unwrap_or(self.schema_update_enabled)
    }
}

impl fmt::Debug for ConfigurationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut codecs: Vec<&String> = self.runtime_codecs.keys().collect();
        codecs.sort();
        f.debug_struct("ConfigurationContext")
            .field("default_read_consistency", &self.default_read_consistency)
            .field("default_write_consistency", &self.default_write_consistency)
            .field("read_consistency_map", &self.read_consistency_map)
            .field("write_consistency_map", &self.write_consistency_map)
            .field("naming_strategy", &self.naming_strategy)
            .field("insert_strategy", &self.insert_strategy)
            .field("keyspace", &self.keyspace)
            .field("schema_update_enabled", &self.schema_update_enabled)
            .field("schema_update_map", &self.schema_update_map)
            .field("runtime_codecs", &codecs)
            .finish_non_exhaustive()
    }
}
