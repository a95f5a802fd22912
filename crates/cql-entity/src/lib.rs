// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # cql-entity
//!
//! Map annotated Rust structs onto wide-column store tables.
//!
//! `#[derive(Entity)]` describes a struct; [`EntityRegistry::bootstrap`]
//! turns every described struct into an immutable [`EntityDescriptor`]
//! holding physical names, the primary key layout, consistency levels and
//! a resolved codec per property. Misconfigured entities fail bootstrap
//! with a [`MappingError`] naming the field and the class.
//!
//! ## Quick Start
//!
//! ```rust
//! use cql_entity::{ConfigurationContext, Entity, EntityRegistry, Value};
//!
//! #[derive(Entity)]
//! #[entity(keyspace = "app", naming = "snake_case")]
//! pub struct UserProfile {
//!     #[id]
//!     pub id:           i64,
//!     #[column]
//!     pub display_name: String,
//!     #[column]
//!     pub tags:         Vec<String>,
//! }
//!
//! let config = ConfigurationContext::default();
//! let registry = EntityRegistry::bootstrap(&config).unwrap();
//! let profile = registry.get_for::<UserProfile>().unwrap();
//!
//! assert_eq!(profile.table(), "user_profile");
//! assert_eq!(profile.property("display_name").unwrap().column(), "display_name");
//! assert_eq!(
//!     profile.id().encode(&Value::BigInt(7)).unwrap(),
//!     Value::BigInt(7)
//! );
//! ```
//!
//! ## Compound Keys
//!
//! ```rust
//! use cql_entity::{CompoundKey, ConfigurationContext, Entity, EntityMetaBuilder, Mapped};
//!
//! #[derive(CompoundKey)]
//! pub struct EventKey {
//!     #[partition_key(1)]
//!     pub tenant: String,
//!     #[clustering(1, reversed)]
//!     pub seq:    i64,
//! }
//!
//! #[derive(Entity)]
//! #[entity(keyspace = "app")]
//! pub struct Event {
//!     #[embedded_id]
//!     pub key:  EventKey,
//!     #[column]
//!     pub body: String,
//! }
//!
//! let config = ConfigurationContext::default();
//! let event = EntityMetaBuilder::new(&config).build(&Event::class_descriptor()).unwrap();
//! assert_eq!(event.partition_key_columns(), ["tenant"]);
//! assert_eq!(event.clustering_columns(), ["seq"]);
//! assert_eq!(event.schema().column("seq").unwrap().ty.to_string(), "bigint");
//! ```
//!
//! ## Crates
//!
//! | Crate | Contents |
//! |-------|----------|
//! | `cql-entity-core` | Descriptors, codecs, key ordering, registry |
//! | `cql-entity-derive-impl` | `Entity`, `CompoundKey`, `MappedEnum` derives |
//!
//! See the derive documentation for the full attribute reference.

pub use cql_entity_core::*;
pub use cql_entity_derive_impl::{CompoundKey, Entity, MappedEnum};
