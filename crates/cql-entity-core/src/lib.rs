// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime core of cql-entity.
//!
//! This crate turns class descriptors (normally emitted by
//! `#[derive(Entity)]`) into immutable entity descriptors for a wide-column
//! store: physical names, primary key layout, consistency settings and one
//! codec per property. It performs no I/O.
//!
//! # Overview
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Logical to physical name transformation |
//! | [`introspect`] | Type argument inference and ancestor walks |
//! | [`codec`] | Codec variants and [`CodecResolver`] |
//! | [`key`] | Compound key component ordering |
//! | [`meta`] | [`PropertyMetaBuilder`] and [`EntityMetaBuilder`] |
//! | [`registry`] | Link-time entity discovery and bootstrap |
//! | [`schema`] | Table schema projection |
//!
//! # Usage
//!
//! Most users should depend on `cql-entity`, which re-exports this crate
//! together with the derives. Descriptors can also be built by hand:
//!
//! ```rust
//! use cql_entity_core::{
//!     Annotation, ClassAnnotation, ClassDescriptor, ConfigurationContext, EntityMetaBuilder,
//!     NativeType, TypeRef
//! };
//!
//! let class = ClassDescriptor::new("app::UserProfile")
//!     .with_annotation(ClassAnnotation::Entity {
//!         table:         None,
//!         keyspace:      Some("app".to_string()),
//!         schema_update: None
//!     })
//!     .with_field("id", TypeRef::native(NativeType::BigInt), [Annotation::Id { name: None }])
//!     .with_field("name", TypeRef::native(NativeType::Text), [Annotation::Column { name: None }]);
//!
//! let config = ConfigurationContext::default();
//! let entity = EntityMetaBuilder::new(&config).build(&class).unwrap();
//! assert_eq!(entity.table(), "userprofile");
//! assert_eq!(entity.partition_key_columns(), ["id"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod annotation;
pub mod codec;
pub mod config;
pub mod error;
pub mod introspect;
pub mod key;
pub mod meta;
pub mod naming;
pub mod reflect;
pub mod registry;
pub mod schema;
pub mod types;
pub mod value;

pub use annotation::{Annotation, ClassAnnotation, CodecClass, EnumEncoding, InsertStrategy};
pub use codec::{Codec, CodecKind, CodecResolver, IdentityCodec, ScalarCodec};
pub use config::{ConfigurationContext, ConsistencyLevel, ConsistencyPair};
pub use error::{CodecError, MappingError};
pub use key::{ClusteringDirection, ClusteringOrder, CompoundKeyDescriptor, KeyVocabulary};
pub use meta::{
    EntityDescriptor, EntityMetaBuilder, PropertyCodec, PropertyDescriptor, PropertyKind,
    PropertyMetaBuilder
};
pub use naming::NamingStrategy;
pub use reflect::{ClassDescriptor, Counter, FieldDescriptor, Mapped, MappedType};
pub use registry::{EntityClass, EntityRegistry};
pub use schema::{ColumnDefinition, ColumnType, TableSchema};
pub use types::{ArgPosition, EnumDescriptor, NativeType, ObjectType, RawType, TypeArg, TypeRef};
pub use value::Value;

/// Re-export for `#[derive(Entity)]` registration.
pub use inventory;

/// Re-export for the `Timestamp` native type.
pub use chrono;
/// Re-export for the `Varint` native type.
pub use num_bigint;
/// Re-export for the `Decimal` native type.
pub use rust_decimal;
/// Re-export for the `Uuid` native type.
pub use uuid;
