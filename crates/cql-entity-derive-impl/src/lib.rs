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

//! Procedural macros for `cql-entity`. Use the `cql-entity` crate instead of
//! depending on this one directly; generated code refers to `::cql_entity`.
//!
//! # Attribute Quick Reference
//!
//! ## Entity-Level `#[entity(...)]`
//!
//! ```rust,ignore
//! #[derive(Entity)]
//! #[entity(
//!     table = "users",                  // Optional: verbatim table name
//!     keyspace = "app",                 // Optional: falls back to configuration
//!     naming = "snake_case",            // Optional: "snake_case" | "case_sensitive" | "lower_case"
//!     insert = "not_null_fields",       // Optional: "all_fields" | "not_null_fields"
//!     schema_update = true,             // Optional
//!     consistency(read = "local_quorum", write = "quorum")
//! )]
//! pub struct User { /* ... */ }
//! ```
//!
//! ## Field-Level Attributes
//!
//! ```rust,ignore
//! pub struct Event {
//!     #[embedded_id]                     // Compound key, type derives CompoundKey
//!     pub key: EventKey,
//!
//!     #[column(static_column)]           // Shared by the partition
//!     pub owner: String,
//!
//!     #[column(index, ttl = 86400)]      // Secondary index, default TTL
//!     pub body: String,
//!
//!     #[column]
//!     #[element(enumerated(ordinal))]    // List of enums stored as int
//!     pub flags: Vec<Status>,
//!
//!     #[column]
//!     #[codec(LongToText)]               // Custom codec, Codec + Default
//!     pub version: i64,
//!
//!     #[counter]
//!     pub views: Counter,
//!
//!     #[transient]
//!     pub cache: Option<String>,
//! }
//! ```
//!
//! # Generated Code Overview
//!
//! | Derive | Generates |
//! |--------|-----------|
//! | `Entity` | `impl Mapped`, link-time registration for `EntityRegistry` |
//! | `CompoundKey` | `impl Mapped`, `impl MappedType` (mapped object) |
//! | `MappedEnum` | `impl MappedType` (enum), variant name helpers, `Into<Value>` |

mod compound_key;
mod entity;
mod mapped_enum;

use proc_macro::TokenStream;

/// Derive the class descriptor of an entity and register it.
///
/// # Entity Attributes
///
/// | Attribute | Default | Description |
/// |-----------|---------|-------------|
/// | `table` | struct name through the naming strategy | Table name |
/// | `keyspace` | configured default keyspace | Keyspace |
/// | `naming` | configured strategy | Naming strategy |
/// | `insert` | configured strategy | Insert strategy |
/// | `schema_update` | configured flag | Schema update |
/// | `consistency(read, write)` | configured levels | Default consistency |
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `#[id]`, `#[id(name = "..")]` | Simple primary key |
/// | `#[embedded_id]` | Compound primary key |
/// | `#[column(...)]` | Mapped column: `name`, `static_column`, `index`, `ttl`, `time_uuid`, `json`, `empty_if_null` |
/// | `#[counter]` | Counter column |
/// | `#[transient]` | Never mapped |
/// | `#[parent]` | Inherit the fields of a `CompoundKey`/`Entity` type |
/// | `#[enumerated(ordinal)]` | Store an enum by ordinal |
/// | `#[codec(Type)]` | Custom codec |
/// | `#[runtime_codec("name")]` | Codec registered in the configuration |
/// | `#[type_transformer(key = K, value = V)]` | Map key/value codecs |
/// | `#[element(..)]`, `#[key(..)]`, `#[value(..)]` | Directives on type arguments |
/// | `#[consistency(read = "..", write = "..")]` | Per-field consistency |
///
/// # Example
///
/// ```rust,ignore
/// use cql_entity::Entity;
///
/// #[derive(Entity)]
/// #[entity(keyspace = "app", naming = "snake_case")]
/// pub struct UserProfile {
///     #[id]
///     pub id: i64,
///     #[column]
///     pub display_name: String,
///     #[column]
///     pub tags: Vec<String>,
/// }
/// ```
#[proc_macro_derive(
    Entity,
    attributes(
        entity,
        id,
        embedded_id,
        column,
        counter,
        transient,
        parent,
        enumerated,
        codec,
        runtime_codec,
        type_transformer,
        element,
        key,
        value,
        consistency
    )
)]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive(input)
}

/// Derive the class descriptor of a compound primary key.
///
/// Components use either `#[partition_key(n)]` / `#[clustering(n,
/// reversed)]` or the legacy `#[order(n, partition_key, reversed)]`, never
/// both in one struct.
///
/// ```rust,ignore
/// #[derive(CompoundKey)]
/// pub struct EventKey {
///     #[partition_key(1)]
///     pub tenant: String,
///     #[clustering(1, reversed)]
///     pub at: DateTime<Utc>,
/// }
/// ```
#[proc_macro_derive(
    CompoundKey,
    attributes(
        entity,
        column,
        partition_key,
        clustering,
        order,
        transient,
        parent,
        enumerated,
        codec,
        runtime_codec,
        consistency
    )
)]
pub fn derive_compound_key(input: TokenStream) -> TokenStream {
    compound_key::derive(input)
}

/// Map a fieldless enum onto the store's enum codecs.
///
/// ```rust,ignore
/// #[derive(MappedEnum)]
/// pub enum Status {
///     Draft,
///     Published,
/// }
/// ```
#[proc_macro_derive(MappedEnum)]
pub fn derive_mapped_enum(input: TokenStream) -> TokenStream {
    mapped_enum::derive(input)
}
