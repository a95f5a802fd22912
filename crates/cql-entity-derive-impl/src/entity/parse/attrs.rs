// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity-level attribute parsing with darling.
//!
//! # Supported Attributes
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `table` | No | class name through the naming strategy | Table name, used verbatim |
//! | `keyspace` | No | configured default keyspace | Keyspace name |
//! | `naming` | No | configured strategy | `"snake_case"`, `"case_sensitive"`, `"lower_case"` |
//! | `insert` | No | configured strategy | `"all_fields"` or `"not_null_fields"` |
//! | `schema_update` | No | configured flag | Allow schema updates for this table |
//! | `consistency` | No | configured levels | `consistency(read = "...", write = "...")` |
//!
//! The naming value is kept as written and checked at bootstrap, where an
//! unknown strategy fails the entity.

use darling::FromDeriveInput;
use syn::{Generics, Ident};

use super::{consistency::ConsistencyPairDef, insert::InsertDef};

/// Attributes parsed from `#[entity(...)]`.
///
/// # Example
///
/// ```rust,ignore
/// #[entity(
///     table = "user_profiles",
///     keyspace = "app",
///     naming = "snake_case",
///     insert = "not_null_fields",
///     consistency(read = "local_quorum", write = "quorum")
/// )]
/// ```
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity), supports(struct_named))]
pub struct EntityAttrs {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct generics; entities must not have any.
    pub generics: Generics,

    /// Explicit table name.
    #[darling(default)]
    pub table: Option<String>,

    /// Explicit keyspace name.
    #[darling(default)]
    pub keyspace: Option<String>,

    /// Naming strategy name.
    #[darling(default)]
    pub naming: Option<String>,

    /// Insert strategy.
    #[darling(default)]
    pub insert: Option<InsertDef>,

    /// Schema update override.
    #[darling(default)]
    pub schema_update: Option<bool>,

    /// Default consistency levels.
    #[darling(default)]
    pub consistency: Option<ConsistencyPairDef>
}
