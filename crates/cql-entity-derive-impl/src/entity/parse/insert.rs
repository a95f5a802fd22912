// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Insert strategy values.

use darling::FromMeta;
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

/// How rows are written on insert.
///
/// | Value | Columns written |
/// |-------|-----------------|
/// | `"all_fields"` | every mapped column |
/// | `"not_null_fields"` | only non-null columns |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertDef {
    /// Every mapped column.
    AllFields,
    /// Only non-null columns.
    NotNullFields
}

impl FromMeta for InsertDef {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value.to_lowercase().replace('-', "_").as_str() {
            "all_fields" | "all" => Ok(Self::AllFields),
            "not_null_fields" | "not_null" => Ok(Self::NotNullFields),
            _ => Err(darling::Error::unknown_value(value))
        }
    }
}

impl ToTokens for InsertDef {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(match self {
            Self::AllFields => quote! { ::cql_entity::InsertStrategy::AllFields },
            Self::NotNullFields => quote! { ::cql_entity::InsertStrategy::NotNullFields }
        });
    }
}
