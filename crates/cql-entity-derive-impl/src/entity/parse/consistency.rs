// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Consistency level values.
//!
//! Levels are written in snake case (`"local_quorum"`) and validated at
//! compile time, so a typo never reaches bootstrap.

use convert_case::{Case, Casing};
use darling::FromMeta;
use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::Ident;

/// Accepted consistency level names.
pub const LEVELS: [&str; 11] = [
    "any",
    "one",
    "two",
    "three",
    "quorum",
    "all",
    "local_quorum",
    "each_quorum",
    "local_one",
    "serial",
    "local_serial"
];

/// A validated consistency level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyDef(String);

impl ConsistencyDef {
    /// Snake case level name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl FromMeta for ConsistencyDef {
    /// Parse a level name, case-insensitive.
    fn from_string(value: &str) -> darling::Result<Self> {
        let normalized = value.trim().to_lowercase().replace(['-', ' '], "_");
        if LEVELS.contains(&normalized.as_str()) {
            Ok(Self(normalized))
        } else {
            Err(darling::Error::unknown_value(value))
        }
    }
}

impl ToTokens for ConsistencyDef {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let variant = Ident::new(&self.name().to_case(Case::Pascal), Span::call_site());
        tokens.extend(quote! { ::cql_entity::ConsistencyLevel::#variant });
    }
}

/// Read and write levels, as in `consistency(read = "quorum", write = "one")`.
#[derive(Debug, Clone, Default, FromMeta)]
pub struct ConsistencyPairDef {
    /// Read level.
    #[darling(default)]
    pub read:  Option<ConsistencyDef>,
    /// Write level.
    #[darling(default)]
    pub write: Option<ConsistencyDef>
}

impl ConsistencyPairDef {
    /// Whether neither level is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read.is_none() && self.write.is_none()
    }

    /// `(read, write)` as `Option<ConsistencyLevel>` expressions.
    pub fn tokens(&self) -> (TokenStream, TokenStream) {
        (option_tokens(self.read.as_ref()), option_tokens(self.write.as_ref()))
    }
}

fn option_tokens(level: Option<&ConsistencyDef>) -> TokenStream {
    match level {
        Some(level) => quote! { ::core::option::Option::Some(#level) },
        None => quote! { ::core::option::Option::None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels() {
        assert_eq!(ConsistencyDef::from_string("QUORUM").unwrap().name(), "quorum");
        assert_eq!(
            ConsistencyDef::from_string("local-quorum").unwrap().name(),
            "local_quorum"
        );
        assert!(ConsistencyDef::from_string("most").is_err());
    }

    #[test]
    fn renders_variant_path() {
        let level = ConsistencyDef::from_string("each_quorum").unwrap();
        let rendered = level.to_token_stream().to_string();
        assert!(rendered.contains("EachQuorum"));
    }
}
