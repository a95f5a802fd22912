// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity derive macro implementation.
//!
//! ```text
//! entity.rs (orchestrator)
//! │
//! ├── parse/          → attribute parsing (EntityDef, FieldDef)
//! └── descriptor.rs   → ClassDescriptor expression
//! ```
//!
//! # Generated Code
//!
//! | Item | Purpose |
//! |------|---------|
//! | `impl Mapped for User` | class descriptor with every field and annotation |
//! | `inventory::submit!` | registers `User` for `EntityRegistry::bootstrap` |
//!
//! Nothing is validated beyond attribute syntax here. Mapping rules (one
//! identifier, codec compatibility, key ordering) are checked when the
//! registry parses the descriptor.

pub mod descriptor;
pub mod parse;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use self::parse::EntityDef;

/// Main entry point for the Entity derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match EntityDef::from_derive_input(&input) {
        Ok(entity) => generate(&entity).into(),
        Err(err) => err.write_errors().into()
    }
}

fn generate(entity: &EntityDef) -> TokenStream2 {
    let ident = &entity.ident;
    let name = descriptor::class_name(entity);
    let descriptor = descriptor::class_descriptor(entity, &class_annotations(entity));

    quote! {
        impl ::cql_entity::Mapped for #ident {
            const CLASS_NAME: &'static str = #name;

            fn class_descriptor() -> ::cql_entity::ClassDescriptor {
                #descriptor
            }
        }

        ::cql_entity::inventory::submit! {
            ::cql_entity::EntityClass::new(
                <#ident as ::cql_entity::Mapped>::CLASS_NAME,
                <#ident as ::cql_entity::Mapped>::class_descriptor
            )
        }
    }
}

/// `ClassAnnotation` expressions from `#[entity(...)]`.
fn class_annotations(entity: &EntityDef) -> Vec<TokenStream2> {
    let attrs = &entity.attrs;
    let table = option_string(attrs.table.as_deref());
    let keyspace = option_string(attrs.keyspace.as_deref());
    let schema_update = match attrs.schema_update {
        Some(flag) => quote! { ::core::option::Option::Some(#flag) },
        None => quote! { ::core::option::Option::None }
    };
    let mut annotations = vec![quote! {
        ::cql_entity::ClassAnnotation::Entity {
            table: #table,
            keyspace: #keyspace,
            schema_update: #schema_update
        }
    }];

    if attrs.naming.is_some() || attrs.insert.is_some() {
        let naming = option_string(attrs.naming.as_deref());
        let insert = match attrs.insert {
            Some(insert) => quote! { ::core::option::Option::Some(#insert) },
            None => quote! { ::core::option::Option::None }
        };
        annotations.push(quote! {
            ::cql_entity::ClassAnnotation::Strategy { naming: #naming, insert: #insert }
        });
    }

    if let Some(pair) = attrs.consistency.as_ref().filter(|p| !p.is_empty()) {
        let (read, write) = pair.tokens();
        annotations.push(quote! {
            ::cql_entity::ClassAnnotation::Consistency { read: #read, write: #write }
        });
    }

    annotations
}

fn option_string(value: Option<&str>) -> TokenStream2 {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(::std::string::String::from(#value)) },
        None => quote! { ::core::option::Option::None }
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    fn expand(input: DeriveInput) -> String {
        generate(&EntityDef::from_derive_input(&input).unwrap()).to_string()
    }

    #[test]
    fn registers_the_entity() {
        let rendered = expand(parse_quote! {
            #[entity(keyspace = "app")]
            pub struct User {
                #[id]
                pub id: i64,
                #[column]
                pub name: String,
            }
        });
        assert!(rendered.contains("impl :: cql_entity :: Mapped for User"));
        assert!(rendered.contains("const CLASS_NAME"));
        assert!(rendered.contains("Mapped > :: CLASS_NAME"));
        assert!(rendered.contains("inventory :: submit !"));
        assert!(rendered.contains("EntityClass :: new"));
        assert!(rendered.contains("\"app\""));
    }

    #[test]
    fn strategy_and_consistency_annotations() {
        let rendered = expand(parse_quote! {
            #[entity(
                naming = "snake_case",
                insert = "not_null_fields",
                consistency(read = "quorum")
            )]
            pub struct User {
                #[id]
                pub id: i64,
            }
        });
        assert!(rendered.contains("ClassAnnotation :: Strategy"));
        assert!(rendered.contains("\"snake_case\""));
        assert!(rendered.contains("NotNullFields"));
        assert!(rendered.contains("ClassAnnotation :: Consistency"));
        assert!(rendered.contains("Quorum"));
    }

    #[test]
    fn no_strategy_annotation_without_overrides() {
        let rendered = expand(parse_quote! {
            pub struct User {
                #[id]
                pub id: i64,
            }
        });
        assert!(!rendered.contains("Strategy"));
        assert!(!rendered.contains("ClassAnnotation :: Consistency"));
    }

    #[test]
    fn parent_field_becomes_parent_class() {
        let rendered = expand(parse_quote! {
            pub struct Post {
                #[parent]
                pub audit: Audit,
                #[column]
                pub title: String,
            }
        });
        assert!(rendered.contains("with_parent"));
        assert!(rendered.contains("Audit as :: cql_entity :: Mapped"));
        assert!(!rendered.contains("\"audit\""));
    }
}
