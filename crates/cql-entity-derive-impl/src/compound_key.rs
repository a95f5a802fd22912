// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! CompoundKey derive macro implementation.
//!
//! A compound key struct describes its components with `#[partition_key]`,
//! `#[clustering]` or the legacy `#[order]` attribute. The derive emits a
//! class descriptor without class annotations and a `MappedType` impl that
//! points back at it, so an `#[embedded_id]` field of this type can be
//! parsed into a compound key.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

use crate::entity::{descriptor, parse::EntityDef};

/// Main entry point for the CompoundKey derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match EntityDef::from_derive_input(&input) {
        Ok(key) => generate(&key).into(),
        Err(err) => err.write_errors().into()
    }
}

fn generate(key: &EntityDef) -> TokenStream2 {
    let ident = &key.ident;
    let name = descriptor::class_name(key);
    let descriptor = descriptor::class_descriptor(key, &[]);

    quote! {
        impl ::cql_entity::Mapped for #ident {
            const CLASS_NAME: &'static str = #name;

            fn class_descriptor() -> ::cql_entity::ClassDescriptor {
                #descriptor
            }
        }

        impl ::cql_entity::MappedType for #ident {
            fn type_ref() -> ::cql_entity::TypeRef {
                ::cql_entity::TypeRef::Raw(::cql_entity::RawType::Object(
                    ::cql_entity::ObjectType::mapped(
                        <#ident as ::cql_entity::Mapped>::CLASS_NAME,
                        <#ident as ::cql_entity::Mapped>::class_descriptor
                    )
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    #[test]
    fn emits_mapped_object_type() {
        let input: DeriveInput = parse_quote! {
            pub struct EventKey {
                #[partition_key(1)]
                pub tenant: String,
                #[clustering(1, reversed)]
                pub at: i64,
            }
        };
        let rendered = generate(&EntityDef::from_derive_input(&input).unwrap()).to_string();
        assert!(rendered.contains("ObjectType :: mapped"));
        assert!(rendered.contains("const CLASS_NAME"));
        assert!(rendered.contains("PartitionKey"));
        assert!(rendered.contains("ClusteringColumn"));
        assert!(!rendered.contains("inventory"));
        assert!(!rendered.contains("ClassAnnotation"));
    }
}
