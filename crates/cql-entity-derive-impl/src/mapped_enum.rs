// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! MappedEnum derive macro implementation.
//!
//! For a fieldless enum the derive generates:
//!
//! | Item | Purpose |
//! |------|---------|
//! | `impl MappedType` | enum type reference with variants in declaration order |
//! | `VARIANTS` | variant names, index = ordinal |
//! | `variant_name` / `from_variant_name` | name conversions |
//! | `From<Self> for Value` | `Value::Enum(name)` |

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Main entry point for the MappedEnum derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into()
    }
}

fn generate(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let ident = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "MappedEnum can only be derived for enums"
        ));
    };
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            input,
            "MappedEnum needs at least one variant"
        ));
    }
    if let Some(variant) = data
        .variants
        .iter()
        .find(|v| !matches!(v.fields, Fields::Unit))
    {
        return Err(syn::Error::new_spanned(
            variant,
            "MappedEnum variants cannot carry data"
        ));
    }

    let variants: Vec<_> = data.variants.iter().map(|v| &v.ident).collect();
    let names: Vec<String> = variants.iter().map(ToString::to_string).collect();

    Ok(quote! {
        impl #ident {
            /// Variant names; the position of a name is its ordinal.
            pub const VARIANTS: &'static [&'static str] = &[#(#names),*];

            /// Name of this variant.
            #[must_use]
            pub const fn variant_name(&self) -> &'static str {
                match self {
                    #(Self::#variants => #names),*
                }
            }

            /// Variant with the given name.
            #[must_use]
            pub fn from_variant_name(name: &str) -> ::core::option::Option<Self> {
                match name {
                    #(#names => ::core::option::Option::Some(Self::#variants),)*
                    _ => ::core::option::Option::None
                }
            }
        }

        impl ::cql_entity::MappedType for #ident {
            fn type_ref() -> ::cql_entity::TypeRef {
                ::cql_entity::TypeRef::Raw(::cql_entity::RawType::Enum(
                    ::cql_entity::EnumDescriptor::new(
                        concat!(module_path!(), "::", stringify!(#ident)),
                        Self::VARIANTS.iter().copied()
                    )
                ))
            }
        }

        impl ::core::convert::From<#ident> for ::cql_entity::Value {
            fn from(value: #ident) -> Self {
                ::cql_entity::Value::Enum(::std::string::String::from(value.variant_name()))
            }
        }
    })
}
