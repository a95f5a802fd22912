// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parsed field annotations and their runtime representation.
//!
//! Every variant renders to the matching `cql_entity::Annotation` value.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::Path;

use crate::entity::parse::consistency::ConsistencyPairDef;

/// One field annotation.
#[derive(Debug, Clone)]
pub enum AnnotationDef {
    /// `#[id]`.
    Id(Option<String>),
    /// `#[embedded_id]`.
    EmbeddedId(Option<String>),
    /// `#[column]`.
    Column(Option<String>),
    /// `#[partition_key(n)]`.
    PartitionKey(u32),
    /// `#[clustering(n, reversed)]`.
    Clustering {
        /// Position.
        order:    u32,
        /// Descending.
        reversed: bool
    },
    /// `#[order(n, partition_key, reversed)]`.
    Order {
        /// Position.
        order:         u32,
        /// Descending.
        reversed:      bool,
        /// Partition component.
        partition_key: bool
    },
    /// `#[column(static_column)]`.
    Static,
    /// `#[counter]`.
    Counter,
    /// `#[transient]`.
    Transient,
    /// `#[column(time_uuid)]`.
    TimeUuid,
    /// `#[column(json)]`.
    Json,
    /// `#[column(empty_if_null)]`.
    EmptyIfNull,
    /// `#[column(ttl = n)]`.
    Ttl(u32),
    /// `#[column(index)]`.
    Index(Option<String>),
    /// `#[consistency(...)]`.
    Consistency(ConsistencyPairDef),
    /// `#[enumerated(ordinal)]`.
    Enumerated {
        /// Ordinal encoding.
        ordinal: bool
    },
    /// `#[codec(Type)]`.
    Codec(Path),
    /// `#[runtime_codec("name")]`.
    RuntimeCodec(String),
    /// `#[type_transformer(key = K, value = V)]`.
    TypeTransformer {
        /// Key codec.
        key:   Option<Path>,
        /// Value codec.
        value: Option<Path>
    }
}

impl AnnotationDef {
    /// Whether the annotation maps the field.
    #[must_use]
    pub fn is_mapping(&self) -> bool {
        matches!(
            self,
            Self::Id(_) | Self::EmbeddedId(_) | Self::Column(_) | Self::Counter
        )
    }
}

impl ToTokens for AnnotationDef {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let annotation = quote! { ::cql_entity::Annotation };
        tokens.extend(match self {
            Self::Id(name) => {
                let name = option_string(name.as_deref());
                quote! { #annotation::Id { name: #name } }
            }
            Self::EmbeddedId(name) => {
                let name = option_string(name.as_deref());
                quote! { #annotation::EmbeddedId { name: #name } }
            }
            Self::Column(name) => {
                let name = option_string(name.as_deref());
                quote! { #annotation::Column { name: #name } }
            }
            Self::PartitionKey(order) => quote! { #annotation::PartitionKey { order: #order } },
            Self::Clustering {
                order,
                reversed
            } => quote! {
                #annotation::ClusteringColumn { order: #order, reversed: #reversed }
            },
            Self::Order {
                order,
                reversed,
                partition_key
            } => quote! {
                #annotation::Order {
                    order: #order,
                    reversed: #reversed,
                    partition_key: #partition_key
                }
            },
            Self::Static => quote! { #annotation::Static },
            Self::Counter => quote! { #annotation::Counter },
            Self::Transient => quote! { #annotation::Transient },
            Self::TimeUuid => quote! { #annotation::TimeUuid },
            Self::Json => quote! { #annotation::Json },
            Self::EmptyIfNull => quote! { #annotation::EmptyCollectionIfNull },
            Self::Ttl(seconds) => quote! { #annotation::Ttl(#seconds) },
            Self::Index(name) => {
                let name = option_string(name.as_deref());
                quote! { #annotation::Index { name: #name } }
            }
            Self::Consistency(pair) => {
                let (read, write) = pair.tokens();
                quote! { #annotation::Consistency { read: #read, write: #write } }
            }
            Self::Enumerated {
                ordinal
            } => {
                let encoding = if *ordinal {
                    quote! { ::cql_entity::EnumEncoding::Ordinal }
                } else {
                    quote! { ::cql_entity::EnumEncoding::Name }
                };
                quote! { #annotation::Enumerated(#encoding) }
            }
            Self::Codec(path) => {
                let class = codec_class(path);
                quote! { #annotation::Codec(#class) }
            }
            Self::RuntimeCodec(name) => quote! {
                #annotation::RuntimeCodec { name: ::std::string::String::from(#name) }
            },
            Self::TypeTransformer {
                key,
                value
            } => {
                let key = option_codec(key.as_ref());
                let value = option_codec(value.as_ref());
                quote! { #annotation::TypeTransformer { key: #key, value: #value } }
            }
        });
    }
}

/// `CodecClass` expression for a codec type path.
///
/// `IdentityCodec` maps to the identity reference; any other type must
/// implement `Codec + Default`.
fn codec_class(path: &Path) -> TokenStream {
    let identity = path
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "IdentityCodec");
    if identity {
        quote! { ::cql_entity::CodecClass::identity() }
    } else {
        quote! { ::cql_entity::CodecClass::of::<#path>() }
    }
}

fn option_codec(path: Option<&Path>) -> TokenStream {
    match path {
        Some(path) => {
            let class = codec_class(path);
            quote! { ::core::option::Option::Some(#class) }
        }
        None => quote! { ::core::option::Option::None }
    }
}

fn option_string(value: Option<&str>) -> TokenStream {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(::std::string::String::from(#value)) },
        None => quote! { ::core::option::Option::None }
    }
}
