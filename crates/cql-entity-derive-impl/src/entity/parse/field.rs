// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! Field attributes are marker-style, so they are parsed by hand rather
//! than with darling.
//!
//! # Supported Attributes
//!
//! | Attribute | Example |
//! |-----------|---------|
//! | `id` | `#[id]`, `#[id(name = "user_id")]` |
//! | `embedded_id` | `#[embedded_id]` |
//! | `column` | `#[column(name = "n", static_column, index, ttl = 60, time_uuid, json, empty_if_null)]` |
//! | `counter` | `#[counter]` |
//! | `transient` | `#[transient]` |
//! | `parent` | `#[parent]` (inherit the fields of a mapped type) |
//! | `partition_key` | `#[partition_key(1)]` |
//! | `clustering` | `#[clustering(1, reversed)]` |
//! | `order` | `#[order(1, partition_key, reversed)]` |
//! | `enumerated` | `#[enumerated(ordinal)]` |
//! | `codec` | `#[codec(IntToText)]` |
//! | `runtime_codec` | `#[runtime_codec("geo")]` |
//! | `type_transformer` | `#[type_transformer(key = K, value = V)]` |
//! | `element` / `key` / `value` | `#[element(enumerated(ordinal), codec(C))]` |
//! | `consistency` | `#[consistency(read = "quorum")]` |

mod annotation;

pub use annotation::AnnotationDef;
use darling::FromMeta;
use syn::{
    Attribute, Field, Ident, LitInt, LitStr, Meta, Path, Token, meta::ParseNestedMeta,
    parenthesized, parse::ParseStream
};

use super::consistency::ConsistencyPairDef;

/// Which argument of a generic field type an annotation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgTarget {
    /// List or set element.
    Element,
    /// Map key.
    Key,
    /// Map value.
    Value
}

/// A field with its parsed annotations.
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier.
    pub ident:       Ident,
    /// Field type.
    pub ty:          syn::Type,
    /// Field annotations in attribute order.
    pub annotations: Vec<AnnotationDef>,
    /// Annotations on type arguments.
    pub args:        Vec<(ArgTarget, AnnotationDef)>,
    /// `#[parent]` marker.
    pub parent:      bool
}

impl FieldDef {
    /// Parse a named field.
    ///
    /// # Errors
    ///
    /// Returns every malformed attribute of the field.
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("mapped fields must be named").with_span(field)
        })?;
        let mut errors = darling::Error::accumulator();
        let mut annotations = Vec::new();
        let mut args = Vec::new();
        let mut parent = false;

        for attr in &field.attrs {
            let Some(name) = attr.path().get_ident().map(ToString::to_string) else {
                continue;
            };
            let parsed = match name.as_str() {
                "id" => parse_name(attr).map(|n| annotations.push(AnnotationDef::Id(n))),
                "embedded_id" => {
                    parse_name(attr).map(|n| annotations.push(AnnotationDef::EmbeddedId(n)))
                }
                "column" => parse_column(attr).map(|mut list| annotations.append(&mut list)),
                "counter" => {
                    annotations.push(AnnotationDef::Counter);
                    Ok(())
                }
                "transient" => {
                    annotations.push(AnnotationDef::Transient);
                    Ok(())
                }
                "parent" => {
                    parent = true;
                    Ok(())
                }
                "partition_key" => attr
                    .parse_args::<LitInt>()
                    .and_then(|lit| lit.base10_parse())
                    .map(|order| annotations.push(AnnotationDef::PartitionKey(order))),
                "clustering" => attr.parse_args_with(parse_clustering).map(|a| annotations.push(a)),
                "order" => attr.parse_args_with(parse_order).map(|a| annotations.push(a)),
                "enumerated" => attr
                    .parse_args::<Ident>()
                    .and_then(|encoding| enumerated(&encoding))
                    .map(|a| annotations.push(a)),
                "codec" => attr
                    .parse_args::<Path>()
                    .map(|path| annotations.push(AnnotationDef::Codec(path))),
                "runtime_codec" => attr
                    .parse_args::<LitStr>()
                    .map(|name| annotations.push(AnnotationDef::RuntimeCodec(name.value()))),
                "type_transformer" => {
                    parse_type_transformer(attr).map(|a| annotations.push(a))
                }
                "element" => parse_arg(attr, ArgTarget::Element, &mut args),
                "key" => parse_arg(attr, ArgTarget::Key, &mut args),
                "value" => parse_arg(attr, ArgTarget::Value, &mut args),
                "consistency" => {
                    match ConsistencyPairDef::from_meta(&attr.meta) {
                        Ok(pair) => annotations.push(AnnotationDef::Consistency(pair)),
                        Err(err) => errors.push(err.with_span(attr))
                    }
                    Ok(())
                }
                _ => Ok(())
            };
            if let Err(err) = parsed {
                errors.push(darling::Error::from(err));
            }
        }

        errors.finish_with(Self {
            ident,
            ty: field.ty.clone(),
            annotations,
            args,
            parent
        })
    }

    /// Field name as written.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Whether any annotation maps the field.
    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.annotations.iter().any(AnnotationDef::is_mapping)
    }

    /// Whether the field orders a compound key component.
    #[must_use]
    pub fn is_key_component(&self) -> bool {
        self.annotations.iter().any(|a| {
            matches!(
                a,
                AnnotationDef::PartitionKey(_)
                    | AnnotationDef::Clustering { .. }
                    | AnnotationDef::Order { .. }
            )
        })
    }

    /// Whether the field is `#[transient]`.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.annotations
            .iter()
            .any(|a| matches!(a, AnnotationDef::Transient))
    }

    /// Whether the field is stored as JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.annotations.iter().any(|a| matches!(a, AnnotationDef::Json))
    }
}

/// `name = "..."` inside `#[id(...)]` and `#[embedded_id(...)]`.
fn parse_name(attr: &Attribute) -> syn::Result<Option<String>> {
    let mut name = None;
    if let Meta::List(list) = &attr.meta {
        list.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse::<LitStr>()?.value());
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"`"))
            }
        })?;
    }
    Ok(name)
}

/// `#[column(...)]` expands to `Column` plus its modifiers.
fn parse_column(attr: &Attribute) -> syn::Result<Vec<AnnotationDef>> {
    let mut name = None;
    let mut modifiers = Vec::new();
    if let Meta::List(list) = &attr.meta {
        list.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("static_column") {
                modifiers.push(AnnotationDef::Static);
            } else if meta.path.is_ident("index") {
                let index = if meta.input.peek(Token![=]) {
                    Some(meta.value()?.parse::<LitStr>()?.value())
                } else {
                    None
                };
                modifiers.push(AnnotationDef::Index(index));
            } else if meta.path.is_ident("ttl") {
                let seconds = meta.value()?.parse::<LitInt>()?.base10_parse()?;
                modifiers.push(AnnotationDef::Ttl(seconds));
            } else if meta.path.is_ident("time_uuid") {
                modifiers.push(AnnotationDef::TimeUuid);
            } else if meta.path.is_ident("json") {
                modifiers.push(AnnotationDef::Json);
            } else if meta.path.is_ident("empty_if_null") {
                modifiers.push(AnnotationDef::EmptyIfNull);
            } else {
                return Err(meta.error("unknown column option"));
            }
            Ok(())
        })?;
    }
    let mut annotations = vec![AnnotationDef::Column(name)];
    annotations.append(&mut modifiers);
    Ok(annotations)
}

/// `n` followed by optional flags.
fn parse_position(input: ParseStream<'_>, flags: &[&str]) -> syn::Result<(u32, Vec<String>)> {
    let order = input.parse::<LitInt>()?.base10_parse()?;
    let mut set = Vec::new();
    while input.peek(Token![,]) {
        input.parse::<Token![,]>()?;
        if input.is_empty() {
            break;
        }
        let flag: Ident = input.parse()?;
        if !flags.iter().any(|f| flag == f) {
            return Err(syn::Error::new(
                flag.span(),
                format!("expected one of: {}", flags.join(", "))
            ));
        }
        set.push(flag.to_string());
    }
    Ok((order, set))
}

fn parse_clustering(input: ParseStream<'_>) -> syn::Result<AnnotationDef> {
    let (order, flags) = parse_position(input, &["reversed"])?;
    Ok(AnnotationDef::Clustering {
        order,
        reversed: flags.iter().any(|f| f == "reversed")
    })
}

fn parse_order(input: ParseStream<'_>) -> syn::Result<AnnotationDef> {
    let (order, flags) = parse_position(input, &["partition_key", "reversed"])?;
    Ok(AnnotationDef::Order {
        order,
        reversed: flags.iter().any(|f| f == "reversed"),
        partition_key: flags.iter().any(|f| f == "partition_key")
    })
}

fn enumerated(encoding: &Ident) -> syn::Result<AnnotationDef> {
    if encoding == "ordinal" {
        Ok(AnnotationDef::Enumerated {
            ordinal: true
        })
    } else if encoding == "name" {
        Ok(AnnotationDef::Enumerated {
            ordinal: false
        })
    } else {
        Err(syn::Error::new(encoding.span(), "expected `name` or `ordinal`"))
    }
}

fn parse_type_transformer(attr: &Attribute) -> syn::Result<AnnotationDef> {
    let mut key = None;
    let mut value = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("key") {
            key = Some(meta.value()?.parse::<Path>()?);
        } else if meta.path.is_ident("value") {
            value = Some(meta.value()?.parse::<Path>()?);
        } else {
            return Err(meta.error("expected `key` or `value`"));
        }
        Ok(())
    })?;
    Ok(AnnotationDef::TypeTransformer {
        key,
        value
    })
}

/// `#[element(...)]`, `#[key(...)]` and `#[value(...)]`.
fn parse_arg(
    attr: &Attribute,
    target: ArgTarget,
    args: &mut Vec<(ArgTarget, AnnotationDef)>
) -> syn::Result<()> {
    attr.parse_nested_meta(|meta| {
        let annotation = if meta.path.is_ident("enumerated") {
            enumerated(&parenthesized_ident(&meta)?)?
        } else if meta.path.is_ident("codec") {
            let content;
            parenthesized!(content in meta.input);
            AnnotationDef::Codec(content.parse()?)
        } else {
            return Err(meta.error("expected `enumerated(...)` or `codec(...)`"));
        };
        args.push((target, annotation));
        Ok(())
    })
}

fn parenthesized_ident(meta: &ParseNestedMeta<'_>) -> syn::Result<Ident> {
    let content;
    parenthesized!(content in meta.input);
    content.parse()
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    fn parse(field: Field) -> FieldDef {
        FieldDef::from_field(&field).unwrap()
    }

    #[test]
    fn plain_column() {
        let field = parse(parse_quote! {
            #[column]
            pub name: String
        });
        assert!(field.is_mapped());
        assert!(matches!(field.annotations[..], [AnnotationDef::Column(None)]));
    }

    #[test]
    fn column_modifiers() {
        let field = parse(parse_quote! {
            #[column(name = "body_text", static_column, index, ttl = 60, empty_if_null)]
            pub body: Vec<String>
        });
        assert!(matches!(
            &field.annotations[..],
            [
                AnnotationDef::Column(Some(name)),
                AnnotationDef::Static,
                AnnotationDef::Index(None),
                AnnotationDef::Ttl(60),
                AnnotationDef::EmptyIfNull
            ] if name == "body_text"
        ));
    }

    #[test]
    fn unknown_column_option_fails() {
        let field: Field = parse_quote! {
            #[column(unique)]
            pub name: String
        };
        assert!(FieldDef::from_field(&field).is_err());
    }

    #[test]
    fn key_ordering() {
        let field = parse(parse_quote! {
            #[clustering(2, reversed)]
            pub at: i64
        });
        assert!(matches!(field.annotations[..], [AnnotationDef::Clustering {
            order:    2,
            reversed: true
        }]));

        let field = parse(parse_quote! {
            #[order(1, partition_key)]
            pub tenant: String
        });
        assert!(matches!(field.annotations[..], [AnnotationDef::Order {
            order:         1,
            reversed:      false,
            partition_key: true
        }]));
    }

    #[test]
    fn bad_clustering_flag_fails() {
        let field: Field = parse_quote! {
            #[clustering(1, descending)]
            pub at: i64
        };
        assert!(FieldDef::from_field(&field).is_err());
    }

    #[test]
    fn argument_directives() {
        let field = parse(parse_quote! {
            #[column]
            #[key(codec(LongToText))]
            #[value(enumerated(ordinal))]
            pub scores: HashMap<i64, Status>
        });
        assert_eq!(field.args.len(), 2);
        assert!(matches!(field.args[0], (ArgTarget::Key, AnnotationDef::Codec(_))));
        assert!(matches!(field.args[1], (ArgTarget::Value, AnnotationDef::Enumerated {
            ordinal: true
        })));
    }

    #[test]
    fn codec_directives() {
        let field = parse(parse_quote! {
            #[column]
            #[type_transformer(key = IdentityCodec, value = TextCodec)]
            #[runtime_codec("geo")]
            pub tags: HashMap<String, String>
        });
        assert!(matches!(
            &field.annotations[1],
            AnnotationDef::TypeTransformer { key: Some(_), value: Some(_) }
        ));
        assert!(matches!(
            &field.annotations[2],
            AnnotationDef::RuntimeCodec(name) if name == "geo"
        ));
    }

    #[test]
    fn field_consistency() {
        let field = parse(parse_quote! {
            #[column]
            #[consistency(read = "local_quorum")]
            pub name: String
        });
        match &field.annotations[1] {
            AnnotationDef::Consistency(pair) => {
                assert_eq!(pair.read.as_ref().map(|l| l.name()), Some("local_quorum"));
                assert!(pair.write.is_none());
            }
            other => panic!("unexpected {other:?}")
        }
    }

    #[test]
    fn identifiers_and_markers() {
        let field = parse(parse_quote! {
            #[id(name = "user_id")]
            pub id: i64
        });
        assert!(field.is_mapped());
        assert!(matches!(&field.annotations[0], AnnotationDef::Id(Some(n)) if n == "user_id"));

        let field = parse(parse_quote! {
            #[parent]
            pub audit: Audit
        });
        assert!(field.parent);
        assert!(!field.is_mapped());

        let field = parse(parse_quote! {
            #[column]
            #[transient]
            pub cache: String
        });
        assert!(field.is_transient());
    }
}
