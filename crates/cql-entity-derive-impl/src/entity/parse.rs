// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for the derives.
//!
//! Entity-level attributes use darling; field attributes are parsed by hand.
//!
//! ```text
//! parse.rs (coordinator)
//! ├── attrs.rs        - #[entity(...)] (EntityAttrs)
//! ├── consistency.rs  - consistency level values
//! ├── insert.rs       - insert strategy values
//! └── field.rs        - field attributes (FieldDef)
//!     └── annotation.rs - AnnotationDef and its runtime tokens
//! ```
//!
//! # Data Structures
//!
//! ```text
//! EntityDef
//! ├── ident
//! ├── attrs: EntityAttrs
//! ├── parent: Option<Type>   (#[parent] field type)
//! └── fields: Vec<FieldDef>  (every other field, in order)
//! ```

mod attrs;
pub mod consistency;
mod field;
pub mod insert;

pub use attrs::EntityAttrs;
use darling::FromDeriveInput;
pub use field::{AnnotationDef, ArgTarget, FieldDef};
use syn::{Data, DeriveInput, Fields, Ident, Type};

/// A parsed `#[derive(Entity)]` or `#[derive(CompoundKey)]` input.
#[derive(Debug)]
pub struct EntityDef {
    /// Struct identifier.
    pub ident:  Ident,
    /// Entity-level attributes.
    pub attrs:  EntityAttrs,
    /// Type of the `#[parent]` field.
    pub parent: Option<Type>,
    /// Remaining fields in declaration order.
    pub fields: Vec<FieldDef>
}

impl EntityDef {
    /// Parse a derive input.
    ///
    /// # Errors
    ///
    /// Returns every attribute error found, plus structural errors for
    /// generic structs and multiple `#[parent]` fields.
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = EntityAttrs::from_derive_input(input)?;
        let mut errors = darling::Error::accumulator();

        if !attrs.generics.params.is_empty() {
            errors.push(
                darling::Error::custom("mapped structs cannot be generic")
                    .with_span(&attrs.generics)
            );
        }

        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named.named.iter().collect(),
                _ => Vec::new()
            },
            _ => Vec::new()
        };

        let mut parent = None;
        let mut fields = Vec::new();
        for field in named {
            let Some(def) = errors.handle(FieldDef::from_field(field)) else {
                continue;
            };
            if def.parent {
                if parent.is_some() {
                    errors.push(
                        darling::Error::custom("only one #[parent] field is allowed")
                            .with_span(&def.ident)
                    );
                }
                parent = Some(def.ty);
            } else {
                fields.push(def);
            }
        }

        errors.finish_with(Self {
            ident: attrs.ident.clone(),
            attrs,
            parent,
            fields
        })
    }
}
