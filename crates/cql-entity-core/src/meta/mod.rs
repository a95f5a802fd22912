// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Property and entity descriptors and the builders that produce them.
//!
//! ```text
//! ClassDescriptor
//!       │  EntityMetaBuilder::build
//!       ▼
//! ancestor chain ── PropertyFilter ──► fields (root to leaf)
//!       │
//!       ├── Id          ──► PropertyMetaBuilder::parse_id
//!       ├── EmbeddedId  ──► PropertyMetaBuilder::parse_embedded_id
//!       │                      └── KeyVocabulary ► ComponentOrderer
//!       └── Column      ──► list / set / map / counter / simple
//!       │
//!       ▼
//! EntityDescriptor (immutable, Arc-shared properties)
//! ```

mod entity;
mod filter;
mod property;

pub use entity::{EntityDescriptor, EntityMetaBuilder};
pub use filter::PropertyFilter;
pub use property::{
    IndexDescriptor, PropertyCodec, PropertyDescriptor, PropertyKind, PropertyMetaBuilder
};
