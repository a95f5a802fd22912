// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field selection for entity parsing.

use crate::{annotation::Annotation, reflect::FieldDescriptor};

/// Accepts fields that carry a mapping annotation (`Id`, `EmbeddedId`,
/// `Column`, `Counter`) and are not `Transient`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertyFilter;

impl PropertyFilter {
    /// Whether `field` is mapped.
    #[must_use]
    pub fn matches(&self, field: &FieldDescriptor) -> bool {
        field.has(Annotation::is_mapping) && !field.has(|a| matches!(a, Annotation::Transient))
    }
}
