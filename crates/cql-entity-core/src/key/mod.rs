// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Compound primary key ordering.
//!
//! A compound key struct declares its components with one of two annotation
//! vocabularies:
//!
//! | Vocabulary | Attributes | Orderer |
//! |------------|------------|---------|
//! | split | `#[partition_key(n)]`, `#[clustering(n, reversed)]` | [`DefaultOrderer`] |
//! | legacy | `#[order(n, partition_key, reversed)]` | [`LegacyOrderer`] |
//!
//! [`KeyVocabulary::detect`] picks the vocabulary; mixing both or using
//! neither is an error. The selected [`ComponentOrderer`] validates the
//! declared orders and produces a [`ComponentLayout`]: the components by
//! position and the clustering order.
//!
//! # Order Validation
//!
//! Both orderers validate a group of `N` orders by comparing their sum with
//! `N(N+1)/2`. A permutation of `1..=N` always passes and a plain gap always
//! fails, but a duplicate paired with a compensating value (`{1, 1, 4}`)
//! passes the default orderer. The legacy orderer rejects duplicates
//! separately.
//!
//! ```text
//! #[partition_key(1)] tenant   ─┐
//! #[partition_key(2)] bucket   ─┤ positions 1..P
//! #[clustering(1)]    day      ─┤ positions P+1..P+C
//! #[clustering(2, reversed)] at ┘ clustering order: [(day, ASC), (at, DESC)]
//! ```

mod compound;
mod default;
mod legacy;

pub use compound::CompoundKeyDescriptor;
pub use default::DefaultOrderer;
pub use legacy::LegacyOrderer;

use crate::{
    annotation::Annotation,
    error::MappingError,
    introspect::collect_fields,
    naming::NamingStrategy,
    reflect::{ClassDescriptor, FieldDescriptor}
};

/// Sort direction of a clustering column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClusteringDirection {
    /// Ascending.
    Asc,
    /// Descending.
    Desc
}

impl ClusteringDirection {
    /// `Desc` when `reversed`, otherwise `Asc`.
    #[must_use]
    pub const fn from_reversed(reversed: bool) -> Self {
        if reversed { Self::Desc } else { Self::Asc }
    }
}

/// A clustering column and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusteringOrder {
    /// Physical column name.
    pub column:    String,
    /// Sort direction.
    pub direction: ClusteringDirection
}

/// One ordered key component.
#[derive(Debug, Clone, Copy)]
pub struct KeyComponent<'a> {
    /// The component field.
    pub field:         &'a FieldDescriptor,
    /// Whether the component was declared part of the partition key.
    pub partition_key: bool,
    /// Whether the component sorts descending.
    pub reversed:      bool
}

/// Ordered components and clustering order of a compound key class.
#[derive(Debug, Clone)]
pub struct ComponentLayout<'a> {
    /// Components; the index plus one is the position.
    pub components:       Vec<KeyComponent<'a>>,
    /// Clustering columns with their direction.
    pub clustering_order: Vec<ClusteringOrder>
}

/// Orders the components of a compound key class.
pub trait ComponentOrderer: Send + Sync {
    /// Extract and validate the ordered components of `class`.
    ///
    /// `naming` produces the physical names in the clustering order.
    ///
    /// # Errors
    ///
    /// Returns a [`MappingError`] for invalid orders, too few components,
    /// collection or counter components and static clustering columns.
    fn order<'a>(
        &self,
        class: &'a ClassDescriptor,
        naming: NamingStrategy
    ) -> Result<ComponentLayout<'a>, MappingError>;
}

/// Key ordering annotation vocabulary of a compound key class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyVocabulary {
    /// `PartitionKey` and `ClusteringColumn`.
    Split,
    /// `Order`.
    Legacy
}

static DEFAULT_ORDERER: DefaultOrderer = DefaultOrderer;
static LEGACY_ORDERER: LegacyOrderer = LegacyOrderer;

impl KeyVocabulary {
    /// Detect the vocabulary used by `class` and its ancestors.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::ConflictingKeyAnnotations`] when both are
    /// present and [`MappingError::MissingKeyAnnotations`] when neither is.
    pub fn detect(class: &ClassDescriptor) -> Result<Self, MappingError> {
        let (mut split, mut legacy) = (false, false);
        for annotation in collect_fields(class, |_| true)
            .into_iter()
            .flat_map(|f| f.annotations.iter())
            .filter(|a| a.is_key_ordering())
        {
            match annotation {
                Annotation::Order { .. } => legacy = true,
                _ => split = true
            }
        }
        match (split, legacy) {
            (true, true) => Err(MappingError::ConflictingKeyAnnotations {
                class: class.name.clone()
            }),
            (false, false) => Err(MappingError::MissingKeyAnnotations {
                class: class.name.clone()
            }),
            (true, false) => Ok(Self::Split),
            (false, true) => Ok(Self::Legacy)
        }
    }

    /// The orderer for this vocabulary.
    #[must_use]
    pub fn orderer(self) -> &'static dyn ComponentOrderer {
        match self {
            Self::Split => &DEFAULT_ORDERER,
            Self::Legacy => &LEGACY_ORDERER
        }
    }
}

/// Reject fields that cannot be key components: collections and counters.
pub(crate) fn check_component(field: &FieldDescriptor) -> Result<(), MappingError> {
    if field.raw_type().is_some_and(|raw| raw.is_collection()) {
        return Err(MappingError::CollectionKeyComponent {
            field: field.name.clone(),
            class: field.declaring_class.clone()
        });
    }
    if field.is_counter() {
        return Err(MappingError::CounterKeyComponent {
            field: field.name.clone(),
            class: field.declaring_class.clone()
        });
    }
    Ok(())
}

/// Check that `orders` sum to `N(N+1)/2` where `N` is their count.
pub(crate) fn check_order_sum(
    class: &ClassDescriptor,
    group: &'static str,
    orders: &[u32]
) -> Result<(), MappingError> {
    let count = orders.len();
    let n = count as u64;
    let expected = n * (n + 1) / 2;
    let actual: u64 = orders.iter().map(|&o| u64::from(o)).sum();
    if expected == actual {
        Ok(())
    } else {
        Err(MappingError::NonContiguousOrder {
            class: class.name.clone(),
            group,
            count,
            expected,
            actual
        })
    }
}

/// Require at least two components.
pub(crate) fn check_component_count(
    class: &ClassDescriptor,
    count: usize
) -> Result<(), MappingError> {
    if count < 2 {
        return Err(MappingError::NotEnoughComponents {
            class: class.name.clone(),
            count
        });
    }
    Ok(())
}

/// Clustering order entry for `field`; static fields are rejected.
pub(crate) fn clustering_entry(
    field: &FieldDescriptor,
    reversed: bool,
    naming: NamingStrategy
) -> Result<ClusteringOrder, MappingError> {
    if field.is_static() {
        return Err(MappingError::StaticKeyColumn {
            field: field.name.clone(),
            class: field.declaring_class.clone()
        });
    }
    Ok(ClusteringOrder {
        column:    field.column_name(naming),
        direction: ClusteringDirection::from_reversed(reversed)
    })
}
