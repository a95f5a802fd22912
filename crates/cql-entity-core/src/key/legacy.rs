// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Orderer for the legacy single `Order` annotation.

use std::collections::HashSet;

use super::{
    ComponentLayout, ComponentOrderer, KeyComponent, check_component, check_component_count,
    check_order_sum, clustering_entry
};
use crate::{
    annotation::Annotation,
    error::MappingError,
    introspect::collect_fields,
    naming::NamingStrategy,
    reflect::ClassDescriptor
};

/// Orders every component by its single `Order` value.
///
/// Duplicate orders are rejected as they are collected. The partition-key
/// marked orders must sum to `N(N+1)/2`, all orders to `M(M+1)/2`. The
/// clustering order lists components that are not partition-key marked and
/// whose order is greater than 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyOrderer;

impl ComponentOrderer for LegacyOrderer {
    fn order<'a>(
        &self,
        class: &'a ClassDescriptor,
        naming: NamingStrategy
    ) -> Result<ComponentLayout<'a>, MappingError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for field in collect_fields(class, |_| true) {
            let Some((order, reversed, partition_key)) = field.find(|a| match a {
                Annotation::Order {
                    order,
                    reversed,
                    partition_key
                } => Some((*order, *reversed, *partition_key)),
                _ => None
            }) else {
                continue;
            };
            check_component(field)?;
            if !seen.insert(order) {
                return Err(MappingError::DuplicateOrder {
                    order,
                    class: class.name.clone()
                });
            }
            entries.push((order, KeyComponent {
                field,
                partition_key,
                reversed
            }));
        }

        let partition_orders: Vec<u32> = entries
            .iter()
            .filter(|(_, c)| c.partition_key)
            .map(|(o, _)| *o)
            .collect();
        check_order_sum(class, "partition key", &partition_orders)?;
        let all_orders: Vec<u32> = entries.iter().map(|(o, _)| *o).collect();
        check_order_sum(class, "component", &all_orders)?;
        check_component_count(class, entries.len())?;

        entries.sort_by_key(|(order, _)| *order);
        let clustering_order = entries
            .iter()
            .filter(|(order, c)| !c.partition_key && *order > 1)
            .map(|(_, c)| clustering_entry(c.field, c.reversed, naming))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ComponentLayout {
            components: entries.into_iter().map(|(_, c)| c).collect(),
            clustering_order
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        key::ClusteringDirection,
        reflect::{Counter, MappedType},
        types::{NativeType, TypeRef}
    };

    fn text() -> TypeRef {
        TypeRef::native(NativeType::Text)
    }

    fn order(order: u32, partition_key: bool, reversed: bool) -> Annotation {
        Annotation::Order {
            order,
            reversed,
            partition_key
        }
    }

    #[test]
    fn orders_components_and_clustering() {
        let class = ClassDescriptor::new("app::LegacyKey")
            .with_field("day", text(), [order(2, false, true)])
            .with_field("user", text(), [order(1, false, false)])
            .with_field("seq", text(), [order(3, false, false)]);
        let layout = LegacyOrderer.order(&class, NamingStrategy::LowerCase).unwrap();
        let names: Vec<&str> = layout
            .components
            .iter()
            .map(|c| c.field.name.as_str())
            .collect();
        assert_eq!(names, ["user", "day", "seq"]);
        let columns: Vec<(&str, ClusteringDirection)> = layout
            .clustering_order
            .iter()
            .map(|o| (o.column.as_str(), o.direction))
            .collect();
        assert_eq!(columns, [
            ("day", ClusteringDirection::Desc),
            ("seq", ClusteringDirection::Asc)
        ]);
    }

    #[test]
    fn partition_marked_components_are_not_clustering() {
        let class = ClassDescriptor::new("app::LegacyKey")
            .with_field("a", text(), [order(1, true, false)])
            .with_field("b", text(), [order(2, true, false)])
            .with_field("c", text(), [order(3, false, false)]);
        let layout = LegacyOrderer.order(&class, NamingStrategy::LowerCase).unwrap();
        assert_eq!(layout.clustering_order.len(), 1);
        assert_eq!(layout.clustering_order[0].column, "c");
    }

    #[test]
    fn duplicate_order_names_value_and_class() {
        let class = ClassDescriptor::new("app::LegacyKey")
            .with_field("a", text(), [order(1, false, false)])
            .with_field("b", text(), [order(1, false, false)]);
        assert_eq!(
            LegacyOrderer
                .order(&class, NamingStrategy::LowerCase)
                .unwrap_err(),
            MappingError::DuplicateOrder {
                order: 1,
                class: "app::LegacyKey".to_string()
            }
        );
    }

    #[test]
    fn partition_sum_is_checked() {
        let class = ClassDescriptor::new("app::LegacyKey")
            .with_field("a", text(), [order(1, false, false)])
            .with_field("b", text(), [order(2, true, false)]);
        assert!(matches!(
            LegacyOrderer.order(&class, NamingStrategy::LowerCase),
            Err(MappingError::NonContiguousOrder {
                group: "partition key",
                ..
            })
        ));
    }

    #[test]
    fn total_sum_is_checked() {
        let class = ClassDescriptor::new("app::LegacyKey")
            .with_field("a", text(), [order(1, false, false)])
            .with_field("b", text(), [order(3, false, false)]);
        assert!(matches!(
            LegacyOrderer.order(&class, NamingStrategy::LowerCase),
            Err(MappingError::NonContiguousOrder {
                group: "component",
                ..
            })
        ));
    }

    #[test]
    fn counter_component_fails() {
        let class = ClassDescriptor::new("app::LegacyKey")
            .with_field("a", text(), [order(1, false, false)])
            .with_field("hits", Counter::type_ref(), [order(2, false, false)]);
        assert!(matches!(
            LegacyOrderer.order(&class, NamingStrategy::LowerCase),
            Err(MappingError::CounterKeyComponent { .. })
        ));
    }
}
