// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Orderer for the split `PartitionKey` / `ClusteringColumn` vocabulary.

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

/// Partition components take positions `1..=P` sorted by their order,
/// clustering components follow at `P+1..=P+C`. Each group is validated on
/// its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOrderer;

impl ComponentOrderer for DefaultOrderer {
    fn order<'a>(
        &self,
        class: &'a ClassDescriptor,
        naming: NamingStrategy
    ) -> Result<ComponentLayout<'a>, MappingError> {
        let mut partition = Vec::new();
        let mut clustering = Vec::new();
        for field in collect_fields(class, |_| true) {
            for annotation in &field.annotations {
                match annotation {
                    Annotation::PartitionKey {
                        order
                    } => {
                        check_component(field)?;
                        partition.push((*order, field, false));
                    }
                    Annotation::ClusteringColumn {
                        order,
                        reversed
                    } => {
                        check_component(field)?;
                        clustering.push((*order, field, *reversed));
                    }
                    _ => {}
                }
            }
        }
        partition.sort_by_key(|(order, ..)| *order);
        clustering.sort_by_key(|(order, ..)| *order);

        check_order_sum(class, "partition key", &orders(&partition))?;
        check_order_sum(class, "clustering", &orders(&clustering))?;
        check_component_count(class, partition.len() + clustering.len())?;

        let clustering_order = clustering
            .iter()
            .map(|(_, field, reversed)| clustering_entry(field, *reversed, naming))
            .collect::<Result<Vec<_>, _>>()?;

        let components = partition
            .into_iter()
            .map(|(_, field, reversed)| KeyComponent {
                field,
                partition_key: true,
                reversed
            })
            .chain(clustering.into_iter().map(|(_, field, reversed)| KeyComponent {
                field,
                partition_key: false,
                reversed
            }))
            .collect();

        Ok(ComponentLayout {
            components,
            clustering_order
        })
    }
}

fn orders<T>(group: &[(u32, T, bool)]) -> Vec<u32> {
    group.iter().map(|(order, ..)| *order).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        key::{ClusteringDirection, ClusteringOrder},
        types::{NativeType, TypeRef}
    };

    fn text() -> TypeRef {
        TypeRef::native(NativeType::Text)
    }

    fn clustering(order: u32, reversed: bool) -> Annotation {
        Annotation::ClusteringColumn {
            order,
            reversed
        }
    }

    fn names(layout: &ComponentLayout<'_>) -> Vec<String> {
        layout.components.iter().map(|c| c.field.name.clone()).collect()
    }

    #[test]
    fn partition_then_clustering() {
        let class = ClassDescriptor::new("app::EventKey")
            .with_field("bucket", text(), [Annotation::PartitionKey { order: 2 }])
            .with_field("at", text(), [clustering(1, true)])
            .with_field("tenant", text(), [Annotation::PartitionKey { order: 1 }]);
        let layout = DefaultOrderer.order(&class, NamingStrategy::SnakeCase).unwrap();
        assert_eq!(names(&layout), ["tenant", "bucket", "at"]);
        assert_eq!(layout.clustering_order, vec![ClusteringOrder {
            column:    "at".to_string(),
            direction: ClusteringDirection::Desc
        }]);
        assert!(layout.components[0].partition_key);
        assert!(!layout.components[2].partition_key);
    }

    #[test]
    fn clustering_gap_fails() {
        let class = ClassDescriptor::new("app::EventKey")
            .with_field("tenant", text(), [Annotation::PartitionKey { order: 1 }])
            .with_field("a", text(), [clustering(1, false)])
            .with_field("b", text(), [clustering(3, false)]);
        assert_eq!(
            DefaultOrderer
                .order(&class, NamingStrategy::SnakeCase)
                .unwrap_err(),
            MappingError::NonContiguousOrder {
                class:    "app::EventKey".to_string(),
                group:    "clustering",
                count:    2,
                expected: 3,
                actual:   4
            }
        );
    }

    #[test]
    fn groups_are_validated_independently() {
        // {1, 1, 4} sums like {1, 2, 3}; the default orderer accepts it.
        let class = ClassDescriptor::new("app::EventKey")
            .with_field("a", text(), [clustering(1, false)])
            .with_field("b", text(), [clustering(1, false)])
            .with_field("c", text(), [clustering(4, false)]);
        let layout = DefaultOrderer.order(&class, NamingStrategy::SnakeCase).unwrap();
        assert_eq!(layout.components.len(), 3);
    }

    #[test]
    fn single_component_fails() {
        let class = ClassDescriptor::new("app::EventKey")
            .with_field("tenant", text(), [Annotation::PartitionKey { order: 1 }]);
        assert!(matches!(
            DefaultOrderer.order(&class, NamingStrategy::SnakeCase),
            Err(MappingError::NotEnoughComponents { count: 1, .. })
        ));
    }

    #[test]
    fn collection_component_fails() {
        let class = ClassDescriptor::new("app::EventKey")
            .with_field("tenant", text(), [Annotation::PartitionKey { order: 1 }])
            .with_field("tags", TypeRef::list(text()), [clustering(1, false)]);
        assert_eq!(
            DefaultOrderer
                .order(&class, NamingStrategy::SnakeCase)
                .unwrap_err(),
            MappingError::CollectionKeyComponent {
                field: "tags".to_string(),
                class: "app::EventKey".to_string()
            }
        );
    }

    #[test]
    fn static_clustering_column_fails() {
        let class = ClassDescriptor::new("app::EventKey")
            .with_field("tenant", text(), [Annotation::PartitionKey { order: 1 }])
            .with_field("at", text(), [clustering(1, false), Annotation::Static]);
        assert!(matches!(
            DefaultOrderer.order(&class, NamingStrategy::SnakeCase),
            Err(MappingError::StaticKeyColumn { .. })
        ));
    }

    #[test]
    fn clustering_names_use_strategy() {
        let class = ClassDescriptor::new("app::EventKey")
            .with_field("tenantId", text(), [Annotation::PartitionKey { order: 1 }])
            .with_field("createdAt", text(), [clustering(1, false)]);
        let layout = DefaultOrderer.order(&class, NamingStrategy::SnakeCase).unwrap();
        assert_eq!(layout.clustering_order[0].column, "created_at");
    }
}
