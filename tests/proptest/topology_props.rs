//! Properties over randomly annotated region lists.

use cluster_topology::engine::{
    TOP_PRIORITY, errors, generate_replication_specs, group_regions_by_shard, infer_cluster_type,
    num_shards,
};
use cluster_topology::model::{ClusterType, ExtendedResource, Region};
use proptest::prelude::*;

use crate::common::fixtures::{ClusterBuilder, RegionBuilder};

/// How a generated region is annotated.
#[derive(Debug, Clone)]
enum Annotation {
    None,
    Shard(usize),
    Zone(&'static str),
}

fn annotation() -> impl Strategy<Value = Annotation> {
    prop_oneof![
        Just(Annotation::None),
        (0usize..4).prop_map(Annotation::Shard),
        prop::sample::select(vec!["z1", "z2", "z3"]).prop_map(Annotation::Zone),
    ]
}

fn region(index: usize, annotation: &Annotation, node_count: i64) -> Region {
    let builder = RegionBuilder::new(format!("REGION_{}", index)).node_count(node_count);
    match annotation {
        Annotation::None => builder.build(),
        Annotation::Shard(shard) => builder.shard_index(*shard).build(),
        Annotation::Zone(zone) => builder.zone(*zone).build(),
    }
}

fn cluster(annotations: &[Annotation], node_count: i64) -> ExtendedResource {
    annotations
        .iter()
        .enumerate()
        .fold(ClusterBuilder::new("prop"), |builder, (i, a)| {
            builder.region(region(i, a, node_count))
        })
        .build()
}

fn uniform_shards() -> impl Strategy<Value = Vec<Annotation>> {
    prop::collection::vec((0usize..4).prop_map(Annotation::Shard), 1..8)
}

fn uniform_zones() -> impl Strategy<Value = Vec<Annotation>> {
    prop::collection::vec(
        prop::sample::select(vec!["z1", "z2", "z3"]).prop_map(Annotation::Zone),
        1..8,
    )
}

proptest! {
    #[test]
    fn test_all_shard_indexes_infer_sharded(annotations in uniform_shards()) {
        let cluster = cluster(&annotations, 3);
        prop_assert_eq!(infer_cluster_type(&cluster), ClusterType::Sharded);

        let highest = annotations
            .iter()
            .filter_map(|a| match a {
                Annotation::Shard(s) => Some(*s),
                _ => None,
            })
            .max()
            .unwrap();
        prop_assert_eq!(num_shards(&cluster).unwrap(), highest + 1);
    }

    #[test]
    fn test_all_zone_names_infer_geosharded(annotations in uniform_zones()) {
        let cluster = cluster(&annotations, 3);
        prop_assert_eq!(infer_cluster_type(&cluster), ClusterType::GeoSharded);

        let groups = group_regions_by_shard(&cluster).unwrap();
        prop_assert_eq!(groups.len(), num_shards(&cluster).unwrap());
        for group in &groups {
            let zone = group.zone_name();
            prop_assert!(group.regions.iter().all(|r| r.zone_name.as_deref() == zone));
        }
    }

    #[test]
    fn test_grouping_keeps_every_region(annotations in prop::collection::vec(annotation(), 1..10)) {
        let cluster = cluster(&annotations, 3);
        let groups = group_regions_by_shard(&cluster).unwrap();
        let grouped: usize = groups.iter().map(|g| g.regions.len()).sum();
        prop_assert_eq!(grouped, annotations.len());
        for (position, group) in groups.iter().enumerate() {
            prop_assert_eq!(group.index, position);
        }
    }

    #[test]
    fn test_priorities_strictly_descend_from_top(
        annotations in prop::collection::vec(annotation(), 1..10),
        node_count in 1i64..7,
    ) {
        let cluster = cluster(&annotations, node_count);
        for spec in generate_replication_specs(&cluster).unwrap() {
            let priorities: Vec<i64> = spec
                .region_configs
                .unwrap_or_default()
                .iter()
                .map(|c| c.priority.unwrap())
                .collect();
            if let Some(first) = priorities.first() {
                prop_assert_eq!(*first, TOP_PRIORITY);
            }
            prop_assert!(priorities.windows(2).all(|w| w[0] == w[1] + 1));
        }
    }

    #[test]
    fn test_validation_never_panics(annotations in prop::collection::vec(annotation(), 0..10)) {
        let cluster = cluster(&annotations, 3);
        let found = errors(&cluster);
        prop_assert!(found.iter().all(|e| !e.is_empty()));
    }
}
