//! Topology inference over the simplified region list.
//!
//! Decides whether the regions describe a replica set, a sharded cluster or
//! a geo-sharded cluster, counts shards, and groups regions into the shards
//! that expansion turns into replication specs.
//!
//! Inference always produces a value, even for inconsistent annotations.
//! Reporting those inconsistencies is left to
//! [`validation`](crate::engine::validation).

use std::collections::{HashMap, HashSet};

use crate::engine::error::{Error, Result};
use crate::model::{ClusterType, ExtendedResource, Region};

/// Upper bound on the shard count implied by `shard_index` annotations.
pub const MAX_SHARDS: usize = 1024;

/// Regions that make up one shard.
#[derive(Debug, Clone, PartialEq)]
pub struct ShardGroup<'a> {
    /// Position of the shard in the generated replication specs.
    pub index: usize,
    /// Regions of this shard, in input order.
    pub regions: Vec<&'a Region>,
}

impl<'a> ShardGroup<'a> {
    fn empty(index: usize) -> Self {
        Self {
            index,
            regions: Vec::new(),
        }
    }

    /// Zone name of the group, taken from its first region.
    pub fn zone_name(&self) -> Option<&'a str> {
        self.regions.first().and_then(|r| r.zone_name.as_deref())
    }
}

/// Infer the cluster type.
///
/// An explicit `cluster_type` is returned verbatim. Otherwise the cluster is
/// geo-sharded when every region has a zone name, sharded when every region
/// has a shard index, and a replica set in all other cases. An empty region
/// list satisfies "every region", so it infers as geo-sharded.
pub fn infer_cluster_type(resource: &ExtendedResource) -> ClusterType {
    if let Some(declared) = resource.resource.cluster_type {
        return declared;
    }
    let regions = resource.regions();
    if regions.iter().all(|r| r.zone_name.is_some()) {
        return ClusterType::GeoSharded;
    }
    if regions.iter().all(|r| r.shard_index.is_some()) {
        return ClusterType::Sharded;
    }
    ClusterType::ReplicaSet
}

/// Number of shards the regions describe.
///
/// Geo-sharded: count of distinct zone names. Otherwise one more than the
/// highest shard index, or 1 when no region has one.
///
/// Fails if the shard indexes imply more than [`MAX_SHARDS`] shards.
pub fn num_shards(resource: &ExtendedResource) -> Result<usize> {
    let regions = resource.regions();
    if infer_cluster_type(resource) == ClusterType::GeoSharded {
        return Ok(regions
            .iter()
            .filter_map(|r| r.zone_name.as_deref())
            .collect::<HashSet<_>>()
            .len());
    }
    let highest = regions
        .iter()
        .filter_map(|r| r.shard_index)
        .max()
        .unwrap_or(0);
    highest
        .checked_add(1)
        .filter(|count| *count <= MAX_SHARDS)
        .ok_or_else(|| {
            Error::Invariant(format!(
                "shard_index {} exceeds the limit of {} shards",
                highest, MAX_SHARDS
            ))
        })
}

/// Group regions by shard.
///
/// - Replica set: one group holding every region.
/// - Sharded: one group per index in `0..num_shards`, empty groups included.
///   A region without a shard index lands in group 0.
/// - Geo-sharded: zones are numbered in first-seen order.
///
/// Fails if a geo-sharded region has no zone name.
pub fn group_regions_by_shard(resource: &ExtendedResource) -> Result<Vec<ShardGroup<'_>>> {
    let regions = resource.regions();
    match infer_cluster_type(resource) {
        ClusterType::ReplicaSet => Ok(vec![ShardGroup {
            index: 0,
            regions: regions.iter().collect(),
        }]),
        ClusterType::Sharded => {
            let mut groups: Vec<ShardGroup<'_>> =
                (0..num_shards(resource)?.max(1)).map(ShardGroup::empty).collect();
            for region in regions {
                let index = region.shard_index.unwrap_or(0);
                group_at(&mut groups, index)?.regions.push(region);
            }
            Ok(groups)
        }
        ClusterType::GeoSharded => group_by_zone(regions),
    }
}

fn group_by_zone(regions: &[Region]) -> Result<Vec<ShardGroup<'_>>> {
    let mut zone_indexes: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<ShardGroup<'_>> = Vec::new();

    for (position, region) in regions.iter().enumerate() {
        let zone = region.zone_name.as_deref().ok_or_else(|| {
            Error::Invariant(format!(
                "region {} ('{}') has no zone_name in a GEOSHARDED cluster",
                position, region.name
            ))
        })?;
        let index = *zone_indexes.entry(zone).or_insert_with(|| {
            groups.push(ShardGroup::empty(groups.len()));
            groups.len() - 1
        });
        group_at(&mut groups, index)?.regions.push(region);
    }

    Ok(groups)
}

fn group_at<'g, 'a>(
    groups: &'g mut [ShardGroup<'a>],
    index: usize,
) -> Result<&'g mut ShardGroup<'a>> {
    let count = groups.len();
    groups.get_mut(index).ok_or_else(|| {
        Error::Invariant(format!("shard group {} out of range ({} groups)", index, count))
    })
}
