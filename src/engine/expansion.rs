//! Expansion of the simplified region list into replication specs.
//!
//! Pure functions over an already validated and inferred resource: shards
//! become [`ReplicationSpec`]s, regions become [`RegionConfig`]s with
//! descending priorities, and node groups get their instance sizes resolved.
//!
//! With autoscaling enabled, the size running at the same position in the
//! `old_cluster` snapshot is carried forward so that regenerating the tree
//! does not resize an already-scaled cluster back to the autoscaling floor.

use tracing::{debug, info};

use crate::engine::error::{Error, Result};
use crate::engine::topology::{ShardGroup, group_regions_by_shard, infer_cluster_type};
use crate::model::{
    Autoscaling, ExtendedResource, Region, RegionConfig, ReplicationSpec, Resource, Spec,
};

/// Instance size used when neither the region nor the cluster sets one.
pub const DEFAULT_INSTANCE_SIZE: &str = "M10";

/// Priority of the first region config in every shard.
pub const TOP_PRIORITY: i64 = 7;

/// Sizing tier of a node group.
///
/// Read-only nodes share the electable tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeGroup {
    Electable,
    Analytics,
}

impl NodeGroup {
    fn name(self) -> &'static str {
        match self {
            NodeGroup::Electable => "auto_scaling",
            NodeGroup::Analytics => "auto_scaling_analytics",
        }
    }

    fn autoscaling(self, resource: &ExtendedResource) -> Option<&Autoscaling> {
        match self {
            NodeGroup::Electable => resource.auto_scaling.as_ref(),
            NodeGroup::Analytics => resource.auto_scaling_analytics.as_ref(),
        }
    }

    fn sizes<'a>(self, resource: &'a ExtendedResource, region: &'a Region) -> [Option<&'a str>; 2] {
        match self {
            NodeGroup::Electable => [
                region.instance_size.as_deref(),
                resource.instance_size.as_deref(),
            ],
            NodeGroup::Analytics => [
                region.instance_size_analytics.as_deref(),
                resource.instance_size_analytics.as_deref(),
            ],
        }
    }

    fn running_spec(self, config: &RegionConfig) -> Option<&Spec> {
        match self {
            NodeGroup::Electable => config.electable_specs.as_ref(),
            NodeGroup::Analytics => config.analytics_specs.as_ref(),
        }
    }
}

/// Resolve the instance size of a node group at a shard position.
///
/// Without autoscaling: region size, then cluster size, then
/// [`DEFAULT_INSTANCE_SIZE`]. With autoscaling: the size running at the same
/// position in `old_cluster`, falling back to the autoscaling minimum.
///
/// Fails if autoscaling is configured without a minimum instance size.
pub fn resolve_instance_size(
    resource: &ExtendedResource,
    region: &Region,
    group: NodeGroup,
    shard_index: usize,
    region_config_index: usize,
) -> Result<String> {
    let Some(autoscaling) = group.autoscaling(resource) else {
        let size = group
            .sizes(resource, region)
            .into_iter()
            .flatten()
            .find(|size| !size.is_empty())
            .unwrap_or(DEFAULT_INSTANCE_SIZE);
        return Ok(size.to_string());
    };

    let min_size = autoscaling
        .compute_min_instance_size
        .as_deref()
        .ok_or_else(|| {
            Error::Invariant(format!(
                "{}.compute_min_instance_size is required when autoscaling is configured",
                group.name()
            ))
        })?;

    let Some(old_cluster) = resource.old_cluster.as_deref() else {
        return Ok(min_size.to_string());
    };

    match current_instance_size(old_cluster, group, shard_index, region_config_index) {
        Some(running) => {
            debug!(
                shard_index,
                region_config_index,
                group = ?group,
                running,
                min_size,
                "Carrying forward running instance size"
            );
            Ok(running.to_string())
        }
        None => Ok(min_size.to_string()),
    }
}

/// Instance size running at a position of the snapshot, if any.
fn current_instance_size(
    old_cluster: &Resource,
    group: NodeGroup,
    shard_index: usize,
    region_config_index: usize,
) -> Option<&str> {
    let config = old_cluster.region_config_at(shard_index, region_config_index)?;
    group
        .running_spec(config)?
        .instance_size
        .as_deref()
        .filter(|size| !size.is_empty())
}

/// Build one replication spec per shard group.
///
/// Does not validate: run [`crate::engine::validation::errors`] separately.
pub fn generate_replication_specs(resource: &ExtendedResource) -> Result<Vec<ReplicationSpec>> {
    group_regions_by_shard(resource)?
        .iter()
        .map(|group| build_replication_spec(resource, group))
        .collect()
}

fn build_replication_spec(
    resource: &ExtendedResource,
    group: &ShardGroup<'_>,
) -> Result<ReplicationSpec> {
    let region_configs = group
        .regions
        .iter()
        .zip(0i64..)
        .enumerate()
        .map(|(region_config_index, (region, offset))| {
            build_region_config(
                resource,
                region,
                group.index,
                region_config_index,
                TOP_PRIORITY - offset,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ReplicationSpec {
        region_configs: Some(region_configs),
        zone_name: group.zone_name().map(String::from),
        ..Default::default()
    })
}

fn build_region_config(
    resource: &ExtendedResource,
    region: &Region,
    shard_index: usize,
    region_config_index: usize,
    priority: i64,
) -> Result<RegionConfig> {
    let spec = |node_count: Option<i64>, group: NodeGroup| -> Result<Option<Spec>> {
        let Some(node_count) = node_count.filter(|count| *count != 0) else {
            return Ok(None);
        };
        Ok(Some(Spec {
            disk_size_gb: resource.disk_size_gb.clone(),
            instance_size: Some(resolve_instance_size(
                resource,
                region,
                group,
                shard_index,
                region_config_index,
            )?),
            node_count: Some(node_count),
            ..Default::default()
        }))
    };

    Ok(RegionConfig {
        provider_name: region
            .provider_name
            .clone()
            .or_else(|| resource.provider_name.clone()),
        region_name: Some(region.name.clone()),
        priority: Some(priority),
        electable_specs: spec(region.node_count, NodeGroup::Electable)?,
        read_only_specs: spec(region.node_count_read_only, NodeGroup::Electable)?,
        analytics_specs: spec(region.node_count_analytics, NodeGroup::Analytics)?,
        auto_scaling: resource.auto_scaling.clone(),
        analytics_auto_scaling: resource.auto_scaling_analytics.clone(),
        ..Default::default()
    })
}

/// Replace `replication_specs` and `cluster_type` with the expanded topology.
///
/// Leaves the resource untouched when no regions were supplied.
pub fn modify_out(resource: &mut ExtendedResource) -> Result<()> {
    if resource.regions().is_empty() {
        debug!("No regions supplied, skipping expansion");
        return Ok(());
    }

    let cluster_type = infer_cluster_type(resource);
    let specs = generate_replication_specs(resource)?;
    info!(
        cluster_type = %cluster_type,
        replication_specs = specs.len(),
        "Expanded regions into replication specs"
    );

    resource.resource.replication_specs = Some(specs);
    resource.resource.cluster_type = Some(cluster_type);
    Ok(())
}
