//! Validation of the simplified cluster input.
//!
//! Every check runs on every call; findings are collected as human-readable
//! strings and returned together. Categories, in output order:
//! - Mutually exclusive input fields
//! - Fields that require other fields
//! - Per-region instance sizes conflicting with autoscaling
//! - Region annotations inconsistent with the inferred cluster type
//! - Missing provider names
//! - Computed-only attributes supplied by the caller

use crate::engine::topology::{infer_cluster_type, num_shards};
use crate::model::schema::supplied_computed_attributes;
use crate::model::{ClusterType, ExtendedResource, Region};

/// Input fields that take part in the cross-field rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Regions,
    ReplicationSpecs,
    AutoScaling,
    InstanceSize,
    AutoScalingAnalytics,
    InstanceSizeAnalytics,
    /// Shard count implied by the region annotations.
    NumShards,
}

impl InputField {
    /// Field name as the caller writes it.
    pub fn name(self) -> &'static str {
        match self {
            InputField::Regions => "regions",
            InputField::ReplicationSpecs => "replication_specs",
            InputField::AutoScaling => "auto_scaling",
            InputField::InstanceSize => "instance_size",
            InputField::AutoScalingAnalytics => "auto_scaling_analytics",
            InputField::InstanceSizeAnalytics => "instance_size_analytics",
            InputField::NumShards => "num_shards",
        }
    }

    /// Whether the field counts as set.
    ///
    /// Empty strings and empty lists count as unset. An autoscaling block
    /// counts as set whenever present.
    pub fn is_set(self, resource: &ExtendedResource) -> bool {
        match self {
            InputField::Regions => resource.regions.as_ref().is_some_and(|r| !r.is_empty()),
            InputField::ReplicationSpecs => resource
                .resource
                .replication_specs
                .as_ref()
                .is_some_and(|s| !s.is_empty()),
            InputField::AutoScaling => resource.auto_scaling.is_some(),
            InputField::InstanceSize => non_empty(&resource.instance_size),
            InputField::AutoScalingAnalytics => resource.auto_scaling_analytics.is_some(),
            InputField::InstanceSizeAnalytics => non_empty(&resource.instance_size_analytics),
            // Too many shards still means shard indexes were given.
            InputField::NumShards => !matches!(num_shards(resource), Ok(0)),
        }
    }
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_ref().is_some_and(|v| !v.is_empty())
}

/// Fields that cannot be combined with any of the listed fields.
pub const MUTUALLY_EXCLUSIVE: &[(InputField, &[InputField])] = &[
    (InputField::Regions, &[InputField::ReplicationSpecs]),
    (InputField::AutoScaling, &[InputField::InstanceSize]),
    (
        InputField::AutoScalingAnalytics,
        &[InputField::InstanceSizeAnalytics],
    ),
];

/// Fields that need every listed field to be set as well.
pub const REQUIRES_OTHER: &[(InputField, &[InputField])] = &[
    (InputField::InstanceSize, &[InputField::Regions]),
    (InputField::NumShards, &[InputField::Regions]),
    (InputField::AutoScaling, &[InputField::Regions]),
    (InputField::AutoScalingAnalytics, &[InputField::Regions]),
];

/// Collect every validation error for the resource.
///
/// Never fails. An empty result means the input is consistent.
pub fn errors(resource: &ExtendedResource) -> Vec<String> {
    let mut errors = Vec::new();
    check_mutually_exclusive(resource, &mut errors);
    check_requires_other(resource, &mut errors);
    check_autoscaling_instance_sizes(resource, &mut errors);
    check_topology_annotations(resource, &mut errors);
    check_provider_names(resource, &mut errors);
    check_computed_attributes(resource, &mut errors);

    if !errors.is_empty() {
        tracing::debug!(count = errors.len(), "Validation found errors");
    }
    errors
}

fn check_mutually_exclusive(resource: &ExtendedResource, errors: &mut Vec<String>) {
    for (field, incompatible) in MUTUALLY_EXCLUSIVE {
        if !field.is_set(resource) {
            continue;
        }
        for other in incompatible.iter().filter(|other| other.is_set(resource)) {
            errors.push(format!(
                "Cannot use var.{} and var.{} together",
                field.name(),
                other.name()
            ));
        }
    }
}

fn check_requires_other(resource: &ExtendedResource, errors: &mut Vec<String>) {
    for (field, required) in REQUIRES_OTHER {
        if !field.is_set(resource) {
            continue;
        }
        let mut missing: Vec<&str> = required
            .iter()
            .filter(|other| !other.is_set(resource))
            .map(|other| other.name())
            .collect();
        if missing.is_empty() {
            continue;
        }
        missing.sort_unstable();
        errors.push(format!(
            "Cannot use {} without {}",
            field.name(),
            missing.join(",")
        ));
    }
}

fn check_autoscaling_instance_sizes(resource: &ExtendedResource, errors: &mut Vec<String>) {
    let regions = resource.regions();

    if resource.auto_scaling.is_some() {
        let invalid = indexed_values(regions, |r| r.instance_size.as_deref());
        if !invalid.is_empty() {
            errors.push(format!(
                "Cannot use `regions.*.instance_size` when auto_scaling is used: {}",
                invalid
                    .iter()
                    .map(|(i, size)| format!("instance_size @ index {} = {}", i, size))
                    .collect::<Vec<_>>()
                    .join(",")
            ));
        }
    }

    if resource.auto_scaling_analytics.is_some() {
        let invalid = indexed_values(regions, |r| r.instance_size_analytics.as_deref());
        if !invalid.is_empty() {
            errors.push(format!(
                "Cannot use `regions.*.instance_size_analytics` when auto_scaling_analytics is used: {}",
                invalid
                    .iter()
                    .map(|(i, size)| format!("instance_size @ index {} = {}", i, size))
                    .collect::<Vec<_>>()
                    .join(",")
            ));
        }
    }
}

/// Checks region annotations against the inferred type, not the caller's intent.
fn check_topology_annotations(resource: &ExtendedResource, errors: &mut Vec<String>) {
    let regions = resource.regions();

    let zone_names_found = indexed_values(regions, |r| r.zone_name.as_deref())
        .into_iter()
        .map(|(i, zone)| format!("regions[{}].zone_name={}", i, zone))
        .collect::<Vec<_>>();
    let shard_indexes_found = indexed_values(regions, |r| r.shard_index)
        .into_iter()
        .map(|(i, shard)| format!("regions[{}].shard_index={}", i, shard))
        .collect::<Vec<_>>();

    match infer_cluster_type(resource) {
        ClusterType::GeoSharded => {
            let missing = missing_at(regions, |r| r.zone_name.is_none(), "zone_name");
            if !missing.is_empty() {
                errors.push(format!(
                    "Must use `regions.*.zone_name` when cluster_type is GEOSHARDED: {}",
                    missing.join(",")
                ));
            }
            if !shard_indexes_found.is_empty() {
                errors.push(format!(
                    "Geosharded cluster should not define shard_index: {}",
                    shard_indexes_found.join(",")
                ));
            }
        }
        ClusterType::Sharded => {
            let missing = missing_at(regions, |r| r.shard_index.is_none(), "shard_index");
            if !missing.is_empty() {
                errors.push(format!(
                    "Must use `regions.*.shard_index` when cluster_type is SHARDED: {}",
                    missing.join(",")
                ));
            }
            if !zone_names_found.is_empty() {
                errors.push(format!(
                    "Sharded cluster should not define zone_name: {}",
                    zone_names_found.join(",")
                ));
            }
        }
        ClusterType::ReplicaSet => {
            if !shard_indexes_found.is_empty() {
                errors.push(format!(
                    "Replicaset cluster should not define shard_index: {}",
                    shard_indexes_found.join(",")
                ));
            }
            if !zone_names_found.is_empty() {
                errors.push(format!(
                    "Replicaset cluster should not define zone_name: {}",
                    zone_names_found.join(",")
                ));
            }
        }
    }
}

fn check_provider_names(resource: &ExtendedResource, errors: &mut Vec<String>) {
    if resource.provider_name.is_some() {
        return;
    }
    let missing: Vec<String> = resource
        .regions()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.provider_name.is_none())
        .map(|(i, _)| format!("regions[{}].provider_name is missing", i))
        .collect();
    if !missing.is_empty() {
        errors.push(format!(
            "Must use `regions.*.provider_name` when root `provider_name` is not specified: {}",
            missing.join(",")
        ));
    }
}

fn check_computed_attributes(resource: &ExtendedResource, errors: &mut Vec<String>) {
    let mut supplied: Vec<String> = supplied_computed_attributes(&resource.resource)
        .into_iter()
        .map(String::from)
        .collect();
    for (i, spec) in resource
        .resource
        .replication_specs
        .iter()
        .flatten()
        .enumerate()
    {
        supplied.extend(
            supplied_computed_attributes(spec)
                .into_iter()
                .map(|attribute| format!("replication_specs[{}].{}", i, attribute)),
        );
    }
    for path in supplied {
        errors.push(format!("Cannot set computed attribute `{}`", path));
    }
}

fn indexed_values<'a, T>(
    regions: &'a [Region],
    value: impl Fn(&'a Region) -> Option<T>,
) -> Vec<(usize, T)> {
    regions
        .iter()
        .enumerate()
        .filter_map(|(i, r)| value(r).map(|v| (i, v)))
        .collect()
}

fn missing_at(
    regions: &[Region],
    is_missing: impl Fn(&Region) -> bool,
    field: &str,
) -> Vec<String> {
    regions
        .iter()
        .enumerate()
        .filter(|(_, r)| is_missing(r))
        .map(|(i, _)| format!("{} missing @ index {}", field, i))
        .collect()
}
