//! Simplified, region-list input.
//!
//! Callers describe a cluster as a flat list of [`Region`]s plus a handful of
//! cluster-wide sizing knobs. [`ExtendedResource`] carries that input on top
//! of the regular [`Resource`] tree; expansion fills in the tree from it.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

use super::advanced_cluster::{Autoscaling, Resource};

/// One region of the simplified input.
///
/// Whether `shard_index`, `zone_name` or neither is set decides which
/// topology the region belongs to. Unknown keys are rejected.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Region {
    pub name: String,
    /// The key is required, but `null` is accepted and builds no electable spec.
    #[serde(deserialize_with = "deserialize_nullable")]
    pub node_count: Option<i64>,
    pub shard_index: Option<usize>,
    pub provider_name: Option<String>,
    pub node_count_read_only: Option<i64>,
    pub node_count_analytics: Option<i64>,
    pub instance_size: Option<String>,
    pub instance_size_analytics: Option<String>,
    pub zone_name: Option<String>,
}

/// Present-but-nullable value. Without a `default`, a missing key still fails.
fn deserialize_nullable<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer)
}

/// A [`Resource`] plus the simplified-input fields.
///
/// `old_cluster` is read-only: it is consulted for carry-forward sizing and
/// never serialized back out.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ExtendedResource {
    #[serde(flatten)]
    pub resource: Resource,
    pub regions: Option<Vec<Region>>,
    pub provider_name: Option<String>,
    pub instance_size: Option<String>,
    pub disk_size_gb: Option<Number>,
    pub instance_size_analytics: Option<String>,
    pub auto_scaling: Option<Autoscaling>,
    pub auto_scaling_analytics: Option<Autoscaling>,
    #[serde(default, skip_serializing)]
    pub old_cluster: Option<Box<Resource>>,
}

impl ExtendedResource {
    /// The region list, empty when absent.
    pub fn regions(&self) -> &[Region] {
        self.regions.as_deref().unwrap_or_default()
    }
}
