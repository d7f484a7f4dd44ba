//! Fully expanded cluster tree.
//!
//! These are the shapes the backing system expects: a [`Resource`] with its
//! nested [`ReplicationSpec`]s, each holding ordered [`RegionConfig`]s.
//! Field order follows the attribute order of the provider schema, which is
//! also the order fields appear in serialized output.
//!
//! Numeric pass-through attributes are [`Number`]s, so an integer input is
//! rendered as an integer again.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Topology of a cluster.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub enum ClusterType {
    /// A single replica set, no sharding.
    #[serde(rename = "REPLICASET")]
    ReplicaSet,
    /// Shards addressed by integer index.
    #[serde(rename = "SHARDED")]
    Sharded,
    /// Shards grouped by named zone.
    #[serde(rename = "GEOSHARDED")]
    GeoSharded,
}

impl ClusterType {
    /// Wire name of the cluster type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterType::ReplicaSet => "REPLICASET",
            ClusterType::Sharded => "SHARDED",
            ClusterType::GeoSharded => "GEOSHARDED",
        }
    }
}

impl std::fmt::Display for ClusterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ClusterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REPLICASET" => Ok(ClusterType::ReplicaSet),
            "SHARDED" => Ok(ClusterType::Sharded),
            "GEOSHARDED" => Ok(ClusterType::GeoSharded),
            other => Err(format!(
                "unknown cluster_type '{}', expected one of REPLICASET, SHARDED, GEOSHARDED",
                other
            )),
        }
    }
}

/// An empty `cluster_type` string means "not declared".
fn deserialize_cluster_type<'de, D>(deserializer: D) -> Result<Option<ClusterType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AdvancedConfiguration {
    pub change_stream_options_pre_and_post_images_expire_after_seconds: Option<Number>,
    pub custom_openssl_cipher_config_tls12: Option<Vec<String>>,
    pub default_max_time_ms: Option<Number>,
    pub default_write_concern: Option<String>,
    pub javascript_enabled: Option<bool>,
    pub minimum_enabled_tls_protocol: Option<String>,
    pub no_table_scan: Option<bool>,
    pub oplog_min_retention_hours: Option<Number>,
    pub oplog_size_mb: Option<Number>,
    pub sample_refresh_interval_bi_connector: Option<Number>,
    pub sample_size_bi_connector: Option<Number>,
    pub tls_cipher_config_mode: Option<String>,
    pub transaction_lifetime_limit_seconds: Option<Number>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct BiConnectorConfig {
    pub enabled: Option<bool>,
    pub read_preference: Option<String>,
}

/// A private endpoint member, reported by the backing system.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Endpoint {
    pub endpoint_id: Option<String>,
    pub provider_name: Option<String>,
    pub region: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct PrivateEndpoint {
    pub connection_string: Option<String>,
    pub endpoints: Option<Vec<Endpoint>>,
    pub srv_connection_string: Option<String>,
    pub srv_shard_optimized_connection_string: Option<String>,
    #[serde(rename = "type")]
    pub endpoint_type: Option<String>,
}

/// Connection strings of a running cluster. Every attribute is computed.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ConnectionString {
    pub private: Option<String>,
    pub private_endpoint: Option<Vec<PrivateEndpoint>>,
    pub private_srv: Option<String>,
    pub standard: Option<String>,
    pub standard_srv: Option<String>,
}

/// Pinned feature compatibility version.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct PinnedFcv {
    pub expiration_date: Option<String>,
    pub version: Option<String>,
}

/// Autoscaling knobs, shared by the compute and analytics node groups.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Autoscaling {
    pub compute_enabled: Option<bool>,
    pub compute_max_instance_size: Option<String>,
    pub compute_min_instance_size: Option<String>,
    pub compute_scale_down_enabled: Option<bool>,
    pub disk_gb_enabled: Option<bool>,
}

/// Sizing of one node group (electable, analytics or read-only) in a region.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Spec {
    pub disk_iops: Option<Number>,
    pub disk_size_gb: Option<Number>,
    pub ebs_volume_type: Option<String>,
    pub instance_size: Option<String>,
    pub node_count: Option<i64>,
}

/// One physical region's contribution to a shard.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RegionConfig {
    pub analytics_auto_scaling: Option<Autoscaling>,
    pub analytics_specs: Option<Spec>,
    pub auto_scaling: Option<Autoscaling>,
    pub backing_provider_name: Option<String>,
    pub electable_specs: Option<Spec>,
    pub priority: Option<i64>,
    pub provider_name: Option<String>,
    pub read_only_specs: Option<Spec>,
    pub region_name: Option<String>,
}

/// One shard, or the only replica set.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ReplicationSpec {
    pub container_id: Option<Map<String, Value>>,
    pub external_id: Option<String>,
    pub region_configs: Option<Vec<RegionConfig>>,
    pub zone_id: Option<String>,
    pub zone_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Timeout {
    pub create: Option<String>,
    pub delete: Option<String>,
    pub update: Option<String>,
}

/// The whole cluster as the backing system describes it.
///
/// Also the shape of the `old_cluster` snapshot consulted for carry-forward
/// sizing. Keys that are not part of this tree (such as
/// `use_replication_spec_per_shard` in snapshots) are ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Resource {
    pub accept_data_risks_and_force_replica_set_reconfig: Option<String>,
    pub advanced_configuration: Option<AdvancedConfiguration>,
    pub backup_enabled: Option<bool>,
    pub bi_connector_config: Option<BiConnectorConfig>,
    pub cluster_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_cluster_type")]
    pub cluster_type: Option<ClusterType>,
    pub config_server_management_mode: Option<String>,
    pub config_server_type: Option<String>,
    pub connection_strings: Option<ConnectionString>,
    pub create_date: Option<String>,
    pub delete_on_create_timeout: Option<bool>,
    pub encryption_at_rest_provider: Option<String>,
    pub global_cluster_self_managed_sharding: Option<bool>,
    pub labels: Option<Map<String, Value>>,
    pub mongo_db_major_version: Option<String>,
    pub mongo_db_version: Option<String>,
    pub name: Option<String>,
    pub paused: Option<bool>,
    pub pinned_fcv: Option<PinnedFcv>,
    pub pit_enabled: Option<bool>,
    pub project_id: Option<String>,
    pub redact_client_log_data: Option<bool>,
    pub replica_set_scaling_strategy: Option<String>,
    pub replication_specs: Option<Vec<ReplicationSpec>>,
    pub retain_backups_enabled: Option<bool>,
    pub root_cert_type: Option<String>,
    pub state_name: Option<String>,
    pub tags: Option<Map<String, Value>>,
    pub termination_protection_enabled: Option<bool>,
    pub timeouts: Option<Timeout>,
    pub version_release_system: Option<String>,
}

impl Resource {
    /// Region config at `(shard_index, region_config_index)`, if that position exists.
    pub fn region_config_at(
        &self,
        shard_index: usize,
        region_config_index: usize,
    ) -> Option<&RegionConfig> {
        self.replication_specs
            .as_ref()?
            .get(shard_index)?
            .region_configs
            .as_ref()?
            .get(region_config_index)
    }
}
