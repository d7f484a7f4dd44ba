//! Attribute classification for each entity of the cluster tree.
//!
//! Every attribute is either required at input, computed-only (produced by
//! the backing system, never supplied by a caller) or ordinary-optional.
//! Nested attributes hold blocks or lists of blocks, and some optional
//! attributes carry a default literal as the provider renders it.

use serde::Serialize;
use serde_json::Value;

use super::advanced_cluster::{
    AdvancedConfiguration, Autoscaling, BiConnectorConfig, ConnectionString, Endpoint, PinnedFcv,
    PrivateEndpoint, RegionConfig, ReplicationSpec, Resource, Spec, Timeout,
};

/// Static attribute classification of an entity.
pub trait AttributeSchema {
    /// Attributes holding nested blocks.
    const NESTED_ATTRIBUTES: &'static [&'static str] = &[];
    /// Attributes a caller must supply.
    const REQUIRED_ATTRIBUTES: &'static [&'static str] = &[];
    /// Attributes only the backing system may set.
    const COMPUTED_ONLY_ATTRIBUTES: &'static [&'static str] = &[];
    /// Default literal per attribute, in provider syntax.
    const DEFAULTS: &'static [(&'static str, &'static str)] = &[];

    fn is_nested(attribute: &str) -> bool {
        Self::NESTED_ATTRIBUTES.contains(&attribute)
    }

    fn is_required(attribute: &str) -> bool {
        Self::REQUIRED_ATTRIBUTES.contains(&attribute)
    }

    fn is_computed_only(attribute: &str) -> bool {
        Self::COMPUTED_ONLY_ATTRIBUTES.contains(&attribute)
    }

    fn default_literal(attribute: &str) -> Option<&'static str> {
        Self::DEFAULTS
            .iter()
            .find(|(name, _)| *name == attribute)
            .map(|(_, literal)| *literal)
    }
}

impl AttributeSchema for AdvancedConfiguration {
    const NESTED_ATTRIBUTES: &'static [&'static str] = &["custom_openssl_cipher_config_tls12"];
    const DEFAULTS: &'static [(&'static str, &'static str)] = &[
        ("default_write_concern", "\"majority\""),
        ("javascript_enabled", "false"),
        ("minimum_enabled_tls_protocol", "\"TLS1_2\""),
    ];
}

impl AttributeSchema for BiConnectorConfig {}

impl AttributeSchema for Endpoint {
    const COMPUTED_ONLY_ATTRIBUTES: &'static [&'static str] =
        &["endpoint_id", "provider_name", "region"];
}

impl AttributeSchema for PrivateEndpoint {
    const NESTED_ATTRIBUTES: &'static [&'static str] = &["endpoints"];
    const COMPUTED_ONLY_ATTRIBUTES: &'static [&'static str] = &[
        "connection_string",
        "endpoints",
        "srv_connection_string",
        "srv_shard_optimized_connection_string",
        "type",
    ];
}

impl AttributeSchema for ConnectionString {
    const NESTED_ATTRIBUTES: &'static [&'static str] = &["private_endpoint"];
    const COMPUTED_ONLY_ATTRIBUTES: &'static [&'static str] = &[
        "private",
        "private_endpoint",
        "private_srv",
        "standard",
        "standard_srv",
    ];
}

impl AttributeSchema for PinnedFcv {
    const REQUIRED_ATTRIBUTES: &'static [&'static str] = &["expiration_date"];
    const COMPUTED_ONLY_ATTRIBUTES: &'static [&'static str] = &["version"];
}

impl AttributeSchema for Autoscaling {}

impl AttributeSchema for Spec {}

impl AttributeSchema for RegionConfig {
    const NESTED_ATTRIBUTES: &'static [&'static str] = &[
        "analytics_auto_scaling",
        "analytics_specs",
        "auto_scaling",
        "electable_specs",
        "read_only_specs",
    ];
    const REQUIRED_ATTRIBUTES: &'static [&'static str] =
        &["priority", "provider_name", "region_name"];
}

impl AttributeSchema for ReplicationSpec {
    const NESTED_ATTRIBUTES: &'static [&'static str] = &["container_id", "region_configs"];
    const REQUIRED_ATTRIBUTES: &'static [&'static str] = &["region_configs"];
    const COMPUTED_ONLY_ATTRIBUTES: &'static [&'static str] =
        &["container_id", "external_id", "zone_id"];
}

impl AttributeSchema for Timeout {}

impl AttributeSchema for Resource {
    const NESTED_ATTRIBUTES: &'static [&'static str] = &[
        "advanced_configuration",
        "bi_connector_config",
        "connection_strings",
        "labels",
        "pinned_fcv",
        "replication_specs",
        "tags",
        "timeouts",
    ];
    const REQUIRED_ATTRIBUTES: &'static [&'static str] =
        &["cluster_type", "name", "project_id", "replication_specs"];
    const COMPUTED_ONLY_ATTRIBUTES: &'static [&'static str] = &[
        "cluster_id",
        "config_server_type",
        "connection_strings",
        "create_date",
        "mongo_db_version",
        "state_name",
    ];
    const DEFAULTS: &'static [(&'static str, &'static str)] = &[
        ("backup_enabled", "true"),
        ("retain_backups_enabled", "true"),
        ("termination_protection_enabled", "true"),
    ];
}

/// Computed-only attributes that hold a non-null value on `entity`.
///
/// Returned in the entity's declaration order.
pub fn supplied_computed_attributes<T>(entity: &T) -> Vec<&'static str>
where
    T: AttributeSchema + Serialize,
{
    let Ok(Value::Object(fields)) = serde_json::to_value(entity) else {
        return Vec::new();
    };
    fields
        .iter()
        .filter(|(_, value)| !value.is_null())
        .filter_map(|(key, _)| {
            T::COMPUTED_ONLY_ATTRIBUTES
                .iter()
                .find(|attribute| **attribute == key.as_str())
                .copied()
        })
        .collect()
}
