//! Inputs that expand into a replication spec tree.

use serde_json::{Value, json};

use crate::common::fixtures::envelope;
use crate::{composite, run_to_map};

#[test]
fn test_three_shard_cluster() {
    let input = envelope(&json!({
        "name": "sharded",
        "project_id": "664619d870c247237f4b86a6",
        "instance_size": "M20",
        "regions": [
            {"name": "US_EAST_1", "node_count": 3, "shard_index": 0, "provider_name": "AWS"},
            {"name": "US_EAST_1", "node_count": 3, "shard_index": 1, "provider_name": "AWS"},
            {"name": "US_EAST_1", "node_count": 3, "shard_index": 2, "provider_name": "AWS"}
        ]
    }));

    let output = run_to_map(&input);
    assert_eq!(output["cluster_type"], json!("SHARDED"));
    assert_eq!(output["name"], json!("sharded"));
    assert_eq!(output["error_message"], json!(""));

    let specs = composite(&output, "replication_specs");
    let specs = specs.as_array().unwrap();
    assert_eq!(specs.len(), 3);
    for spec in specs {
        let config = &spec["region_configs"][0];
        assert_eq!(config["priority"], json!(7));
        assert_eq!(config["provider_name"], json!("AWS"));
        assert_eq!(config["electable_specs"]["instance_size"], json!("M20"));
        assert_eq!(config["electable_specs"]["node_count"], json!(3));
    }
}

#[test]
fn test_geosharded_zones() {
    let input = envelope(&json!({
        "name": "geo",
        "project_id": "p",
        "provider_name": "AWS",
        "regions": [
            {"name": "US_EAST_1", "node_count": 3, "zone_name": "z1"},
            {"name": "US_EAST_2", "node_count": 2, "zone_name": "z1"},
            {"name": "EU_WEST_1", "node_count": 3, "zone_name": "z2"}
        ]
    }));

    let output = run_to_map(&input);
    assert_eq!(output["cluster_type"], json!("GEOSHARDED"));
    assert_eq!(output["error_message"], json!(""));

    let specs = composite(&output, "replication_specs");
    assert_eq!(specs[0]["zone_name"], json!("z1"));
    assert_eq!(specs[1]["zone_name"], json!("z2"));

    let first_zone = specs[0]["region_configs"].as_array().unwrap();
    assert_eq!(first_zone.len(), 2);
    assert_eq!(first_zone[0]["priority"], json!(7));
    assert_eq!(first_zone[1]["priority"], json!(6));
    assert_eq!(first_zone[1]["electable_specs"]["instance_size"], json!("M10"));
    assert_eq!(specs[1]["region_configs"][0]["region_name"], json!("EU_WEST_1"));
}

#[test]
fn test_autoscaled_size_is_carried_forward() {
    let old_cluster = json!({
        "cluster_type": "REPLICASET",
        "name": "scaled",
        "use_replication_spec_per_shard": true,
        "replication_specs": [{
            "region_configs": [{
                "priority": 7,
                "provider_name": "AWS",
                "region_name": "US_EAST_1",
                "electable_specs": {"instance_size": "M30", "node_count": 3}
            }]
        }]
    });
    let input = envelope(&json!({
        "name": "scaled",
        "project_id": "p",
        "auto_scaling": {
            "compute_enabled": true,
            "compute_min_instance_size": "M10",
            "compute_max_instance_size": "M60"
        },
        "regions": [
            {"name": "US_EAST_1", "node_count": 3, "provider_name": "AWS"},
            {"name": "US_WEST_2", "node_count": 2, "provider_name": "AWS"}
        ],
        "old_cluster": old_cluster
    }));

    let output = run_to_map(&input);
    assert_eq!(output["cluster_type"], json!("REPLICASET"));

    let specs = composite(&output, "replication_specs");
    let configs = specs[0]["region_configs"].as_array().unwrap();
    assert_eq!(configs[0]["electable_specs"]["instance_size"], json!("M30"));
    assert_eq!(configs[1]["electable_specs"]["instance_size"], json!("M10"));
    assert_eq!(configs[0]["auto_scaling"]["compute_max_instance_size"], json!("M60"));
}

#[test]
fn test_old_cluster_is_not_echoed() {
    let input = envelope(&json!({
        "name": "scaled",
        "project_id": "p",
        "regions": [{"name": "US_EAST_1", "node_count": 3, "provider_name": "AWS"}],
        "old_cluster": {"name": "scaled"}
    }));

    let output = run_to_map(&input);
    assert!(!output.contains_key("old_cluster"));
}

#[test]
fn test_primitives_are_rendered_as_strings() {
    let input = envelope(&json!({
        "name": "primitives",
        "project_id": "p",
        "backup_enabled": false,
        "disk_size_gb": 50.5,
        "regions": [{"name": "US_EAST_1", "node_count": 3, "provider_name": "AWS"}]
    }));

    let output = run_to_map(&input);
    assert_eq!(output["backup_enabled"], json!("false"));
    assert_eq!(output["disk_size_gb"], json!("50.5"));
    assert_eq!(output["paused"], Value::Null);
}

#[test]
fn test_passthrough_without_regions() {
    let input = envelope(&json!({
        "name": "explicit",
        "project_id": "p",
        "replication_specs": [{
            "region_configs": [{
                "priority": 7,
                "provider_name": "GCP",
                "region_name": "CENTRAL_US",
                "electable_specs": {"instance_size": "M40", "node_count": 5}
            }]
        }]
    }));

    let output = run_to_map(&input);
    assert_eq!(output["error_message"], json!(""));
    assert_eq!(output["cluster_type"], Value::Null);
    let specs = composite(&output, "replication_specs");
    assert_eq!(
        specs[0]["region_configs"][0]["electable_specs"]["instance_size"],
        json!("M40")
    );
}

#[test]
fn test_null_node_count_builds_read_only_only() {
    let input = envelope(&json!({
        "name": "read-only",
        "project_id": "p",
        "provider_name": "AWS",
        "regions": [
            {"name": "US_EAST_1", "node_count": 3},
            {"name": "US_WEST_2", "node_count": null, "node_count_read_only": 2}
        ]
    }));

    let output = run_to_map(&input);
    assert_eq!(output["error_message"], json!(""));

    let specs = composite(&output, "replication_specs");
    let second = &specs[0]["region_configs"][1];
    assert_eq!(second["priority"], json!(6));
    assert_eq!(second["electable_specs"], Value::Null);
    assert_eq!(second["read_only_specs"]["node_count"], json!(2));
    assert_eq!(second["read_only_specs"]["instance_size"], json!("M10"));
}

#[test]
fn test_integer_disk_size_stays_integer() {
    let input = envelope(&json!({
        "name": "disk",
        "project_id": "p",
        "disk_size_gb": 40,
        "regions": [{"name": "US_EAST_1", "node_count": 3, "provider_name": "AWS"}]
    }));

    let output = run_to_map(&input);
    assert_eq!(output["disk_size_gb"], json!("40"));

    let encoded = output["replication_specs"].as_str().unwrap();
    assert!(encoded.contains(r#""disk_size_gb": 40, "#), "got: {}", encoded);
    let specs = composite(&output, "replication_specs");
    assert_eq!(
        specs[0]["region_configs"][0]["electable_specs"]["disk_size_gb"],
        json!(40)
    );
}

#[test]
fn test_composites_use_spaced_separators() {
    let input = envelope(&json!({
        "name": "tagged",
        "project_id": "p",
        "tags": {"team": "data", "owner": "Zo\u{eb}"},
        "regions": [{"name": "US_EAST_1", "node_count": 3, "provider_name": "AWS"}]
    }));

    let output = run_to_map(&input);
    assert_eq!(output["tags"], json!(r#"{"team": "data", "owner": "Zo\u00eb"}"#));
}
