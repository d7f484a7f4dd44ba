//! Topology engine.
//!
//! Validation and expansion are independent passes over the same input:
//! validation collects findings without failing, while expansion always
//! produces a best-effort topology for the caller to inspect alongside them.

pub mod error;
pub mod expansion;
pub mod topology;
pub mod validation;

pub use error::{Error, Result};
pub use expansion::{DEFAULT_INSTANCE_SIZE, TOP_PRIORITY, generate_replication_specs, modify_out};
pub use topology::{
    MAX_SHARDS, ShardGroup, group_regions_by_shard, infer_cluster_type, num_shards,
};
pub use validation::errors;
