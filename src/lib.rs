//! cluster-topology library crate
//!
//! Expands a simplified region list into a fully specified cluster topology
//! and validates it. The pipeline for one input document:
//!
//! 1. decode the `{"input_json": "..."}` envelope into an [`ExtendedResource`]
//! 2. collect validation errors (never fatal)
//! 3. expand regions into replication specs
//! 4. flatten the result into a string-valued map plus `error_message`

pub mod config;
pub mod engine;
pub mod model;
pub mod output;

pub use engine::{Error, Result};
pub use model::ExtendedResource;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

/// Envelope wrapping the JSON-encoded resource.
#[derive(Debug, Deserialize)]
pub struct InputEnvelope {
    pub input_json: Option<String>,
}

/// Decode the envelope and the resource it carries.
pub fn parse_input(raw: &str) -> Result<ExtendedResource> {
    let envelope: InputEnvelope = serde_json::from_str(raw).map_err(Error::Parse)?;
    let input_json = envelope
        .input_json
        .ok_or_else(|| Error::MissingField("input_json".to_string()))?;
    let resource: ExtendedResource = serde_json::from_str(&input_json).map_err(Error::Parse)?;
    debug!(
        regions = resource.regions().len(),
        has_old_cluster = resource.old_cluster.is_some(),
        "Decoded input resource"
    );
    Ok(resource)
}

/// Validate, expand and flatten one resource.
pub fn run_pipeline(mut resource: ExtendedResource) -> Result<Map<String, Value>> {
    let errors = engine::errors(&resource);
    engine::modify_out(&mut resource)?;
    info!(
        validation_errors = errors.len(),
        cluster_type = ?resource.resource.cluster_type,
        "Cluster topology pipeline complete"
    );
    output::flatten_output(&resource, &errors)
}

/// Run the whole pipeline on a raw input document and encode the output.
pub fn run(raw: &str) -> Result<String> {
    let resource = parse_input(raw)?;
    let output = run_pipeline(resource)?;
    output::to_json_string(&output)
}
