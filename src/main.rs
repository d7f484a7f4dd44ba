//! cluster-topology - expands a simplified cluster description.
//!
//! This is the main entry point that:
//! - Initializes structured logging on stderr
//! - Reads one input document from stdin
//! - Writes one output document to stdout
//!
//! Validation errors are reported in the output and still exit successfully.
//! Only unreadable input or an internal invariant breach exits with an error.

use std::io::Read;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cluster_topology::config::{LogFormat, RuntimeConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = RuntimeConfig::from_env();
    init_tracing(&config)?;
    for fallback in &config.fallbacks {
        warn!("{}", fallback);
    }

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    info!(bytes = input.len(), "Read input document");

    match cluster_topology::run(&input) {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            if e.is_fatal_input() {
                error!(error = %e, "Input cannot be read as a cluster configuration");
            } else {
                error!(error = %e, "Cluster topology expansion failed");
            }
            Err(e.into())
        }
    }
}

fn init_tracing(config: &RuntimeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::from_default_env().add_directive(config.crate_directive().parse()?);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
    Ok(())
}
