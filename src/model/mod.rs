//! Typed configuration tree for cluster topologies.
//!
//! - `advanced_cluster`: the fully expanded tree the backing system expects
//! - `regions`: the simplified region-list input layered on top of it
//! - `schema`: static attribute classification per entity

mod advanced_cluster;
mod regions;
pub mod schema;

pub use advanced_cluster::*;
pub use regions::*;
