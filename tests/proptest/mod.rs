// Test code is allowed to panic on failure
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::string_slice
)]

//! Property-based tests for topology inference and expansion.

#[path = "../common/mod.rs"]
mod common;

mod topology_props;
