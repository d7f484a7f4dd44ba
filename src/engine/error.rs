//! Error types for the topology engine.
//!
//! Semantic validation findings are not errors here: they are collected as
//! plain strings by [`crate::engine::validation::errors`]. This type covers
//! input that cannot be read as a cluster tree and internal invariant breaches.

use thiserror::Error;

/// Error type for engine operations
#[derive(Error, Debug)]
pub enum Error {
    /// Input document is not valid JSON or does not match the tree shape
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Missing required field in the input envelope
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A precondition validation should have caught was violated
    #[error("Invariant violation: {0}")]
    Invariant(String),

    /// Output could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl Error {
    /// Check if this error was caused by malformed caller input
    pub fn is_fatal_input(&self) -> bool {
        matches!(self, Error::Parse(_) | Error::MissingField(_))
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;
