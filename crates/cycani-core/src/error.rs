//! Error types for the cycani.org catalog library
//!
//! Provides a comprehensive error enum with human-readable messages
//! and string serialization for embedding hosts.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all catalog operations
///
/// Implements Display for human-readable messages and Serialize
/// so embedding hosts can pass errors across FFI/IPC boundaries.
#[derive(Error, Debug)]
pub enum CycaniError {
    /// HTTP request failed (transport, timeout, or server error)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Requested resource returned 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse a JSON or HTML payload
    #[error("Failed to parse payload: {0}")]
    Parse(String),

    /// Expected markup pattern was not found
    #[error("Extraction failed: {0}")]
    Extraction(String),
}

impl Serialize for CycaniError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CycaniError>;
