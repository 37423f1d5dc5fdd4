//! Registry error types
//!
//! Error types for stream registry operations.

use thiserror::Error;

use super::key::StreamId;

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Stream not found
    #[error("stream not found: {0}")]
    StreamNotFound(StreamId),
    /// Stream with this id is already registered
    #[error("stream already registered: {0}")]
    StreamAlreadyRegistered(StreamId),
}
