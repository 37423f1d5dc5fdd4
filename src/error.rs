//! Error types
//!
//! Most failures in this crate are absorbed by the session controller: an
//! event naming an unknown stream is a no-op, and a layout request against an
//! unmeasured viewport keeps the previous geometry. Only construction-time
//! configuration errors surface to callers.

use thiserror::Error;

use crate::registry::{RegistryError, StreamId};

/// Crate-level error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A signal referenced a stream the registry does not know about
    #[error("invalid stream reference: {0}")]
    InvalidStreamReference(StreamId),

    /// Active speaker capacity must be at least one
    #[error("invalid active speaker capacity: {capacity}")]
    InvalidCapacityConfig { capacity: usize },

    /// Viewport has not been measured yet (zero width or height)
    #[error("layout deferred until viewport is measured ({width}x{height})")]
    LayoutComputationDeferred { width: u32, height: u32 },

    /// Configuration could not be parsed
    #[error("failed to parse configuration: {message}")]
    ConfigParse { message: String },

    /// Registry operation failed
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl Error {
    /// Whether the error is a per-event condition that callers should drop
    /// rather than propagate.
    pub fn is_absorbable(&self) -> bool {
        matches!(
            self,
            Error::InvalidStreamReference(_)
                | Error::LayoutComputationDeferred { .. }
                | Error::Registry(_)
        )
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse {
            message: err.to_string(),
        }
    }
}

/// Result alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;
