//! Stream identity
//!
//! `StreamId` is the only stable key in the engine. Records are rebuilt on
//! every mutation, so nothing else (position, object identity) may be used to
//! refer to a stream across snapshots.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Unique identifier for a participant stream
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamId(Arc<str>);

impl StreamId {
    /// Create a new stream id
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StreamId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StreamId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_id_equality() {
        let a = StreamId::new("cam-1");
        let b: StreamId = "cam-1".into();
        let c: StreamId = String::from("cam-2").into();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str(), "cam-1");
        assert_eq!(c.to_string(), "cam-2");
    }
}
