//! Shared session metadata
//!
//! Pinned, muted and off-camera lists are synchronized between participants
//! by a collaborator outside this crate. The engine only reads them to
//! annotate stream flags on each recompute.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::registry::{Stream, StreamId};

/// Snapshot of the shared id lists
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SharedMetadata {
    /// Streams pinned for everyone
    pub pinned: HashSet<StreamId>,
    /// Streams with the microphone muted
    pub muted: HashSet<StreamId>,
    /// Streams with the camera off
    pub off_camera: HashSet<StreamId>,
}

impl SharedMetadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a pinned stream
    pub fn with_pinned(mut self, id: impl Into<StreamId>) -> Self {
        self.pinned.insert(id.into());
        self
    }

    /// Builder: add a muted stream
    pub fn with_muted(mut self, id: impl Into<StreamId>) -> Self {
        self.muted.insert(id.into());
        self
    }

    /// Builder: add an off-camera stream
    pub fn with_off_camera(mut self, id: impl Into<StreamId>) -> Self {
        self.off_camera.insert(id.into());
        self
    }

    /// Size of the shared pinned list
    ///
    /// Counts ids even if their stream is not present, matching what other
    /// participants see.
    pub fn pinned_count(&self) -> usize {
        self.pinned.len()
    }

    /// Rewrite a stream's flags from the shared lists
    ///
    /// `local_pin` is this participant's own pin, which is combined with the
    /// shared pinned list.
    pub fn annotate(&self, stream: &mut Stream, local_pin: Option<&StreamId>) {
        stream.flags.pin = local_pin == Some(&stream.id) || self.pinned.contains(&stream.id);
        stream.flags.muted = self.muted.contains(&stream.id);
        stream.flags.off_camera = self.off_camera.contains(&stream.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Origin, StreamDescriptor};

    fn stream(id: &str) -> Stream {
        Stream::from_descriptor(StreamDescriptor::media(id, id, id, Origin::Remote))
    }

    #[test]
    fn test_annotate_from_lists() {
        let meta = SharedMetadata::new()
            .with_pinned("a")
            .with_muted("a")
            .with_off_camera("b");

        let mut a = stream("a");
        let mut b = stream("b");
        meta.annotate(&mut a, None);
        meta.annotate(&mut b, None);

        assert!(a.flags.pin && a.flags.muted && !a.flags.off_camera);
        assert!(!b.flags.pin && !b.flags.muted && b.flags.off_camera);
    }

    #[test]
    fn test_local_pin_combines_with_shared() {
        let meta = SharedMetadata::new().with_pinned("a");
        let local = StreamId::new("b");

        let mut a = stream("a");
        let mut b = stream("b");
        let mut c = stream("c");
        meta.annotate(&mut a, Some(&local));
        meta.annotate(&mut b, Some(&local));
        meta.annotate(&mut c, Some(&local));

        assert!(a.flags.pin);
        assert!(b.flags.pin);
        assert!(!c.flags.pin);
    }

    #[test]
    fn test_annotate_clears_stale_flags() {
        let mut a = stream("a");
        a.flags.muted = true;
        a.flags.pin = true;

        SharedMetadata::new().annotate(&mut a, None);
        assert!(!a.flags.muted);
        assert!(!a.flags.pin);
    }

    #[test]
    fn test_pinned_count_includes_absent_streams() {
        let meta = SharedMetadata::new().with_pinned("a").with_pinned("gone");
        assert_eq!(meta.pinned_count(), 2);
    }

    #[test]
    fn test_deserialize_partial() {
        let meta: SharedMetadata = serde_json::from_str(r#"{"muted":["x"]}"#).unwrap();
        assert!(meta.pinned.is_empty());
        assert!(meta.muted.contains(&StreamId::new("x")));
    }
}
