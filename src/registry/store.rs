//! Stream registry implementation
//!
//! The registry owns every live stream record. Records are kept in the order
//! produced by the last reorder, which is what the orderer's stable fallback
//! preserves. Newly added streams are appended at the end.

use std::collections::HashSet;

use super::entry::{Source, Stream, StreamDescriptor};
use super::error::RegistryError;
use super::key::StreamId;

/// Registry of all live streams in a session
///
/// Owned by a single controller; it is not shared between threads.
#[derive(Debug, Default)]
pub struct StreamRegistry {
    /// Records in current display order
    streams: Vec<Stream>,

    /// Ids present in `streams`
    ids: HashSet<StreamId>,
}

impl StreamRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stream
    ///
    /// Returns `false` without touching the existing record if the id is
    /// already present.
    pub fn add(&mut self, desc: StreamDescriptor) -> bool {
        if self.ids.contains(&desc.id) {
            tracing::debug!(stream = %desc.id, "Duplicate stream ignored");
            return false;
        }

        let stream = Stream::from_descriptor(desc);
        tracing::info!(
            stream = %stream.id,
            client = %stream.client_id,
            source = ?stream.source,
            origin = ?stream.origin,
            "Stream registered"
        );

        self.ids.insert(stream.id.clone());
        self.streams.push(stream);
        true
    }

    /// Strict variant of [`add`](Self::add) that reports duplicates
    pub fn try_add(&mut self, desc: StreamDescriptor) -> Result<(), RegistryError> {
        if self.ids.contains(&desc.id) {
            return Err(RegistryError::StreamAlreadyRegistered(desc.id));
        }
        self.add(desc);
        Ok(())
    }

    /// Remove a stream and return its final record
    ///
    /// Flags such as pin and fullscreen leave with the record.
    pub fn remove(&mut self, id: &StreamId) -> Option<Stream> {
        if !self.ids.remove(id) {
            return None;
        }

        let pos = self.streams.iter().position(|s| &s.id == id)?;
        let stream = self.streams.remove(pos);

        tracing::info!(
            stream = %id,
            was_fullscreen = stream.flags.fullscreen,
            "Stream unregistered"
        );

        Some(stream)
    }

    /// Get a stream by id
    pub fn get(&self, id: &StreamId) -> Option<&Stream> {
        if !self.ids.contains(id) {
            return None;
        }
        self.streams.iter().find(|s| &s.id == id)
    }

    fn get_mut(&mut self, id: &StreamId) -> Result<&mut Stream, RegistryError> {
        self.streams
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| RegistryError::StreamNotFound(id.clone()))
    }

    /// Check if a stream is registered
    pub fn contains(&self, id: &StreamId) -> bool {
        self.ids.contains(id)
    }

    /// Streams in current display order
    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    /// Number of registered streams
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    /// Check if any screen share is registered
    pub fn has_screen(&self) -> bool {
        self.streams.iter().any(Stream::is_screen)
    }

    /// Id of the stream currently shown fullscreen
    pub fn fullscreen(&self) -> Option<&StreamId> {
        self.streams
            .iter()
            .find(|s| s.flags.fullscreen)
            .map(|s| &s.id)
    }

    /// Set or clear fullscreen on a stream
    ///
    /// Setting fullscreen clears it on every other stream, so at most one
    /// stream is fullscreen at a time. Returns whether anything changed.
    pub fn set_fullscreen(&mut self, id: &StreamId, active: bool) -> Result<bool, RegistryError> {
        if !self.ids.contains(id) {
            return Err(RegistryError::StreamNotFound(id.clone()));
        }

        let mut changed = false;
        for stream in &mut self.streams {
            let want = active && &stream.id == id;
            // Clearing only touches the named stream.
            if !active && &stream.id != id {
                continue;
            }
            if stream.flags.fullscreen != want {
                stream.flags.fullscreen = want;
                changed = true;
            }
        }

        if changed {
            tracing::debug!(stream = %id, active = active, "Fullscreen updated");
        }
        Ok(changed)
    }

    /// Clear fullscreen on every stream
    pub fn clear_fullscreen(&mut self) -> bool {
        let mut changed = false;
        for stream in &mut self.streams {
            if stream.flags.fullscreen {
                stream.flags.fullscreen = false;
                changed = true;
            }
        }
        changed
    }

    /// Record a voice-activity sample on a stream
    ///
    /// Returns the stream's source so the caller can decide speaker
    /// eligibility without a second lookup.
    pub fn record_voice(
        &mut self,
        id: &StreamId,
        level: f32,
        now: u64,
    ) -> Result<Source, RegistryError> {
        let stream = self.get_mut(id)?;
        stream.audio_level = level;
        stream.last_spoke_at = Some(now);
        Ok(stream.source)
    }

    /// Rewrite per-stream flags in place
    ///
    /// Used to annotate records from shared metadata before a reorder.
    pub(crate) fn annotate<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Stream),
    {
        for stream in &mut self.streams {
            f(stream);
        }
    }

    /// Reorder records in place
    ///
    /// The closure must only permute the slice.
    pub(crate) fn reorder<F>(&mut self, f: F)
    where
        F: FnOnce(&mut [Stream]),
    {
        f(&mut self.streams);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::entry::Origin;

    fn cam(id: &str) -> StreamDescriptor {
        StreamDescriptor::media(id, format!("client-{id}"), id, Origin::Remote)
    }

    #[test]
    fn test_add_and_duplicate() {
        let mut registry = StreamRegistry::new();

        assert!(registry.add(cam("a")));
        assert!(!registry.add(cam("a")));
        assert_eq!(registry.len(), 1);

        let result = registry.try_add(cam("a"));
        assert!(matches!(
            result,
            Err(RegistryError::StreamAlreadyRegistered(_))
        ));
    }

    #[test]
    fn test_duplicate_keeps_existing_record() {
        let mut registry = StreamRegistry::new();
        registry.add(cam("a"));
        registry.record_voice(&"a".into(), 0.4, 10).unwrap();

        registry.add(cam("a"));

        let stream = registry.get(&"a".into()).unwrap();
        assert_eq!(stream.last_spoke_at, Some(10));
    }

    #[test]
    fn test_remove() {
        let mut registry = StreamRegistry::new();
        registry.add(cam("a"));
        registry.add(cam("b"));

        let removed = registry.remove(&"a".into()).unwrap();
        assert_eq!(removed.id, StreamId::new("a"));
        assert!(!registry.contains(&"a".into()));
        assert_eq!(registry.len(), 1);

        // Removing twice is a no-op
        assert!(registry.remove(&"a".into()).is_none());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut registry = StreamRegistry::new();
        registry.add(cam("c"));
        registry.add(cam("a"));
        registry.add(cam("b"));

        let ids: Vec<&str> = registry.streams().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_single_fullscreen() {
        let mut registry = StreamRegistry::new();
        registry.add(cam("a"));
        registry.add(cam("b"));

        assert!(registry.set_fullscreen(&"a".into(), true).unwrap());
        assert!(registry.set_fullscreen(&"b".into(), true).unwrap());

        assert_eq!(registry.fullscreen(), Some(&StreamId::new("b")));
        assert!(!registry.get(&"a".into()).unwrap().flags.fullscreen);

        // Same request again changes nothing
        assert!(!registry.set_fullscreen(&"b".into(), true).unwrap());
    }

    #[test]
    fn test_clear_fullscreen_on_other_stream_is_noop() {
        let mut registry = StreamRegistry::new();
        registry.add(cam("a"));
        registry.add(cam("b"));
        registry.set_fullscreen(&"a".into(), true).unwrap();

        assert!(!registry.set_fullscreen(&"b".into(), false).unwrap());
        assert_eq!(registry.fullscreen(), Some(&StreamId::new("a")));

        assert!(registry.clear_fullscreen());
        assert!(registry.fullscreen().is_none());
    }

    #[test]
    fn test_unknown_stream_errors() {
        let mut registry = StreamRegistry::new();

        assert!(matches!(
            registry.set_fullscreen(&"ghost".into(), true),
            Err(RegistryError::StreamNotFound(_))
        ));
        assert!(matches!(
            registry.record_voice(&"ghost".into(), 1.0, 0),
            Err(RegistryError::StreamNotFound(_))
        ));
    }

    #[test]
    fn test_record_voice() {
        let mut registry = StreamRegistry::new();
        registry.add(cam("a"));

        let source = registry.record_voice(&"a".into(), 0.7, 1_500).unwrap();
        assert_eq!(source, Source::Media);

        let stream = registry.get(&"a".into()).unwrap();
        assert_eq!(stream.audio_level, 0.7);
        assert_eq!(stream.last_spoke_at, Some(1_500));
    }

    #[test]
    fn test_has_screen() {
        let mut registry = StreamRegistry::new();
        registry.add(cam("a"));
        assert!(!registry.has_screen());

        registry.add(StreamDescriptor::screen("s", "client-s", "s", Origin::Remote));
        assert!(registry.has_screen());

        registry.remove(&"s".into());
        assert!(!registry.has_screen());
    }
}
