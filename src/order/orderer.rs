//! Stream ordering
//!
//! Ranks streams by a fixed list of partitions, highest priority first:
//!
//! 1. fullscreen
//! 2. screen share
//! 3. pinned
//! 4. local camera
//! 5. active speaker (camera streams only)
//!
//! Streams equal on every partition keep their previous relative order, which
//! is what keeps the grid from reshuffling on unrelated events.

use std::cmp::Reverse;

use crate::registry::{Source, Stream, StreamId};

/// Membership test for the active speaker set
pub trait SpeakerSet {
    /// Check if a stream is an active speaker
    fn is_active(&self, id: &StreamId) -> bool;
}

impl SpeakerSet for crate::speaker::SpeakerTracker {
    fn is_active(&self, id: &StreamId) -> bool {
        self.contains(id)
    }
}

impl SpeakerSet for [StreamId] {
    fn is_active(&self, id: &StreamId) -> bool {
        self.contains(id)
    }
}

impl SpeakerSet for Vec<StreamId> {
    fn is_active(&self, id: &StreamId) -> bool {
        self.contains(id)
    }
}

/// Partition key of a stream; larger sorts first
type RankKey = (bool, bool, bool, bool, bool);

/// Pure, stable stream orderer
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamOrderer;

impl StreamOrderer {
    /// Create an orderer
    pub fn new() -> Self {
        Self
    }

    fn rank<S: SpeakerSet + ?Sized>(stream: &Stream, speakers: &S) -> RankKey {
        let is_media = stream.source == Source::Media;
        (
            stream.flags.fullscreen,
            stream.is_screen(),
            stream.flags.pin,
            stream.is_local_media(),
            is_media && speakers.is_active(&stream.id),
        )
    }

    /// Sort streams in place
    ///
    /// The slice's current order is the tie-breaker, so callers should pass
    /// the previously ordered list.
    pub fn sort<S: SpeakerSet + ?Sized>(&self, streams: &mut [Stream], speakers: &S) {
        // `sort_by_cached_key` is stable, which provides the final fallback.
        streams.sort_by_cached_key(|s| Reverse(Self::rank(s, speakers)));
    }

    /// Return an ordered copy
    pub fn ordered<S: SpeakerSet + ?Sized>(&self, streams: &[Stream], speakers: &S) -> Vec<Stream> {
        let mut out = streams.to_vec();
        self.sort(&mut out, speakers);
        out
    }
}
