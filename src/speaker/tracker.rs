//! Active speaker tracker
//!
//! Keeps a bounded set of streams judged vocally active. A member is only
//! displaced once it has been silent for a full grace window, so two people
//! talking over each other for a moment do not swap places on every sample.

use std::time::Duration;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::registry::{Source, StreamId};

/// Default silence required before a member can be replaced
pub const DEFAULT_GRACE_WINDOW: Duration = Duration::from_millis(1000);

/// A member of the active speaker set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerEntry {
    /// Stream id
    pub id: StreamId,
    /// Timestamp (ms) of the member's most recent voice activity
    pub last_spoke_at: u64,
}

/// Outcome of feeding one voice-activity sample to the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeakerChange {
    /// Membership did not change
    Unchanged,
    /// A stream filled a free slot
    Admitted(StreamId),
    /// A silent member was displaced
    Replaced {
        evicted: StreamId,
        admitted: StreamId,
    },
}

impl SpeakerChange {
    /// Whether membership changed and a reorder is needed
    pub fn is_change(&self) -> bool {
        !matches!(self, SpeakerChange::Unchanged)
    }
}

/// Bounded active speaker set with hysteresis-based replacement
#[derive(Debug, Clone)]
pub struct SpeakerTracker {
    /// Maximum number of members
    capacity: usize,
    /// Silence a member must accumulate before it can be replaced
    grace_window: Duration,
    /// Members in slot order; a replacement takes over the evicted slot
    members: Vec<SpeakerEntry>,
}

impl SpeakerTracker {
    /// Create a tracker with the default grace window
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_grace_window(capacity, DEFAULT_GRACE_WINDOW)
    }

    /// Create a tracker with a custom grace window
    ///
    /// Fails with [`Error::InvalidCapacityConfig`] when `capacity` is zero.
    pub fn with_grace_window(capacity: usize, grace_window: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacityConfig { capacity });
        }

        Ok(Self {
            capacity,
            grace_window,
            members: Vec::with_capacity(capacity),
        })
    }

    /// Maximum number of members
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Configured grace window
    pub fn grace_window(&self) -> Duration {
        self.grace_window
    }

    /// Current members in slot order
    pub fn members(&self) -> &[SpeakerEntry] {
        &self.members
    }

    /// Ids of current members in slot order
    pub fn member_ids(&self) -> Vec<StreamId> {
        self.members.iter().map(|m| m.id.clone()).collect()
    }

    /// Check if a stream is a member
    pub fn contains(&self, id: &StreamId) -> bool {
        self.members.iter().any(|m| &m.id == id)
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn grace_ms(&self) -> u64 {
        u64::try_from(self.grace_window.as_millis()).unwrap_or(u64::MAX)
    }

    /// Feed a voice-activity sample
    ///
    /// `now` is the sample timestamp in milliseconds. Samples older than a
    /// member's last activity count as zero silence for that member.
    pub fn on_voice_activity(
        &mut self,
        id: &StreamId,
        source: Source,
        level: f32,
        now: u64,
    ) -> SpeakerChange {
        // Refresh recency first so a member never competes against itself.
        let is_member = match self.members.iter_mut().find(|m| &m.id == id) {
            Some(member) => {
                member.last_spoke_at = member.last_spoke_at.max(now);
                true
            }
            None => false,
        };

        // Screen shares carry audio but never enter the speaker set.
        if source != Source::Media || is_member {
            return SpeakerChange::Unchanged;
        }

        if self.members.len() < self.capacity {
            if level > 0.0 {
                self.members.push(SpeakerEntry {
                    id: id.clone(),
                    last_spoke_at: now,
                });
                tracing::debug!(stream = %id, level = level, "Active speaker admitted");
                return SpeakerChange::Admitted(id.clone());
            }
            return SpeakerChange::Unchanged;
        }

        let grace = self.grace_ms();
        let candidate = self
            .members
            .iter()
            .enumerate()
            .map(|(slot, m)| (slot, now.saturating_sub(m.last_spoke_at)))
            // Largest silence wins; ties keep the earliest slot.
            .fold(None, |best: Option<(usize, u64)>, (slot, silence)| match best {
                Some((_, best_silence)) if best_silence >= silence => best,
                _ => Some((slot, silence)),
            });

        let Some((slot, silence)) = candidate else {
            return SpeakerChange::Unchanged;
        };

        if silence < grace {
            return SpeakerChange::Unchanged;
        }

        let entry = SpeakerEntry {
            id: id.clone(),
            last_spoke_at: now,
        };
        let Some(member) = self.members.get_mut(slot) else {
            return SpeakerChange::Unchanged;
        };
        let evicted = std::mem::replace(member, entry).id;

        tracing::debug!(
            evicted = %evicted,
            admitted = %id,
            silence_ms = silence,
            "Active speaker replaced"
        );

        SpeakerChange::Replaced {
            evicted,
            admitted: id.clone(),
        }
    }

    /// Change the capacity, evicting members beyond it
    ///
    /// The earliest slots are kept. Returns the evicted ids.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<Vec<StreamId>> {
        if capacity == 0 {
            return Err(Error::InvalidCapacityConfig { capacity });
        }

        self.capacity = capacity;
        let evicted = if self.members.len() > capacity {
            self.members.split_off(capacity)
        } else {
            Vec::new()
        };
        Ok(evicted.into_iter().map(|m| m.id).collect())
    }

    /// Evict a stream, e.g. when it leaves the session
    ///
    /// Returns whether it was a member.
    pub fn remove(&mut self, id: &StreamId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| &m.id != id);
        self.members.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> StreamId {
        StreamId::new(s)
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result = SpeakerTracker::new(0);
        assert!(matches!(
            result,
            Err(Error::InvalidCapacityConfig { capacity: 0 })
        ));
    }

    #[test]
    fn test_admit_until_full() {
        let mut tracker = SpeakerTracker::new(3).unwrap();

        assert_eq!(
            tracker.on_voice_activity(&id("a"), Source::Media, 0.5, 0),
            SpeakerChange::Admitted(id("a"))
        );
        tracker.on_voice_activity(&id("b"), Source::Media, 0.5, 10);
        tracker.on_voice_activity(&id("c"), Source::Media, 0.5, 20);
        assert_eq!(tracker.len(), 3);

        // Full and nobody has been silent long enough
        assert_eq!(
            tracker.on_voice_activity(&id("d"), Source::Media, 0.5, 30),
            SpeakerChange::Unchanged
        );
        assert_eq!(tracker.len(), 3);
    }

    #[test]
    fn test_zero_level_not_admitted() {
        let mut tracker = SpeakerTracker::new(3).unwrap();

        assert_eq!(
            tracker.on_voice_activity(&id("a"), Source::Media, 0.0, 0),
            SpeakerChange::Unchanged
        );
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_screen_never_admitted() {
        let mut tracker = SpeakerTracker::new(3).unwrap();

        tracker.on_voice_activity(&id("screen"), Source::Screen, 0.9, 0);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_single_slot_grace_window() {
        let mut tracker = SpeakerTracker::new(1).unwrap();

        tracker.on_voice_activity(&id("a"), Source::Media, 0.5, 0);

        // B at 500ms: A has only been silent 500ms
        assert_eq!(
            tracker.on_voice_activity(&id("b"), Source::Media, 0.5, 500),
            SpeakerChange::Unchanged
        );
        assert_eq!(
            tracker.on_voice_activity(&id("b"), Source::Media, 0.5, 999),
            SpeakerChange::Unchanged
        );

        // Exactly one grace window after A's last speech
        assert_eq!(
            tracker.on_voice_activity(&id("b"), Source::Media, 0.5, 1000),
            SpeakerChange::Replaced {
                evicted: id("a"),
                admitted: id("b"),
            }
        );
        assert_eq!(tracker.member_ids(), vec![id("b")]);
    }

    #[test]
    fn test_member_speech_extends_grace() {
        let mut tracker = SpeakerTracker::new(1).unwrap();

        tracker.on_voice_activity(&id("a"), Source::Media, 0.5, 0);
        tracker.on_voice_activity(&id("a"), Source::Media, 0.5, 800);

        assert!(!tracker
            .on_voice_activity(&id("b"), Source::Media, 0.5, 1000)
            .is_change());
        assert!(tracker
            .on_voice_activity(&id("b"), Source::Media, 0.5, 1800)
            .is_change());
    }

    #[test]
    fn test_replaces_longest_silent_member() {
        let mut tracker = SpeakerTracker::new(3).unwrap();

        tracker.on_voice_activity(&id("a"), Source::Media, 0.5, 0);
        tracker.on_voice_activity(&id("b"), Source::Media, 0.5, 100);
        tracker.on_voice_activity(&id("c"), Source::Media, 0.5, 200);

        // a keeps talking, so b is now the most silent
        tracker.on_voice_activity(&id("a"), Source::Media, 0.5, 1050);

        let change = tracker.on_voice_activity(&id("d"), Source::Media, 0.5, 1100);
        assert_eq!(
            change,
            SpeakerChange::Replaced {
                evicted: id("b"),
                admitted: id("d"),
            }
        );

        // Replacement takes the evicted slot
        assert_eq!(tracker.member_ids(), vec![id("a"), id("d"), id("c")]);
    }

    #[test]
    fn test_late_sample_counts_as_no_silence() {
        let mut tracker = SpeakerTracker::new(1).unwrap();

        tracker.on_voice_activity(&id("a"), Source::Media, 0.5, 5_000);
        assert!(!tracker
            .on_voice_activity(&id("b"), Source::Media, 0.5, 100)
            .is_change());

        // A late sample from the member must not move its recency backwards
        tracker.on_voice_activity(&id("a"), Source::Media, 0.5, 10);
        assert_eq!(tracker.members()[0].last_spoke_at, 5_000);
    }

    #[test]
    fn test_custom_grace_window() {
        let mut tracker =
            SpeakerTracker::with_grace_window(1, Duration::from_millis(250)).unwrap();

        tracker.on_voice_activity(&id("a"), Source::Media, 0.5, 0);
        assert!(tracker
            .on_voice_activity(&id("b"), Source::Media, 0.5, 250)
            .is_change());
    }

    #[test]
    fn test_set_capacity_keeps_earliest_slots() {
        let mut tracker = SpeakerTracker::new(3).unwrap();
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            tracker.on_voice_activity(&id(name), Source::Media, 0.5, i as u64);
        }

        let evicted = tracker.set_capacity(1).unwrap();
        assert_eq!(evicted, vec![id("b"), id("c")]);
        assert_eq!(tracker.member_ids(), vec![id("a")]);
        assert_eq!(tracker.capacity(), 1);

        assert!(matches!(
            tracker.set_capacity(0),
            Err(Error::InvalidCapacityConfig { capacity: 0 })
        ));
        assert_eq!(tracker.capacity(), 1);
    }

    #[test]
    fn test_remove() {
        let mut tracker = SpeakerTracker::new(3).unwrap();
        tracker.on_voice_activity(&id("a"), Source::Media, 0.5, 0);

        assert!(tracker.remove(&id("a")));
        assert!(!tracker.remove(&id("a")));
        assert!(!tracker.contains(&id("a")));

        // Slot is free again
        assert!(tracker
            .on_voice_activity(&id("b"), Source::Media, 0.5, 10)
            .is_change());
    }
}
