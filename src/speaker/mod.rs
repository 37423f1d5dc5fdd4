//! Active speaker tracking
//!
//! Voice-activity samples arrive far more often than the layout should move.
//! The tracker turns them into a small, slowly changing set of active
//! speakers that the orderer can rank by.

pub mod tracker;

pub use tracker::{SpeakerChange, SpeakerEntry, SpeakerTracker, DEFAULT_GRACE_WINDOW};
