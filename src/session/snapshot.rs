//! Published session state
//!
//! A [`SessionSnapshot`] is the read-only projection the render surface
//! consumes. Snapshots are immutable and shared as `Arc`s; a new one is
//! published each time the projection changes.

use serde::Serialize;

use crate::layout::{DeviceClass, LayoutMode, LayoutPlan, Viewport};
use crate::registry::{Stream, StreamId};

/// Immutable projection of a session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Increments with every published snapshot
    pub revision: u64,
    /// Streams in display order, flags annotated
    ///
    /// `audio_level` and `last_spoke_at` are as of this snapshot's revision.
    /// Voice samples that leave the speaker set unchanged are not published,
    /// so live levels must be read from the controller's registry.
    pub streams: Vec<Stream>,
    /// Active speaker set in slot order
    pub active_speakers: Vec<StreamId>,
    /// Mode being rendered
    pub mode: LayoutMode,
    /// Mode the user selected
    pub selected_mode: LayoutMode,
    /// Device class of the session
    pub device: DeviceClass,
    /// Last known viewport
    pub viewport: Viewport,
    /// Geometry; `None` until the viewport has been measured once
    pub layout: Option<LayoutPlan>,
    /// Current gallery page (1-indexed)
    pub page: usize,
    /// Gallery page count
    pub page_count: usize,
}

impl SessionSnapshot {
    /// Snapshot of a session with no streams
    pub fn empty(mode: LayoutMode, device: DeviceClass, viewport: Viewport) -> Self {
        Self {
            revision: 0,
            streams: Vec::new(),
            active_speakers: Vec::new(),
            mode,
            selected_mode: mode,
            device,
            viewport,
            layout: None,
            page: 1,
            page_count: 1,
        }
    }

    /// Compare everything except the revision
    pub fn same_content(&self, other: &SessionSnapshot) -> bool {
        self.streams == other.streams
            && self.active_speakers == other.active_speakers
            && self.mode == other.mode
            && self.selected_mode == other.selected_mode
            && self.device == other.device
            && self.viewport == other.viewport
            && self.layout == other.layout
            && self.page == other.page
            && self.page_count == other.page_count
    }

    /// Stream ids in display order
    pub fn order(&self) -> Vec<&StreamId> {
        self.streams.iter().map(|s| &s.id).collect()
    }

    /// Get a stream by id
    pub fn stream(&self, id: &StreamId) -> Option<&Stream> {
        self.streams.iter().find(|s| &s.id == id)
    }

    /// Id of the fullscreen stream
    pub fn fullscreen(&self) -> Option<&StreamId> {
        self.streams
            .iter()
            .find(|s| s.flags.fullscreen)
            .map(|s| &s.id)
    }
}
