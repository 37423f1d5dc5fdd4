//! Session events
//!
//! Every input the engine reacts to is one variant of [`SessionEvent`].
//! Collaborators dispatch them; the controller applies them one at a time.

use serde::Deserialize;

use crate::layout::LayoutMode;
use crate::registry::{StreamDescriptor, StreamId};

use super::metadata::SharedMetadata;

/// Input signal for a session
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A stream became available
    StreamAvailable(StreamDescriptor),

    /// A stream went away
    StreamRemoved { id: StreamId },

    /// Voice activity sample for a stream
    VoiceActivity {
        id: StreamId,
        level: f32,
        /// Sample time in milliseconds
        timestamp: u64,
    },

    /// Local pin toggled
    SetPin { id: StreamId, active: bool },

    /// Fullscreen toggled; sent only once the render surface's fullscreen
    /// request has succeeded
    SetFullscreen { id: StreamId, active: bool },

    /// The render surface left fullscreen on its own (e.g. Escape key)
    FullscreenExited,

    /// Layout container resized
    ViewportResize { width: u32, height: u32 },

    /// User selected a layout mode
    LayoutModeChange { mode: LayoutMode },

    /// User moved to a gallery page (1-indexed)
    PageChange { page: usize },

    /// Shared pinned/muted/off-camera lists changed
    MetadataChanged(SharedMetadata),
}

impl SessionEvent {
    /// Stream the event refers to, if any
    pub fn stream_id(&self) -> Option<&StreamId> {
        match self {
            SessionEvent::StreamAvailable(desc) => Some(&desc.id),
            SessionEvent::StreamRemoved { id }
            | SessionEvent::VoiceActivity { id, .. }
            | SessionEvent::SetPin { id, .. }
            | SessionEvent::SetFullscreen { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::StreamAvailable(_) => "stream_available",
            SessionEvent::StreamRemoved { .. } => "stream_removed",
            SessionEvent::VoiceActivity { .. } => "voice_activity",
            SessionEvent::SetPin { .. } => "set_pin",
            SessionEvent::SetFullscreen { .. } => "set_fullscreen",
            SessionEvent::FullscreenExited => "fullscreen_exited",
            SessionEvent::ViewportResize { .. } => "viewport_resize",
            SessionEvent::LayoutModeChange { .. } => "layout_mode_change",
            SessionEvent::PageChange { .. } => "page_change",
            SessionEvent::MetadataChanged(_) => "metadata_changed",
        }
    }
}
