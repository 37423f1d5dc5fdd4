//! Stream record types
//!
//! This module defines the per-stream record stored in the registry and the
//! descriptor a transport collaborator hands over when a stream appears.

use serde::{Deserialize, Serialize};

use super::key::StreamId;

/// Which side of the session produced the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Captured on this device
    Local,
    /// Received from another participant
    Remote,
}

/// What the stream carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Camera and microphone
    Media,
    /// Screen share
    Screen,
}

/// Opaque token for the media source behind a stream
///
/// The render surface owns the actual media objects; the engine only carries
/// this token through so the surface can look them up again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaHandle(pub u64);

/// Display flags of a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreamFlags {
    /// Pinned locally or by the shared pinned list
    pub pin: bool,
    /// Microphone muted
    pub muted: bool,
    /// Camera turned off
    pub off_camera: bool,
    /// Shown fullscreen
    pub fullscreen: bool,
}

/// Descriptor delivered with a stream-available signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    pub id: StreamId,
    pub client_id: String,
    pub name: String,
    pub origin: Origin,
    pub source: Source,
    #[serde(default)]
    pub media: MediaHandle,
}

impl StreamDescriptor {
    /// Descriptor for a camera/microphone stream
    pub fn media(
        id: impl Into<StreamId>,
        client_id: impl Into<String>,
        name: impl Into<String>,
        origin: Origin,
    ) -> Self {
        Self {
            id: id.into(),
            client_id: client_id.into(),
            name: name.into(),
            origin,
            source: Source::Media,
            media: MediaHandle::default(),
        }
    }

    /// Descriptor for a screen share
    pub fn screen(
        id: impl Into<StreamId>,
        client_id: impl Into<String>,
        name: impl Into<String>,
        origin: Origin,
    ) -> Self {
        Self {
            source: Source::Screen,
            ..Self::media(id, client_id, name, origin)
        }
    }

    /// Attach the media handle
    pub fn with_media(mut self, media: MediaHandle) -> Self {
        self.media = media;
        self
    }
}

/// One rendered tile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stream {
    pub id: StreamId,
    pub client_id: String,
    pub name: String,
    pub origin: Origin,
    pub source: Source,
    pub media: MediaHandle,

    /// Last reported audio level
    pub audio_level: f32,

    /// Timestamp (ms) of the last voice activity, if any
    pub last_spoke_at: Option<u64>,

    /// Locally owned flags plus flags annotated from shared metadata
    pub flags: StreamFlags,
}

impl Stream {
    /// Create a record from a descriptor with all flags cleared
    pub fn from_descriptor(desc: StreamDescriptor) -> Self {
        Self {
            id: desc.id,
            client_id: desc.client_id,
            name: desc.name,
            origin: desc.origin,
            source: desc.source,
            media: desc.media,
            audio_level: 0.0,
            last_spoke_at: None,
            flags: StreamFlags::default(),
        }
    }

    /// Check if this is a screen share
    pub fn is_screen(&self) -> bool {
        self.source == Source::Screen
    }

    /// Check if this is the local camera/microphone
    pub fn is_local_media(&self) -> bool {
        self.origin == Origin::Local && self.source == Source::Media
    }
}
