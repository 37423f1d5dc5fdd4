//! Stream prioritization and tile layout for multi-party video sessions
//!
//! Given the participant streams of a conference, this crate decides which
//! of them matter right now, in what order they appear, and where each one
//! goes on screen. It is driven entirely by events (streams joining and
//! leaving, voice activity, pins, fullscreen, resizes, mode changes) and
//! publishes immutable snapshots for a render surface to apply.
//!
//! # Example
//!
//! ```no_run
//! use conference_layout::{
//!     Origin, SessionConfig, SessionController, SessionEvent, StreamDescriptor, Viewport,
//! };
//!
//! #[tokio::main]
//! async fn main() -> conference_layout::Result<()> {
//!     let mut controller =
//!         SessionController::new(SessionConfig::default(), Viewport::new(1280, 720))?;
//!     let mut snapshots = controller.subscribe();
//!
//!     controller.handle(SessionEvent::StreamAvailable(StreamDescriptor::media(
//!         "cam-1", "alice", "Alice", Origin::Remote,
//!     )));
//!
//!     if let Ok(snapshot) = snapshots.recv().await {
//!         println!("{} streams, mode {}", snapshot.streams.len(), snapshot.mode);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod order;
pub mod registry;
pub mod session;
pub mod speaker;

pub use config::{CapTable, DeviceProfile, SessionConfig};
pub use error::{Error, Result};
pub use layout::{
    ContainerLayout, DeviceClass, FlexPlacement, GridPlacement, GridShape, LayoutMode, LayoutPlan,
    Orientation, Tile, TilePlacement, TrackList, Viewport,
};
pub use order::StreamOrderer;
pub use registry::{
    MediaHandle, Origin, RegistryError, Source, Stream, StreamDescriptor, StreamFlags, StreamId,
    StreamRegistry,
};
pub use session::{SessionController, SessionEvent, SessionSnapshot, SharedMetadata};
pub use speaker::{SpeakerChange, SpeakerTracker};
