//! Stream registry
//!
//! The registry owns the participant stream records of a session. It knows
//! nothing about ordering or layout; the session controller drives it and
//! reorders it after every mutation.
//!
//! # Lifecycle
//!
//! ```text
//!   stream-available ──► add() ──► [record, flags cleared]
//!                                        │
//!   voice-activity ──► record_voice() ───┤
//!   set-fullscreen ──► set_fullscreen() ─┤
//!                                        │
//!   stream-removed ──► remove() ──► record dropped (pin/fullscreen with it)
//! ```

pub mod entry;
pub mod error;
pub mod key;
pub mod store;

pub use entry::{MediaHandle, Origin, Source, Stream, StreamDescriptor, StreamFlags};
pub use error::RegistryError;
pub use key::StreamId;
pub use store::StreamRegistry;
