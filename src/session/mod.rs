//! Conference session
//!
//! This module provides:
//! - The typed [`SessionEvent`] input
//! - Shared metadata and the layout mode state machine
//! - The [`SessionController`] that applies events and publishes
//!   [`SessionSnapshot`]s

pub mod controller;
pub mod event;
pub mod metadata;
pub mod snapshot;
pub mod state;

pub use controller::SessionController;
pub use event::SessionEvent;
pub use metadata::SharedMetadata;
pub use snapshot::SessionSnapshot;
pub use state::ModeState;
