//! Tile layout
//!
//! This module provides:
//! - Layout mode, device class and viewport types
//! - Visible tile caps per mode
//! - Grid shape solving with double-grid correction and last-row centering
//! - Gallery pagination
//! - The solver that assembles a complete [`LayoutPlan`]

pub mod grid;
pub mod mode;
pub mod page;
pub mod plan;
pub mod policy;
pub mod solver;

pub use grid::GridShape;
pub use mode::{DeviceClass, LayoutMode, Orientation, Viewport};
pub use page::Paginator;
pub use plan::{
    ContainerLayout, FlexPlacement, GridPlacement, LayoutPlan, Tile, TilePlacement, TrackList,
};
pub use policy::visible_cap;
pub use solver::{LayoutInput, LayoutSolver};
