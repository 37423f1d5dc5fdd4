//! Layout output types
//!
//! A [`LayoutPlan`] is the complete geometry the render surface applies: one
//! container description plus one placement per stream, in stream order. The
//! surface should not need to make any further layout decision.

use serde::Serialize;

use crate::registry::StreamId;

use super::grid::GridShape;
use super::mode::{LayoutMode, Orientation};

/// Track definition along one grid axis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackList {
    /// `n` equal tracks
    Repeat(u32),
    /// Tracks sized by relative weights (e.g. `[6, 1]`)
    Fractions(Vec<u32>),
}

impl TrackList {
    /// Number of tracks
    pub fn len(&self) -> u32 {
        match self {
            TrackList::Repeat(n) => *n,
            TrackList::Fractions(weights) => weights.len() as u32,
        }
    }

    /// Check if there are no tracks
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Container arrangement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContainerLayout {
    /// Nothing to lay out
    Empty,
    /// CSS-grid-like track layout
    Grid { columns: TrackList, rows: TrackList },
    /// Centered wrapping flow
    FlexWrap,
}

/// Placement of a tile on a grid container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridPlacement {
    pub row_span: u32,
    pub column_span: u32,
    /// Explicit 1-indexed start column; `None` flows automatically
    pub column_start: Option<u32>,
}

impl Default for GridPlacement {
    fn default() -> Self {
        Self {
            row_span: 1,
            column_span: 1,
            column_start: None,
        }
    }
}

/// Sizing of a tile in a flex container, in percent of the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FlexPlacement {
    pub basis_pct: Option<u8>,
    pub width_pct: Option<u8>,
    pub height_pct: Option<u8>,
}

/// Where a single stream goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TilePlacement {
    /// Not rendered on the current screen
    Hidden,
    Grid(GridPlacement),
    Flex(FlexPlacement),
}

impl TilePlacement {
    /// Check if the tile is rendered
    pub fn is_visible(&self) -> bool {
        !matches!(self, TilePlacement::Hidden)
    }
}

/// Placement for one stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub id: StreamId,
    pub placement: TilePlacement,
}

/// Complete geometry for one ordered stream list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutPlan {
    /// Mode the plan was computed for
    pub mode: LayoutMode,
    /// Viewport orientation used
    pub orientation: Orientation,
    /// Container arrangement
    pub container: ContainerLayout,
    /// One entry per stream, in stream order
    pub tiles: Vec<Tile>,
    /// Rendered tile count
    pub visible: usize,
    /// Hidden tile count
    pub hidden: usize,
    /// Grid shape for gallery and multi-speaker modes
    pub grid: Option<GridShape>,
    /// Whether the surface should render a "more" tile after the visible ones
    pub overflow_tile: bool,
}

impl LayoutPlan {
    /// Plan with nothing to show
    pub fn empty(mode: LayoutMode, orientation: Orientation) -> Self {
        Self {
            mode,
            orientation,
            container: ContainerLayout::Empty,
            tiles: Vec::new(),
            visible: 0,
            hidden: 0,
            grid: None,
            overflow_tile: false,
        }
    }

    /// Placement of a stream, if the plan covers it
    pub fn placement(&self, id: &StreamId) -> Option<TilePlacement> {
        self.tiles
            .iter()
            .find(|t| &t.id == id)
            .map(|t| t.placement)
    }

    /// Ids of rendered streams, in order
    pub fn visible_ids(&self) -> impl Iterator<Item = &StreamId> {
        self.tiles
            .iter()
            .filter(|t| t.placement.is_visible())
            .map(|t| &t.id)
    }

    /// Drop tiles for streams that no longer exist
    ///
    /// Used when a stale plan is kept while the viewport is unmeasured.
    pub fn retain_streams<F>(&mut self, mut is_live: F)
    where
        F: FnMut(&StreamId) -> bool,
    {
        self.tiles.retain(|t| is_live(&t.id));
        self.visible = self.tiles.iter().filter(|t| t.placement.is_visible()).count();
        self.hidden = self.tiles.len() - self.visible;
    }
}
