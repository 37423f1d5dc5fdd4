//! Layout solver
//!
//! Turns an ordered stream list into a [`LayoutPlan`] for the active layout
//! mode. The solver is pure: the same input always yields the same plan.

use std::ops::Range;

use crate::config::{DeviceProfile, SessionConfig};
use crate::error::{Error, Result};
use crate::registry::Stream;

use super::grid::GridShape;
use super::mode::{DeviceClass, LayoutMode, Orientation, Viewport};
use super::plan::{
    ContainerLayout, FlexPlacement, GridPlacement, LayoutPlan, Tile, TilePlacement, TrackList,
};
use super::policy::visible_cap;

/// Weights of the main and thumbnail tracks in presentation mode
const PRESENTATION_LANDSCAPE_TRACKS: [u32; 2] = [6, 1];
const PRESENTATION_PORTRAIT_TRACKS: [u32; 2] = [5, 1];

/// Speaker mode: main tile size
const SPEAKER_MAIN_BASIS_PCT: u8 = 100;
const SPEAKER_MAIN_HEIGHT_PCT: u8 = 75;
/// Speaker mode: thumbnail size on standard devices
const SPEAKER_THUMB_PCT: u8 = 20;

/// Everything the solver needs for one computation
#[derive(Debug, Clone)]
pub struct LayoutInput<'a> {
    /// Streams in display order
    pub streams: &'a [Stream],
    /// Mode being rendered
    pub active: LayoutMode,
    /// Mode the user selected
    pub selected: LayoutMode,
    /// Container size
    pub viewport: Viewport,
    /// Device class
    pub device: DeviceClass,
    /// Size of the shared pinned list
    pub pinned_count: usize,
    /// Current gallery page range
    pub page: Range<usize>,
}

/// Geometry solver configured with per-device policy
#[derive(Debug, Clone)]
pub struct LayoutSolver {
    standard: DeviceProfile,
    constrained: DeviceProfile,
}

impl LayoutSolver {
    /// Create a solver from session configuration
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            standard: config.standard,
            constrained: config.constrained,
        }
    }

    fn profile(&self, device: DeviceClass) -> &DeviceProfile {
        match device {
            DeviceClass::Standard => &self.standard,
            DeviceClass::Constrained => &self.constrained,
        }
    }

    /// Range of stream indices rendered for this input
    pub fn visible_range(&self, input: &LayoutInput<'_>) -> Range<usize> {
        let total = input.streams.len();
        let caps = &self.profile(input.device).caps;

        match visible_cap(caps, input.active, input.selected, input.pinned_count) {
            Some(cap) => 0..cap.min(total),
            None => {
                let start = input.page.start.min(total);
                let end = input.page.end.clamp(start, total);
                start..end
            }
        }
    }

    /// Compute the plan
    ///
    /// Fails with [`Error::LayoutComputationDeferred`] until the viewport has
    /// a non-zero size; callers keep their previous plan in that case.
    pub fn solve(&self, input: &LayoutInput<'_>) -> Result<LayoutPlan> {
        if !input.viewport.is_measured() {
            return Err(Error::LayoutComputationDeferred {
                width: input.viewport.width,
                height: input.viewport.height,
            });
        }

        let orientation = input.viewport.orientation();
        let range = self.visible_range(input);
        let visible = range.len();

        if input.streams.is_empty() {
            return Ok(LayoutPlan::empty(input.active, orientation));
        }

        let mut plan = match input.active {
            LayoutMode::Gallery | LayoutMode::Multispeakers => {
                self.grid_plan(input, orientation, range.clone())
            }
            LayoutMode::Presentation => self.presentation_plan(input, orientation, visible),
            LayoutMode::Speaker => self.speaker_plan(input, orientation, visible),
        };

        // Anything outside the visible range is hidden regardless of mode.
        for (index, tile) in plan.tiles.iter_mut().enumerate() {
            if !range.contains(&index) {
                tile.placement = TilePlacement::Hidden;
            }
        }

        plan.visible = visible;
        plan.hidden = input.streams.len() - visible;
        plan.overflow_tile = input.active == LayoutMode::Presentation
            && input.selected == LayoutMode::Presentation
            && plan.hidden > 0;

        Ok(plan)
    }

    fn grid_plan(
        &self,
        input: &LayoutInput<'_>,
        orientation: Orientation,
        range: Range<usize>,
    ) -> LayoutPlan {
        let n = range.len() as u32;
        let grid = GridShape::solve(n, orientation);
        let span = grid.span();
        let starts = grid.column_starts(n);

        let tiles = input
            .streams
            .iter()
            .enumerate()
            .map(|(index, stream)| {
                let column_start = index
                    .checked_sub(range.start)
                    .and_then(|slot| starts.get(slot).copied())
                    .flatten();
                Tile {
                    id: stream.id.clone(),
                    placement: TilePlacement::Grid(GridPlacement {
                        row_span: span,
                        column_span: span,
                        column_start,
                    }),
                }
            })
            .collect();

        let container = if n == 0 {
            ContainerLayout::Empty
        } else {
            ContainerLayout::Grid {
                columns: TrackList::Repeat(grid.track_columns()),
                rows: TrackList::Repeat(grid.track_rows()),
            }
        };

        LayoutPlan {
            container,
            tiles,
            grid: Some(grid),
            ..LayoutPlan::empty(input.active, orientation)
        }
    }

    fn presentation_plan(
        &self,
        input: &LayoutInput<'_>,
        orientation: Orientation,
        visible: usize,
    ) -> LayoutPlan {
        let thumbs = visible.saturating_sub(1).max(1) as u32;

        let container = match orientation {
            Orientation::Landscape => ContainerLayout::Grid {
                columns: TrackList::Fractions(PRESENTATION_LANDSCAPE_TRACKS.to_vec()),
                rows: TrackList::Repeat(thumbs),
            },
            Orientation::Portrait => ContainerLayout::Grid {
                columns: TrackList::Repeat(thumbs),
                rows: TrackList::Fractions(PRESENTATION_PORTRAIT_TRACKS.to_vec()),
            },
        };

        let tiles = input
            .streams
            .iter()
            .map(|stream| {
                let placement = if stream.is_screen() {
                    match orientation {
                        Orientation::Landscape => GridPlacement {
                            row_span: thumbs,
                            ..GridPlacement::default()
                        },
                        Orientation::Portrait => GridPlacement {
                            column_span: thumbs,
                            ..GridPlacement::default()
                        },
                    }
                } else {
                    GridPlacement::default()
                };
                Tile {
                    id: stream.id.clone(),
                    placement: TilePlacement::Grid(placement),
                }
            })
            .collect();

        LayoutPlan {
            container,
            tiles,
            ..LayoutPlan::empty(input.active, orientation)
        }
    }

    fn speaker_plan(
        &self,
        input: &LayoutInput<'_>,
        orientation: Orientation,
        visible: usize,
    ) -> LayoutPlan {
        let tiles = input
            .streams
            .iter()
            .enumerate()
            .map(|(index, stream)| {
                let placement = if index == 0 {
                    FlexPlacement {
                        basis_pct: Some(SPEAKER_MAIN_BASIS_PCT),
                        height_pct: Some(SPEAKER_MAIN_HEIGHT_PCT),
                        ..FlexPlacement::default()
                    }
                } else if index < visible && input.device == DeviceClass::Standard {
                    FlexPlacement {
                        width_pct: Some(SPEAKER_THUMB_PCT),
                        height_pct: Some(SPEAKER_THUMB_PCT),
                        ..FlexPlacement::default()
                    }
                } else {
                    // Constrained devices let the wrap flow size thumbnails.
                    FlexPlacement::default()
                };
                Tile {
                    id: stream.id.clone(),
                    placement: TilePlacement::Flex(placement),
                }
            })
            .collect();

        LayoutPlan {
            container: ContainerLayout::FlexWrap,
            tiles,
            ..LayoutPlan::empty(input.active, orientation)
        }
    }
}
