//! Visible tile caps
//!
//! How many tiles each layout mode shows before the rest are hidden. The
//! shared pinned list widens or narrows the multi-speaker and presentation
//! caps so that exactly the pinned streams (plus the screen share) fit.

use crate::config::CapTable;

use super::mode::LayoutMode;

/// Upper bound on visible tiles for a non-gallery mode
///
/// `selected` is the mode the user picked; it differs from `active` while a
/// screen share forces presentation mode. Gallery returns `None` because it is
/// bounded by the current page instead.
pub fn visible_cap(
    caps: &CapTable,
    active: LayoutMode,
    selected: LayoutMode,
    pinned_count: usize,
) -> Option<usize> {
    match active {
        LayoutMode::Gallery => None,
        LayoutMode::Speaker => Some(caps.speaker),
        LayoutMode::Multispeakers => {
            if pinned_count == 0 || pinned_count > caps.multispeakers {
                Some(caps.multispeakers)
            } else {
                Some(pinned_count)
            }
        }
        LayoutMode::Presentation => {
            let follows_pins = matches!(
                selected,
                LayoutMode::Speaker | LayoutMode::Multispeakers
            );
            if follows_pins && pinned_count > 0 {
                // Pins plus the screen share, never above the table value
                Some((pinned_count + 1).min(caps.presentation))
            } else {
                Some(caps.presentation)
            }
        }
    }
}
