//! Layout mode state machine
//!
//! Tracks the mode the user selected separately from the mode actually
//! rendered. A screen share forces presentation; when the last one goes away
//! the rendered mode falls back to the selection.
//!
//! ```text
//!              screen added
//!   selected ───────────────► presentation
//!       ▲                          │
//!       └──────────────────────────┘
//!            last screen gone
//! ```

use crate::layout::LayoutMode;

/// Selected and rendered layout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeState {
    /// Mode chosen by the user
    selected: LayoutMode,
    /// Mode being rendered
    active: LayoutMode,
}

impl ModeState {
    /// Create state with an initial selection and no screen share
    pub fn new(initial: LayoutMode) -> Self {
        Self {
            selected: initial,
            active: initial,
        }
    }

    /// Mode chosen by the user
    pub fn selected(&self) -> LayoutMode {
        self.selected
    }

    /// Mode being rendered
    pub fn active(&self) -> LayoutMode {
        self.active
    }

    /// Apply a user selection
    ///
    /// While a screen share is present the rendered mode stays on
    /// presentation; the selection still changes and is restored later.
    /// Returns whether either mode changed.
    pub fn select(&mut self, mode: LayoutMode, screen_present: bool) -> bool {
        let before = *self;
        self.selected = mode;
        self.active = if screen_present {
            LayoutMode::Presentation
        } else {
            mode
        };
        *self != before
    }

    /// A screen share appeared
    pub fn on_screen_added(&mut self) -> bool {
        let changed = self.active != LayoutMode::Presentation;
        self.active = LayoutMode::Presentation;
        changed
    }

    /// No screen share remains
    pub fn on_screen_gone(&mut self) -> bool {
        let changed = self.active != self.selected;
        self.active = self.selected;
        changed
    }
}

impl Default for ModeState {
    fn default() -> Self {
        Self::new(LayoutMode::default())
    }
}
