//! Session configuration
//!
//! Every policy constant of the engine lives here. The defaults reproduce the
//! conference screen's behaviour; deployments can override them in code with
//! the builder methods or load them from TOML.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{DeviceClass, LayoutMode};

/// Widths below this are treated as constrained devices
pub const DEFAULT_CONSTRAINED_MAX_WIDTH: u32 = 768;

/// Default grace window for active speaker replacement, in milliseconds
pub const DEFAULT_GRACE_WINDOW_MS: u64 = 1000;

/// Default number of buffered snapshots per subscriber
pub const DEFAULT_SNAPSHOT_CAPACITY: usize = 16;

/// Upper bounds on visible tiles per layout mode
///
/// Gallery mode is bounded by the page size instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapTable {
    /// Tiles shown in speaker mode
    pub speaker: usize,
    /// Maximum tiles in multi-speaker mode
    pub multispeakers: usize,
    /// Maximum tiles in presentation mode, screen share included
    pub presentation: usize,
}

/// Per-device-class policy
///
/// A profile given in TOML must be complete; omit the table entirely to keep
/// the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Gallery page size
    pub page_size: usize,
    /// Active speaker set capacity
    pub speaker_capacity: usize,
    /// Visible tile caps
    pub caps: CapTable,
}

impl DeviceProfile {
    /// Defaults for desktop-sized viewports
    pub fn standard() -> Self {
        Self {
            page_size: 25,
            speaker_capacity: 3,
            caps: CapTable {
                speaker: 4,
                multispeakers: 9,
                presentation: 7,
            },
        }
    }

    /// Defaults for phone-sized viewports
    pub fn constrained() -> Self {
        Self {
            page_size: 9,
            speaker_capacity: 1,
            caps: CapTable {
                speaker: 3,
                multispeakers: 6,
                presentation: 4,
            },
        }
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::standard()
    }
}

/// Session configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Policy for standard devices
    pub standard: DeviceProfile,

    /// Policy for constrained devices
    pub constrained: DeviceProfile,

    /// Widths strictly below this are constrained
    pub constrained_max_width: u32,

    /// Force a device class instead of deriving it from the first viewport
    pub device_class: Option<DeviceClass>,

    /// Silence (ms) before an active speaker can be replaced
    pub grace_window_ms: u64,

    /// Layout mode selected at start
    pub initial_mode: LayoutMode,

    /// Snapshots buffered per subscriber before it starts lagging
    pub snapshot_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            standard: DeviceProfile::standard(),
            constrained: DeviceProfile::constrained(),
            constrained_max_width: DEFAULT_CONSTRAINED_MAX_WIDTH,
            device_class: None,
            grace_window_ms: DEFAULT_GRACE_WINDOW_MS,
            initial_mode: LayoutMode::Gallery,
            snapshot_capacity: DEFAULT_SNAPSHOT_CAPACITY,
        }
    }
}

impl SessionConfig {
    /// Parse a configuration from TOML
    ///
    /// Missing fields use default values.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Force the device class
    pub fn device_class(mut self, class: DeviceClass) -> Self {
        self.device_class = Some(class);
        self
    }

    /// Set the constrained width breakpoint
    pub fn constrained_max_width(mut self, width: u32) -> Self {
        self.constrained_max_width = width;
        self
    }

    /// Set the speaker grace window
    pub fn grace_window(mut self, window: Duration) -> Self {
        self.grace_window_ms = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the initially selected layout mode
    pub fn initial_mode(mut self, mode: LayoutMode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Set snapshot buffer capacity
    pub fn snapshot_capacity(mut self, capacity: usize) -> Self {
        self.snapshot_capacity = capacity.max(1);
        self
    }

    /// Replace the standard device profile
    pub fn standard_profile(mut self, profile: DeviceProfile) -> Self {
        self.standard = profile;
        self
    }

    /// Replace the constrained device profile
    pub fn constrained_profile(mut self, profile: DeviceProfile) -> Self {
        self.constrained = profile;
        self
    }

    /// Grace window as a duration
    pub fn grace_window_duration(&self) -> Duration {
        Duration::from_millis(self.grace_window_ms)
    }

    /// Classify a viewport width
    pub fn classify(&self, width: u32) -> DeviceClass {
        if let Some(class) = self.device_class {
            return class;
        }
        if width < self.constrained_max_width {
            DeviceClass::Constrained
        } else {
            DeviceClass::Standard
        }
    }

    /// Profile for a device class
    pub fn profile(&self, class: DeviceClass) -> &DeviceProfile {
        match class {
            DeviceClass::Standard => &self.standard,
            DeviceClass::Constrained => &self.constrained,
        }
    }
}
