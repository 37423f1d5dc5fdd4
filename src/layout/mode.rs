//! Layout mode and viewport types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Macro arrangement strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Paged grid of every stream
    #[default]
    Gallery,
    /// One large tile with a strip of thumbnails
    Speaker,
    /// Grid of the top few streams
    Multispeakers,
    /// Screen share dominant with a thumbnail column or row
    Presentation,
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutMode::Gallery => "gallery",
            LayoutMode::Speaker => "speaker",
            LayoutMode::Multispeakers => "multispeakers",
            LayoutMode::Presentation => "presentation",
        };
        f.write_str(name)
    }
}

/// Device size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// Phone-sized viewport
    Constrained,
    /// Desktop or tablet viewport
    #[default]
    Standard,
}

/// Viewport orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// Measured size of the layout container in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Create a viewport
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check if the container has been measured
    ///
    /// A zero-sized container means the render surface has not laid out yet.
    pub fn is_measured(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Landscape when strictly wider than tall
    pub fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}
