//! Render options.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::render::{Color, Legend, LineStyle};
use crate::view::Viewport;

/// Everything a render call needs besides the regions themselves.
///
/// Missing fields in a style file fall back to [`RenderOptions::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Output size and padding.
    pub viewport: Viewport,
    /// Image background.
    pub background: Color,
    /// Region outline styling.
    pub border: LineStyle,
    /// Legend drawn in the top-left corner.
    pub legend: Legend,
}

impl RenderOptions {
    /// Parse options from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Replace the viewport.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Replace the legend.
    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = legend;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            background: Color::WHITE,
            border: LineStyle::default(),
            legend: Legend::default(),
        }
    }
}
