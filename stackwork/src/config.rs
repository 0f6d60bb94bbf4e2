//! Engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::length::{BASE_FONT_SIZE, CHAR_WIDTH, LINE_HEIGHT};

/// Configuration for a `LayoutEngine`.
///
/// Every field has a default, so a partial JSON object is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Advance of one cell for the monospace measurer, at `base_font_size`.
    pub char_width: f32,

    /// Line height for the monospace measurer, at `base_font_size`.
    pub line_height: f32,

    /// Font size the metrics above were taken at.
    pub base_font_size: f32,

    /// Maximum number of cache keys retained per available width.
    pub cache_capacity: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            char_width: CHAR_WIDTH,
            line_height: LINE_HEIGHT,
            base_font_size: BASE_FONT_SIZE,
            cache_capacity: 256,
        }
    }
}

impl LayoutConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
