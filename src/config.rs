use serde::{Deserialize, Serialize};

use crate::error::EditorResult;

/// Tunables for the editing engine.
///
/// Missing fields fall back to their defaults when deserializing, so a config
/// file only has to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of snapshots kept by the history.
    pub history_capacity: usize,
    /// Side length of the square handles drawn on shapes and the crop rect.
    pub handle_size: f32,
    /// Distance within which a line or arrow counts as hit.
    pub hit_tolerance: f32,
    /// Smallest width/height a resize can shrink a shape to.
    pub min_shape_size: f32,
    /// Smallest width/height of the crop rectangle while resizing.
    pub min_crop_size: f32,
    /// Alpha of the shade drawn outside the crop rectangle.
    pub crop_shade_alpha: u8,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_capacity: 50,
            handle_size: 10.0,
            hit_tolerance: 10.0,
            min_shape_size: 10.0,
            min_crop_size: 10.0,
            crop_shade_alpha: 128,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> EditorResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn sanitized(mut self) -> Self {
        self.history_capacity = self.history_capacity.max(1);
        self.handle_size = self.handle_size.max(1.0);
        self.min_shape_size = self.min_shape_size.max(1.0);
        self.min_crop_size = self.min_crop_size.max(1.0);
        self
    }
}
