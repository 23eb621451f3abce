use serde::{Deserialize, Serialize};

use crate::error::EditorResult;
use crate::guideline::SNAP_TOLERANCE;
use crate::model::Container;

/// Editor session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to their defaults
pub struct EditorConfig {
    /// Snap distance in pixels; a guide engages when strictly closer
    pub snap_tolerance: f32,
    /// Maximum history entries kept, unbounded when `None`
    pub history_limit: Option<usize>,
    /// Container size for new pages
    pub container: Container,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: SNAP_TOLERANCE,
            history_limit: None,
            container: Container::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
