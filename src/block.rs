use std::collections::BTreeMap;
use std::fmt;

use egui::{Pos2, Rect, Vec2, pos2, vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::component::ComponentDefinition;

/// Stable identity of a block across snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(Uuid);

impl BlockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

// Imported JSON may carry blocks without ids; they get a fresh one.
impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One placed component instance on the canvas.
///
/// Field names serialize in camelCase to stay compatible with exported
/// page JSON (`componentKey`, `zIndex`, `hasResize`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default)]
    pub id: BlockId,
    pub component_key: String,
    pub top: f32,
    pub left: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    /// Set on drop; cleared by the first layout pass which centers the
    /// block under the drop point and records its natural size.
    #[serde(default)]
    pub adjust_position: bool,
    #[serde(default)]
    pub focus: bool,
    #[serde(default)]
    pub z_index: i32,
    /// Once true the block renders with its explicit width/height instead
    /// of its intrinsic size.
    #[serde(default)]
    pub has_resize: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, serde_json::Value>,
    /// Model slot name -> form field the slot is bound to
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub model: BTreeMap<String, String>,
}

impl Block {
    /// Creates a block for `component` dropped at `position` (container coordinates).
    pub fn new(component: &ComponentDefinition, position: Pos2) -> Self {
        Self {
            id: BlockId::new(),
            component_key: component.key.clone(),
            top: position.y,
            left: position.x,
            width: 0.0,
            height: 0.0,
            adjust_position: true,
            focus: false,
            z_index: 0,
            has_resize: false,
            props: BTreeMap::new(),
            model: BTreeMap::new(),
        }
    }

    pub fn position(&self) -> Pos2 {
        pos2(self.left, self.top)
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position(), self.size())
    }

    pub fn set_position(&mut self, position: Pos2) {
        self.left = position.x;
        self.top = position.y;
    }

    /// First layout pass: center the block on its drop point and adopt the
    /// measured size. Returns false when the block was already laid out.
    pub fn adjust_to_measured(&mut self, measured: Vec2) -> bool {
        if !self.adjust_position {
            return false;
        }
        self.left -= measured.x / 2.0;
        self.top -= measured.y / 2.0;
        self.width = measured.x;
        self.height = measured.y;
        self.adjust_position = false;
        true
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.props.insert(name.into(), value);
        self
    }

    pub fn with_binding(mut self, slot: impl Into<String>, field: impl Into<String>) -> Self {
        self.model.insert(slot.into(), field.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentDefinition;

    #[test]
    fn first_layout_centers_block_on_drop_point() {
        let button = ComponentDefinition::new("button", "Button");
        let mut block = Block::new(&button, pos2(100.0, 60.0));

        assert!(block.adjust_to_measured(vec2(80.0, 30.0)));
        assert_eq!(block.position(), pos2(60.0, 45.0));
        assert_eq!(block.size(), vec2(80.0, 30.0));
        assert!(!block.adjust_position);

        // Later layout passes leave the block alone
        assert!(!block.adjust_to_measured(vec2(10.0, 10.0)));
        assert_eq!(block.size(), vec2(80.0, 30.0));
    }

    #[test]
    fn imported_block_without_id_gets_one() {
        let json = r#"{"componentKey":"text","top":10,"left":20}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.component_key, "text");
        assert_eq!(block.position(), pos2(20.0, 10.0));
        assert!(!block.focus);
        assert!(!block.has_resize);
    }
}
