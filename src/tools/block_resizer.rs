use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockId};
use crate::error::EditorResult;
use crate::model::CanvasModel;

/// Where a handle sits along one axis of the block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Top or left edge; dragging it moves the origin
    Start,
    /// Middle of the edge; this axis doesn't resize
    Center,
    /// Bottom or right edge
    End,
}

/// One of the eight resize handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResizeHandle {
    pub horizontal: Direction,
    pub vertical: Direction,
}

impl ResizeHandle {
    pub const TOP: Self = Self::new(Direction::Center, Direction::Start);
    pub const BOTTOM: Self = Self::new(Direction::Center, Direction::End);
    pub const LEFT: Self = Self::new(Direction::Start, Direction::Center);
    pub const RIGHT: Self = Self::new(Direction::End, Direction::Center);
    pub const TOP_LEFT: Self = Self::new(Direction::Start, Direction::Start);
    pub const TOP_RIGHT: Self = Self::new(Direction::End, Direction::Start);
    pub const BOTTOM_LEFT: Self = Self::new(Direction::Start, Direction::End);
    pub const BOTTOM_RIGHT: Self = Self::new(Direction::End, Direction::End);

    pub const fn new(horizontal: Direction, vertical: Direction) -> Self {
        Self { horizontal, vertical }
    }

    pub fn as_str(&self) -> &'static str {
        use Direction::*;
        match (self.horizontal, self.vertical) {
            (Center, Start) => "top",
            (Center, End) => "bottom",
            (Start, Center) => "left",
            (End, Center) => "right",
            (Start, Start) => "top-left",
            (End, Start) => "top-right",
            (Start, End) => "bottom-left",
            (End, End) => "bottom-right",
            (Center, Center) => "center",
        }
    }
}

/// One resize-gesture update
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeStep {
    /// First movement of the gesture: `dragstart` must fire before `blocks`
    /// is applied
    pub started: bool,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone)]
struct ResizeSession {
    block: BlockId,
    handle: ResizeHandle,
    origin: Pos2,
    start: Rect,
    dragging: bool,
}

/// Resizes a single block from one of its handles, keeping the opposite
/// edge pinned
#[derive(Debug, Clone, Default)]
pub struct BlockResizer {
    session: Option<ResizeSession>,
}

impl BlockResizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn pointer_down(
        &mut self,
        model: &CanvasModel,
        block: BlockId,
        handle: ResizeHandle,
        pointer: Pos2,
    ) -> EditorResult<()> {
        let start = model.require_block(block)?.rect();
        log::debug!("Resize gesture on {block} from the {} handle", handle.as_str());
        self.session = Some(ResizeSession {
            block,
            handle,
            origin: pointer,
            start,
            dragging: false,
        });
        Ok(())
    }

    /// Computes the resized block list. Returns `None` outside a gesture or
    /// when the block has disappeared from the model.
    pub fn pointer_move(&mut self, model: &CanvasModel, pointer: Pos2) -> Option<ResizeStep> {
        let session = self.session.as_mut()?;
        let mut block = model.block(session.block)?.clone();
        let started = !session.dragging;
        session.dragging = true;

        let mut target = pointer;
        if session.handle.horizontal == Direction::Center {
            target.x = session.origin.x;
        }
        if session.handle.vertical == Direction::Center {
            target.y = session.origin.y;
        }
        let mut delta = target - session.origin;

        let start = session.start;
        block.top = start.top();
        block.left = start.left();
        if session.handle.vertical == Direction::Start {
            delta.y = -delta.y;
            block.top = start.top() - delta.y;
        }
        if session.handle.horizontal == Direction::Start {
            delta.x = -delta.x;
            block.left = start.left() - delta.x;
        }
        block.width = start.width() + delta.x;
        block.height = start.height() + delta.y;
        block.has_resize = true;

        let blocks = model.replacing_block(block).ok()?;
        Some(ResizeStep { started, blocks })
    }

    /// Ends the gesture. Returns true if any movement happened.
    pub fn pointer_up(&mut self) -> bool {
        self.session.take().is_some_and(|s| s.dragging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentDefinition;
    use crate::model::Container;
    use egui::pos2;

    fn model_with_box() -> (CanvasModel, BlockId) {
        let mut block = Block::new(&ComponentDefinition::new("box", "Box"), pos2(100.0, 100.0));
        block.width = 50.0;
        block.height = 40.0;
        block.adjust_position = false;
        let id = block.id;
        (CanvasModel::with_blocks(Container::default(), vec![block]), id)
    }

    #[test]
    fn center_axis_is_ignored() {
        let (model, id) = model_with_box();
        let mut resizer = BlockResizer::new();
        resizer.pointer_down(&model, id, ResizeHandle::RIGHT, pos2(0.0, 0.0)).unwrap();

        let step = resizer.pointer_move(&model, pos2(15.0, 30.0)).unwrap();
        let block = &step.blocks[0];
        assert_eq!((block.width, block.height), (65.0, 40.0));
        assert_eq!(block.position(), pos2(100.0, 100.0));
        assert!(block.has_resize);
    }

    #[test]
    fn moves_are_measured_from_gesture_start() {
        let (model, id) = model_with_box();
        let mut resizer = BlockResizer::new();
        resizer.pointer_down(&model, id, ResizeHandle::BOTTOM_RIGHT, pos2(0.0, 0.0)).unwrap();

        let first = resizer.pointer_move(&model, pos2(5.0, 5.0)).unwrap();
        assert!(first.started);
        let mut model = model;
        model.update_blocks(first.blocks);

        let second = resizer.pointer_move(&model, pos2(10.0, 10.0)).unwrap();
        assert!(!second.started);
        assert_eq!(second.blocks[0].size(), egui::vec2(60.0, 50.0));
        assert!(resizer.pointer_up());
        assert!(!resizer.is_active());
    }

    #[test]
    fn handle_names() {
        assert_eq!(ResizeHandle::TOP_LEFT.as_str(), "top-left");
        assert_eq!(ResizeHandle::BOTTOM.as_str(), "bottom");
    }
}
