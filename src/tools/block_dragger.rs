use egui::{Pos2, Vec2};

use crate::block::{Block, BlockId};
use crate::error::EditorResult;
use crate::guideline::{GuideMarks, MarkLines};
use crate::model::CanvasModel;

/// One move-gesture update
#[derive(Debug, Clone, PartialEq)]
pub struct MoveStep {
    /// First movement of the gesture: `dragstart` must fire before `blocks`
    /// is applied
    pub started: bool,
    /// Replacement block list with the focused blocks moved
    pub blocks: Vec<Block>,
    pub marks: GuideMarks,
}

#[derive(Debug, Clone)]
struct MoveSession {
    origin: Pos2,
    anchor_start: Pos2,
    /// Focused blocks and where they were when the gesture began
    starts: Vec<(BlockId, Pos2)>,
    lines: MarkLines,
    dragging: bool,
}

/// Moves the focused blocks together, snapping the anchor block to guides
#[derive(Debug, Clone, Default)]
pub struct BlockDragger {
    session: Option<MoveSession>,
}

impl BlockDragger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Starts a gesture anchored on `anchor`, the pressed block, which need
    /// not be focused itself. The guideline candidates are computed here,
    /// once, against the current focus.
    pub fn pointer_down(
        &mut self,
        model: &CanvasModel,
        anchor: BlockId,
        pointer: Pos2,
    ) -> EditorResult<()> {
        let anchor = model.require_block(anchor)?;
        let focus = model.focus_data();
        let references = focus
            .unfocus
            .iter()
            .filter(|b| b.id != anchor.id)
            .map(|b| b.rect())
            .chain(std::iter::once(model.container.rect()));
        let lines = MarkLines::collect(anchor.size(), references);
        let starts = focus.focus.iter().map(|b| (b.id, b.position())).collect::<Vec<_>>();

        log::debug!(
            "Move gesture on {} with {} focused blocks, {} guide candidates",
            anchor.id,
            starts.len(),
            lines.len()
        );
        self.session = Some(MoveSession {
            origin: pointer,
            anchor_start: anchor.position(),
            starts,
            lines,
            dragging: false,
        });
        Ok(())
    }

    /// Computes the blocks' positions for the pointer at `pointer`. Returns
    /// `None` outside a gesture.
    pub fn pointer_move(
        &mut self,
        model: &CanvasModel,
        pointer: Pos2,
        axis_lock: bool,
        tolerance: f32,
    ) -> Option<MoveStep> {
        let session = self.session.as_mut()?;
        let started = !session.dragging;
        session.dragging = true;

        let mut target = pointer;
        if axis_lock {
            let raw = pointer - session.origin;
            if raw.x.abs() > raw.y.abs() {
                target.y = session.origin.y;
            } else {
                target.x = session.origin.x;
            }
        }

        let current = session.anchor_start + (target - session.origin);
        let mut marks = GuideMarks::default();
        if let Some(line) = session.lines.snap_top(current.y, tolerance) {
            target.y = line.top + session.origin.y - session.anchor_start.y;
            marks.y = Some(line.show_top);
        }
        if let Some(line) = session.lines.snap_left(current.x, tolerance) {
            target.x = line.left + session.origin.x - session.anchor_start.x;
            marks.x = Some(line.show_left);
        }

        let delta: Vec2 = target - session.origin;
        let blocks = model.map_blocks(|block| {
            if let Some((_, start)) = session.starts.iter().find(|(id, _)| *id == block.id) {
                block.set_position(*start + delta);
            }
        });
        Some(MoveStep { started, blocks, marks })
    }

    /// Ends the gesture. Returns true if any movement happened, in which case
    /// `dragend` must fire.
    pub fn pointer_up(&mut self) -> bool {
        self.session.take().is_some_and(|s| s.dragging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentDefinition;
    use crate::guideline::SNAP_TOLERANCE;
    use crate::model::Container;
    use egui::{pos2, vec2};

    fn block(left: f32, top: f32, size: Vec2, focus: bool) -> Block {
        let mut block = Block::new(&ComponentDefinition::new("box", "Box"), pos2(left, top));
        block.width = size.x;
        block.height = size.y;
        block.adjust_position = false;
        block.focus = focus;
        block
    }

    #[test]
    fn shift_locks_to_dominant_axis() {
        let moving = block(300.0, 300.0, vec2(10.0, 10.0), true);
        let model = CanvasModel::with_blocks(Container::new(1000.0, 1000.0), vec![moving.clone()]);
        let mut dragger = BlockDragger::new();
        dragger.pointer_down(&model, moving.id, pos2(0.0, 0.0)).unwrap();

        let step = dragger.pointer_move(&model, pos2(40.0, 17.0), true, SNAP_TOLERANCE).unwrap();
        assert_eq!(step.blocks[0].position(), pos2(340.0, 300.0));
        assert!(step.marks.is_empty());
    }

    #[test]
    fn unfocused_anchor_is_not_its_own_reference() {
        let anchor = block(300.0, 100.0, vec2(20.0, 20.0), false);
        let other = block(600.0, 600.0, vec2(20.0, 20.0), true);
        let model = CanvasModel::with_blocks(
            Container::new(1000.0, 1000.0),
            vec![anchor.clone(), other.clone()],
        );
        let mut dragger = BlockDragger::new();
        dragger.pointer_down(&model, anchor.id, pos2(0.0, 0.0)).unwrap();

        let step = dragger.pointer_move(&model, pos2(2.0, 0.0), false, SNAP_TOLERANCE).unwrap();
        assert!(step.marks.is_empty());
        assert_eq!(step.blocks[0].position(), anchor.position());
        assert_eq!(step.blocks[1].position(), pos2(602.0, 600.0));
    }

    #[test]
    fn snapped_axis_reports_target_line() {
        // Anchor 20 tall; its bottom lands 2px above the reference's top.
        let reference = block(500.0, 200.0, vec2(50.0, 50.0), false);
        let moving = block(300.0, 100.0, vec2(20.0, 20.0), true);
        let model = CanvasModel::with_blocks(
            Container::new(1000.0, 1000.0),
            vec![reference, moving.clone()],
        );
        let mut dragger = BlockDragger::new();
        dragger.pointer_down(&model, moving.id, pos2(0.0, 0.0)).unwrap();

        let step = dragger.pointer_move(&model, pos2(0.0, 78.0), false, SNAP_TOLERANCE).unwrap();
        // bottom-to-top candidate: top = 200 - 20 = 180, shown at 200
        assert_eq!(step.blocks[1].top, 180.0);
        assert_eq!(step.marks.y, Some(200.0));
        assert_eq!(step.marks.x, None);
    }
}
