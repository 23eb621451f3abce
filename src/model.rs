use egui::{Rect, Vec2, pos2, vec2};
use serde::{Deserialize, Serialize};

use crate::block::{Block, BlockId};
use crate::error::{EditorError, EditorResult};

/// Size of the page being composed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Container {
    pub width: f32,
    pub height: f32,
}

impl Container {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }

    /// The container seen as a block at the origin
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), self.size())
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new(800.0, 1000.0)
    }
}

/// Focused and unfocused blocks, both in model order
#[derive(Debug, Default)]
pub struct FocusData<'a> {
    pub focus: Vec<&'a Block>,
    pub unfocus: Vec<&'a Block>,
}

/// The persisted page: container size plus ordered blocks.
///
/// The block list is only ever replaced as a whole, so a snapshot taken
/// before a gesture stays valid while the live list moves on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasModel {
    pub container: Container,
    #[serde(default)]
    blocks: Vec<Block>,
}

impl CanvasModel {
    pub fn new(container: Container) -> Self {
        Self {
            container,
            blocks: Vec::new(),
        }
    }

    pub fn with_blocks(container: Container, blocks: Vec<Block>) -> Self {
        Self { container, blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn update_blocks(&mut self, blocks: Vec<Block>) {
        self.blocks = blocks;
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == id)
    }

    pub fn require_block(&self, id: BlockId) -> EditorResult<&Block> {
        self.block(id).ok_or(EditorError::BlockNotFound(id))
    }

    pub fn focus_data(&self) -> FocusData<'_> {
        let mut data = FocusData::default();
        for block in &self.blocks {
            if block.focus {
                data.focus.push(block);
            } else {
                data.unfocus.push(block);
            }
        }
        data
    }

    pub fn focused_ids(&self) -> Vec<BlockId> {
        self.blocks.iter().filter(|b| b.focus).map(|b| b.id).collect()
    }

    /// Copy of the block list with `edit` applied to every block
    pub fn map_blocks(&self, mut edit: impl FnMut(&mut Block)) -> Vec<Block> {
        let mut blocks = self.blocks.clone();
        blocks.iter_mut().for_each(&mut edit);
        blocks
    }

    /// Copy of the block list with the block matching `replacement.id` swapped out
    pub fn replacing_block(&self, replacement: Block) -> EditorResult<Vec<Block>> {
        let index = self
            .blocks
            .iter()
            .position(|b| b.id == replacement.id)
            .ok_or(EditorError::BlockNotFound(replacement.id))?;
        let mut blocks = self.blocks.clone();
        blocks[index] = replacement;
        Ok(blocks)
    }

    /// Copy of the block list where only `id` is focused
    pub fn focusing_only(&self, id: BlockId) -> Vec<Block> {
        self.map_blocks(|b| b.focus = b.id == id)
    }

    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
