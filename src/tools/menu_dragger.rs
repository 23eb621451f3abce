use egui::Pos2;

use crate::block::Block;
use crate::component::ComponentRegistry;
use crate::error::EditorResult;
use crate::model::CanvasModel;

/// Drag of a component from the palette onto the container
#[derive(Debug, Clone, Default)]
pub struct MenuDragger {
    current: Option<String>,
}

impl MenuDragger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Component currently being dragged
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn drag_start(&mut self, components: &ComponentRegistry, key: &str) -> EditorResult<()> {
        components.require(key)?;
        log::debug!("Palette drag of `{key}`");
        self.current = Some(key.to_owned());
        Ok(())
    }

    /// Block list with a new block appended at `position`, or `None` when no
    /// palette drag is in progress
    pub fn drop(
        &mut self,
        components: &ComponentRegistry,
        model: &CanvasModel,
        position: Pos2,
    ) -> EditorResult<Option<Vec<Block>>> {
        let Some(key) = self.current.take() else {
            return Ok(None);
        };
        let component = components.require(&key)?;
        let mut blocks = model.blocks().to_vec();
        blocks.push(Block::new(component, position));
        Ok(Some(blocks))
    }

    pub fn drag_end(&mut self) {
        self.current = None;
    }
}
