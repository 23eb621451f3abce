use super::{CommandArgs, Commander};
use crate::block::Block;
use crate::error::EditorResult;
use crate::model::CanvasModel;

/// Mutable state handed to commands and to drag event handlers: the model
/// being edited, the commander recording its history, and the block list
/// captured when the current gesture started.
#[derive(Debug)]
pub struct CommandContext {
    /// The model being edited
    pub model: CanvasModel,
    pub commander: Commander,
    drag_snapshot: Option<Vec<Block>>,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(model: CanvasModel, commander: Commander) -> Self {
        Self {
            model,
            commander,
            drag_snapshot: None,
        }
    }

    /// Run the command registered under `name` against the model
    pub fn execute(&mut self, name: &str, args: CommandArgs) -> EditorResult<()> {
        self.commander.execute(&mut self.model, name, args)
    }

    /// Remember the current blocks as the "before" state of a gesture
    pub fn capture_drag_snapshot(&mut self) {
        self.drag_snapshot = Some(self.model.blocks().to_vec());
    }

    pub fn take_drag_snapshot(&mut self) -> Option<Vec<Block>> {
        self.drag_snapshot.take()
    }

    pub fn has_drag_snapshot(&self) -> bool {
        self.drag_snapshot.is_some()
    }
}
