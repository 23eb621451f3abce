use thiserror::Error;

use crate::block::BlockId;

/// Errors raised by the editor core
#[derive(Debug, Error)]
pub enum EditorError {
    /// A command with this name is already registered
    #[error("command `{0}` is already registered")]
    DuplicateCommand(String),

    /// No command with this name was registered
    #[error("command `{0}` is not registered")]
    UnknownCommand(String),

    /// The arguments passed to a command don't match what it expects
    #[error("command `{command}` expects {expected}")]
    InvalidArguments {
        command: &'static str,
        expected: &'static str,
    },

    /// A component with this key is already registered
    #[error("component `{0}` is already registered")]
    DuplicateComponent(String),

    /// No component with this key was registered
    #[error("component `{0}` is not registered")]
    UnknownComponent(String),

    /// The block is not part of the canvas model
    #[error("block {0} is not on the canvas")]
    BlockNotFound(BlockId),

    /// The block's component doesn't allow resizing from this handle
    #[error("component `{component}` cannot be resized from the {handle} handle")]
    ResizeNotAllowed {
        component: String,
        handle: &'static str,
    },

    /// Import/export or config JSON could not be processed
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
