#![warn(clippy::all, rust_2018_idioms)]

pub mod block;
pub mod command;
pub mod component;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod guideline;
pub mod input;
pub mod model;
pub mod tools;

pub use block::{Block, BlockId};
pub use command::{Command, CommandArgs, CommandContext, CommandHistory, CommandKind, Commander};
pub use component::{ComponentDefinition, ComponentRegistry, ResizeCapability};
pub use config::EditorConfig;
pub use editor::VisualEditor;
pub use error::{EditorError, EditorResult};
pub use event::{DragEvents, EventBus, SubscriptionId};
pub use guideline::{GuideMarks, MarkLines};
pub use input::{InputEvent, PointerTarget};
pub use model::{CanvasModel, Container};
pub use tools::{Direction, ResizeHandle};
