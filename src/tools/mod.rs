//! Pointer gestures. Each tool only computes replacement block lists; the
//! editor applies them and fires the drag start/end signals around them.

mod block_dragger;
mod block_resizer;
mod menu_dragger;

pub use block_dragger::{BlockDragger, MoveStep};
pub use block_resizer::{BlockResizer, Direction, ResizeHandle, ResizeStep};
pub use menu_dragger::MenuDragger;
