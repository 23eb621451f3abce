mod bus;

pub use bus::{EventBus, SubscriptionId};

/// The start/end signal pair shared by every gesture that should produce a
/// single history entry.
#[derive(Debug)]
pub struct DragEvents<C> {
    pub dragstart: EventBus<C>,
    pub dragend: EventBus<C>,
}

impl<C> DragEvents<C> {
    pub fn new() -> Self {
        Self {
            dragstart: EventBus::new("dragstart"),
            dragend: EventBus::new("dragend"),
        }
    }
}

impl<C> Default for DragEvents<C> {
    fn default() -> Self {
        Self::new()
    }
}
