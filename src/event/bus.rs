use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::EditorResult;

/// Opaque handle returned by [`EventBus::on`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<C> = Rc<dyn Fn(&mut C) -> EditorResult<()>>;

/// A same-tick fan-out of a single signal to its subscribers.
///
/// Handlers receive the caller's context and run in subscription order.
/// The first failing handler aborts the emit and its error is returned.
pub struct EventBus<C> {
    name: &'static str,
    handlers: RefCell<Vec<(SubscriptionId, Handler<C>)>>,
    next_id: Cell<u64>,
}

impl<C> std::fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("name", &self.name)
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl<C> EventBus<C> {
    /// Creates a new event bus
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            handlers: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Subscribe a handler
    pub fn on(&self, handler: impl Fn(&mut C) -> EditorResult<()> + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Remove a handler. Returns false if it was not subscribed.
    pub fn off(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        handlers.len() != before
    }

    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }

    /// Invoke every handler with `ctx`
    pub fn emit(&self, ctx: &mut C) -> EditorResult<()> {
        // Handlers may subscribe or unsubscribe while we iterate.
        let handlers: Vec<Handler<C>> = self
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        log::debug!("{}: notifying {} handlers", self.name, handlers.len());
        for handler in handlers {
            handler(ctx)?;
        }
        Ok(())
    }
}
