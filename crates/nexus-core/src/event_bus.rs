//! Event bus between the chat core and the view.
//!
//! Single-threaded (WASM constraint) with interior mutability via RefCell.
//! The orchestrator and clipboard tracker publish; the view drains once per
//! frame to decide whether to repaint and which notices to show.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use nexus_types::event::ChatEvent;

/// Shared event bus, clone-cheap via Rc.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<RefCell<VecDeque<ChatEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::new())),
        }
    }

    pub fn emit(&self, event: ChatEvent) {
        self.inner.borrow_mut().push_back(event);
    }

    /// Drain all pending events in publication order.
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.inner.borrow_mut().drain(..).collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
