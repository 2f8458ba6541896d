//! Tracks which code payload was most recently copied.
//!
//! Each successful copy mints a new token. The timed reset only clears the
//! highlight if its token is still the current one, so a late timer from an
//! earlier copy can never wipe a newer highlight.

use std::cell::RefCell;
use std::rc::Rc;

use nexus_types::{ChatError, Result, event::ChatEvent};

use crate::event_bus::EventBus;
use crate::ports::{ClipboardPort, TimerPort};

/// Identifies one copy; see [`ClipboardTracker::expire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyToken(u64);

#[derive(Default)]
struct Highlight {
    payload: Option<String>,
    token: u64,
}

/// Clone-cheap; clones share the same highlight.
#[derive(Clone)]
pub struct ClipboardTracker {
    highlight: Rc<RefCell<Highlight>>,
    clipboard: Rc<dyn ClipboardPort>,
    timer: Rc<dyn TimerPort>,
    event_bus: EventBus,
    reset_ms: u64,
}

impl ClipboardTracker {
    pub fn new(
        clipboard: Rc<dyn ClipboardPort>,
        timer: Rc<dyn TimerPort>,
        event_bus: EventBus,
        reset_ms: u64,
    ) -> Self {
        Self {
            highlight: Rc::new(RefCell::new(Highlight::default())),
            clipboard,
            timer,
            event_bus,
            reset_ms,
        }
    }

    /// Write `text` to the clipboard, highlight it, and clear the highlight
    /// after the reset interval. The returned future resolves once the reset
    /// has run, so callers spawn it rather than await it inline.
    ///
    /// A failed write leaves the highlight untouched and emits
    /// [`ChatEvent::CopyFailed`].
    pub async fn copy(&self, text: &str) -> Result<()> {
        if let Err(e) = self.clipboard.write_text(text).await {
            let err = match e {
                ChatError::Clipboard(_) => e,
                other => ChatError::Clipboard(other.to_string()),
            };
            log::warn!("Copy to clipboard failed: {}", err);
            self.event_bus.emit(ChatEvent::CopyFailed {
                reason: err.to_string(),
            });
            return Err(err);
        }

        let token = self.mark(text);
        self.timer.sleep(self.reset_ms).await;
        self.expire(token);
        Ok(())
    }

    /// Highlight `text`, superseding any earlier highlight
    pub fn mark(&self, text: &str) -> CopyToken {
        let mut highlight = self.highlight.borrow_mut();
        highlight.token += 1;
        highlight.payload = Some(text.to_string());
        CopyToken(highlight.token)
    }

    /// Clear the highlight if `token` is still current.
    /// Idempotent; returns whether anything was cleared.
    pub fn expire(&self, token: CopyToken) -> bool {
        let mut highlight = self.highlight.borrow_mut();
        if highlight.token != token.0 || highlight.payload.is_none() {
            return false;
        }
        highlight.payload = None;
        true
    }

    pub fn copied(&self) -> Option<String> {
        self.highlight.borrow().payload.clone()
    }

    pub fn is_copied(&self, text: &str) -> bool {
        self.highlight.borrow().payload.as_deref() == Some(text)
    }
}
