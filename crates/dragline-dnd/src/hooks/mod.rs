//! Lifecycle notifications for application code.
//!
//! Consumers implement [`DragHooks`]; every method is optional. Each call
//! receives an [`Announce`] handle that accepts one screen reader message
//! while the hook runs. If the hook stays silent a default message from
//! [`messages`] is announced instead.

pub mod messages;
mod publisher;

use std::cell::RefCell;
use std::rc::Rc;

pub use publisher::HooksPublisher;

use crate::types::{DragStart, DragUpdate, DropResult};

/// Application callbacks fired during a drag.
pub trait DragHooks {
    fn on_drag_start(&mut self, _start: &DragStart, _announce: &Announce) {}

    fn on_drag_update(&mut self, _update: &DragUpdate, _announce: &Announce) {}

    fn on_drag_end(&mut self, _result: &DropResult, _announce: &Announce) {}
}

/// Hooks that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl DragHooks for NoopHooks {}

/// Destination for screen reader announcements.
pub trait Announcer {
    fn announce(&mut self, message: &str);
}

/// Announcer that writes messages to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnnouncer;

impl Announcer for TracingAnnouncer {
    fn announce(&mut self, message: &str) {
        tracing::info!(target: "dragline_dnd::announce", "{}", message);
    }
}

#[derive(Debug, Default)]
struct AnnounceSlot {
    message: Option<String>,
    expired: bool,
}

/// One-shot announcement handle given to a hook.
///
/// Cloning is allowed, but only the first message given before the hook
/// returns counts. Later or repeated calls are dropped with a warning.
#[derive(Debug, Clone, Default)]
pub struct Announce {
    slot: Rc<RefCell<AnnounceSlot>>,
}

impl Announce {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn announce(&self, message: impl Into<String>) {
        let mut slot = self.slot.borrow_mut();
        if slot.expired {
            tracing::warn!(
                "Announcements cannot be made asynchronously. Default message has already been announced."
            );
            return;
        }
        if slot.message.is_some() {
            tracing::warn!("Announcement already made. Not making a second announcement");
            return;
        }
        slot.message = Some(message.into());
    }

    pub fn was_called(&self) -> bool {
        self.slot.borrow().message.is_some()
    }

    /// Close the handle, returning the message it received.
    pub(crate) fn expire(&self) -> Option<String> {
        let mut slot = self.slot.borrow_mut();
        slot.expired = true;
        slot.message.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_announce_accepts_one_message() {
        let announce = Announce::new();
        announce.announce("first");
        announce.announce("second");
        assert!(announce.was_called());
        assert_eq!(announce.expire().as_deref(), Some("first"));
    }

    #[test]
    fn test_late_announce_is_dropped() {
        let announce = Announce::new();
        let kept = announce.clone();
        assert_eq!(announce.expire(), None);

        kept.announce("too late");
        assert!(!kept.was_called());
    }
}
