//! Frame scheduling supplied by the host.
//!
//! The engine never sleeps or spawns threads. Work deferred to "the next
//! frame" is requested through a [`FrameScheduler`]; when the host's frame
//! fires it calls [`DragDropContext::on_frame`](crate::DragDropContext::on_frame)
//! with the id it handed out.

use std::fmt;

/// Handle for a requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

pub trait FrameScheduler {
    /// Ask for a callback on the next frame.
    fn request_frame(&mut self) -> FrameId;

    /// Withdraw a request. Cancelling a frame that already fired is a no-op.
    fn cancel_frame(&mut self, id: FrameId);
}

/// Scheduler that hands out ids and keeps no queue.
///
/// Useful when the host drives [`on_frame`](crate::DragDropContext::on_frame)
/// from its own bookkeeping.
#[derive(Debug, Default)]
pub struct CountingScheduler {
    next: u64,
    pending: Vec<FrameId>,
}

impl CountingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests not yet cancelled or taken.
    pub fn pending(&self) -> &[FrameId] {
        &self.pending
    }

    /// Remove and return every outstanding request.
    pub fn take_pending(&mut self) -> Vec<FrameId> {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) -> FrameId {
        self.next += 1;
        let id = FrameId(self.next);
        self.pending.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.pending.retain(|pending| *pending != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_removes_request() {
        let mut scheduler = CountingScheduler::new();
        let first = scheduler.request_frame();
        let second = scheduler.request_frame();
        assert_ne!(first, second);

        scheduler.cancel_frame(first);
        assert_eq!(scheduler.pending(), &[second]);
        assert_eq!(scheduler.take_pending(), vec![second]);
        assert!(scheduler.pending().is_empty());
    }
}
