use std::sync::Arc;

use dragline_dnd::{DndResult, DragDropContext, FrameId, FrameScheduler};
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct ClockState {
    next: u64,
    pending: Vec<FrameId>,
    requested: usize,
    cancelled: usize,
}

/// Frame scheduler advanced by hand.
///
/// Requested frames queue up until [`advance`](Self::advance) hands them out.
/// Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct FakeFrameClock {
    state: Arc<Mutex<ClockState>>,
}

impl FakeFrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames requested and not yet fired or cancelled.
    pub fn pending(&self) -> Vec<FrameId> {
        self.state.lock().pending.clone()
    }

    pub fn requested(&self) -> usize {
        self.state.lock().requested
    }

    pub fn cancelled(&self) -> usize {
        self.state.lock().cancelled
    }

    /// Fire every pending frame, oldest first.
    pub fn advance(&self) -> Vec<FrameId> {
        std::mem::take(&mut self.state.lock().pending)
    }

    /// Fire one round of frames into `context`.
    ///
    /// Frames requested while this round runs wait for the next call.
    pub fn tick(&self, context: &mut DragDropContext) -> DndResult<usize> {
        let due = self.advance();
        for frame in &due {
            context.on_frame(*frame)?;
        }
        Ok(due.len())
    }

    /// Tick until nothing is pending, at most `max_rounds` times.
    pub fn settle(&self, context: &mut DragDropContext, max_rounds: usize) -> DndResult<usize> {
        let mut rounds = 0;
        while rounds < max_rounds && !self.pending().is_empty() {
            self.tick(context)?;
            rounds += 1;
        }
        Ok(rounds)
    }
}

impl FrameScheduler for FakeFrameClock {
    fn request_frame(&mut self) -> FrameId {
        let mut state = self.state.lock();
        state.next += 1;
        state.requested += 1;
        let id = FrameId(state.next);
        state.pending.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        let mut state = self.state.lock();
        let before = state.pending.len();
        state.pending.retain(|pending| *pending != id);
        if state.pending.len() != before {
            state.cancelled += 1;
        }
    }
}
