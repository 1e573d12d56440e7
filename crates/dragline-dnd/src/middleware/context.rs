use std::collections::VecDeque;

use dragline_core::math::Position;

use crate::action::Action;
use crate::host::ScrollDriver;
use crate::marshal::DimensionMarshal;
use crate::schedule::FrameScheduler;
use crate::types::DroppableId;

/// Everything a stage may touch while handling an action.
pub struct MiddlewareContext<'a> {
    pub marshal: &'a mut DimensionMarshal,
    pub scheduler: &'a mut dyn FrameScheduler,
    scroll_driver: &'a mut dyn ScrollDriver,
    queue: &'a mut VecDeque<Action>,
}

impl<'a> MiddlewareContext<'a> {
    pub fn new(
        marshal: &'a mut DimensionMarshal,
        scheduler: &'a mut dyn FrameScheduler,
        scroll_driver: &'a mut dyn ScrollDriver,
        queue: &'a mut VecDeque<Action>,
    ) -> Self {
        Self {
            marshal,
            scheduler,
            scroll_driver,
            queue,
        }
    }

    /// Queue `action` to run once the current action has been processed.
    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!("Queueing {}", action.name());
        self.queue.push_back(action);
    }

    pub fn scroll_droppable(&mut self, id: &DroppableId, change: Position) {
        self.scroll_driver.scroll_droppable(id, change);
    }

    pub fn scroll_window(&mut self, change: Position) {
        self.scroll_driver.scroll_window(change);
    }

    /// Stop the marshal, cancelling any collection frame.
    pub fn stop_publishing(&mut self) {
        self.marshal.stop_publishing(self.scheduler);
    }

    /// Actions queued so far.
    pub fn queued(&self) -> impl Iterator<Item = &Action> {
        self.queue.iter()
    }
}
