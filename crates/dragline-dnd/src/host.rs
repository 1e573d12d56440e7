//! Host-side effects requested by the engine.

use dragline_core::math::Position;

use crate::types::{DropReason, DroppableId};

/// Applies scroll requested by auto scrolling.
///
/// The host reports the resulting offsets back through
/// `UpdateDroppableScroll` and `MoveByWindowScroll` actions.
pub trait ScrollDriver {
    fn scroll_droppable(&mut self, id: &DroppableId, change: Position);

    fn scroll_window(&mut self, change: Position);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopScrollDriver;

impl ScrollDriver for NoopScrollDriver {
    fn scroll_droppable(&mut self, id: &DroppableId, change: Position) {
        tracing::trace!("Dropping scroll of {} by {:?}", id, change);
    }

    fn scroll_window(&mut self, change: Position) {
        tracing::trace!("Dropping window scroll by {:?}", change);
    }
}

/// Switches global drag styling.
pub trait StyleMarshal {
    /// A drag has started.
    fn dragging(&mut self);

    /// The dragged item is animating to its new home.
    fn dropping(&mut self, reason: DropReason);

    /// No drag in progress.
    fn resting(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStyleMarshal;

impl StyleMarshal for NoopStyleMarshal {
    fn dragging(&mut self) {}

    fn dropping(&mut self, _reason: DropReason) {}

    fn resting(&mut self) {}
}
