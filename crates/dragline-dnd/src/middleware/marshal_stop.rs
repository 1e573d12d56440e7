use super::{DragMiddleware, Flow, MiddlewareContext, priority};
use crate::action::Action;
use crate::error::DndResult;
use crate::state::DragState;

/// Stops dimension publishing once a drag is ending.
#[derive(Debug, Default)]
pub struct MarshalStopMiddleware;

impl DragMiddleware for MarshalStopMiddleware {
    fn name(&self) -> &'static str {
        "marshal_stop"
    }

    fn priority(&self) -> i32 {
        priority::MARSHAL_STOP
    }

    fn before_reduce(
        &mut self,
        _state: &DragState,
        action: &Action,
        ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<Flow> {
        if action.is_drag_ending() {
            ctx.stop_publishing();
        }
        Ok(Flow::Forward)
    }
}
