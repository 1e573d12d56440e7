use super::{DragMiddleware, Flow, MiddlewareContext, priority};
use crate::action::Action;
use crate::error::{DndError, DndResult};
use crate::state::DragState;

/// Completes a drop when the host reports its animation finished.
#[derive(Debug, Default)]
pub struct DropAnimationFinishMiddleware;

impl DragMiddleware for DropAnimationFinishMiddleware {
    fn name(&self) -> &'static str {
        "drop_animation_finish"
    }

    fn priority(&self) -> i32 {
        priority::DROP_ANIMATION_FINISH
    }

    fn before_reduce(
        &mut self,
        state: &DragState,
        action: &Action,
        ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<Flow> {
        if !matches!(action, Action::DropAnimationFinished) {
            return Ok(Flow::Forward);
        }

        let DragState::DropAnimating(animating) = state else {
            return Err(DndError::InvalidPhase {
                action: action.name(),
                phase: state.phase(),
            });
        };

        ctx.dispatch(Action::DropComplete(animating.pending.result.clone()));
        ctx.dispatch(Action::Clean);
        Ok(Flow::Stop)
    }
}
