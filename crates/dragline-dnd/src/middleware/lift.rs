use super::{DragMiddleware, Flow, MiddlewareContext, priority};
use crate::action::Action;
use crate::error::DndResult;
use crate::state::DragState;

/// Starts a drag: publishes the initial dimensions once a lift lands, and
/// finishes a drop still animating when a new drag is prepared.
#[derive(Debug, Default)]
pub struct LiftMiddleware;

impl DragMiddleware for LiftMiddleware {
    fn name(&self) -> &'static str {
        "lift"
    }

    fn priority(&self) -> i32 {
        priority::LIFT
    }

    fn before_reduce(
        &mut self,
        state: &DragState,
        action: &Action,
        ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<Flow> {
        let (Action::Prepare, DragState::DropAnimating(animating)) = (action, state) else {
            return Ok(Flow::Forward);
        };

        tracing::debug!("Flushing drop animation of {}", animating.critical.draggable.id);
        ctx.dispatch(Action::DropComplete(animating.pending.result.clone()));
        ctx.dispatch(Action::Clean);
        ctx.dispatch(Action::Prepare);
        Ok(Flow::Stop)
    }

    fn after_reduce(
        &mut self,
        state: &DragState,
        action: &Action,
        ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<()> {
        let Action::Lift(request) = action else {
            return Ok(());
        };
        if !matches!(state, DragState::Preparing(_)) {
            return Ok(());
        }

        let publish = ctx.marshal.start_publishing(request)?;
        ctx.dispatch(Action::InitialPublish(publish));
        Ok(())
    }
}
