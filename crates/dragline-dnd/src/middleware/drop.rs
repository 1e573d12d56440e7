use super::{DragMiddleware, Flow, MiddlewareContext, priority};
use crate::action::Action;
use crate::drop::resolve_drop;
use crate::error::{DndError, DndResult};
use crate::state::{DragState, PhaseSet};
use crate::types::DropReason;

/// Resolves drops, deferring them while a bulk collection is in flight.
#[derive(Debug, Default)]
pub struct DropMiddleware;

impl DropMiddleware {
    fn drop(
        &self,
        state: &DragState,
        reason: DropReason,
        ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<Flow> {
        if !PhaseSet::WITH_DRAG.accepts(state.phase()) {
            return Err(DndError::InvalidPhase {
                action: "DROP",
                phase: state.phase(),
            });
        }

        match state {
            DragState::BulkCollecting(_) => {
                ctx.dispatch(Action::DropPending { reason });
                return Ok(Flow::Stop);
            }
            DragState::DropPending(pending) if pending.is_waiting => {
                tracing::error!("A drop action occurred while DROP_PENDING and still waiting");
                return Ok(Flow::Stop);
            }
            _ => {}
        }
        let drag = state.drag().ok_or(DndError::NotDragging)?;

        let resolution = resolve_drop(drag, reason)?;
        if resolution.should_animate {
            ctx.dispatch(Action::DropAnimate(resolution.pending));
        } else {
            ctx.dispatch(Action::DropComplete(resolution.pending.result));
            ctx.dispatch(Action::Clean);
        }
        Ok(Flow::Stop)
    }
}

impl DragMiddleware for DropMiddleware {
    fn name(&self) -> &'static str {
        "drop"
    }

    fn priority(&self) -> i32 {
        priority::DROP
    }

    fn before_reduce(
        &mut self,
        state: &DragState,
        action: &Action,
        ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<Flow> {
        match action {
            Action::Drop { reason } => self.drop(state, *reason, ctx),
            _ => Ok(Flow::Forward),
        }
    }

    /// Resume a deferred drop once the collection it waited for is in.
    fn after_reduce(
        &mut self,
        state: &DragState,
        action: &Action,
        ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<()> {
        if let (Action::BulkReplace(_), DragState::DropPending(pending)) = (action, state)
            && !pending.is_waiting
        {
            tracing::debug!("Resuming deferred {}", pending.reason);
            ctx.dispatch(Action::Drop {
                reason: pending.reason,
            });
        }
        Ok(())
    }
}
