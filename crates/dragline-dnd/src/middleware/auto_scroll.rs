use super::{DragMiddleware, Flow, MiddlewareContext, priority};
use crate::action::Action;
use crate::auto_scroll::{FluidScroll, plan_jump, required_scroll};
use crate::config::AutoScrollConfig;
use crate::error::DndResult;
use crate::schedule::FrameId;
use crate::state::{DragState, DraggingState};
use crate::types::AutoScrollMode;

/// Applies fluid and jump auto scrolling.
///
/// Fluid scrolling is throttled to one scroll per frame: the latest required
/// scroll replaces any request still waiting for its frame.
#[derive(Debug, Default)]
pub struct AutoScrollMiddleware {
    config: AutoScrollConfig,
    pending: Option<(FrameId, FluidScroll)>,
}

impl AutoScrollMiddleware {
    pub fn new(config: AutoScrollConfig) -> Self {
        Self {
            config,
            pending: None,
        }
    }

    fn cancel(&mut self, ctx: &mut MiddlewareContext<'_>) {
        if let Some((frame, _)) = self.pending.take() {
            ctx.scheduler.cancel_frame(frame);
        }
    }

    fn fluid(&mut self, drag: &DraggingState, ctx: &mut MiddlewareContext<'_>) {
        let Some(scroll) = required_scroll(drag, &self.config) else {
            self.cancel(ctx);
            return;
        };
        match self.pending.as_mut() {
            Some((_, waiting)) => *waiting = scroll,
            None => self.pending = Some((ctx.scheduler.request_frame(), scroll)),
        }
    }

    fn jump(&mut self, drag: &DraggingState, ctx: &mut MiddlewareContext<'_>) -> DndResult<()> {
        let Some(request) = drag.scroll_jump_request else {
            return Ok(());
        };
        let Some(plan) = plan_jump(drag, request)? else {
            return Ok(());
        };

        if let Some((id, change)) = &plan.droppable {
            ctx.scroll_droppable(id, *change);
        }
        if let Some(change) = plan.window {
            ctx.scroll_window(change);
        }
        if let Some(remainder) = plan.manual {
            ctx.dispatch(Action::Move {
                client: drag.current.client.selection + remainder,
                should_animate: true,
            });
        }
        Ok(())
    }
}

impl DragMiddleware for AutoScrollMiddleware {
    fn name(&self) -> &'static str {
        "auto_scroll"
    }

    fn priority(&self) -> i32 {
        priority::AUTO_SCROLL
    }

    fn before_reduce(
        &mut self,
        _state: &DragState,
        action: &Action,
        ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<Flow> {
        if action.is_drag_ending() || matches!(action, Action::BulkCollectionStarting(_)) {
            self.cancel(ctx);
        }
        Ok(Flow::Forward)
    }

    fn after_reduce(
        &mut self,
        state: &DragState,
        action: &Action,
        ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<()> {
        let DragState::Dragging(drag) = state else {
            return Ok(());
        };

        match drag.auto_scroll_mode {
            AutoScrollMode::Fluid => {
                self.fluid(drag, ctx);
                Ok(())
            }
            AutoScrollMode::Jump if action.is_keyboard_move() => self.jump(drag, ctx),
            AutoScrollMode::Jump => Ok(()),
        }
    }

    fn on_frame(
        &mut self,
        frame: FrameId,
        state: &DragState,
        ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<()> {
        if self.pending.as_ref().is_none_or(|(pending, _)| *pending != frame) {
            return Ok(());
        }
        let Some((_, scroll)) = self.pending.take() else {
            return Ok(());
        };
        if !matches!(state, DragState::Dragging(_)) {
            return Ok(());
        }

        match scroll {
            FluidScroll::Window(change) => ctx.scroll_window(change),
            FluidScroll::Droppable(id, change) => ctx.scroll_droppable(&id, change),
        }
        Ok(())
    }
}
