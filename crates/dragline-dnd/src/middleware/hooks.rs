use super::{DragMiddleware, Flow, MiddlewareContext, priority};
use crate::action::Action;
use crate::error::DndResult;
use crate::hooks::HooksPublisher;
use crate::state::DragState;

/// Publishes lifecycle hooks as the drag moves through its phases.
#[derive(Debug)]
pub struct HooksMiddleware {
    publisher: HooksPublisher,
}

impl HooksMiddleware {
    pub fn new(publisher: HooksPublisher) -> Self {
        Self { publisher }
    }
}

impl DragMiddleware for HooksMiddleware {
    fn name(&self) -> &'static str {
        "hooks"
    }

    fn priority(&self) -> i32 {
        priority::HOOKS
    }

    fn before_reduce(
        &mut self,
        _state: &DragState,
        action: &Action,
        _ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<Flow> {
        match action {
            Action::InitialPublish(publish) => self.publisher.start(&publish.critical)?,
            Action::DropComplete(result) => self.publisher.drop(result)?,
            // Reset without a matching drop
            Action::Clean if self.publisher.is_drag_start_published() => self.publisher.abort()?,
            _ => {}
        }
        Ok(Flow::Forward)
    }

    fn after_reduce(
        &mut self,
        state: &DragState,
        action: &Action,
        _ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<()> {
        if matches!(
            action,
            Action::InitialPublish(_) | Action::DropComplete(_) | Action::Clean
        ) || !self.publisher.is_drag_start_published()
        {
            return Ok(());
        }

        if let DragState::Dragging(drag) = state {
            self.publisher
                .move_to(&drag.critical, drag.impact.destination.as_ref())?;
        }
        Ok(())
    }
}
