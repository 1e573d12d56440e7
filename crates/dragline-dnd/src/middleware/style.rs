use super::{DragMiddleware, Flow, MiddlewareContext, priority};
use crate::action::Action;
use crate::error::DndResult;
use crate::host::StyleMarshal;
use crate::state::DragState;

/// Switches global styling as a drag starts, drops and ends.
pub struct StyleMiddleware {
    marshal: Box<dyn StyleMarshal>,
}

impl StyleMiddleware {
    pub fn new(marshal: Box<dyn StyleMarshal>) -> Self {
        Self { marshal }
    }
}

impl DragMiddleware for StyleMiddleware {
    fn name(&self) -> &'static str {
        "style"
    }

    fn priority(&self) -> i32 {
        priority::STYLE
    }

    fn before_reduce(
        &mut self,
        _state: &DragState,
        action: &Action,
        _ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<Flow> {
        match action {
            Action::InitialPublish(_) => self.marshal.dragging(),
            Action::DropAnimate(pending) => self.marshal.dropping(pending.result.reason),
            Action::DropComplete(_) | Action::Clean => self.marshal.resting(),
            _ => {}
        }
        Ok(Flow::Forward)
    }
}
