//! Middleware pipeline wrapped around the drag state machine.
//!
//! Every action passes through the stages in priority order before the state
//! transition, then through them again in reverse order afterwards. Stages
//! own all side effects: publishing dimensions, styling, scrolling, resolving
//! drops and notifying hooks. The transition itself stays pure.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        DragDropContext                           │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  action queue ─▶ MiddlewareManager::process(action)              │
//! │                                                                  │
//! │   before_reduce:  style → marshal_stop → lift → auto_scroll      │
//! │                   → drop → drop_animation_finish → hooks         │
//! │                        (any stage may stop the action)           │
//! │   transition(state, action)                                      │
//! │   after_reduce:   hooks → ... → style                            │
//! │                                                                  │
//! │  Actions dispatched by a stage are queued and processed only     │
//! │  after the current one completes.                                │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

mod auto_scroll;
mod context;
mod drop;
mod drop_animation_finish;
mod hooks;
mod lift;
mod manager;
mod marshal_stop;
mod style;

pub use auto_scroll::AutoScrollMiddleware;
pub use context::MiddlewareContext;
pub use drop::DropMiddleware;
pub use drop_animation_finish::DropAnimationFinishMiddleware;
pub use hooks::HooksMiddleware;
pub use lift::LiftMiddleware;
pub use manager::MiddlewareManager;
pub use marshal_stop::MarshalStopMiddleware;
pub use style::StyleMiddleware;

use crate::action::Action;
use crate::error::DndResult;
use crate::schedule::FrameId;
use crate::state::DragState;

/// Priorities of the built-in stages. Lower runs first.
pub mod priority {
    pub const STYLE: i32 = 0;
    pub const MARSHAL_STOP: i32 = 10;
    pub const LIFT: i32 = 20;
    pub const AUTO_SCROLL: i32 = 30;
    pub const DROP: i32 = 40;
    pub const DROP_ANIMATION_FINISH: i32 = 50;
    pub const HOOKS: i32 = 60;
}

/// Whether an action continues down the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Forward,
    /// Swallow the action: later stages, the transition and every
    /// `after_reduce` are skipped.
    Stop,
}

/// A stage of the drag pipeline.
pub trait DragMiddleware {
    /// Unique name for this middleware.
    fn name(&self) -> &'static str;

    /// Priority for ordering (lower runs first). Default: 0
    fn priority(&self) -> i32 {
        0
    }

    /// Called with the state before `action` is applied.
    fn before_reduce(
        &mut self,
        _state: &DragState,
        _action: &Action,
        _ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<Flow> {
        Ok(Flow::Forward)
    }

    /// Called with the state after `action` was applied.
    fn after_reduce(
        &mut self,
        _state: &DragState,
        _action: &Action,
        _ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<()> {
        Ok(())
    }

    /// Called when a frame requested through the context fires.
    fn on_frame(
        &mut self,
        _frame: FrameId,
        _state: &DragState,
        _ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<()> {
        Ok(())
    }
}
