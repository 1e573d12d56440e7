//! Middleware manager: ordering and dispatch of drag pipeline stages.

use dragline_core::profiling::profile_function;

use super::{DragMiddleware, Flow, MiddlewareContext};
use crate::action::Action;
use crate::error::DndResult;
use crate::schedule::FrameId;
use crate::state::{DragState, transition};

/// Entry for a registered middleware.
struct MiddlewareEntry {
    middleware: Box<dyn DragMiddleware>,
    priority: i32,
}

/// Runs actions through the registered stages and the state transition.
pub struct MiddlewareManager {
    /// Registered middlewares (sorted by priority).
    middlewares: Vec<MiddlewareEntry>,
}

impl Default for MiddlewareManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MiddlewareManager {
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Add a middleware, keeping the list sorted by priority.
    ///
    /// Stages with equal priority keep their insertion order.
    pub fn add<M: DragMiddleware + 'static>(&mut self, middleware: M) {
        let priority = middleware.priority();
        self.middlewares.push(MiddlewareEntry {
            middleware: Box::new(middleware),
            priority,
        });
        self.middlewares.sort_by_key(|e| e.priority);
    }

    /// Remove a middleware by name.
    ///
    /// Returns `true` if a middleware was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let len_before = self.middlewares.len();
        self.middlewares.retain(|e| e.middleware.name() != name);
        self.middlewares.len() < len_before
    }

    pub fn middleware_count(&self) -> usize {
        self.middlewares.len()
    }

    /// Names of all registered middlewares, in pipeline order.
    pub fn middleware_names(&self) -> Vec<&'static str> {
        self.middlewares.iter().map(|e| e.middleware.name()).collect()
    }

    /// Run `action` through every stage and, unless a stage stops it, the
    /// state transition.
    pub fn process(
        &mut self,
        state: &mut DragState,
        action: &Action,
        ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<()> {
        profile_function!();

        for entry in &mut self.middlewares {
            if entry.middleware.before_reduce(state, action, ctx)? == Flow::Stop {
                tracing::trace!("{} stopped by {}", action.name(), entry.middleware.name());
                return Ok(());
            }
        }

        let next = transition(state, action)?;
        if next.phase() != state.phase() {
            tracing::debug!("{}: {} -> {}", action.name(), state.phase(), next.phase());
        }
        *state = next;

        for entry in self.middlewares.iter_mut().rev() {
            entry.middleware.after_reduce(state, action, ctx)?;
        }
        Ok(())
    }

    /// Forward a fired frame to every stage.
    pub fn on_frame(
        &mut self,
        frame: FrameId,
        state: &DragState,
        ctx: &mut MiddlewareContext<'_>,
    ) -> DndResult<()> {
        for entry in &mut self.middlewares {
            entry.middleware.on_frame(frame, state, ctx)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for MiddlewareManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareManager")
            .field("middlewares", &self.middleware_names())
            .finish()
    }
}
