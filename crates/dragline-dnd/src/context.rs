//! The engine facade hosts talk to.

use std::collections::VecDeque;

use crate::action::{Action, LiftRequest};
use crate::config::DndConfig;
use crate::error::DndResult;
use crate::hooks::{Announcer, DragHooks, HooksPublisher, NoopHooks, TracingAnnouncer};
use crate::host::{NoopScrollDriver, NoopStyleMarshal, ScrollDriver, StyleMarshal};
use crate::marshal::{DimensionMarshal, DimensionRegistry};
use crate::middleware::{
    AutoScrollMiddleware, DragMiddleware, DropAnimationFinishMiddleware, DropMiddleware,
    HooksMiddleware, LiftMiddleware, MarshalStopMiddleware, MiddlewareContext, MiddlewareManager,
    StyleMiddleware,
};
use crate::schedule::{CountingScheduler, FrameId, FrameScheduler};
use crate::state::DragState;
use crate::types::{DraggableDimension, DraggableId, DropReason, DroppableDimension, DroppableId};

/// One drag and drop area: its state, pipeline and dimension marshal.
///
/// Independent contexts share nothing, so several can live side by side.
///
/// # Example
///
/// ```ignore
/// let mut context = DragDropContext::builder()
///     .scheduler(Box::new(my_frame_clock))
///     .hooks(Box::new(my_hooks))
///     .build();
///
/// context.register_droppable(list_dimension)?;
/// context.register_draggable(item_dimension)?;
/// context.lift(lift_request)?;
/// context.dispatch(Action::MoveForward)?;
/// context.drop(DropReason::Drop)?;
/// ```
pub struct DragDropContext {
    state: DragState,
    middleware: MiddlewareManager,
    marshal: DimensionMarshal,
    scheduler: Box<dyn FrameScheduler>,
    scroll_driver: Box<dyn ScrollDriver>,
    queue: VecDeque<Action>,
    config: DndConfig,
}

impl DragDropContext {
    pub fn builder() -> DragDropContextBuilder {
        DragDropContextBuilder::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn config(&self) -> &DndConfig {
        &self.config
    }

    pub fn registry(&self) -> &DimensionRegistry {
        self.marshal.registry()
    }

    /// Direct registry access, for refreshing dimensions without triggering
    /// collection.
    pub fn registry_mut(&mut self) -> &mut DimensionRegistry {
        self.marshal.registry_mut()
    }

    /// Names of the pipeline stages, in order.
    pub fn middleware_names(&self) -> Vec<&'static str> {
        self.middleware.middleware_names()
    }

    /// Add a custom stage to the pipeline.
    pub fn add_middleware<M: DragMiddleware + 'static>(&mut self, middleware: M) {
        self.middleware.add(middleware);
    }

    /// Process `action` and everything it causes to be dispatched.
    ///
    /// On error the remaining queued actions are discarded.
    pub fn dispatch(&mut self, action: Action) -> DndResult<()> {
        self.queue.push_back(action);
        self.drain()
    }

    /// Prepare and lift in one go.
    pub fn lift(&mut self, request: LiftRequest) -> DndResult<()> {
        self.dispatch(Action::Prepare)?;
        self.dispatch(Action::Lift(request))
    }

    pub fn drop(&mut self, reason: DropReason) -> DndResult<()> {
        self.dispatch(Action::Drop { reason })
    }

    /// Report that the drop animation has finished.
    pub fn drop_animation_finished(&mut self) -> DndResult<()> {
        self.dispatch(Action::DropAnimationFinished)
    }

    /// Register a draggable, collecting it into a drag in progress if needed.
    pub fn register_draggable(&mut self, dimension: DraggableDimension) -> DndResult<()> {
        let actions =
            self.marshal
                .register_draggable(dimension, &self.state, self.scheduler.as_mut())?;
        self.queue.extend(actions);
        self.drain()
    }

    pub fn register_droppable(&mut self, dimension: DroppableDimension) -> DndResult<()> {
        let actions =
            self.marshal
                .register_droppable(dimension, &self.state, self.scheduler.as_mut())?;
        self.queue.extend(actions);
        self.drain()
    }

    pub fn unregister_draggable(&mut self, id: &DraggableId) {
        self.marshal.unregister_draggable(id);
    }

    pub fn unregister_droppable(&mut self, id: &DroppableId) {
        self.marshal.unregister_droppable(id);
    }

    /// Called by the host when a frame it was asked for fires.
    pub fn on_frame(&mut self, frame: FrameId) -> DndResult<()> {
        if let Some(action) = self
            .marshal
            .on_frame(frame, &self.state, self.scheduler.as_mut())?
        {
            self.queue.push_back(action);
        }

        let mut ctx = MiddlewareContext::new(
            &mut self.marshal,
            self.scheduler.as_mut(),
            self.scroll_driver.as_mut(),
            &mut self.queue,
        );
        self.middleware.on_frame(frame, &self.state, &mut ctx)?;
        self.drain()
    }

    fn drain(&mut self) -> DndResult<()> {
        while let Some(action) = self.queue.pop_front() {
            tracing::trace!("Dispatching {} in {}", action.name(), self.state.phase());
            let mut ctx = MiddlewareContext::new(
                &mut self.marshal,
                self.scheduler.as_mut(),
                self.scroll_driver.as_mut(),
                &mut self.queue,
            );
            if let Err(err) = self.middleware.process(&mut self.state, &action, &mut ctx) {
                tracing::error!("{} failed: {}", action.name(), err);
                self.queue.clear();
                return Err(err);
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for DragDropContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragDropContext")
            .field("phase", &self.state.phase())
            .field("middleware", &self.middleware)
            .field("queued", &self.queue.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`DragDropContext`]. Every part defaults to a no-op.
#[derive(Default)]
pub struct DragDropContextBuilder {
    scheduler: Option<Box<dyn FrameScheduler>>,
    hooks: Option<Box<dyn DragHooks>>,
    announcer: Option<Box<dyn Announcer>>,
    style: Option<Box<dyn StyleMarshal>>,
    scroll_driver: Option<Box<dyn ScrollDriver>>,
    config: DndConfig,
}

impl DragDropContextBuilder {
    pub fn scheduler(mut self, scheduler: Box<dyn FrameScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn hooks(mut self, hooks: Box<dyn DragHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    pub fn announcer(mut self, announcer: Box<dyn Announcer>) -> Self {
        self.announcer = Some(announcer);
        self
    }

    pub fn style_marshal(mut self, style: Box<dyn StyleMarshal>) -> Self {
        self.style = Some(style);
        self
    }

    pub fn scroll_driver(mut self, driver: Box<dyn ScrollDriver>) -> Self {
        self.scroll_driver = Some(driver);
        self
    }

    pub fn config(mut self, config: DndConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> DragDropContext {
        let publisher = HooksPublisher::new(
            self.hooks.unwrap_or_else(|| Box::new(NoopHooks)),
            self.announcer.unwrap_or_else(|| Box::new(TracingAnnouncer)),
        );

        let mut middleware = MiddlewareManager::new();
        middleware.add(StyleMiddleware::new(
            self.style.unwrap_or_else(|| Box::new(NoopStyleMarshal)),
        ));
        middleware.add(MarshalStopMiddleware);
        middleware.add(LiftMiddleware);
        middleware.add(AutoScrollMiddleware::new(self.config.auto_scroll));
        middleware.add(DropMiddleware);
        middleware.add(DropAnimationFinishMiddleware);
        middleware.add(HooksMiddleware::new(publisher));

        DragDropContext {
            state: DragState::Idle,
            middleware,
            marshal: DimensionMarshal::new(),
            scheduler: self
                .scheduler
                .unwrap_or_else(|| Box::new(CountingScheduler::new())),
            scroll_driver: self
                .scroll_driver
                .unwrap_or_else(|| Box::new(NoopScrollDriver)),
            queue: VecDeque::new(),
            config: self.config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DndError;
    use crate::fixtures::{vertical_list, viewport};
    use crate::state::DragPhase;
    use crate::types::{AutoScrollMode, DraggableLocation, ItemPositions};

    fn context_with_list(count: usize) -> DragDropContext {
        let mut context = DragDropContext::builder().build();
        let (dimensions, _) = vertical_list(count);
        for droppable in dimensions.droppables.values() {
            context.register_droppable(droppable.clone()).unwrap();
        }
        for draggable in dimensions.draggables.values() {
            context.register_draggable(draggable.clone()).unwrap();
        }
        context
    }

    fn keyboard_lift(context: &DragDropContext, id: &str) -> LiftRequest {
        let center = context.registry().draggable(&id.into()).unwrap().client.center();
        LiftRequest {
            id: id.into(),
            client: ItemPositions::at_rest(center, center),
            viewport: viewport(),
            auto_scroll_mode: AutoScrollMode::Jump,
        }
    }

    #[test]
    fn test_builder_installs_fixed_pipeline() {
        let context = DragDropContext::builder().build();
        assert_eq!(
            context.middleware_names(),
            vec![
                "style",
                "marshal_stop",
                "lift",
                "auto_scroll",
                "drop",
                "drop_animation_finish",
                "hooks"
            ]
        );
        assert!(context.state().is_idle());
    }

    #[test]
    fn test_custom_stage_sees_every_action() {
        use std::cell::RefCell;
        use std::rc::Rc;

        use crate::middleware::{Flow, MiddlewareContext};

        struct Audit(Rc<RefCell<Vec<&'static str>>>);

        impl DragMiddleware for Audit {
            fn name(&self) -> &'static str {
                "audit"
            }

            fn priority(&self) -> i32 {
                5
            }

            fn before_reduce(
                &mut self,
                _state: &DragState,
                action: &Action,
                _ctx: &mut MiddlewareContext<'_>,
            ) -> DndResult<Flow> {
                self.0.borrow_mut().push(action.name());
                Ok(Flow::Forward)
            }
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut context = context_with_list(2);
        context.add_middleware(Audit(seen.clone()));
        assert_eq!(context.middleware_names()[..2], ["style", "audit"]);

        let request = keyboard_lift(&context, "item-0");
        context.lift(request).unwrap();
        assert_eq!(*seen.borrow(), vec!["PREPARE", "LIFT", "INITIAL_PUBLISH"]);
    }

    #[test]
    fn test_keyboard_drag_completes() {
        let mut context = context_with_list(3);
        let request = keyboard_lift(&context, "item-0");
        context.lift(request).unwrap();
        assert_eq!(context.state().phase(), DragPhase::Dragging);

        context.dispatch(Action::MoveForward).unwrap();
        assert_eq!(
            context.state().drag().unwrap().impact.destination,
            Some(DraggableLocation::new("list", 1))
        );

        context.drop(DropReason::Drop).unwrap();
        assert!(context.state().is_idle());
        assert!(!context.marshal.is_publishing());
    }

    #[test]
    fn test_failed_dispatch_discards_queue() {
        let mut context = context_with_list(1);
        context.queue.push_back(Action::Drop {
            reason: DropReason::Drop,
        });

        // The failing drop is ahead of the prepare, which never runs
        let err = context.dispatch(Action::Prepare).unwrap_err();
        assert!(matches!(err, DndError::InvalidPhase { action: "DROP", .. }));
        assert!(context.queue.is_empty());
        assert!(context.state().is_idle());
    }

    #[test]
    fn test_unregister_during_drag_keeps_snapshot() {
        let mut context = context_with_list(3);
        let request = keyboard_lift(&context, "item-0");
        context.lift(request).unwrap();

        context.unregister_draggable(&"item-2".into());
        assert!(context.registry().draggable(&"item-2".into()).is_none());
        assert_eq!(context.state().drag().unwrap().dimensions.draggables.len(), 3);
    }
}
