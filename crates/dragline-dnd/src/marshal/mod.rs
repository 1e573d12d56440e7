//! Dimension marshal: owns the registry of measured dimensions, builds the
//! initial snapshot for a lift, and feeds late registrations into the drag
//! through bulk collection.

mod collector;
mod registry;

use std::sync::Arc;

pub use collector::{Collected, Collector};
pub use registry::DimensionRegistry;

use crate::action::{Action, BulkReplace, InitialPublish, LiftRequest};
use crate::error::{DndError, DndResult};
use crate::schedule::{FrameId, FrameScheduler};
use crate::state::DragState;
use crate::types::{
    Collection, Critical, DimensionMap, DraggableDimension, DraggableId, DroppableDimension,
    DroppableId, TypeId,
};

#[derive(Debug, Default)]
pub struct DimensionMarshal {
    registry: DimensionRegistry,
    collector: Collector,
    /// Origin of the drag being published, if any.
    critical: Option<Critical>,
}

impl DimensionMarshal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &DimensionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut DimensionRegistry {
        &mut self.registry
    }

    pub fn collector(&self) -> &Collector {
        &self.collector
    }

    pub fn is_publishing(&self) -> bool {
        self.critical.is_some()
    }

    /// Build the snapshot for a lift: the critical pair plus every registered
    /// dimension of the same type.
    pub fn start_publishing(&mut self, request: &LiftRequest) -> DndResult<InitialPublish> {
        let draggable = self
            .registry
            .draggable(&request.id)
            .ok_or_else(|| DndError::MissingDraggable(request.id.clone()))?;
        let home_id = &draggable.descriptor.droppable_id;
        let home = self
            .registry
            .droppable(home_id)
            .ok_or_else(|| DndError::MissingDroppable(home_id.clone()))?;

        let critical = Critical {
            draggable: draggable.descriptor.clone(),
            droppable: home.descriptor.clone(),
        };
        let type_id = &critical.droppable.type_id;
        let dimensions = DimensionMap::from_parts(
            self.registry.draggables_of(type_id).into_iter().cloned(),
            self.registry.droppables_of(type_id).into_iter().cloned(),
        );

        tracing::debug!(
            "Publishing {} draggables and {} droppables for {}",
            dimensions.draggables.len(),
            dimensions.droppables.len(),
            critical.draggable.id
        );
        self.critical = Some(critical.clone());

        Ok(InitialPublish {
            critical,
            dimensions: Arc::new(dimensions),
            client: request.client,
            viewport: request.viewport,
            auto_scroll_mode: request.auto_scroll_mode,
        })
    }

    /// Stop publishing and cancel any collection in flight.
    pub fn stop_publishing(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.critical.take().is_some() {
            tracing::debug!("Marshal stopped publishing");
        }
        self.collector.stop(scheduler);
    }

    /// Register (or refresh) a draggable.
    ///
    /// Returns the actions to dispatch when the registration is new to a
    /// drag in progress.
    pub fn register_draggable(
        &mut self,
        dimension: DraggableDimension,
        state: &DragState,
        scheduler: &mut dyn FrameScheduler,
    ) -> DndResult<Vec<Action>> {
        let id = dimension.id().clone();
        let type_id = dimension.descriptor.type_id.clone();
        if !self.registry.register_draggable(dimension) {
            return Ok(Vec::new());
        }
        self.on_new_dimension(&type_id, vec![id], Vec::new(), state, scheduler)
    }

    /// Register (or refresh) a droppable.
    pub fn register_droppable(
        &mut self,
        dimension: DroppableDimension,
        state: &DragState,
        scheduler: &mut dyn FrameScheduler,
    ) -> DndResult<Vec<Action>> {
        let id = dimension.id().clone();
        let type_id = dimension.descriptor.type_id.clone();
        if !self.registry.register_droppable(dimension) {
            return Ok(Vec::new());
        }
        self.on_new_dimension(&type_id, Vec::new(), vec![id], state, scheduler)
    }

    pub fn unregister_draggable(&mut self, id: &DraggableId) {
        if self.registry.unregister_draggable(id).is_some() && self.is_publishing() {
            tracing::warn!("Draggable {} unmounted during a drag", id);
        }
    }

    pub fn unregister_droppable(&mut self, id: &DroppableId) {
        if self.registry.unregister_droppable(id).is_some() && self.is_publishing() {
            tracing::warn!("Droppable {} unmounted during a drag", id);
        }
    }

    fn on_new_dimension(
        &mut self,
        type_id: &TypeId,
        draggables: Vec<DraggableId>,
        droppables: Vec<DroppableId>,
        state: &DragState,
        scheduler: &mut dyn FrameScheduler,
    ) -> DndResult<Vec<Action>> {
        let Some(critical) = self.critical.as_ref() else {
            return Ok(Vec::new());
        };
        if &critical.droppable.type_id != type_id {
            return Ok(Vec::new());
        }

        match state {
            DragState::Dragging(_) => {
                let collection = Collection {
                    critical: critical.clone(),
                    draggables,
                    droppables,
                };
                if self.collector.is_active() {
                    self.collector.collect(scheduler)?;
                } else {
                    self.collector.start(&collection, scheduler)?;
                }
                Ok(vec![Action::BulkCollectionStarting(collection)])
            }
            DragState::BulkCollecting(_) | DragState::DropPending(_) => {
                self.collector.collect(scheduler)?;
                Ok(Vec::new())
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Advance collection. Returns a [`BulkReplace`] when a run publishes.
    pub fn on_frame(
        &mut self,
        frame: FrameId,
        state: &DragState,
        scheduler: &mut dyn FrameScheduler,
    ) -> DndResult<Option<Action>> {
        let Some(collected) = self.collector.on_frame(frame, &self.registry, scheduler) else {
            return Ok(None);
        };
        let Some(drag) = state.drag() else {
            tracing::warn!("Collection published with no drag in progress");
            return Ok(None);
        };

        let critical = &drag.critical;
        let mut live_draggable = drag.dimensions.draggable(&critical.draggable.id)?.clone();
        let live_home = drag.dimensions.droppable(&critical.droppable.id)?.clone();

        let should_replace_critical = self
            .registry
            .draggable(&critical.draggable.id)
            .is_some_and(|registered| registered.descriptor != live_draggable.descriptor);
        if should_replace_critical
            && let Some(registered) = self.registry.draggable(&critical.draggable.id)
        {
            live_draggable.descriptor = registered.descriptor.clone();
        }

        let mut dimensions = DimensionMap::from_parts(collected.draggables, collected.droppables);
        // Scroll and enabled updates only ever land in the drag snapshot
        for droppable in dimensions.droppables.values_mut() {
            let Some(live) = drag.dimensions.droppables.get(droppable.id()) else {
                continue;
            };
            droppable.is_enabled = live.is_enabled;
            if let Some(scrollable) = live.closest_scrollable {
                *droppable = droppable.with_scroll(scrollable.scroll.current);
            }
        }
        dimensions
            .draggables
            .insert(live_draggable.id().clone(), live_draggable);
        dimensions.droppables.insert(live_home.id().clone(), live_home);

        Ok(Some(Action::BulkReplace(BulkReplace {
            dimensions: Arc::new(dimensions),
            viewport: drag.viewport,
            should_replace_critical,
        })))
    }
}
