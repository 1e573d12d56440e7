use dragline_core::alloc::HashMap;

use crate::types::{DraggableDimension, DraggableId, DroppableDimension, DroppableId, TypeId};

/// Latest measured dimensions of every mounted draggable and droppable.
///
/// The host keeps entries current as layout changes; the engine reads from
/// here when a drag starts and whenever a collection pass measures.
#[derive(Debug, Default)]
pub struct DimensionRegistry {
    draggables: HashMap<DraggableId, DraggableDimension>,
    droppables: HashMap<DroppableId, DroppableDimension>,
}

impl DimensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a draggable. Returns `true` if it was not known.
    pub fn register_draggable(&mut self, dimension: DraggableDimension) -> bool {
        self.draggables
            .insert(dimension.id().clone(), dimension)
            .is_none()
    }

    /// Insert or replace a droppable. Returns `true` if it was not known.
    pub fn register_droppable(&mut self, dimension: DroppableDimension) -> bool {
        self.droppables
            .insert(dimension.id().clone(), dimension)
            .is_none()
    }

    pub fn unregister_draggable(&mut self, id: &DraggableId) -> Option<DraggableDimension> {
        self.draggables.remove(id)
    }

    pub fn unregister_droppable(&mut self, id: &DroppableId) -> Option<DroppableDimension> {
        self.droppables.remove(id)
    }

    pub fn draggable(&self, id: &DraggableId) -> Option<&DraggableDimension> {
        self.draggables.get(id)
    }

    pub fn droppable(&self, id: &DroppableId) -> Option<&DroppableDimension> {
        self.droppables.get(id)
    }

    pub fn len(&self) -> usize {
        self.draggables.len() + self.droppables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Draggables of `type_id`, ordered by id.
    pub fn draggables_of(&self, type_id: &TypeId) -> Vec<&DraggableDimension> {
        let mut matching: Vec<_> = self
            .draggables
            .values()
            .filter(|d| &d.descriptor.type_id == type_id)
            .collect();
        matching.sort_by(|a, b| a.id().cmp(b.id()));
        matching
    }

    /// Droppables of `type_id`, ordered by id.
    pub fn droppables_of(&self, type_id: &TypeId) -> Vec<&DroppableDimension> {
        let mut matching: Vec<_> = self
            .droppables
            .values()
            .filter(|d| &d.descriptor.type_id == type_id)
            .collect();
        matching.sort_by(|a, b| a.id().cmp(b.id()));
        matching
    }
}
