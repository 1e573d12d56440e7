//! Layouts shared by the unit tests.

use std::sync::Arc;

use dragline_core::geometry::{Axis, BoxModel, Rect, Spacing};
use dragline_core::math::Vec2;

use crate::action::{Action, InitialPublish};
use crate::state::{DragState, DraggingState, PreparingState, transition};
use crate::types::{
    AutoScrollMode, Critical, DimensionMap, DraggableDescriptor, DraggableDimension,
    DroppableDescriptor, DroppableDimension, DroppableId, ItemPositions, ScrollDetails,
    ScrollFrame, TypeId, Viewport,
};

pub const ITEM_HEIGHT: f32 = 40.0;
pub const ITEM_WIDTH: f32 = 200.0;

pub fn viewport() -> Viewport {
    Viewport::new(Vec2::new(800.0, 600.0), Vec2::ZERO, Vec2::new(0.0, 1000.0))
}

pub fn item(id: &str, droppable: &str, index: usize, x: f32) -> DraggableDimension {
    DraggableDimension::new(
        DraggableDescriptor {
            id: id.into(),
            index,
            droppable_id: droppable.into(),
            type_id: TypeId::default(),
        },
        BoxModel::new(
            Rect::new(x, index as f32 * ITEM_HEIGHT, ITEM_WIDTH, ITEM_HEIGHT),
            Spacing::ZERO,
        ),
        Vec2::ZERO,
    )
}

pub fn list(id: &str, x: f32, count: usize) -> DroppableDimension {
    DroppableDimension::new(
        DroppableDescriptor {
            id: id.into(),
            type_id: TypeId::default(),
        },
        Axis::Vertical,
        BoxModel::new(
            Rect::new(x, 0.0, ITEM_WIDTH, count.max(1) as f32 * ITEM_HEIGHT),
            Spacing::ZERO,
        ),
        Vec2::ZERO,
    )
}

/// One vertical list called `list` holding `item-0..item-{count}`.
pub fn vertical_list(count: usize) -> (DimensionMap, Viewport) {
    let items = (0..count).map(|i| item(&format!("item-{i}"), "list", i, 0.0));
    (DimensionMap::from_parts(items, [list("list", 0.0, count)]), viewport())
}

/// Two side by side lists: `todo` (3 items) and `done` (2 items).
pub fn board() -> (DimensionMap, Viewport) {
    let todo = (0..3).map(|i| item(&format!("todo-{i}"), "todo", i, 0.0));
    let done = (0..2).map(|i| item(&format!("done-{i}"), "done", i, 250.0));
    (
        DimensionMap::from_parts(todo.chain(done), [list("todo", 0.0, 3), list("done", 250.0, 2)]),
        viewport(),
    )
}

/// Clip droppable `id` to a scroll container `height` tall that can scroll
/// `max_scroll` further down.
pub fn scrollable(
    (mut dimensions, viewport): (DimensionMap, Viewport),
    id: &str,
    height: f32,
    max_scroll: f32,
) -> (DimensionMap, Viewport) {
    let droppable = dimensions
        .droppables
        .get_mut(&DroppableId::new(id))
        .expect("fixture droppable");
    let border = droppable.page.border_box;
    droppable.closest_scrollable = Some(ScrollFrame {
        frame: Rect::new(border.x, border.y, border.width, height),
        scroll: ScrollDetails::new(Vec2::ZERO, Vec2::new(0.0, max_scroll)),
    });
    (dimensions, viewport)
}

pub fn publish(
    (dimensions, viewport): (DimensionMap, Viewport),
    id: &str,
    auto_scroll_mode: AutoScrollMode,
) -> InitialPublish {
    let draggable = dimensions.draggable(&id.into()).expect("fixture draggable");
    let droppable = dimensions
        .droppable(&draggable.descriptor.droppable_id)
        .expect("fixture droppable");
    let center = draggable.client.center();
    InitialPublish {
        critical: Critical {
            draggable: draggable.descriptor.clone(),
            droppable: droppable.descriptor.clone(),
        },
        client: ItemPositions::at_rest(center, center),
        viewport,
        auto_scroll_mode,
        dimensions: Arc::new(dimensions),
    }
}

pub fn dragging_with_mode(
    fixture: (DimensionMap, Viewport),
    id: &str,
    mode: AutoScrollMode,
) -> DraggingState {
    let preparing = DragState::Preparing(PreparingState::default());
    match transition(&preparing, &Action::InitialPublish(publish(fixture, id, mode))) {
        Ok(DragState::Dragging(drag)) => drag,
        other => panic!("fixture did not start dragging: {other:?}"),
    }
}

pub fn dragging(fixture: (DimensionMap, Viewport), id: &str) -> DraggingState {
    dragging_with_mode(fixture, id, AutoScrollMode::Fluid)
}
