use dragline_core::geometry::Rect;
use dragline_core::math::{Position, Vec2, clean};

use crate::config::AutoScrollConfig;
use crate::scroll::{can_scroll_droppable, can_scroll_window};
use crate::state::DraggingState;
use crate::types::{DroppableDimension, DroppableId};

/// A single frame's worth of pointer driven scrolling.
#[derive(Debug, Clone, PartialEq)]
pub enum FluidScroll {
    Window(Position),
    Droppable(DroppableId, Position),
}

/// Scroll speed for an item `distance` pixels away from an edge.
fn speed(distance: f32, start_from: f32, max_speed_at: f32, config: &AutoScrollConfig) -> f32 {
    if distance >= start_from {
        return 0.0;
    }
    if distance <= max_speed_at {
        return config.max_scroll_speed;
    }
    let percentage = (start_from - distance) / (start_from - max_speed_at);
    config.max_scroll_speed * config.ease(percentage)
}

fn axis_speed(
    distance_to_start: f32,
    distance_to_end: f32,
    container_size: f32,
    config: &AutoScrollConfig,
) -> f32 {
    let start_from = container_size * config.start_from_percentage;
    let max_speed_at = container_size * config.max_speed_at_percentage;
    if distance_to_end < distance_to_start {
        speed(distance_to_end, start_from, max_speed_at, config)
    } else {
        -speed(distance_to_start, start_from, max_speed_at, config)
    }
}

/// Scroll needed this frame for an item of `subject` size centered at
/// `center` inside `container`. `None` when the item is away from every edge.
///
/// An axis on which the item is larger than the container never scrolls.
pub fn required_container_scroll(
    container: Rect,
    subject: Rect,
    center: Position,
    config: &AutoScrollConfig,
) -> Option<Position> {
    let mut required = Vec2::new(
        axis_speed(
            center.x - container.left(),
            container.right() - center.x,
            container.width,
            config,
        ),
        axis_speed(
            center.y - container.top(),
            container.bottom() - center.y,
            container.height,
            config,
        ),
    );

    if subject.width > container.width {
        required.x = 0.0;
    }
    if subject.height > container.height {
        required.y = 0.0;
    }

    let required = Vec2::new(clean(required.x), clean(required.y));
    (required != Vec2::ZERO).then_some(required)
}

/// The droppable to scroll: the destination if it scrolls, otherwise the
/// scroll container under the item's center.
fn best_scrollable<'a>(drag: &'a DraggingState, center: Position) -> Option<&'a DroppableDimension> {
    let destination = drag
        .impact
        .destination
        .as_ref()
        .and_then(|location| drag.dimensions.droppables.get(&location.droppable_id))
        .filter(|droppable| droppable.closest_scrollable.is_some());
    destination.or_else(|| {
        drag.dimensions.droppables.values().find(|droppable| {
            droppable.is_enabled
                && droppable.descriptor.type_id == drag.critical.droppable.type_id
                && droppable
                    .closest_scrollable
                    .is_some_and(|scrollable| scrollable.frame.contains(center))
        })
    })
}

/// Work out what, if anything, should scroll for the drag's current position.
///
/// The window is preferred; a droppable is only scrolled when the window
/// cannot move in the required direction.
pub fn required_scroll(drag: &DraggingState, config: &AutoScrollConfig) -> Option<FluidScroll> {
    let center = drag.current.page.border_box_center;
    let subject = drag
        .dimensions
        .draggables
        .get(&drag.critical.draggable.id)?
        .page
        .border_box;

    if let Some(change) = required_container_scroll(drag.viewport.frame, subject, center, config)
        && can_scroll_window(&drag.viewport, change)
    {
        return Some(FluidScroll::Window(change));
    }

    let droppable = best_scrollable(drag, center)?;
    let frame = droppable.closest_scrollable?.frame;
    let change = required_container_scroll(frame, subject, center, config)?;
    can_scroll_droppable(droppable, change).then(|| FluidScroll::Droppable(droppable.id().clone(), change))
}
