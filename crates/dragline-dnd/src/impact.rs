//! Impact calculation: where the dragged item would land and which siblings
//! move out of its way.
//!
//! Every entry point funnels into [`impact_at`], which builds the impact for
//! a concrete destination index, so pointer and keyboard drags always agree
//! on what a given index means. [`new_home_center`] is shared with the drop
//! resolver so a keyboard drag that drops where it stands needs no animation.

use std::cmp::Ordering;

use dragline_core::geometry::{Axis, BoxModel, Edge, Rect};
use dragline_core::math::Position;

use crate::error::DndResult;
use crate::state::DraggingState;
use crate::types::{
    Displacement, DimensionMap, DragImpact, DragMovement, DraggableDimension, DraggableLocation,
    DroppableDimension, Viewport,
};

/// Which measured box to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coordinates {
    Client,
    Page,
}

fn draggable_box(draggable: &DraggableDimension, coordinates: Coordinates) -> &BoxModel {
    match coordinates {
        Coordinates::Client => &draggable.client,
        Coordinates::Page => &draggable.page,
    }
}

fn droppable_box(droppable: &DroppableDimension, coordinates: Coordinates) -> &BoxModel {
    match coordinates {
        Coordinates::Client => &droppable.client,
        Coordinates::Page => &droppable.page,
    }
}

/// Center `source` would have after aligning its `source_edge` with the
/// `destination_edge` of `destination` on the main axis and with the
/// destination's cross-axis start.
pub fn move_to_edge(
    source: &BoxModel,
    source_edge: Edge,
    destination: Rect,
    destination_edge: Edge,
    axis: Axis,
) -> Position {
    let corner = |rect: Rect, edge: Edge| axis.patch(rect.edge(axis, edge), rect.cross_start(axis));
    let source_corner = corner(source.margin_box(), source_edge);
    corner(destination, destination_edge) + (source.center() - source_corner)
}

fn is_rect_visible(rect: Rect, droppable: &DroppableDimension, viewport: &Viewport) -> bool {
    let in_viewport = rect.intersection(&viewport.frame).is_some();
    let in_frame = droppable
        .closest_scrollable
        .is_none_or(|scrollable| rect.intersection(&scrollable.frame).is_some());
    in_viewport && in_frame
}

fn is_point_visible(point: Position, droppable: &DroppableDimension, viewport: &Viewport) -> bool {
    viewport.frame.contains(point)
        && droppable
            .closest_scrollable
            .is_none_or(|scrollable| scrollable.frame.contains(point))
}

/// Impact of placing `draggable` at `index` inside `destination`.
///
/// At home the valid range is `0..len`; in a foreign list `0..=len` (the end
/// slot is after the last item). Out of range indices are clamped.
pub fn impact_at(
    draggable: &DraggableDimension,
    destination: &DroppableDimension,
    index: usize,
    dimensions: &DimensionMap,
    viewport: &Viewport,
) -> DragImpact {
    let axis = destination.axis;
    let inside = dimensions.draggables_inside(destination.id());
    let home_position = inside.iter().position(|d| d.id() == draggable.id());

    let (displaced, index, is_beyond_start_position) = match home_position {
        Some(start) => {
            let index = index.min(inside.len() - 1);
            let displaced: Vec<&DraggableDimension> = match index.cmp(&start) {
                // Closest to the dragged item is the one at `index`
                Ordering::Greater => inside[start + 1..=index].iter().rev().copied().collect(),
                Ordering::Less => inside[index..start].to_vec(),
                Ordering::Equal => Vec::new(),
            };
            (displaced, index, index > start)
        }
        None => {
            let index = index.min(inside.len());
            (inside[index..].to_vec(), index, false)
        }
    };

    let scroll_displacement = destination.scroll_displacement();
    let displaced = displaced
        .into_iter()
        .map(|sibling| {
            let visible = is_rect_visible(
                sibling.page.border_box.shift(scroll_displacement),
                destination,
                viewport,
            );
            Displacement {
                draggable_id: sibling.id().clone(),
                is_visible: visible,
                should_animate: visible,
            }
        })
        .collect();

    DragImpact {
        movement: DragMovement {
            displaced,
            amount: axis.patch(draggable.page.margin_box().size(axis), 0.0),
            is_beyond_start_position,
        },
        direction: Some(axis),
        destination: Some(DraggableLocation {
            droppable_id: destination.id().clone(),
            index,
        }),
    }
}

/// Impact at lift: home, at the starting index, nothing displaced.
pub fn home_impact(
    draggable: &DraggableDimension,
    home: &DroppableDimension,
    dimensions: &DimensionMap,
    viewport: &Viewport,
) -> DragImpact {
    impact_at(draggable, home, draggable.descriptor.index, dimensions, viewport)
}

/// First enabled droppable of the dragged item's type under `page_center`.
pub fn droppable_over<'a>(
    page_center: Position,
    draggable: &DraggableDimension,
    dimensions: &'a DimensionMap,
) -> Option<&'a DroppableDimension> {
    dimensions.droppables.values().find(|droppable| {
        droppable.is_enabled
            && droppable.descriptor.type_id == draggable.descriptor.type_id
            && droppable
                .visible_page_box()
                .is_some_and(|visible| visible.contains(page_center))
    })
}

/// Impact for a pointer drag whose border-box center is at `page_center`.
pub fn pointer_impact(
    page_center: Position,
    draggable: &DraggableDimension,
    dimensions: &DimensionMap,
    viewport: &Viewport,
) -> DragImpact {
    let Some(destination) = droppable_over(page_center, draggable, dimensions) else {
        return DragImpact::none();
    };

    let axis = destination.axis;
    // Compare in the droppable's unscrolled content space
    let current = axis.line(page_center + destination.scroll_diff());
    let siblings: Vec<&DraggableDimension> = dimensions
        .draggables_inside(destination.id())
        .into_iter()
        .filter(|d| d.id() != draggable.id())
        .collect();
    let is_home = destination.id() == &draggable.descriptor.droppable_id;

    let index = if is_home {
        let start = draggable.descriptor.index;
        let original = axis.line(draggable.page.center());
        if current > original {
            let passed = siblings
                .iter()
                .filter(|s| axis.line(s.page.center()) > original)
                .filter(|s| current > s.page.border_box.start(axis))
                .count();
            start + passed
        } else {
            let passed = siblings
                .iter()
                .filter(|s| axis.line(s.page.center()) < original)
                .filter(|s| current < s.page.border_box.end(axis))
                .count();
            start.saturating_sub(passed)
        }
    } else {
        siblings
            .iter()
            .position(|s| axis.line(s.page.center()) > current)
            .unwrap_or(siblings.len())
    };

    impact_at(draggable, destination, index, dimensions, viewport)
}

/// Border-box center the dragged item occupies once `movement` settles in
/// `destination` (or its original center when there is no destination).
pub fn new_home_center(
    movement: &DragMovement,
    draggable: &DraggableDimension,
    dimensions: &DimensionMap,
    destination: Option<&DroppableDimension>,
    coordinates: Coordinates,
) -> DndResult<Position> {
    let source = draggable_box(draggable, coordinates);
    let Some(destination) = destination else {
        return Ok(source.center());
    };

    let axis = destination.axis;
    let is_home = destination.id() == &draggable.descriptor.droppable_id;

    let Some(closest) = movement.displaced.first() else {
        if is_home {
            return Ok(source.center());
        }
        let siblings = dimensions.draggables_inside(destination.id());
        return Ok(match siblings.last() {
            // Empty list: sit at its start
            None => move_to_edge(
                source,
                Edge::Start,
                droppable_box(destination, coordinates).border_box,
                Edge::Start,
                axis,
            ),
            // After the last item
            Some(last) => move_to_edge(
                source,
                Edge::Start,
                draggable_box(last, coordinates).margin_box(),
                Edge::End,
                axis,
            ),
        });
    };

    let closest = draggable_box(dimensions.draggable(&closest.draggable_id)?, coordinates).margin_box();
    if is_home && movement.is_beyond_start_position {
        Ok(move_to_edge(source, Edge::End, closest, Edge::End, axis))
    } else {
        Ok(move_to_edge(source, Edge::Start, closest, Edge::Start, axis))
    }
}

/// Outcome of a keyboard movement.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardMove {
    pub page_center: Position,
    pub impact: DragImpact,
    pub scroll_jump_request: Option<Position>,
}

fn finish_keyboard_move(
    drag: &DraggingState,
    draggable: &DraggableDimension,
    destination: &DroppableDimension,
    impact: DragImpact,
) -> DndResult<KeyboardMove> {
    let target = new_home_center(
        &impact.movement,
        draggable,
        &drag.dimensions,
        Some(destination),
        Coordinates::Page,
    )? + destination.scroll_displacement();
    let previous = drag.current.page.border_box_center;

    if is_point_visible(target, destination, &drag.viewport) {
        return Ok(KeyboardMove {
            page_center: target,
            impact,
            scroll_jump_request: None,
        });
    }

    // Hold the item still and scroll the new slot towards it
    Ok(KeyboardMove {
        page_center: previous,
        impact,
        scroll_jump_request: Some(target - previous),
    })
}

/// Move one slot forward or backward within the current destination.
///
/// Returns `None` when the move is not possible (no destination, or already
/// at the edge of the list).
pub fn move_in_direction(drag: &DraggingState, is_moving_forward: bool) -> DndResult<Option<KeyboardMove>> {
    let Some(location) = drag.impact.destination.as_ref() else {
        return Ok(None);
    };
    let dimensions = &drag.dimensions;
    let draggable = dimensions.draggable(&drag.critical.draggable.id)?;
    let destination = dimensions.droppable(&location.droppable_id)?;

    let inside = dimensions.draggables_inside(destination.id());
    let is_home = destination.id() == &draggable.descriptor.droppable_id;
    let max_index = if is_home {
        inside.len().saturating_sub(1)
    } else {
        inside.len()
    };

    let proposed = if is_moving_forward {
        location.index + 1
    } else {
        match location.index.checked_sub(1) {
            Some(index) => index,
            None => return Ok(None),
        }
    };
    if proposed > max_index {
        return Ok(None);
    }

    let impact = impact_at(draggable, destination, proposed, dimensions, &drag.viewport);
    finish_keyboard_move(drag, draggable, destination, impact).map(Some)
}

/// Move to the nearest droppable on the cross axis.
pub fn move_cross_axis(drag: &DraggingState, is_moving_forward: bool) -> DndResult<Option<KeyboardMove>> {
    let dimensions = &drag.dimensions;
    let draggable = dimensions.draggable(&drag.critical.draggable.id)?;
    let source_id = drag
        .impact
        .destination
        .as_ref()
        .map_or(&draggable.descriptor.droppable_id, |location| &location.droppable_id);
    let source = dimensions.droppable(source_id)?;
    let Some(source_box) = source.visible_page_box() else {
        return Ok(None);
    };

    let cross = source.axis.cross();
    let center = drag.current.page.border_box_center;
    let gap = |candidate: &Rect| {
        if is_moving_forward {
            candidate.start(cross) - source_box.end(cross)
        } else {
            source_box.start(cross) - candidate.end(cross)
        }
    };
    let main_distance = |candidate: &Rect| (source.axis.line(candidate.center()) - source.axis.line(center)).abs();

    let target = dimensions
        .droppables
        .values()
        .filter(|c| c.id() != source.id() && c.is_enabled)
        .filter(|c| c.descriptor.type_id == source.descriptor.type_id)
        .filter_map(|c| c.visible_page_box().map(|visible| (c, visible)))
        .filter(|(_, visible)| gap(visible) >= 0.0)
        .min_by(|(_, a), (_, b)| {
            gap(a)
                .total_cmp(&gap(b))
                .then_with(|| main_distance(a).total_cmp(&main_distance(b)))
        })
        .map(|(candidate, _)| candidate);
    let Some(target) = target else {
        return Ok(None);
    };

    let axis = target.axis;
    let line = axis.line(center + target.scroll_diff());
    let distance = |s: &DraggableDimension| (axis.line(s.page.center()) - line).abs();
    let siblings: Vec<&DraggableDimension> = dimensions
        .draggables_inside(target.id())
        .into_iter()
        .filter(|d| d.id() != draggable.id())
        .collect();
    let closest = siblings
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| distance(a).total_cmp(&distance(b)));

    let is_home = target.id() == &draggable.descriptor.droppable_id;
    let index = match closest {
        None if is_home => draggable.descriptor.index,
        None => 0,
        // Returning home: take the closest sibling's slot
        Some((_, sibling)) if is_home => sibling.descriptor.index,
        Some((position, sibling)) if line > axis.line(sibling.page.center()) => position + 1,
        Some((position, _)) => position,
    };

    let impact = impact_at(draggable, target, index, dimensions, &drag.viewport);
    finish_keyboard_move(drag, draggable, target, impact).map(Some)
}
