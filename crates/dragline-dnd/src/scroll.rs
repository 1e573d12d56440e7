//! Whether the window or a droppable can absorb a scroll change, and how much
//! of a change would overflow its scroll range.

use dragline_core::math::{Position, Vec2, clean};

use crate::types::{DroppableDimension, ScrollDetails, Viewport};

/// The smallest change in the same direction as `change`: ±1 per moving axis.
pub fn smallest_signed(change: Position) -> Position {
    let signed = |value: f32| {
        if value == 0.0 {
            0.0
        } else if value > 0.0 {
            1.0
        } else {
            -1.0
        }
    };
    Vec2::new(signed(change.x), signed(change.y))
}

fn remainder(target: f32, max: f32) -> f32 {
    if target < 0.0 {
        target
    } else if target > max {
        target - max
    } else {
        0.0
    }
}

/// The part of `change` that cannot be applied from `current` without
/// leaving `0..=max`. `None` when all of it fits.
pub fn get_overlap(current: Position, max: Position, change: Position) -> Option<Position> {
    let target = current + change;
    let overlap = Vec2::new(
        clean(remainder(target.x, max.x)),
        clean(remainder(target.y, max.y)),
    );
    (overlap != Vec2::ZERO).then_some(overlap)
}

/// True when at least one pixel of `change` can be applied.
pub fn can_partially_scroll(current: Position, max: Position, change: Position) -> bool {
    let smallest = smallest_signed(change);
    match get_overlap(current, max, smallest) {
        None => true,
        Some(overlap) => {
            (smallest.x != 0.0 && overlap.x == 0.0) || (smallest.y != 0.0 && overlap.y == 0.0)
        }
    }
}

fn can_scroll(scroll: &ScrollDetails, change: Position) -> bool {
    can_partially_scroll(scroll.current, scroll.max, change)
}

pub fn can_scroll_window(viewport: &Viewport, change: Position) -> bool {
    can_scroll(&viewport.scroll, change)
}

/// Droppables without a scroll container never scroll.
pub fn can_scroll_droppable(droppable: &DroppableDimension, change: Position) -> bool {
    droppable
        .closest_scrollable
        .is_some_and(|scrollable| can_scroll(&scrollable.scroll, change))
}

pub fn window_overlap(viewport: &Viewport, change: Position) -> Option<Position> {
    if !can_scroll_window(viewport, change) {
        return None;
    }
    get_overlap(viewport.scroll.current, viewport.scroll.max, change)
}

pub fn droppable_overlap(droppable: &DroppableDimension, change: Position) -> Option<Position> {
    if !can_scroll_droppable(droppable, change) {
        return None;
    }
    let scroll = droppable.closest_scrollable?.scroll;
    get_overlap(scroll.current, scroll.max, change)
}
