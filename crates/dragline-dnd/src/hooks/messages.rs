//! Screen reader messages used when a hook does not announce anything.
//!
//! Positions are spoken 1-based.

use crate::types::{DragStart, DragUpdate, DropReason, DropResult};

pub fn on_drag_start(start: &DragStart) -> String {
    format!(
        "You have lifted an item in position {}. Use the arrow keys to move, space bar to drop, and escape to cancel.",
        start.source.index + 1
    )
}

pub fn on_drag_update(update: &DragUpdate) -> String {
    let Some(destination) = &update.destination else {
        return "You are currently not dragging over a droppable area".to_owned();
    };

    if destination.droppable_id == update.source.droppable_id {
        return format!("You have moved the item to position {}", destination.index + 1);
    }

    format!(
        "You have moved the item from list {} in position {} to list {} in position {}",
        update.source.droppable_id,
        update.source.index + 1,
        destination.droppable_id,
        destination.index + 1
    )
}

pub fn on_drag_end(result: &DropResult) -> String {
    let source = &result.source;
    if result.reason == DropReason::Cancel {
        return format!(
            "Movement cancelled. The item has returned to its starting position of {}",
            source.index + 1
        );
    }

    let Some(destination) = &result.destination else {
        return format!(
            "The item has been dropped while not over a droppable location. The item has returned to its starting position of {}",
            source.index + 1
        );
    };

    if destination.droppable_id == source.droppable_id {
        return format!(
            "You have dropped the item. It has moved from position {} to {}",
            source.index + 1,
            destination.index + 1
        );
    }

    format!(
        "You have dropped the item. It has moved from position {} in list {} to list {} position {}",
        source.index + 1,
        source.droppable_id,
        destination.droppable_id,
        destination.index + 1
    )
}
