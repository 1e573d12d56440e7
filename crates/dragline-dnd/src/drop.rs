//! Drop resolution: turning a live drag into its final result and the
//! offset the item has to travel to settle.

use dragline_core::math::Position;

use crate::error::DndResult;
use crate::impact::{Coordinates, new_home_center};
use crate::state::DraggingState;
use crate::types::{DragImpact, DropReason, DropResult, PendingDrop};

/// What the drop stage should do next.
#[derive(Debug, Clone, PartialEq)]
pub struct DropResolution {
    pub pending: PendingDrop,
    /// The item is not already at rest in its new home.
    pub should_animate: bool,
}

/// Resolve a drop (or cancel) of `drag`.
///
/// A cancelled drag always returns to its lift position with no impact.
/// Otherwise the item settles where its impact says, shifted by however far
/// the window and the relevant droppable scrolled its new home since lift.
pub fn resolve_drop(drag: &DraggingState, reason: DropReason) -> DndResult<DropResolution> {
    let critical = &drag.critical;
    let impact = match reason {
        DropReason::Drop => drag.impact.clone(),
        DropReason::Cancel => DragImpact::none(),
    };

    let result = DropResult {
        draggable_id: critical.draggable.id.clone(),
        type_id: critical.droppable.type_id.clone(),
        source: critical.source(),
        destination: impact.destination.clone(),
        reason,
    };

    let new_home_offset = new_home_offset(drag, &impact, reason)?;
    let should_animate = drag.current.client.offset != new_home_offset;

    Ok(DropResolution {
        pending: PendingDrop {
            new_home_offset,
            result,
            impact,
        },
        should_animate,
    })
}

fn new_home_offset(drag: &DraggingState, impact: &DragImpact, reason: DropReason) -> DndResult<Position> {
    if reason == DropReason::Cancel {
        return Ok(Position::ZERO);
    }

    let dimensions = &drag.dimensions;
    let draggable = dimensions.draggable(&drag.critical.draggable.id)?;
    let destination = impact
        .destination
        .as_ref()
        .map(|location| dimensions.droppable(&location.droppable_id))
        .transpose()?;

    let new_center = new_home_center(
        &impact.movement,
        draggable,
        dimensions,
        destination,
        Coordinates::Client,
    )?;
    let home = dimensions.droppable(&drag.critical.droppable.id)?;
    let droppable_displacement = destination.unwrap_or(home).scroll_displacement();

    Ok(new_center - draggable.client.center()
        + drag.viewport.scroll.diff.displacement
        + droppable_displacement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{dragging, scrollable, vertical_list};
    use crate::state::positions_for_client;
    use crate::types::DraggableLocation;
    use dragline_core::math::Vec2;

    #[test]
    fn test_cancel_returns_home() {
        let mut drag = dragging(vertical_list(3), "item-0");
        drag.current = positions_for_client(&drag.initial, Vec2::new(100.0, 95.0), &drag.viewport, false);

        let resolution = resolve_drop(&drag, DropReason::Cancel).unwrap();
        assert_eq!(resolution.pending.new_home_offset, Vec2::ZERO);
        assert_eq!(resolution.pending.result.destination, None);
        assert_eq!(resolution.pending.impact, DragImpact::none());
        assert!(resolution.should_animate);
    }

    #[test]
    fn test_drop_in_place_needs_no_animation() {
        let drag = dragging(vertical_list(3), "item-1");
        let resolution = resolve_drop(&drag, DropReason::Drop).unwrap();
        assert_eq!(resolution.pending.new_home_offset, Vec2::ZERO);
        assert!(!resolution.should_animate);
        assert_eq!(
            resolution.pending.result.destination,
            Some(DraggableLocation::new("list", 1))
        );
    }

    #[test]
    fn test_drop_after_pointer_move_settles_on_slot() {
        let mut drag = dragging(vertical_list(3), "item-0");
        drag.current = positions_for_client(&drag.initial, Vec2::new(100.0, 65.0), &drag.viewport, false);
        drag.impact = crate::impact::pointer_impact(
            drag.current.page.border_box_center,
            drag.dimensions.draggable(&"item-0".into()).unwrap(),
            &drag.dimensions,
            &drag.viewport,
        );

        let resolution = resolve_drop(&drag, DropReason::Drop).unwrap();
        assert_eq!(resolution.pending.new_home_offset, Vec2::new(0.0, 40.0));
        assert!(resolution.should_animate);
        assert_eq!(resolution.pending.result.source, DraggableLocation::new("list", 0));
    }

    #[test]
    fn test_drop_after_window_scroll() {
        let mut drag = dragging(vertical_list(3), "item-0");
        drag.viewport = drag.viewport.with_scroll(Vec2::new(0.0, 30.0));

        let resolution = resolve_drop(&drag, DropReason::Drop).unwrap();
        // The window moved the home slot up by the scrolled distance
        assert_eq!(resolution.pending.new_home_offset, Vec2::new(0.0, -30.0));
        assert!(resolution.should_animate);
        assert_eq!(
            resolution.pending.result.destination,
            Some(DraggableLocation::new("list", 0))
        );
    }

    #[test]
    fn test_drop_over_scrolled_destination() {
        let mut drag = dragging(scrollable(vertical_list(3), "list", 80.0, 100.0), "item-1");
        let scrolled = drag
            .dimensions
            .droppable(&"list".into())
            .unwrap()
            .with_scroll(Vec2::new(0.0, 20.0));
        drag.dimensions = drag.dimensions.with_droppable(scrolled);

        let resolution = resolve_drop(&drag, DropReason::Drop).unwrap();
        assert_eq!(resolution.pending.new_home_offset, Vec2::new(0.0, -20.0));

        // Window and droppable scroll both count
        drag.viewport = drag.viewport.with_scroll(Vec2::new(0.0, 30.0));
        let resolution = resolve_drop(&drag, DropReason::Drop).unwrap();
        assert_eq!(resolution.pending.new_home_offset, Vec2::new(0.0, -50.0));
    }

    #[test]
    fn test_cancel_after_scrolling_stays_at_zero() {
        let mut drag = dragging(scrollable(vertical_list(3), "list", 80.0, 100.0), "item-1");
        let scrolled = drag
            .dimensions
            .droppable(&"list".into())
            .unwrap()
            .with_scroll(Vec2::new(0.0, 20.0));
        drag.dimensions = drag.dimensions.with_droppable(scrolled);
        drag.viewport = drag.viewport.with_scroll(Vec2::new(0.0, 30.0));

        let resolution = resolve_drop(&drag, DropReason::Cancel).unwrap();
        assert_eq!(resolution.pending.new_home_offset, Vec2::ZERO);
        assert_eq!(resolution.pending.result.destination, None);
    }
}
