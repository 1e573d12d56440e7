use dragline_core::math::Position;

use crate::error::DndResult;
use crate::scroll::{can_scroll_droppable, can_scroll_window, droppable_overlap, window_overlap};
use crate::state::DraggingState;
use crate::types::DroppableId;

/// How a keyboard scroll request is split between its absorbers.
///
/// The destination droppable takes as much as it can, the window takes what
/// is left, and any final remainder moves the item itself. The parts always
/// add up to the original request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JumpPlan {
    pub droppable: Option<(DroppableId, Position)>,
    pub window: Option<Position>,
    /// Remainder applied by moving the dragged item.
    pub manual: Option<Position>,
}

impl JumpPlan {
    /// Sum of every part of the plan.
    pub fn total(&self) -> Position {
        let droppable = self.droppable.as_ref().map_or(Position::ZERO, |(_, change)| *change);
        droppable + self.window.unwrap_or_default() + self.manual.unwrap_or_default()
    }
}

/// Split `request` for the drag's current destination.
///
/// `None` when there is no destination to scroll towards.
pub fn plan_jump(drag: &DraggingState, request: Position) -> DndResult<Option<JumpPlan>> {
    let Some(destination) = drag.impact.destination.as_ref() else {
        tracing::error!("Cannot perform a jump scroll when there is no destination");
        return Ok(None);
    };
    let droppable = drag.dimensions.droppable(&destination.droppable_id)?;

    let mut plan = JumpPlan::default();
    let mut remaining = request;

    if can_scroll_droppable(droppable, remaining) {
        match droppable_overlap(droppable, remaining) {
            None => {
                plan.droppable = Some((droppable.id().clone(), remaining));
                return Ok(Some(plan));
            }
            Some(overlap) => {
                plan.droppable = Some((droppable.id().clone(), remaining - overlap));
                remaining = overlap;
            }
        }
    }

    if can_scroll_window(&drag.viewport, remaining) {
        match window_overlap(&drag.viewport, remaining) {
            None => {
                plan.window = Some(remaining);
                return Ok(Some(plan));
            }
            Some(overlap) => {
                plan.window = Some(remaining - overlap);
                remaining = overlap;
            }
        }
    }

    plan.manual = Some(remaining);
    Ok(Some(plan))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{dragging_with_mode, list, vertical_list};
    use crate::types::{AutoScrollMode, DragImpact, ScrollDetails, ScrollFrame, Viewport};
    use dragline_core::geometry::Rect;
    use dragline_core::math::Vec2;
    use proptest::prelude::*;

    fn scrollable_drag(droppable_max: f32, window_max: f32) -> DraggingState {
        let (mut dimensions, _) = vertical_list(5);
        let droppable = list("list", 0.0, 5).with_scroll_frame(ScrollFrame {
            frame: Rect::new(0.0, 0.0, 200.0, 100.0),
            scroll: ScrollDetails::new(Vec2::ZERO, Vec2::new(0.0, droppable_max)),
        });
        dimensions.droppables.insert("list".into(), droppable);
        let viewport = Viewport::new(Vec2::new(800.0, 600.0), Vec2::ZERO, Vec2::new(0.0, window_max));
        dragging_with_mode((dimensions, viewport), "item-0", AutoScrollMode::Jump)
    }

    #[test]
    fn test_droppable_absorbs_everything() {
        let drag = scrollable_drag(200.0, 0.0);
        let plan = plan_jump(&drag, Vec2::new(0.0, 40.0)).unwrap().unwrap();
        assert_eq!(plan.droppable, Some(("list".into(), Vec2::new(0.0, 40.0))));
        assert_eq!(plan.window, None);
        assert_eq!(plan.manual, None);
    }

    #[test]
    fn test_overflow_goes_to_window_then_item() {
        let drag = scrollable_drag(30.0, 5.0);
        let request = Vec2::new(0.0, 40.0);
        let plan = plan_jump(&drag, request).unwrap().unwrap();
        assert_eq!(plan.droppable, Some(("list".into(), Vec2::new(0.0, 30.0))));
        assert_eq!(plan.window, Some(Vec2::new(0.0, 5.0)));
        assert_eq!(plan.manual, Some(Vec2::new(0.0, 5.0)));
        assert_eq!(plan.total(), request);
    }

    #[test]
    fn test_nothing_scrollable_moves_item() {
        let drag = scrollable_drag(0.0, 0.0);
        let plan = plan_jump(&drag, Vec2::new(0.0, -40.0)).unwrap().unwrap();
        assert_eq!(plan.manual, Some(Vec2::new(0.0, -40.0)));
        assert_eq!(plan.total(), Vec2::new(0.0, -40.0));
    }

    #[test]
    fn test_no_destination() {
        let mut drag = scrollable_drag(100.0, 100.0);
        drag.impact = DragImpact::none();
        assert_eq!(plan_jump(&drag, Vec2::new(0.0, 10.0)).unwrap(), None);
    }

    /// Whole pixel `(current, max)` pairs per axis, so sums stay exact.
    fn scroll_state() -> impl Strategy<Value = (Vec2, Vec2)> {
        let axis = || {
            (0u16..=400)
                .prop_flat_map(|max| (0..=max, Just(max)))
                .prop_map(|(current, max)| (f32::from(current), f32::from(max)))
        };
        (axis(), axis()).prop_map(|((x, max_x), (y, max_y))| (Vec2::new(x, y), Vec2::new(max_x, max_y)))
    }

    fn fits(current: Vec2, max: Vec2, change: Vec2) -> bool {
        let target = current + change;
        (0.0..=max.x).contains(&target.x) && (0.0..=max.y).contains(&target.y)
    }

    proptest! {
        #[test]
        fn test_jump_parts_always_sum_to_request(
            (droppable_current, droppable_max) in scroll_state(),
            (window_current, window_max) in scroll_state(),
            x in -500i16..=500,
            y in -500i16..=500,
        ) {
            let request = Vec2::new(f32::from(x), f32::from(y));
            let mut drag = scrollable_drag(0.0, 0.0);
            let droppable = list("list", 0.0, 5).with_scroll_frame(ScrollFrame {
                frame: Rect::new(0.0, 0.0, 200.0, 100.0),
                scroll: ScrollDetails::new(Vec2::ZERO, droppable_max).with_current(droppable_current),
            });
            drag.dimensions = drag.dimensions.with_droppable(droppable);
            drag.viewport = Viewport::new(Vec2::new(800.0, 600.0), Vec2::ZERO, window_max)
                .with_scroll(window_current);

            let plan = plan_jump(&drag, request).unwrap().unwrap();
            prop_assert_eq!(plan.total(), request);
            if let Some((_, change)) = &plan.droppable {
                prop_assert!(fits(droppable_current, droppable_max, *change));
            }
            if let Some(change) = plan.window {
                prop_assert!(fits(window_current, window_max, change));
            }
        }
    }
}
