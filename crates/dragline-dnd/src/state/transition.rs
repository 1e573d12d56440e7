use dragline_core::profiling::profile_function;

use super::{
    BulkCollectingState, DragState, DraggingState, DropAnimatingState, DropPendingState, PhaseSet,
    PreparingState, positions_for_client, positions_for_page_center,
};
use crate::action::{Action, BulkReplace, InitialPublish};
use crate::error::{DndError, DndResult};
use crate::impact::{self, KeyboardMove};
use crate::types::{AutoScrollMode, Critical, CurrentDrag, DragImpact, InitialDrag, ItemPositions};

fn invalid(action: &Action, state: &DragState) -> DndError {
    DndError::InvalidPhase {
        action: action.name(),
        phase: state.phase(),
    }
}

/// Compute the state that follows `state` once `action` is applied.
///
/// Pure: the previous state is never modified and no side effects happen
/// here. Stages in the middleware pipeline own every side effect.
pub fn transition(state: &DragState, action: &Action) -> DndResult<DragState> {
    profile_function!();

    match action {
        Action::Clean => Ok(DragState::Idle),

        Action::Prepare => match state {
            DragState::Idle => Ok(DragState::Preparing(PreparingState::default())),
            _ => Err(invalid(action, state)),
        },

        Action::Lift(request) => match state {
            DragState::Preparing(_) => Ok(DragState::Preparing(PreparingState {
                lift: Some(request.clone()),
            })),
            _ => Err(invalid(action, state)),
        },

        Action::InitialPublish(publish) => match state {
            DragState::Preparing(_) => initial_publish(publish).map(DragState::Dragging),
            _ => Err(invalid(action, state)),
        },

        Action::BulkCollectionStarting(collection) => match state {
            DragState::Dragging(drag) => Ok(DragState::BulkCollecting(BulkCollectingState {
                drag: drag.clone(),
                collection: collection.clone(),
            })),
            _ => Err(invalid(action, state)),
        },

        Action::BulkReplace(replace) => match state {
            DragState::BulkCollecting(collecting) => {
                bulk_replace(&collecting.drag, replace).map(DragState::Dragging)
            }
            // A queued follow-up run publishing after the first one landed
            DragState::Dragging(drag) => bulk_replace(drag, replace).map(DragState::Dragging),
            DragState::DropPending(pending) => Ok(DragState::DropPending(DropPendingState {
                drag: bulk_replace(&pending.drag, replace)?,
                is_waiting: false,
                reason: pending.reason,
            })),
            _ => Err(invalid(action, state)),
        },

        Action::UpdateDroppableScroll { id, offset } => update_drag(state, action, |drag, live| {
            let droppable = drag.dimensions.droppable(id)?.with_scroll(*offset);
            drag.dimensions = drag.dimensions.with_droppable(droppable);
            if live {
                drag.scroll_jump_request = None;
                refresh_impact(drag)?;
            }
            Ok(())
        }),

        Action::UpdateDroppableIsEnabled { id, is_enabled } => update_drag(state, action, |drag, live| {
            let mut droppable = drag.dimensions.droppable(id)?.clone();
            droppable.is_enabled = *is_enabled;
            drag.dimensions = drag.dimensions.with_droppable(droppable);
            if live {
                refresh_impact(drag)?;
            }
            Ok(())
        }),

        Action::Move {
            client,
            should_animate,
        } => update_drag(state, action, |drag, live| {
            drag.current = positions_for_client(&drag.initial, *client, &drag.viewport, *should_animate);
            if live {
                drag.scroll_jump_request = None;
                refresh_impact(drag)?;
            }
            Ok(())
        }),

        Action::MoveByWindowScroll { scroll } => update_drag(state, action, |drag, live| {
            drag.viewport = drag.viewport.with_scroll(*scroll);
            drag.current = positions_for_client(
                &drag.initial,
                drag.current.client.selection,
                &drag.viewport,
                drag.current.should_animate,
            );
            if live {
                drag.scroll_jump_request = None;
                refresh_impact(drag)?;
            }
            Ok(())
        }),

        Action::MoveForward
        | Action::MoveBackward
        | Action::CrossAxisMoveForward
        | Action::CrossAxisMoveBackward => match state {
            DragState::Dragging(drag) => keyboard_move(drag, action),
            _ => {
                tracing::debug!("Ignoring {} in phase {}", action.name(), state.phase());
                Ok(state.clone())
            }
        },

        // Handled entirely by pipeline stages
        Action::Drop { .. } | Action::DropAnimationFinished => Ok(state.clone()),

        Action::DropPending { reason } => match state {
            DragState::BulkCollecting(collecting) => Ok(DragState::DropPending(DropPendingState {
                drag: collecting.drag.clone(),
                is_waiting: true,
                reason: *reason,
            })),
            _ => Err(invalid(action, state)),
        },

        Action::DropAnimate(pending) => {
            let drag = match state {
                DragState::Dragging(drag) => drag,
                DragState::DropPending(waiting) => &waiting.drag,
                _ => return Err(invalid(action, state)),
            };
            Ok(DragState::DropAnimating(DropAnimatingState {
                pending: pending.clone(),
                critical: drag.critical.clone(),
                dimensions: drag.dimensions.clone(),
            }))
        }

        Action::DropComplete(_) => {
            let completable = PhaseSet::DRAGGING | PhaseSet::DROP_PENDING | PhaseSet::DROP_ANIMATING;
            if completable.accepts(state.phase()) {
                Ok(DragState::Idle)
            } else {
                Err(invalid(action, state))
            }
        }
    }
}

/// Apply `update` to the drag carried by `state`.
///
/// `live` is true only while dragging; during a bulk collection the
/// dimensions are about to be replaced, so the impact is left alone. There is
/// no drag to update while idle or animating a drop.
fn update_drag(
    state: &DragState,
    action: &Action,
    update: impl FnOnce(&mut DraggingState, bool) -> DndResult<()>,
) -> DndResult<DragState> {
    match state {
        DragState::Dragging(drag) => {
            let mut next = drag.clone();
            update(&mut next, true)?;
            Ok(DragState::Dragging(next))
        }
        DragState::BulkCollecting(collecting) => {
            let mut next = collecting.clone();
            update(&mut next.drag, false)?;
            Ok(DragState::BulkCollecting(next))
        }
        DragState::Idle | DragState::DropAnimating(_) => Err(invalid(action, state)),
        // Input racing the lift or a deferred drop
        DragState::Preparing(_) | DragState::DropPending(_) => {
            tracing::debug!("Ignoring {} in phase {}", action.name(), state.phase());
            Ok(state.clone())
        }
    }
}

fn initial_publish(publish: &InitialPublish) -> DndResult<DraggingState> {
    let dimensions = publish.dimensions.clone();
    let draggable = dimensions.draggable(&publish.critical.draggable.id)?;
    let home = dimensions.droppable(&publish.critical.droppable.id)?;

    let client = publish.client;
    let window = publish.viewport.scroll.current;
    let page = ItemPositions::at_rest(client.selection + window, client.border_box_center + window);
    let impact = impact::home_impact(draggable, home, &dimensions, &publish.viewport);

    Ok(DraggingState {
        critical: publish.critical.clone(),
        auto_scroll_mode: publish.auto_scroll_mode,
        initial: InitialDrag { client, page },
        current: CurrentDrag {
            client,
            page,
            should_animate: false,
        },
        impact,
        viewport: publish.viewport,
        scroll_jump_request: None,
        dimensions,
    })
}

fn bulk_replace(drag: &DraggingState, replace: &BulkReplace) -> DndResult<DraggingState> {
    let dimensions = replace.dimensions.clone();
    let critical = if replace.should_replace_critical {
        let draggable = dimensions.draggable(&drag.critical.draggable.id)?;
        let droppable = dimensions.droppable(&draggable.descriptor.droppable_id)?;
        Critical {
            draggable: draggable.descriptor.clone(),
            droppable: droppable.descriptor.clone(),
        }
    } else {
        drag.critical.clone()
    };

    let mut next = DraggingState {
        critical,
        dimensions,
        viewport: replace.viewport,
        ..drag.clone()
    };
    next.current = positions_for_client(
        &next.initial,
        next.current.client.selection,
        &next.viewport,
        next.current.should_animate,
    );
    refresh_impact(&mut next)?;
    Ok(next)
}

/// Recompute the impact after positions or dimensions changed.
///
/// Fluid drags follow the item's center. Jump drags keep the impact chosen by
/// the keyboard unless its destination can no longer accept the item.
fn refresh_impact(drag: &mut DraggingState) -> DndResult<()> {
    drag.impact = match drag.auto_scroll_mode {
        AutoScrollMode::Fluid => {
            let draggable = drag.dimensions.draggable(&drag.critical.draggable.id)?;
            impact::pointer_impact(
                drag.current.page.border_box_center,
                draggable,
                &drag.dimensions,
                &drag.viewport,
            )
        }
        AutoScrollMode::Jump => {
            let still_valid = drag.impact.destination.as_ref().is_none_or(|location| {
                drag.dimensions
                    .droppables
                    .get(&location.droppable_id)
                    .is_some_and(|droppable| droppable.is_enabled)
            });
            if still_valid {
                drag.impact.clone()
            } else {
                DragImpact::none()
            }
        }
    };
    Ok(())
}

fn keyboard_move(drag: &DraggingState, action: &Action) -> DndResult<DragState> {
    let moved = match action {
        Action::MoveForward => impact::move_in_direction(drag, true)?,
        Action::MoveBackward => impact::move_in_direction(drag, false)?,
        Action::CrossAxisMoveForward => impact::move_cross_axis(drag, true)?,
        Action::CrossAxisMoveBackward => impact::move_cross_axis(drag, false)?,
        _ => None,
    };

    let Some(KeyboardMove {
        page_center,
        impact,
        scroll_jump_request,
    }) = moved
    else {
        tracing::debug!("{} not possible from the current location", action.name());
        return Ok(DragState::Dragging(drag.clone()));
    };

    let mut next = drag.clone();
    next.current = positions_for_page_center(&next.initial, page_center, &next.viewport, true);
    next.impact = impact;
    next.scroll_jump_request = scroll_jump_request;
    Ok(DragState::Dragging(next))
}
