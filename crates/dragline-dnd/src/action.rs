//! The action protocol. Every change to the drag state is one of these,
//! dispatched in sequence through the middleware pipeline.

use std::sync::Arc;

use dragline_core::math::Position;

use crate::types::{
    AutoScrollMode, Collection, Critical, DimensionMap, DraggableId, DropReason, DropResult,
    DroppableId, ItemPositions, PendingDrop, Viewport,
};

/// Payload of [`Action::Lift`].
#[derive(Debug, Clone, PartialEq)]
pub struct LiftRequest {
    pub id: DraggableId,
    pub client: ItemPositions,
    pub viewport: Viewport,
    pub auto_scroll_mode: AutoScrollMode,
}

/// Payload of [`Action::InitialPublish`].
#[derive(Debug, Clone, PartialEq)]
pub struct InitialPublish {
    pub critical: Critical,
    pub dimensions: Arc<DimensionMap>,
    pub client: ItemPositions,
    pub viewport: Viewport,
    pub auto_scroll_mode: AutoScrollMode,
}

/// Payload of [`Action::BulkReplace`].
#[derive(Debug, Clone, PartialEq)]
pub struct BulkReplace {
    pub dimensions: Arc<DimensionMap>,
    pub viewport: Viewport,
    pub should_replace_critical: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Prepare,
    Lift(LiftRequest),
    InitialPublish(InitialPublish),
    BulkCollectionStarting(Collection),
    BulkReplace(BulkReplace),
    UpdateDroppableScroll {
        id: DroppableId,
        offset: Position,
    },
    UpdateDroppableIsEnabled {
        id: DroppableId,
        is_enabled: bool,
    },
    Move {
        client: Position,
        should_animate: bool,
    },
    MoveByWindowScroll {
        scroll: Position,
    },
    MoveBackward,
    MoveForward,
    CrossAxisMoveForward,
    CrossAxisMoveBackward,
    Drop {
        reason: DropReason,
    },
    DropPending {
        reason: DropReason,
    },
    DropAnimate(PendingDrop),
    DropAnimationFinished,
    DropComplete(DropResult),
    Clean,
}

impl Action {
    /// Protocol name of the action.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Prepare => "PREPARE",
            Action::Lift(_) => "LIFT",
            Action::InitialPublish(_) => "INITIAL_PUBLISH",
            Action::BulkCollectionStarting(_) => "BULK_COLLECTION_STARTING",
            Action::BulkReplace(_) => "BULK_REPLACE",
            Action::UpdateDroppableScroll { .. } => "UPDATE_DROPPABLE_SCROLL",
            Action::UpdateDroppableIsEnabled { .. } => "UPDATE_DROPPABLE_IS_ENABLED",
            Action::Move { .. } => "MOVE",
            Action::MoveByWindowScroll { .. } => "MOVE_BY_WINDOW_SCROLL",
            Action::MoveBackward => "MOVE_BACKWARD",
            Action::MoveForward => "MOVE_FORWARD",
            Action::CrossAxisMoveForward => "CROSS_AXIS_MOVE_FORWARD",
            Action::CrossAxisMoveBackward => "CROSS_AXIS_MOVE_BACKWARD",
            Action::Drop { .. } => "DROP",
            Action::DropPending { .. } => "DROP_PENDING",
            Action::DropAnimate(_) => "DROP_ANIMATE",
            Action::DropAnimationFinished => "DROP_ANIMATION_FINISHED",
            Action::DropComplete(_) => "DROP_COMPLETE",
            Action::Clean => "CLEAN",
        }
    }

    /// Actions after which no further collection or scrolling is wanted.
    pub fn is_drag_ending(&self) -> bool {
        matches!(
            self,
            Action::DropAnimate(_) | Action::DropComplete(_) | Action::Clean
        )
    }

    /// Keyboard movements that may produce a scroll jump request.
    pub fn is_keyboard_move(&self) -> bool {
        matches!(
            self,
            Action::MoveForward
                | Action::MoveBackward
                | Action::CrossAxisMoveForward
                | Action::CrossAxisMoveBackward
        )
    }
}
