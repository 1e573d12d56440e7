//! The drag state machine.
//!
//! [`DragState`] is the single source of truth for a drag. It only changes
//! through [`transition`], a pure function of the previous state and an
//! [`Action`](crate::Action).
//!
//! ```text
//!  Idle ──PREPARE──▶ Preparing ──LIFT──▶ Preparing ──INITIAL_PUBLISH──▶ Dragging
//!                                                                       │  ▲
//!                                            BULK_COLLECTION_STARTING   │  │ BULK_REPLACE
//!                                                                       ▼  │
//!                                                                  BulkCollecting
//!                                                                       │ DROP_PENDING
//!                                                                       ▼
//!  Dragging / DropPending ──DROP_ANIMATE──▶ DropAnimating         DropPending
//!  any ──DROP_COMPLETE / CLEAN──▶ Idle
//! ```

mod positions;
mod transition;

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

pub use positions::{positions_for_client, positions_for_page_center};
pub use transition::transition;

use crate::action::LiftRequest;
use crate::types::{
    AutoScrollMode, Collection, Critical, CurrentDrag, DimensionMap, DragImpact, DropReason,
    InitialDrag, PendingDrop, Viewport,
};
use dragline_core::math::Position;

/// Discriminant of [`DragState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragPhase {
    Idle,
    Preparing,
    Dragging,
    BulkCollecting,
    DropPending,
    DropAnimating,
}

impl DragPhase {
    pub fn as_set(&self) -> PhaseSet {
        match self {
            DragPhase::Idle => PhaseSet::IDLE,
            DragPhase::Preparing => PhaseSet::PREPARING,
            DragPhase::Dragging => PhaseSet::DRAGGING,
            DragPhase::BulkCollecting => PhaseSet::BULK_COLLECTING,
            DragPhase::DropPending => PhaseSet::DROP_PENDING,
            DragPhase::DropAnimating => PhaseSet::DROP_ANIMATING,
        }
    }
}

impl fmt::Display for DragPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DragPhase::Idle => "IDLE",
            DragPhase::Preparing => "PREPARING",
            DragPhase::Dragging => "DRAGGING",
            DragPhase::BulkCollecting => "BULK_COLLECTING",
            DragPhase::DropPending => "DROP_PENDING",
            DragPhase::DropAnimating => "DROP_ANIMATING",
        };
        f.write_str(name)
    }
}

bitflags! {
    /// A set of phases, used to state which phases accept an action.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PhaseSet: u8 {
        const IDLE            = 1 << 0;
        const PREPARING       = 1 << 1;
        const DRAGGING        = 1 << 2;
        const BULK_COLLECTING = 1 << 3;
        const DROP_PENDING    = 1 << 4;
        const DROP_ANIMATING  = 1 << 5;
    }
}

impl PhaseSet {
    /// Phases that carry a live drag (positions, impact, dimensions).
    pub const WITH_DRAG: Self = Self::DRAGGING
        .union(Self::BULK_COLLECTING)
        .union(Self::DROP_PENDING);

    pub fn accepts(&self, phase: DragPhase) -> bool {
        self.contains(phase.as_set())
    }
}

/// Preparing: the host is getting ready to measure before the lift lands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreparingState {
    pub lift: Option<LiftRequest>,
}

/// A live drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DraggingState {
    pub critical: Critical,
    pub auto_scroll_mode: AutoScrollMode,
    pub dimensions: Arc<DimensionMap>,
    pub initial: InitialDrag,
    pub current: CurrentDrag,
    pub impact: DragImpact,
    pub viewport: Viewport,
    /// Keyboard scroll still to be absorbed.
    pub scroll_jump_request: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulkCollectingState {
    pub drag: DraggingState,
    pub collection: Collection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropPendingState {
    pub drag: DraggingState,
    /// A collection is still in flight.
    pub is_waiting: bool,
    pub reason: DropReason,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropAnimatingState {
    pub pending: PendingDrop,
    pub critical: Critical,
    pub dimensions: Arc<DimensionMap>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Preparing(PreparingState),
    Dragging(DraggingState),
    BulkCollecting(BulkCollectingState),
    DropPending(DropPendingState),
    DropAnimating(DropAnimatingState),
}

impl DragState {
    pub fn phase(&self) -> DragPhase {
        match self {
            DragState::Idle => DragPhase::Idle,
            DragState::Preparing(_) => DragPhase::Preparing,
            DragState::Dragging(_) => DragPhase::Dragging,
            DragState::BulkCollecting(_) => DragPhase::BulkCollecting,
            DragState::DropPending(_) => DragPhase::DropPending,
            DragState::DropAnimating(_) => DragPhase::DropAnimating,
        }
    }

    /// The live drag, in every phase that has one.
    pub fn drag(&self) -> Option<&DraggingState> {
        match self {
            DragState::Dragging(drag) => Some(drag),
            DragState::BulkCollecting(state) => Some(&state.drag),
            DragState::DropPending(state) => Some(&state.drag),
            _ => None,
        }
    }

    pub fn critical(&self) -> Option<&Critical> {
        match self {
            DragState::DropAnimating(state) => Some(&state.critical),
            other => other.drag().map(|drag| &drag.critical),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_set_accepts() {
        assert!(PhaseSet::WITH_DRAG.accepts(DragPhase::BulkCollecting));
        assert!(!PhaseSet::WITH_DRAG.accepts(DragPhase::DropAnimating));
        assert!(PhaseSet::IDLE.accepts(DragPhase::Idle));
    }

    #[test]
    fn test_idle_has_no_drag() {
        let state = DragState::default();
        assert!(state.is_idle());
        assert!(state.drag().is_none());
        assert_eq!(state.phase().to_string(), "IDLE");
    }
}
