//! Precondition violations raised by the engine.
//!
//! Conditions that can legitimately arise from racing input (a late
//! announcement, a duplicate drop) are logged and ignored instead; they never
//! surface here.

use crate::state::DragPhase;
use crate::types::{DraggableId, DroppableId};

/// Error types for drag operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DndError {
    /// An action arrived in a phase that cannot accept it.
    InvalidPhase {
        action: &'static str,
        phase: DragPhase,
    },
    /// `start` called on a collector that is already active.
    CollectorAlreadyStarted,
    /// `collect` called on a collector that was never started or was stopped.
    CollectorInactive,
    /// A drag start was published twice without an end in between.
    HooksAlreadyStarted,
    /// An update, end or abort was published without a drag start.
    HooksNotStarted,
    /// Draggable not found in the dimension snapshot or registry.
    MissingDraggable(DraggableId),
    /// Droppable not found in the dimension snapshot or registry.
    MissingDroppable(DroppableId),
    /// The operation needs an active drag.
    NotDragging,
}

impl std::fmt::Display for DndError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DndError::InvalidPhase { action, phase } => {
                write!(f, "Cannot handle {} in phase {}", action, phase)
            }
            DndError::CollectorAlreadyStarted => write!(f, "Collector has already been started"),
            DndError::CollectorInactive => write!(f, "Can only collect when active"),
            DndError::HooksAlreadyStarted => write!(
                f,
                "Cannot fire onDragStart as a drag start has already been published"
            ),
            DndError::HooksNotStarted => {
                write!(f, "Cannot publish a drag update or end without a matching drag start")
            }
            DndError::MissingDraggable(id) => write!(f, "Draggable {} not found", id),
            DndError::MissingDroppable(id) => write!(f, "Droppable {} not found", id),
            DndError::NotDragging => write!(f, "No drag is in progress"),
        }
    }
}

impl std::error::Error for DndError {}

/// Result type for drag operations.
pub type DndResult<T> = Result<T, DndError>;
