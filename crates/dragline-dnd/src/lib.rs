//! Dragline DnD - headless drag and drop for vertical and horizontal lists
//!
//! This crate provides the interaction engine behind reorderable lists:
//! - A pure drag state machine driven by [`Action`]s
//! - An ordered middleware pipeline for the side effects around each action
//! - Dimension collection for items registered mid drag
//! - Fluid (pointer) and jump (keyboard) auto scrolling
//! - Drop resolution and lifecycle hooks with screen reader announcements
//!
//! The engine never touches a display. Hosts measure their items, feed
//! pointer and keyboard input in as actions, drive frames through a
//! [`FrameScheduler`] and apply the scrolls and styles the engine requests.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dragline_dnd::{Action, DragDropContext, DropReason};
//!
//! let mut context = DragDropContext::builder().build();
//! context.register_droppable(list)?;
//! for item in items {
//!     context.register_draggable(item)?;
//! }
//!
//! context.lift(lift_request)?;
//! context.dispatch(Action::MoveForward)?;
//! context.drop(DropReason::Drop)?;
//! ```

pub mod action;
pub mod auto_scroll;
pub mod config;
pub mod drop;
pub mod error;
pub mod hooks;
pub mod host;
pub mod impact;
pub mod marshal;
pub mod middleware;
pub mod schedule;
pub mod scroll;
pub mod state;
pub mod types;

mod context;
#[cfg(test)]
mod fixtures;

pub use action::{Action, BulkReplace, InitialPublish, LiftRequest};
pub use config::{AutoScrollConfig, DndConfig};
pub use context::{DragDropContext, DragDropContextBuilder};
pub use error::{DndError, DndResult};
pub use hooks::{Announce, Announcer, DragHooks, NoopHooks, TracingAnnouncer};
pub use host::{NoopScrollDriver, NoopStyleMarshal, ScrollDriver, StyleMarshal};
pub use marshal::{DimensionMarshal, DimensionRegistry};
pub use middleware::{DragMiddleware, Flow, MiddlewareContext, MiddlewareManager};
pub use schedule::{CountingScheduler, FrameId, FrameScheduler};
pub use state::{DragPhase, DragState, DraggingState, transition};

// Re-export the data model
pub use types::{
    AutoScrollMode, Collection, Critical, DimensionMap, Displacement, DragImpact, DragMovement,
    DragStart, DragUpdate, DraggableDescriptor, DraggableDimension, DraggableId,
    DraggableLocation, DropReason, DropResult, DroppableDescriptor, DroppableDimension,
    DroppableId, ItemPositions, PendingDrop, ScrollDetails, ScrollFrame, TypeId, Viewport,
};
