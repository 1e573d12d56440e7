//! Auto scrolling while dragging.
//!
//! Two strategies, chosen by the drag's [`AutoScrollMode`](crate::AutoScrollMode):
//!
//! - [`fluid`]: pointer drags scroll continuously, faster the closer the item
//!   gets to an edge. At most one scroll is applied per frame.
//! - [`jump`]: keyboard drags that land out of view produce a one-off scroll
//!   request which is split between the droppable, the window and the item.
//!
//! Both are pure planners; the auto-scroll pipeline stage applies the plans.

pub mod fluid;
pub mod jump;

pub use fluid::{FluidScroll, required_container_scroll, required_scroll};
pub use jump::{JumpPlan, plan_jump};
