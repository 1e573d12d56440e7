//! Test utilities for Dragline.
//!
//! This crate provides the host side of a drag for tests, without a window
//! or an event loop.
//!
//! # Overview
//!
//! - [`FakeFrameClock`] - A [`FrameScheduler`](dragline_dnd::FrameScheduler)
//!   whose frames only fire when the test says so
//! - [`EventLog`] and the `Recording*` fakes - Hooks, announcer, scroll driver
//!   and style marshal that record every call in one ordered log
//! - [`fixtures`] - Measured lists ready to register
//!
//! # Example
//!
//! ```rust
//! use dragline_dnd::{Action, DragDropContext, DropReason};
//! use dragline_test_utils::{EventLog, FakeFrameClock, RecordingHooks, fixtures};
//!
//! let log = EventLog::new();
//! let clock = FakeFrameClock::new();
//! let mut context = DragDropContext::builder()
//!     .scheduler(Box::new(clock.clone()))
//!     .hooks(Box::new(RecordingHooks::new(&log)))
//!     .build();
//!
//! let list = fixtures::ListFixture::vertical("list", 3);
//! list.register(&mut context).unwrap();
//!
//! context.lift(list.lift_keyboard(0)).unwrap();
//! context.dispatch(Action::MoveForward).unwrap();
//! context.drop(DropReason::Drop).unwrap();
//!
//! assert_eq!(log.drag_starts(), 1);
//! assert_eq!(log.drag_ends(), 1);
//! ```
//!
//! All fakes are cheap clones sharing their state behind a
//! `parking_lot::Mutex`, so a test keeps one handle while the context owns
//! another.

mod clock;
pub mod fixtures;
mod recorder;

pub use clock::FakeFrameClock;
pub use recorder::{
    Event, EventLog, RecordingAnnouncer, RecordingHooks, RecordingScrollDriver,
    RecordingStyleMarshal,
};
