//! Dragline Core
//!
//! This crate contains the leaf utilities shared by the Dragline crates:
//! hash collections, vector math, box geometry, logging and profiling.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
