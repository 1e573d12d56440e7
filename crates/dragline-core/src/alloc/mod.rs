//! Optimized collection types for Dragline.
//!
//! The dimension registry is keyed by string ids, which AHash hashes
//! considerably faster than SipHash.

pub use ahash::AHashMap as HashMap;
