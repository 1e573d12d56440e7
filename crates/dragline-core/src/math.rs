//! Vector math re-exported from [`glam`].
//!
//! Every point and offset in the engine is a [`Position`], which is simply a
//! `glam::Vec2` in logical pixels. Addition, subtraction and equality come
//! straight from glam.

pub use glam::Vec2;

/// A point or offset in logical pixels.
pub type Position = Vec2;

/// Negate a position, mapping `-0.0` to `0.0` so offsets compare cleanly.
#[inline]
pub fn negate(point: Position) -> Position {
    Vec2::new(clean(-point.x), clean(-point.y))
}

/// Replace negative zero with positive zero.
#[inline]
pub fn clean(value: f32) -> f32 {
    if value == 0.0 { 0.0 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negate_has_no_negative_zero() {
        let negated = negate(Vec2::new(0.0, 4.0));
        assert_eq!(negated, Vec2::new(0.0, -4.0));
        assert!(negated.x.is_sign_positive());
    }
}
