//! Box geometry consumed by the drag engine.
//!
//! Measurement happens elsewhere; these types only carry already-measured
//! boxes and answer questions about their edges along an [`Axis`].

use crate::math::{Position, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rect from its four edges.
    pub fn from_edges(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Rect {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn center(&self) -> Position {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive point containment.
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    pub fn shift(&self, offset: Position) -> Rect {
        Rect {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }

    /// The overlapping area of two rects, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let top = self.top().max(other.top());
        let bottom = self.bottom().min(other.bottom());
        let left = self.left().max(other.left());
        let right = self.right().min(other.right());

        if top > bottom || left > right {
            return None;
        }
        Some(Rect::from_edges(top, right, bottom, left))
    }

    /// Start edge along `axis` (top for vertical, left for horizontal).
    pub fn start(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.top(),
            Axis::Horizontal => self.left(),
        }
    }

    pub fn end(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.bottom(),
            Axis::Horizontal => self.right(),
        }
    }

    pub fn size(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }

    pub fn cross_start(&self, axis: Axis) -> f32 {
        self.start(axis.cross())
    }

    /// Edge selected by `edge` along `axis`.
    pub fn edge(&self, axis: Axis, edge: Edge) -> f32 {
        match edge {
            Edge::Start => self.start(axis),
            Edge::End => self.end(axis),
        }
    }
}

/// Margins around a border box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacing {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Spacing {
    pub const ZERO: Spacing = Spacing::uniform(0.0);

    pub const fn uniform(value: f32) -> Self {
        Spacing {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// A measured element: border box plus its margins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxModel {
    pub border_box: Rect,
    pub margin: Spacing,
}

impl BoxModel {
    pub fn new(border_box: Rect, margin: Spacing) -> Self {
        Self { border_box, margin }
    }

    pub fn margin_box(&self) -> Rect {
        Rect::from_edges(
            self.border_box.top() - self.margin.top,
            self.border_box.right() + self.margin.right,
            self.border_box.bottom() + self.margin.bottom,
            self.border_box.left() - self.margin.left,
        )
    }

    pub fn center(&self) -> Position {
        self.border_box.center()
    }

    /// Translate the whole box, e.g. from client to page coordinates.
    pub fn shift(&self, offset: Position) -> BoxModel {
        BoxModel {
            border_box: self.border_box.shift(offset),
            margin: self.margin,
        }
    }
}

/// Which edge of a box along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

/// Main axis of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

impl Axis {
    pub fn cross(&self) -> Axis {
        match self {
            Axis::Vertical => Axis::Horizontal,
            Axis::Horizontal => Axis::Vertical,
        }
    }

    /// Component of `point` on this axis.
    pub fn line(&self, point: Position) -> f32 {
        match self {
            Axis::Vertical => point.y,
            Axis::Horizontal => point.x,
        }
    }

    /// Build a point from a main-axis and a cross-axis value.
    pub fn patch(&self, main: f32, cross: f32) -> Position {
        match self {
            Axis::Vertical => Vec2::new(cross, main),
            Axis::Horizontal => Vec2::new(main, cross),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges_along_axis() {
        let rect = Rect::new(10.0, 20.0, 100.0, 40.0);
        assert_eq!(rect.start(Axis::Vertical), 20.0);
        assert_eq!(rect.end(Axis::Vertical), 60.0);
        assert_eq!(rect.start(Axis::Horizontal), 10.0);
        assert_eq!(rect.end(Axis::Horizontal), 110.0);
        assert_eq!(rect.cross_start(Axis::Vertical), 10.0);
        assert_eq!(rect.center(), Vec2::new(60.0, 40.0));
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
        assert_eq!(a.intersection(&Rect::new(200.0, 0.0, 10.0, 10.0)), None);
    }

    #[test]
    fn test_margin_box() {
        let model = BoxModel::new(Rect::new(10.0, 10.0, 80.0, 40.0), Spacing::uniform(5.0));
        assert_eq!(model.margin_box(), Rect::new(5.0, 5.0, 90.0, 50.0));
        assert_eq!(model.shift(Vec2::new(0.0, 100.0)).border_box.top(), 110.0);
    }

    #[test]
    fn test_axis_patch() {
        assert_eq!(Axis::Vertical.patch(3.0, 7.0), Vec2::new(7.0, 3.0));
        assert_eq!(Axis::Horizontal.patch(3.0, 7.0), Vec2::new(3.0, 7.0));
        assert_eq!(Axis::Horizontal.line(Vec2::new(1.0, 2.0)), 1.0);
    }
}
