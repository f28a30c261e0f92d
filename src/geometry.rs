//! Mutable pixel rectangle used to position widgets.
//!
//! Widgets never remember absolute coordinates across a resize: the owning
//! screen writes a fresh [`Rect`] into every widget during its own rescale,
//! using the derived setters below (`set_center`, `set_bottom`, ...).
//!
//! # Coordinate Convention
//!
//! `right` and `bottom` are exclusive edges (`right = x + width`), so two
//! rectangles placed edge to edge share a coordinate without overlapping.
//! Sizes are signed and clamped to zero on write, which lets layout code
//! subtract freely during transient resizes without underflow.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

/// Axis-aligned rectangle with pygame-style derived accessors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Empty rectangle at the origin. New widgets start here until the first rescale.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle, clamping negative sizes to zero.
    pub const fn new(
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Self {
        Self {
            x,
            y,
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Rectangle covering a whole surface of the given size.
    pub const fn from_size(size: Size) -> Self { Self::new(0, 0, size.width as i32, size.height as i32) }

    #[inline]
    pub const fn left(&self) -> i32 { self.x }

    #[inline]
    pub const fn right(&self) -> i32 { self.x + self.width }

    #[inline]
    pub const fn top(&self) -> i32 { self.y }

    #[inline]
    pub const fn bottom(&self) -> i32 { self.y + self.height }

    #[inline]
    pub const fn center_x(&self) -> i32 { self.x + self.width / 2 }

    #[inline]
    pub const fn center_y(&self) -> i32 { self.y + self.height / 2 }

    #[inline]
    pub const fn center(&self) -> Point { Point::new(self.center_x(), self.center_y()) }

    #[inline]
    pub const fn size(&self) -> Size { Size::new(self.width as u32, self.height as u32) }

    /// Whether the rectangle has no drawable area.
    #[inline]
    pub const fn is_empty(&self) -> bool { self.width == 0 || self.height == 0 }

    pub const fn set_center_x(
        &mut self,
        center_x: i32,
    ) {
        self.x = center_x - self.width / 2;
    }

    pub const fn set_center_y(
        &mut self,
        center_y: i32,
    ) {
        self.y = center_y - self.height / 2;
    }

    pub const fn set_center(
        &mut self,
        center: Point,
    ) {
        self.set_center_x(center.x);
        self.set_center_y(center.y);
    }

    pub const fn set_left(
        &mut self,
        left: i32,
    ) {
        self.x = left;
    }

    pub const fn set_bottom(
        &mut self,
        bottom: i32,
    ) {
        self.y = bottom - self.height;
    }

    /// Point-in-rectangle test (right/bottom edges excluded).
    #[inline]
    pub const fn contains(
        &self,
        point: Point,
    ) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Shrink by `dx` on the left and right and `dy` on the top and bottom.
    pub const fn inset(
        &self,
        dx: i32,
        dy: i32,
    ) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width - 2 * dx, self.height - 2 * dy)
    }

    /// Convert to an embedded-graphics rectangle for drawing.
    #[inline]
    pub const fn to_rectangle(&self) -> Rectangle {
        Rectangle::new(Point::new(self.x, self.y), self.size())
    }
}

impl From<Rectangle> for Rect {
    fn from(rect: Rectangle) -> Self {
        Self::new(
            rect.top_left.x,
            rect.top_left.y,
            rect.size.width as i32,
            rect.size.height as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_negative_size() {
        let rect = Rect::new(5, 5, -10, -1);
        assert_eq!(rect.width, 0);
        assert_eq!(rect.height, 0);
        assert!(rect.is_empty(), "Negative sizes should produce an empty rect");
    }

    #[test]
    fn test_derived_edges() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!(rect.left(), 10);
        assert_eq!(rect.right(), 40);
        assert_eq!(rect.top(), 20);
        assert_eq!(rect.bottom(), 60);
        assert_eq!(rect.center(), Point::new(25, 40));
    }

    #[test]
    fn test_set_center_keeps_size() {
        let mut rect = Rect::new(0, 0, 20, 10);
        rect.set_center(Point::new(100, 50));
        assert_eq!(rect, Rect::new(90, 45, 20, 10));
        assert_eq!(rect.center(), Point::new(100, 50));
    }

    #[test]
    fn test_set_bottom_and_left() {
        let mut rect = Rect::new(7, 7, 50, 20);
        rect.set_left(0);
        rect.set_bottom(600);
        assert_eq!(rect, Rect::new(0, 580, 50, 20));
    }

    #[test]
    fn test_contains_excludes_far_edges() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(rect.contains(Point::new(0, 0)));
        assert!(rect.contains(Point::new(9, 9)));
        assert!(!rect.contains(Point::new(10, 5)), "Right edge is exclusive");
        assert!(!rect.contains(Point::new(5, 10)), "Bottom edge is exclusive");
        assert!(!rect.contains(Point::new(-1, 5)));
    }

    #[test]
    fn test_inset_never_underflows() {
        let rect = Rect::new(0, 0, 4, 4).inset(5, 5);
        assert!(rect.is_empty(), "Over-inset rect should collapse to empty");
    }
}
