//! Low-level drawing primitives shared by widgets and the plot renderer.
//!
//! All helpers are generic over the draw target so the same code draws onto
//! the window [`Surface`](crate::bitmap::Surface) and onto off-screen
//! [`Bitmap`](crate::bitmap::Bitmap)s. Draw errors are ignored the same way
//! everywhere: both targets are infallible.
//!
//! # Polylines
//!
//! [`draw_polyline`] connects consecutive points with line segments. Points
//! are expected in pixel space already; callers map data coordinates first.
//! Fewer than two points draws nothing.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};

use crate::geometry::Rect;

/// Fill a rectangle with a solid color. Empty rectangles draw nothing.
pub fn fill_rect<D>(
    target: &mut D,
    rect: Rect,
    color: Rgb888,
) where
    D: DrawTarget<Color = Rgb888>,
{
    if rect.is_empty() {
        return;
    }
    rect.to_rectangle().into_styled(PrimitiveStyle::with_fill(color)).draw(target).ok();
}

/// Draw a rectangle with a border and an optional fill inset by `padding`.
///
/// Used for the toggle box: the border is always drawn, the inner fill only
/// when the toggle is ticked.
///
/// # Parameters
/// - `rect`: Outer bounds of the box
/// - `border`: Stroke style of the outline (stroke width is drawn inside `rect`)
/// - `fill`: Inner fill color, `None` for an empty box
/// - `padding`: Gap between the outline and the fill, in pixels
pub fn draw_box<D>(
    target: &mut D,
    rect: Rect,
    border: PrimitiveStyle<Rgb888>,
    fill: Option<Rgb888>,
    padding: i32,
) where
    D: DrawTarget<Color = Rgb888>,
{
    if rect.is_empty() {
        return;
    }
    if let Some(color) = fill {
        fill_rect(target, rect.inset(padding, padding), color);
    }
    rect.to_rectangle().into_styled(border).draw(target).ok();
}

/// Connect consecutive points with straight segments.
pub fn draw_polyline<D, I>(
    target: &mut D,
    points: I,
    style: PrimitiveStyle<Rgb888>,
) where
    D: DrawTarget<Color = Rgb888>,
    I: IntoIterator<Item = Point>,
{
    let mut prev: Option<Point> = None;
    for point in points {
        if let Some(start) = prev {
            Line::new(start, point).into_styled(style).draw(target).ok();
        }
        prev = Some(point);
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::{PrimitiveStyleBuilder, StrokeAlignment};

    use super::*;
    use crate::bitmap::Bitmap;
    use crate::colors::{ACCENT, BLACK};

    #[test]
    fn test_fill_rect_skips_empty() {
        let mut bitmap = Bitmap::new(Size::new(8, 8));
        fill_rect(&mut bitmap, Rect::new(2, 2, 0, 5), BLACK);
        assert_eq!(bitmap.opaque_pixels(), 0);
        fill_rect(&mut bitmap, Rect::new(2, 2, 3, 2), BLACK);
        assert_eq!(bitmap.opaque_pixels(), 6);
    }

    #[test]
    fn test_draw_box_fill_is_inset() {
        let mut bitmap = Bitmap::new(Size::new(10, 10));
        let border = PrimitiveStyleBuilder::new()
            .stroke_color(BLACK)
            .stroke_width(1)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        draw_box(&mut bitmap, Rect::new(0, 0, 10, 10), border, Some(ACCENT), 2);
        assert_eq!(bitmap.pixel(Point::new(0, 0)), Some(BLACK));
        assert_eq!(bitmap.pixel(Point::new(1, 1)), None, "Padding stays transparent");
        assert_eq!(bitmap.pixel(Point::new(5, 5)), Some(ACCENT));
    }

    #[test]
    fn test_polyline_needs_two_points() {
        let mut bitmap = Bitmap::new(Size::new(10, 10));
        draw_polyline(&mut bitmap, [Point::new(1, 1)], PrimitiveStyle::with_stroke(BLACK, 1));
        assert_eq!(bitmap.opaque_pixels(), 0);

        draw_polyline(
            &mut bitmap,
            [Point::new(0, 0), Point::new(4, 0), Point::new(4, 4)],
            PrimitiveStyle::with_stroke(BLACK, 1),
        );
        assert_eq!(bitmap.pixel(Point::new(2, 0)), Some(BLACK));
        assert_eq!(bitmap.pixel(Point::new(4, 2)), Some(BLACK));
        assert_eq!(bitmap.opaque_pixels(), 9, "Shared corner is drawn once");
    }
}
