//! Off-screen images and the display surface they are blitted onto.
//!
//! Anything that is expensive to draw (label text, the plotted figure) is
//! rendered once into a [`Bitmap`] and then copied to the [`Surface`] every
//! frame. A bitmap is itself an embedded-graphics `DrawTarget`, so the same
//! primitives and text styles draw into either.
//!
//! # Transparency
//!
//! Pixels start out unset (`None`). [`Bitmap::blit`] only copies pixels that
//! were drawn, which lets text bitmaps sit on top of whatever is underneath
//! without carrying a background color.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::SimulatorDisplay;

use crate::geometry::Rect;

/// The single drawable target the application presents every frame.
pub type Surface = SimulatorDisplay<Rgb888>;

/// Owned RGB image with optional per-pixel transparency.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    size: Size,
    pixels: Vec<Option<Rgb888>>,
}

impl Bitmap {
    /// Create a fully transparent bitmap.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![None; (size.width * size.height) as usize],
        }
    }

    /// Create a bitmap with every pixel set to `color`.
    pub fn filled(
        size: Size,
        color: Rgb888,
    ) -> Self {
        Self {
            size,
            pixels: vec![Some(color); (size.width * size.height) as usize],
        }
    }

    /// Read a pixel; `None` when transparent or out of bounds.
    pub fn pixel(
        &self,
        point: Point,
    ) -> Option<Rgb888> {
        self.index(point).and_then(|idx| self.pixels[idx])
    }

    /// Number of pixels that have been drawn.
    #[cfg(test)]
    pub fn opaque_pixels(&self) -> usize { self.pixels.iter().filter(|p| p.is_some()).count() }

    fn index(
        &self,
        point: Point,
    ) -> Option<usize> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some((y * self.size.width + x) as usize)
    }

    /// Copy the drawn pixels onto `target` with the bitmap's top-left at `top_left`.
    pub fn blit<D>(
        &self,
        target: &mut D,
        top_left: Point,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let width = self.size.width.max(1) as usize;
        let pixels = self.pixels.iter().enumerate().filter_map(|(idx, color)| {
            color.map(|c| {
                let offset = Point::new((idx % width) as i32, (idx / width) as i32);
                Pixel(top_left + offset, c)
            })
        });
        target.draw_iter(pixels)
    }

    /// Nearest-neighbour resample to `size`.
    pub fn scaled(
        &self,
        size: Size,
    ) -> Self {
        let mut out = Self::new(size);
        if self.size.width == 0 || self.size.height == 0 {
            return out;
        }
        for y in 0..size.height {
            let src_y = (u64::from(y) * u64::from(self.size.height) / u64::from(size.height)) as u32;
            for x in 0..size.width {
                let src_x = (u64::from(x) * u64::from(self.size.width) / u64::from(size.width)) as u32;
                let src = (src_y * self.size.width + src_x) as usize;
                out.pixels[(y * size.width + x) as usize] = self.pixels[src];
            }
        }
        out
    }

    /// Scale to cover `area` while keeping the aspect ratio, centered on it.
    ///
    /// The returned rectangle is where the scaled image goes; it may extend
    /// past `area` on one axis, which crops the overflow when blitted.
    pub fn scale_to_fill(
        &self,
        area: Size,
    ) -> (Self, Rect) {
        if self.size.width == 0 || self.size.height == 0 {
            return (Self::new(Size::zero()), Rect::ZERO);
        }
        let match_width = area.width as f32 / self.size.width as f32;
        let match_height = area.height as f32 / self.size.height as f32;
        let factor = match_width.max(match_height);

        let scaled_size = Size::new(
            (self.size.width as f32 * factor).round() as u32,
            (self.size.height as f32 * factor).round() as u32,
        );
        let mut rect = Rect::new(0, 0, scaled_size.width as i32, scaled_size.height as i32);
        rect.set_center(Rect::from_size(area).center());
        (self.scaled(scaled_size), rect)
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size { self.size }
}

impl DrawTarget for Bitmap {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(idx) = self.index(point) {
                self.pixels[idx] = Some(color);
            }
        }
        Ok(())
    }
}
