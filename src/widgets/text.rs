//! Static text label.
//!
//! The string is rasterized once into a transparent [`Bitmap`] and blitted
//! every frame. The cache is rebuilt by `rescale()` and by [`Text::set_text`]
//! with a different string, never per frame. A new string re-runs the font
//! fit, since a longer string may no longer fit the old font.
//!
//! # Font Selection
//!
//! The font ladder is ordered smallest to largest. Rescale walks it and keeps
//! the largest font whose glyph height fits the rectangle height and whose
//! rendered width fits the rectangle width. When nothing fits (tiny windows)
//! the smallest font is used and the bitmap overflows the rectangle.

use std::time::Duration;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text as TextDrawable;

use super::Widget;
use crate::assets::FontLadder;
use crate::bitmap::{Bitmap, Surface};
use crate::colors::BLACK;
use crate::geometry::Rect;
use crate::input::InputEvent;
use crate::styles::TOP_LEFT;

/// Horizontal placement of the rendered text inside the rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Text label with a cached rendered image.
#[derive(Clone)]
pub struct Text {
    rect: Rect,
    text: String,
    fonts: FontLadder,
    align: HorizontalAlign,
    color: Rgb888,
    /// Index into `fonts` chosen by the last rescale.
    font_index: usize,
    image: Bitmap,
}

impl Text {
    pub fn new(
        text: impl Into<String>,
        fonts: FontLadder,
    ) -> Self {
        Self {
            rect: Rect::ZERO,
            text: text.into(),
            fonts,
            align: HorizontalAlign::default(),
            color: BLACK,
            font_index: 0,
            image: Bitmap::new(Size::zero()),
        }
    }

    /// Builder-style alignment override.
    #[must_use]
    pub fn with_align(
        mut self,
        align: HorizontalAlign,
    ) -> Self {
        self.align = align;
        self
    }

    #[inline]
    pub fn text(&self) -> &str { &self.text }

    /// Replace the string and rescale. Nothing is rebuilt when the text is unchanged.
    pub fn set_text(
        &mut self,
        text: &str,
    ) {
        if self.text != text {
            self.text.clear();
            self.text.push_str(text);
            self.rescale();
        }
    }

    /// Font picked by the last rescale, if the ladder is not empty.
    pub fn font(&self) -> Option<&'static MonoFont<'static>> { self.fonts.get(self.font_index).copied() }

    /// The cached rendered text.
    #[inline]
    pub const fn image(&self) -> &Bitmap { &self.image }

    fn pick_font(&self) -> usize {
        let chars = self.text.chars().count() as u32;
        self.fonts
            .iter()
            .rposition(|font| {
                font.character_size.height <= self.rect.height as u32
                    && text_width(font, chars) <= self.rect.width as u32
            })
            .unwrap_or(0)
    }

    fn render_image(&mut self) {
        let Some(font) = self.font() else {
            self.image = Bitmap::new(Size::zero());
            return;
        };
        let chars = self.text.chars().count() as u32;
        let mut image = Bitmap::new(Size::new(text_width(font, chars), font.character_size.height));
        let style = MonoTextStyle::new(font, self.color);
        TextDrawable::with_text_style(&self.text, Point::zero(), style, TOP_LEFT)
            .draw(&mut image)
            .ok();
        self.image = image;
    }

    /// Top-left corner of the image for the current alignment.
    fn image_origin(&self) -> Point {
        let size = self.image.size();
        let x = match self.align {
            HorizontalAlign::Left => self.rect.left(),
            HorizontalAlign::Center => self.rect.center_x() - size.width as i32 / 2,
            HorizontalAlign::Right => self.rect.right() - size.width as i32,
        };
        Point::new(x, self.rect.center_y() - size.height as i32 / 2)
    }
}

/// Rendered width of `chars` glyphs, including the spacing between them.
fn text_width(
    font: &MonoFont<'_>,
    chars: u32,
) -> u32 {
    if chars == 0 {
        return 0;
    }
    chars * font.character_size.width + (chars - 1) * font.character_spacing
}

impl Widget for Text {
    fn rect(&self) -> Rect { self.rect }

    fn set_rect(
        &mut self,
        rect: Rect,
    ) {
        self.rect = rect;
    }

    fn update(
        &mut self,
        _events: &[InputEvent],
        _dt: Duration,
    ) {
    }

    fn render(
        &self,
        surface: &mut Surface,
    ) {
        if self.rect.is_empty() {
            return;
        }
        self.image.blit(surface, self.image_origin()).ok();
    }

    fn rescale(&mut self) {
        self.font_index = self.pick_font();
        self.render_image();
    }
}
