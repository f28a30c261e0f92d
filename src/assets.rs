//! Keyed image and font store.
//!
//! Screens ask for assets by symbolic key (`get("icon1")`) instead of
//! holding file paths. Images are owned [`Bitmap`]s; fonts are `'static`
//! mono font ladders so text widgets can pick a size at rescale time.
//!
//! The built-in icon is drawn procedurally: a small bell curve over a
//! baseline, which is all the branding this program needs.

use std::collections::HashMap;

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use tracing::debug;

use crate::bitmap::Bitmap;
use crate::colors::{ACCENT, BLACK, WHITE};
use crate::error::AssetError;
use crate::sampling::normal_pdf;
use crate::styles::FONT_LADDER;

/// Key of the application icon.
pub const ICON_KEY: &str = "icon1";

/// Key of the label font ladder.
pub const LABEL_FONTS_KEY: &str = "label";

/// Side of the generated icon in pixels.
const ICON_SIZE: u32 = 32;

/// Font ladder: fonts ordered from smallest to largest.
pub type FontLadder = &'static [&'static MonoFont<'static>];

/// Images and fonts by key.
#[derive(Default)]
pub struct AssetStore {
    images: HashMap<String, Bitmap>,
    fonts: HashMap<String, FontLadder>,
}

impl AssetStore {
    pub fn new() -> Self { Self::default() }

    /// Store with the built-in icon and label fonts registered.
    pub fn with_builtins() -> Self {
        let mut store = Self::new();
        store.insert_image(ICON_KEY, bell_curve_icon(ICON_SIZE));
        store.insert_fonts(LABEL_FONTS_KEY, FONT_LADDER);
        debug!(images = store.images.len(), fonts = store.fonts.len(), "built-in assets registered");
        store
    }

    pub fn insert_image(
        &mut self,
        key: &str,
        image: Bitmap,
    ) {
        self.images.insert(key.to_owned(), image);
    }

    pub fn insert_fonts(
        &mut self,
        key: &str,
        fonts: FontLadder,
    ) {
        self.fonts.insert(key.to_owned(), fonts);
    }

    /// Look up an image by key.
    pub fn get(
        &self,
        key: &str,
    ) -> Result<&Bitmap, AssetError> {
        self.images.get(key).ok_or_else(|| AssetError::UnknownImage(key.to_owned()))
    }

    /// Look up a font ladder by key.
    pub fn fonts(
        &self,
        key: &str,
    ) -> Result<FontLadder, AssetError> {
        self.fonts
            .get(key)
            .copied()
            .ok_or_else(|| AssetError::UnknownFont(key.to_owned()))
    }
}

/// Draw the application icon: a bell curve on a white tile with a black frame.
pub fn bell_curve_icon(size: u32) -> Bitmap {
    let mut icon = Bitmap::filled(Size::new(size, size), WHITE);
    if size < 4 {
        return icon;
    }
    let side = size as i32;
    let baseline = side - 4;
    let height = f64::from(side - 8);
    let peak = normal_pdf(0.0, 0.0, 1.0);

    let curve_style = PrimitiveStyle::with_stroke(ACCENT, 2);
    let mut prev: Option<Point> = None;
    for x in 2..side - 2 {
        let z = (f64::from(x) - f64::from(side) / 2.0) / (f64::from(side) / 6.0);
        let y = baseline - (normal_pdf(z, 0.0, 1.0) / peak * height) as i32;
        let point = Point::new(x, y);
        if let Some(p) = prev {
            Line::new(p, point).into_styled(curve_style).draw(&mut icon).ok();
        }
        prev = Some(point);
    }

    Line::new(Point::new(2, baseline), Point::new(side - 3, baseline))
        .into_styled(PrimitiveStyle::with_stroke(BLACK, 1))
        .draw(&mut icon)
        .ok();
    Rectangle::new(Point::zero(), Size::new(size, size))
        .into_styled(PrimitiveStyle::with_stroke(BLACK, 1))
        .draw(&mut icon)
        .ok();
    icon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_registered() {
        let store = AssetStore::with_builtins();
        let icon = store.get(ICON_KEY).expect("icon registered");
        assert_eq!(icon.size(), Size::new(ICON_SIZE, ICON_SIZE));
        assert!(!store.fonts(LABEL_FONTS_KEY).expect("fonts registered").is_empty());
    }

    #[test]
    fn test_unknown_keys_are_errors() {
        let store = AssetStore::new();
        assert_eq!(store.get("nope"), Err(AssetError::UnknownImage("nope".into())));
        assert!(matches!(store.fonts("nope"), Err(AssetError::UnknownFont(_))));
    }

    #[test]
    fn test_icon_has_curve_pixels() {
        let icon = bell_curve_icon(32);
        // Peak of the curve sits near the top-middle of the tile
        let column: Vec<Option<_>> = (0..16).map(|y| icon.pixel(Point::new(16, y))).collect();
        assert!(column.contains(&Some(ACCENT)), "Curve peak should be drawn in the upper half");
    }
}
