use image::RgbImage;

use crate::{config::FontRole, foundation::core::Rgb8};

/// Ink bounding box of a string drawn with its top-left origin at `(0, 0)`.
///
/// `left`/`top` can be non-zero: glyphs rarely touch the origin exactly, and centering code must
/// subtract them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBounds {
    pub fn width(self) -> i32 {
        (self.right - self.left).max(0)
    }

    pub fn height(self) -> i32 {
        (self.bottom - self.top).max(0)
    }
}

/// Font-metrics queries plus glyph drawing for one immutable set of faces.
///
/// Implementations must be deterministic: the same `(role, text)` always measures and draws the
/// same way.
pub trait TextPainter {
    fn measure(&self, role: FontRole, text: &str) -> TextBounds;

    /// Draw `text` with its layout origin (not its ink box) at `(x, y)`.
    fn draw(&self, canvas: &mut RgbImage, role: FontRole, x: i32, y: i32, color: Rgb8, text: &str);
}

impl<T: TextPainter + ?Sized> TextPainter for &T {
    fn measure(&self, role: FontRole, text: &str) -> TextBounds {
        (**self).measure(role, text)
    }

    fn draw(&self, canvas: &mut RgbImage, role: FontRole, x: i32, y: i32, color: Rgb8, text: &str) {
        (**self).draw(canvas, role, x, y, color, text)
    }
}
