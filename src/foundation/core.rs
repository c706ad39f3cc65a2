pub use kurbo::Rect;

/// Output raster dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// The only canvas size the engine produces.
pub const POSTER_CANVAS: Canvas = Canvas {
    width: 1280,
    height: 720,
};

impl Canvas {
    /// Width of the blurred/text panel (60% of the canvas).
    pub fn text_panel_width(self) -> u32 {
        self.width * 60 / 100
    }

    /// Width of the cover panel (the remaining 40%).
    pub fn cover_panel_width(self) -> u32 {
        self.width - self.text_panel_width()
    }

    /// Left edge of the cover panel.
    pub fn cover_panel_x(self) -> u32 {
        self.text_panel_width()
    }
}

/// Left margin shared by the title, metadata, rating and chip rows.
pub const CONTENT_LEFT: i32 = 50;

/// Straight (non-premultiplied) RGB8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_pixel(self) -> image::Rgb<u8> {
        image::Rgb([self.r, self.g, self.b])
    }
}

pub const BASE_FILL: Rgb8 = Rgb8::new(15, 15, 25);
pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
pub const LIGHT_GRAY: Rgb8 = Rgb8::new(0xd3, 0xd3, 0xd3);
pub const GOLD: Rgb8 = Rgb8::new(255, 215, 0);
pub const CHIP_FILL: Rgb8 = Rgb8::new(100, 100, 100);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poster_panels_split_sixty_forty() {
        assert_eq!(POSTER_CANVAS.text_panel_width(), 768);
        assert_eq!(POSTER_CANVAS.cover_panel_width(), 512);
        assert_eq!(POSTER_CANVAS.cover_panel_x(), 768);
    }

    #[test]
    fn rgb8_to_pixel_keeps_channels() {
        assert_eq!(GOLD.to_pixel(), image::Rgb([255, 215, 0]));
    }
}
