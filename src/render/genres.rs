use image::RgbImage;
use imageproc::{
    drawing::{draw_filled_circle_mut, draw_filled_rect_mut},
    rect::Rect as PixelRect,
};

use crate::{
    config::FontRole,
    foundation::core::{CHIP_FILL, CONTENT_LEFT, Rect, Rgb8, WHITE},
    text::painter::{TextBounds, TextPainter},
};

pub const CHIP_PADDING: i32 = 10;
pub const CHIP_SPACING: i32 = 10;
pub const CHIP_RADIUS: i32 = 10;
/// Distance kept between the last chip and the right edge of the text panel.
pub const CHIP_RIGHT_MARGIN: i32 = 50;

/// One placed genre pill.
#[derive(Clone, Debug, PartialEq)]
pub struct Chip {
    pub label: String,
    /// Pill area in canvas pixels.
    pub rect: Rect,
    /// Layout origin for the label so that its ink box is centered in `rect`.
    pub text_x: i32,
    pub text_y: i32,
    pub row: usize,
}

pub fn chip_right_limit(panel_width: u32) -> i32 {
    panel_width as i32 - CHIP_RIGHT_MARGIN
}

/// Flow `genres` left to right from `(CONTENT_LEFT, start_y)`, wrapping before a pill would
/// cross `right_limit`.
///
/// On a wrap the cursor moves down by the height of the pill being wrapped plus the spacing. A
/// pill that is wider than the whole row is still placed, alone, on its own row.
pub fn layout_chips(
    painter: &dyn TextPainter,
    genres: &[String],
    start_y: i32,
    right_limit: i32,
) -> Vec<Chip> {
    let mut chips = Vec::with_capacity(genres.len());
    let mut x = CONTENT_LEFT;
    let mut y = start_y;
    let mut row = 0usize;

    for label in genres {
        let bounds = painter.measure(FontRole::Genre, label);
        let box_w = bounds.width() + 2 * CHIP_PADDING;
        let box_h = bounds.height() + 2 * CHIP_PADDING;

        if x > CONTENT_LEFT && x + box_w > right_limit {
            x = CONTENT_LEFT;
            y += box_h + CHIP_SPACING;
            row += 1;
        }

        let (text_x, text_y) = centered_origin(bounds, x, y, box_w, box_h);
        chips.push(Chip {
            label: label.clone(),
            rect: Rect::new(
                f64::from(x),
                f64::from(y),
                f64::from(x + box_w),
                f64::from(y + box_h),
            ),
            text_x,
            text_y,
            row,
        });

        x += box_w + CHIP_SPACING;
    }
    chips
}

fn centered_origin(bounds: TextBounds, x: i32, y: i32, box_w: i32, box_h: i32) -> (i32, i32) {
    (
        x + (box_w - bounds.width()) / 2 - bounds.left,
        y + (box_h - bounds.height()) / 2 - bounds.top,
    )
}

/// Lay out and paint the genre pills.
pub fn draw_chips(
    canvas: &mut RgbImage,
    painter: &dyn TextPainter,
    genres: &[String],
    start_y: i32,
    right_limit: i32,
) -> Vec<Chip> {
    let chips = layout_chips(painter, genres, start_y, right_limit);
    for chip in &chips {
        let r = chip.rect;
        fill_rounded_rect(
            canvas,
            r.x0 as i32,
            r.y0 as i32,
            r.width() as i32,
            r.height() as i32,
            CHIP_RADIUS,
            CHIP_FILL,
        );
        painter.draw(
            canvas,
            FontRole::Genre,
            chip.text_x,
            chip.text_y,
            WHITE,
            &chip.label,
        );
    }
    tracing::debug!(
        chips = chips.len(),
        rows = chips.last().map_or(0, |c| c.row + 1),
        "genre chips drawn"
    );
    chips
}

/// Fill a `w x h` rectangle at `(x, y)` whose corners are rounded to `radius`.
pub fn fill_rounded_rect(
    canvas: &mut RgbImage,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    radius: i32,
    color: Rgb8,
) {
    if w <= 0 || h <= 0 {
        return;
    }
    let r = radius.min(w / 2).min(h / 2).max(0);
    let px = color.to_pixel();

    if w - 2 * r > 0 {
        draw_filled_rect_mut(
            canvas,
            PixelRect::at(x + r, y).of_size((w - 2 * r) as u32, h as u32),
            px,
        );
    }
    if h - 2 * r > 0 {
        draw_filled_rect_mut(
            canvas,
            PixelRect::at(x, y + r).of_size(w as u32, (h - 2 * r) as u32),
            px,
        );
    }
    if r > 0 {
        let (left, right) = (x + r, x + w - 1 - r);
        let (top, bottom) = (y + r, y + h - 1 - r);
        for center in [(left, top), (right, top), (left, bottom), (right, bottom)] {
            draw_filled_circle_mut(canvas, center, r, px);
        }
    }
}
