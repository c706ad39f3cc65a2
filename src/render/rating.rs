use image::RgbImage;

use crate::{
    config::FontRole,
    foundation::core::{CONTENT_LEFT, GOLD, WHITE},
    text::painter::TextPainter,
};

pub const STAR: &str = "★";
pub const RATING_TOP_GAP: i32 = 30;
pub const STAR_TEXT_GAP: i32 = 10;
pub const CHIPS_TOP_GAP: i32 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RatingLayout {
    pub star_x: i32,
    pub score_x: i32,
    pub y: i32,
    /// Top of the first genre row.
    pub chips_y: i32,
}

/// Place the rating row below the text block that ended at `cursor_y`.
pub fn layout_rating(painter: &dyn TextPainter, cursor_y: i32) -> RatingLayout {
    let star = painter.measure(FontRole::Rating, STAR);
    let y = cursor_y + RATING_TOP_GAP;
    RatingLayout {
        star_x: CONTENT_LEFT,
        score_x: CONTENT_LEFT + star.width() + STAR_TEXT_GAP,
        y,
        chips_y: y + star.height() + CHIPS_TOP_GAP,
    }
}

/// Draw the gold star and the score; returns the y of the genre rows.
pub fn draw_rating(
    canvas: &mut RgbImage,
    painter: &dyn TextPainter,
    score_text: &str,
    cursor_y: i32,
) -> i32 {
    let layout = layout_rating(painter, cursor_y);
    painter.draw(canvas, FontRole::Rating, layout.star_x, layout.y, GOLD, STAR);
    painter.draw(
        canvas,
        FontRole::Rating,
        layout.score_x,
        layout.y,
        WHITE,
        score_text,
    );
    layout.chips_y
}
