use image::RgbImage;

use crate::{
    config::FontRole,
    foundation::core::{CONTENT_LEFT, LIGHT_GRAY, WHITE},
    model::MediaRecord,
    text::{painter::TextPainter, wrap::wrap_words},
};

pub const TITLE_TOP: i32 = 60;
pub const TITLE_MAX_LINES: usize = 3;
pub const TITLE_LINE_GAP: i32 = 10;
/// Horizontal room reserved around the title inside the text panel.
pub const TITLE_SIDE_RESERVE: i32 = 100;
pub const METADATA_TOP_GAP: i32 = 30;
pub const METADATA_LINE_GAP: i32 = 30;

/// Lines placed by [`layout_text_block`], each with its top-left draw origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextBlockLayout {
    pub title: Vec<PlacedLine>,
    pub metadata: Vec<PlacedLine>,
    /// Vertical cursor below the last metadata line.
    pub next_y: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

pub fn title_max_width(panel_width: u32) -> i32 {
    panel_width as i32 - TITLE_SIDE_RESERVE
}

/// Wrap the title and stack the three metadata lines beneath it.
pub fn layout_text_block(
    painter: &dyn TextPainter,
    record: &MediaRecord,
    panel_width: u32,
) -> TextBlockLayout {
    let lines = wrap_words(
        painter,
        FontRole::Title,
        &record.display_title,
        title_max_width(panel_width),
        TITLE_MAX_LINES,
    );

    let mut y = TITLE_TOP;
    let mut title = Vec::with_capacity(lines.len());
    for text in lines {
        let h = painter.measure(FontRole::Title, &text).height();
        title.push(PlacedLine {
            text,
            x: CONTENT_LEFT,
            y,
        });
        y += h + TITLE_LINE_GAP;
    }

    y += METADATA_TOP_GAP;
    let mut metadata = Vec::with_capacity(3);
    for text in record.metadata_lines() {
        let h = painter.measure(FontRole::Detail, &text).height();
        metadata.push(PlacedLine {
            text,
            x: CONTENT_LEFT,
            y,
        });
        y += h + METADATA_LINE_GAP;
    }

    TextBlockLayout {
        title,
        metadata,
        next_y: y,
    }
}

/// Draw title and metadata; returns the vertical cursor below the block.
pub fn draw_text_block(
    canvas: &mut RgbImage,
    painter: &dyn TextPainter,
    record: &MediaRecord,
    panel_width: u32,
) -> i32 {
    let layout = layout_text_block(painter, record, panel_width);
    for line in &layout.title {
        painter.draw(canvas, FontRole::Title, line.x, line.y, WHITE, &line.text);
    }
    for line in &layout.metadata {
        painter.draw(canvas, FontRole::Detail, line.x, line.y, LIGHT_GRAY, &line.text);
    }
    tracing::debug!(
        title_lines = layout.title.len(),
        next_y = layout.next_y,
        "text block drawn"
    );
    layout.next_y
}
