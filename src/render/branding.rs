use image::{GrayImage, Luma, RgbImage, imageops::FilterType};
use imageproc::drawing::draw_filled_circle_mut;

use crate::{
    assets::decode::ensure_non_empty,
    config::FontRole,
    foundation::{
        core::{Canvas, WHITE},
        error::PosterResult,
    },
    render::composite::paste_masked,
    text::painter::TextPainter,
};

/// Height of the bottom band holding the caption and branding row.
pub const BOTTOM_SECTION_HEIGHT: i32 = 150;
pub const CAPTION_OFFSET: i32 = 20;
pub const CAPTION_ROW_GAP: i32 = 20;
pub const THUMBNAIL_SIZE: u32 = 80;
pub const THUMBNAIL_GAP: i32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrandingLayout {
    pub caption_x: i32,
    pub caption_y: i32,
    /// Top-left of the circular thumbnail, when one is shown.
    pub thumbnail: Option<(i32, i32)>,
    pub name_x: i32,
    pub name_y: i32,
}

/// Center the caption and the branding row inside the text panel.
///
/// Every placement is made on ink boxes: the caption's ink top sits on the band line, the
/// name-only row's ink top sits on the row line, and next to a thumbnail the name's ink box is
/// centered on the thumbnail. The returned coordinates are layout origins for the painter.
pub fn layout_branding(
    painter: &dyn TextPainter,
    geometry: Canvas,
    caption: &str,
    branding: &str,
    with_thumbnail: bool,
) -> BrandingLayout {
    let panel_w = geometry.text_panel_width() as i32;

    let cap = painter.measure(FontRole::Subtitle, caption);
    let band_y = geometry.height as i32 - BOTTOM_SECTION_HEIGHT + CAPTION_OFFSET;
    let caption_x = (panel_w - cap.width()) / 2 - cap.left;
    let caption_y = band_y - cap.top;
    let row_y = band_y + cap.height() + CAPTION_ROW_GAP;

    let name = painter.measure(FontRole::Channel, branding);
    if !with_thumbnail {
        return BrandingLayout {
            caption_x,
            caption_y,
            thumbnail: None,
            name_x: (panel_w - name.width()) / 2 - name.left,
            name_y: row_y - name.top,
        };
    }

    let thumb = THUMBNAIL_SIZE as i32;
    let group_w = thumb + THUMBNAIL_GAP + name.width();
    let group_x = (panel_w - group_w) / 2;
    BrandingLayout {
        caption_x,
        caption_y,
        thumbnail: Some((group_x, row_y)),
        name_x: group_x + thumb + THUMBNAIL_GAP - name.left,
        name_y: row_y + (thumb - name.height()) / 2 - name.top,
    }
}

/// Resize to the thumbnail square and build its circular coverage mask.
pub fn circular_thumbnail(src: &RgbImage) -> PosterResult<(RgbImage, GrayImage)> {
    ensure_non_empty(src)?;
    let square = image::imageops::resize(src, THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::CatmullRom);
    let mut mask = GrayImage::new(THUMBNAIL_SIZE, THUMBNAIL_SIZE);
    let r = THUMBNAIL_SIZE as i32 / 2;
    draw_filled_circle_mut(&mut mask, (r, r), r, Luma([255u8]));
    Ok((square, mask))
}

/// Draw the caption and the branding row.
///
/// A thumbnail that cannot be prepared never fails the poster: the row falls back to the
/// centered name alone. Returns the layout that was actually drawn.
pub fn draw_branding(
    canvas: &mut RgbImage,
    painter: &dyn TextPainter,
    geometry: Canvas,
    caption: &str,
    branding: &str,
    thumbnail: Option<&RgbImage>,
) -> BrandingLayout {
    let prepared = thumbnail.and_then(|t| match circular_thumbnail(t) {
        Ok(p) => Some(p),
        Err(err) => {
            tracing::warn!(error = %err, "thumbnail unusable, drawing branding name only");
            None
        }
    });

    let mut layout = layout_branding(painter, geometry, caption, branding, prepared.is_some());
    if let (Some((square, mask)), Some((tx, ty))) = (&prepared, layout.thumbnail) {
        if let Err(err) = paste_masked(canvas, square, mask, i64::from(tx), i64::from(ty)) {
            tracing::warn!(error = %err, "thumbnail paste failed, drawing branding name only");
            layout = layout_branding(painter, geometry, caption, branding, false);
        }
    }

    painter.draw(
        canvas,
        FontRole::Subtitle,
        layout.caption_x,
        layout.caption_y,
        WHITE,
        caption,
    );
    painter.draw(
        canvas,
        FontRole::Channel,
        layout.name_x,
        layout.name_y,
        WHITE,
        branding,
    );
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        foundation::core::{POSTER_CANVAS, Rgb8},
        text::painter::TextBounds,
    };

    /// 10px per char, 20px tall ink box at the origin.
    struct Mono;

    impl TextPainter for Mono {
        fn measure(&self, _: FontRole, text: &str) -> TextBounds {
            TextBounds {
                left: 0,
                top: 0,
                right: 10 * text.chars().count() as i32,
                bottom: 20,
            }
        }

        fn draw(&self, _: &mut RgbImage, _: FontRole, _: i32, _: i32, _: Rgb8, _: &str) {}
    }

    #[test]
    fn caption_is_centered_in_text_panel() {
        let layout = layout_branding(&Mono, POSTER_CANVAS, "Join Us", "Chan", false);
        assert_eq!(layout.caption_y, 590);
        assert_eq!(layout.caption_x, (768 - 70) / 2);
    }

    #[test]
    fn name_only_row_is_centered() {
        let layout = layout_branding(&Mono, POSTER_CANVAS, "Join Us", "Chan", false);
        assert_eq!(layout.thumbnail, None);
        assert_eq!(layout.name_x, (768 - 40) / 2);
        assert_eq!(layout.name_y, 590 + 20 + 20);
    }

    #[test]
    fn thumbnail_row_is_centered_as_a_group() {
        let layout = layout_branding(&Mono, POSTER_CANVAS, "Join Us", "Chan", true);
        let group_x = (768 - (80 + 20 + 40)) / 2;
        assert_eq!(layout.thumbnail, Some((group_x, 630)));
        assert_eq!(layout.name_x, group_x + 100);
        assert_eq!(layout.name_y, 630 + 30);
    }

    /// Ink box starts 3px right of and 7px below the origin; 10px per char, 20px tall.
    struct Inset;

    impl TextPainter for Inset {
        fn measure(&self, _: FontRole, text: &str) -> TextBounds {
            TextBounds {
                left: 3,
                top: 7,
                right: 3 + 10 * text.chars().count() as i32,
                bottom: 27,
            }
        }

        fn draw(&self, _: &mut RgbImage, _: FontRole, _: i32, _: i32, _: Rgb8, _: &str) {}
    }

    #[test]
    fn inset_ink_boxes_land_where_flush_ones_do() {
        for with_thumbnail in [false, true] {
            let flush = layout_branding(&Mono, POSTER_CANVAS, "Join Us", "Chan", with_thumbnail);
            let inset = layout_branding(&Inset, POSTER_CANVAS, "Join Us", "Chan", with_thumbnail);
            assert_eq!(inset.caption_x + 3, flush.caption_x);
            assert_eq!(inset.caption_y + 7, flush.caption_y);
            assert_eq!(inset.thumbnail, flush.thumbnail);
            assert_eq!(inset.name_x + 3, flush.name_x);
            assert_eq!(inset.name_y + 7, flush.name_y, "thumbnail: {with_thumbnail}");
        }
    }

    #[test]
    fn circular_mask_clears_corners() {
        let src = RgbImage::from_pixel(200, 100, image::Rgb([9, 9, 9]));
        let (square, mask) = circular_thumbnail(&src).unwrap();
        assert_eq!(square.dimensions(), (80, 80));
        assert_eq!(mask.get_pixel(40, 40).0, [255]);
        assert_eq!(mask.get_pixel(0, 0).0, [0]);
        assert_eq!(mask.get_pixel(79, 79).0, [0]);
    }

    #[test]
    fn empty_thumbnail_falls_back_to_name_only() {
        let mut canvas = RgbImage::new(1280, 720);
        let empty = RgbImage::new(0, 0);
        let layout = draw_branding(
            &mut canvas,
            &Mono,
            POSTER_CANVAS,
            "Join Us",
            "Chan",
            Some(&empty),
        );
        assert_eq!(layout.thumbnail, None);
        assert!(canvas.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn thumbnail_is_pasted_inside_the_row() {
        let mut canvas = RgbImage::new(1280, 720);
        let thumb = RgbImage::from_pixel(10, 10, image::Rgb([250, 0, 0]));
        let layout = draw_branding(
            &mut canvas,
            &Mono,
            POSTER_CANVAS,
            "Join Us",
            "Chan",
            Some(&thumb),
        );
        let (tx, ty) = layout.thumbnail.unwrap();
        assert_eq!(canvas.get_pixel(tx as u32 + 40, ty as u32 + 40).0, [250, 0, 0]);
        assert_eq!(canvas.get_pixel(tx as u32, ty as u32).0, [0, 0, 0]);
    }
}
