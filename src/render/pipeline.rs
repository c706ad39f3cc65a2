use image::RgbImage;

use crate::{
    assets::{
        decode::decode_thumbnail,
        store::{ImageSource, PreparedArtwork},
    },
    config::PosterConfig,
    foundation::{
        core::{Canvas, POSTER_CANVAS},
        error::PosterResult,
    },
    model::MediaRecord,
    render::{
        background::{blank_canvas, compose_background},
        branding::draw_branding,
        encode::encode_jpeg,
        genres::{chip_right_limit, draw_chips},
        rating::draw_rating,
        text_block::draw_text_block,
    },
    text::{fonts::FontTable, painter::TextPainter},
};

/// Renders posters with one fixed set of faces and caption text.
///
/// The renderer is immutable once built, so a single instance can serve any number of renders,
/// including concurrently when `P: Sync`.
#[derive(Debug)]
pub struct PosterRenderer<P = FontTable> {
    painter: P,
    caption: String,
    geometry: Canvas,
}

impl PosterRenderer<FontTable> {
    /// Load fonts from `config` and build a renderer.
    pub fn new(config: &PosterConfig) -> PosterResult<Self> {
        let fonts = FontTable::load(config)?;
        Ok(Self::with_painter(fonts, config.caption.clone()))
    }
}

impl<P: TextPainter> PosterRenderer<P> {
    pub fn with_painter(painter: P, caption: impl Into<String>) -> Self {
        Self {
            painter,
            caption: caption.into(),
            geometry: POSTER_CANVAS,
        }
    }

    pub fn painter(&self) -> &P {
        &self.painter
    }

    pub fn geometry(&self) -> Canvas {
        self.geometry
    }

    /// Paint every layer and return the raster before encoding.
    ///
    /// Stages run in order: background, title block, rating, genre chips, branding. Only the
    /// background can fail; an unusable `thumbnail` degrades to a name-only branding row.
    #[tracing::instrument(skip_all, fields(title = %record.display_title))]
    pub fn compose(
        &self,
        record: &MediaRecord,
        art: &PreparedArtwork,
        thumbnail: Option<&RgbImage>,
        branding: &str,
    ) -> PosterResult<RgbImage> {
        let painter: &dyn TextPainter = &self.painter;
        let panel_w = self.geometry.text_panel_width();

        let mut canvas = blank_canvas(self.geometry);
        compose_background(&mut canvas, self.geometry, art)?;

        let cursor = draw_text_block(&mut canvas, painter, record, panel_w);
        let chips_y = draw_rating(&mut canvas, painter, &record.score_text(), cursor);
        draw_chips(
            &mut canvas,
            painter,
            record.rendered_genres(),
            chips_y,
            chip_right_limit(panel_w),
        );
        draw_branding(
            &mut canvas,
            painter,
            self.geometry,
            &self.caption,
            branding,
            thumbnail,
        );

        Ok(canvas)
    }

    /// Compose and encode one poster as JPEG bytes.
    pub fn render(
        &self,
        record: &MediaRecord,
        art: &PreparedArtwork,
        thumbnail: Option<&RgbImage>,
        branding: &str,
    ) -> PosterResult<Vec<u8>> {
        let canvas = self.compose(record, art, thumbnail, branding)?;
        let jpeg = encode_jpeg(&canvas)?;
        tracing::debug!(bytes = jpeg.len(), "poster encoded");
        Ok(jpeg)
    }

    /// Fetch artwork through `source`, decode the optional thumbnail bytes, then render.
    pub fn render_record(
        &self,
        record: &MediaRecord,
        source: &dyn ImageSource,
        thumbnail: Option<&[u8]>,
        branding: &str,
    ) -> PosterResult<Vec<u8>> {
        let art = PreparedArtwork::prepare(record, source)?;
        let thumb = thumbnail.and_then(decode_thumbnail);
        self.render(record, &art, thumb.as_ref(), branding)
    }
}
