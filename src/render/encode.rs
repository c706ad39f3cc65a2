use image::{RgbImage, codecs::jpeg::JpegEncoder};

use crate::foundation::error::{PosterError, PosterResult, Stage};

pub const JPEG_QUALITY: u8 = 95;

/// Encode the finished canvas as a baseline JPEG.
pub fn encode_jpeg(canvas: &RgbImage) -> PosterResult<Vec<u8>> {
    if canvas.width() == 0 || canvas.height() == 0 {
        return Err(PosterError::render(Stage::Encode, "canvas is empty"));
    }
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
        .encode_image(canvas)
        .map_err(|e| PosterError::render(Stage::Encode, e.to_string()))?;
    Ok(out)
}
