use image::RgbImage;

use crate::foundation::error::{PosterError, PosterResult};

/// Decode any supported raster format into straight RGB8.
///
/// Zero-sized images are rejected: every stage downstream divides by width or height.
pub fn decode_rgb(bytes: &[u8]) -> PosterResult<RgbImage> {
    if bytes.is_empty() {
        return Err(PosterError::decode("image bytes are empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PosterError::decode(format!("decode image from memory: {e}")))?;
    let rgb = dyn_img.to_rgb8();
    ensure_non_empty(&rgb)?;
    Ok(rgb)
}

/// Decode a branding thumbnail; failures are logged and yield `None`.
pub fn decode_thumbnail(bytes: &[u8]) -> Option<RgbImage> {
    match decode_rgb(bytes) {
        Ok(img) => Some(img),
        Err(err) => {
            tracing::warn!(%err, "thumbnail could not be decoded; rendering without it");
            None
        }
    }
}

pub(crate) fn ensure_non_empty(img: &RgbImage) -> PosterResult<()> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(PosterError::decode(format!(
            "raster has zero-sized dimensions {w}x{h}"
        )));
    }
    Ok(())
}
