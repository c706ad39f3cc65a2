use image::{RgbImage, imageops::FilterType};
use imageproc::filter::gaussian_blur_f32;

use crate::{
    assets::{decode::ensure_non_empty, store::PreparedArtwork},
    foundation::{
        core::{BASE_FILL, Canvas, Rgb8},
        error::{PosterError, PosterResult, Stage},
    },
    render::composite::overlay_in_place,
};

/// Standard deviation of the backdrop blur.
pub const BACKDROP_BLUR_SIGMA: f32 = 15.0;
/// Alpha of the black wash over the blurred backdrop.
pub const BACKDROP_SHADE_ALPHA: u8 = 180;

const RESAMPLE: FilterType = FilterType::CatmullRom;

/// Paint the cover panel and the blurred, shaded backdrop panel onto `canvas`.
pub fn compose_background(
    canvas: &mut RgbImage,
    geometry: Canvas,
    art: &PreparedArtwork,
) -> PosterResult<()> {
    ensure_non_empty(&art.cover)?;
    let backdrop = art.backdrop_or_cover();
    ensure_non_empty(backdrop)?;

    let cover = image::imageops::resize(
        &art.cover,
        geometry.cover_panel_width(),
        geometry.height,
        RESAMPLE,
    );
    image::imageops::replace(canvas, &cover, i64::from(geometry.cover_panel_x()), 0);

    let panel = backdrop_panel(backdrop, geometry.text_panel_width(), geometry.height)?;
    image::imageops::replace(canvas, &panel, 0, 0);

    tracing::debug!(
        cover = ?art.cover.dimensions(),
        backdrop = ?backdrop.dimensions(),
        "background composed"
    );
    Ok(())
}

/// A fresh canvas cleared to the poster base color.
pub fn blank_canvas(geometry: Canvas) -> RgbImage {
    RgbImage::from_pixel(geometry.width, geometry.height, BASE_FILL.to_pixel())
}

/// Fill a `panel_w x panel_h` raster from the center of `backdrop`, then blur and shade it.
///
/// Only the source window that survives the crop is resampled, so the work stays bounded by the
/// panel size whatever the backdrop's aspect ratio.
pub fn backdrop_panel(backdrop: &RgbImage, panel_w: u32, panel_h: u32) -> PosterResult<RgbImage> {
    let (src_w, src_h) = backdrop.dimensions();
    let window = backdrop_crop_window(src_w, src_h, panel_w, panel_h);
    let crop = image::imageops::crop_imm(backdrop, window.x, window.y, window.w, window.h);
    let fitted = image::imageops::resize(&*crop, panel_w, panel_h, RESAMPLE);
    if fitted.dimensions() != (panel_w, panel_h) {
        return Err(PosterError::render(
            Stage::Background,
            format!(
                "backdrop panel is {:?}, expected {panel_w}x{panel_h}",
                fitted.dimensions()
            ),
        ));
    }

    let mut blurred = gaussian_blur_f32(&fitted, BACKDROP_BLUR_SIGMA);
    overlay_in_place(&mut blurred, Rgb8::new(0, 0, 0), BACKDROP_SHADE_ALPHA);
    Ok(blurred)
}

/// Region of the source, in source pixels, that an aspect-preserving cover fill keeps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropWindow {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Centered window of `src_w x src_h` with the panel's aspect ratio.
///
/// Sources wider than the panel keep their full height; taller ones keep their full width.
pub fn backdrop_crop_window(src_w: u32, src_h: u32, panel_w: u32, panel_h: u32) -> CropWindow {
    let (sw, sh) = (u64::from(src_w), u64::from(src_h));
    let (pw, ph) = (u64::from(panel_w.max(1)), u64::from(panel_h.max(1)));

    let full_height_w = sh * pw / ph;
    let (w, h) = if full_height_w <= sw {
        (full_height_w.max(1), sh)
    } else {
        (sw, (sw * ph / pw).clamp(1, sh.max(1)))
    };
    let (w, h) = (w as u32, h as u32);
    CropWindow {
        x: (src_w - w) / 2,
        y: (src_h - h) / 2,
        w,
        h,
    }
}
