use image::{GrayImage, RgbImage};

use crate::foundation::{
    core::Rgb8,
    error::{PosterError, PosterResult, Stage},
};

pub type Rgb8Px = [u8; 3];

/// Source-over for an opaque destination: `dst * (1 - a) + src * a` with 8-bit alpha.
pub fn over(dst: Rgb8Px, src: Rgb8Px, alpha: u8) -> Rgb8Px {
    if alpha == 0 {
        return dst;
    }
    if alpha == 255 {
        return src;
    }
    let a = u16::from(alpha);
    let inv = 255u16 - a;
    let mut out = [0u8; 3];
    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), a);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Blend one pixel; coordinates outside the canvas are ignored.
pub fn blend_pixel(canvas: &mut RgbImage, x: i64, y: i64, color: Rgb8, alpha: u8) {
    if x < 0 || y < 0 || x >= i64::from(canvas.width()) || y >= i64::from(canvas.height()) {
        return;
    }
    let px = canvas.get_pixel_mut(x as u32, y as u32);
    px.0 = over(px.0, [color.r, color.g, color.b], alpha);
}

/// Composite a flat color over the whole image.
pub fn overlay_in_place(img: &mut RgbImage, color: Rgb8, alpha: u8) {
    let src = [color.r, color.g, color.b];
    for px in img.pixels_mut() {
        px.0 = over(px.0, src, alpha);
    }
}

/// Composite `src` through an 8-bit coverage `mask` of the same size.
pub fn paste_masked(
    dst: &mut RgbImage,
    src: &RgbImage,
    mask: &GrayImage,
    x: i64,
    y: i64,
) -> PosterResult<()> {
    if src.dimensions() != mask.dimensions() {
        return Err(PosterError::render(
            Stage::Branding,
            format!(
                "mask {:?} does not match source {:?}",
                mask.dimensions(),
                src.dimensions()
            ),
        ));
    }
    for (sx, sy, px) in src.enumerate_pixels() {
        let a = mask.get_pixel(sx, sy).0[0];
        let [r, g, b] = px.0;
        blend_pixel(
            dst,
            x + i64::from(sx),
            y + i64::from(sy),
            Rgb8::new(r, g, b),
            a,
        );
    }
    Ok(())
}

/// Convert a glyph coverage value in `[0, 1]` to 8-bit alpha.
pub fn coverage_to_alpha(coverage: f32) -> u8 {
    ((coverage.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u8
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
