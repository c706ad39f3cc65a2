use std::io::Cursor;

use image::RgbImage;
use posterforge::{
    FontRole, FontTable, MediaRecord, MemoryImageSource, PosterConfig, PosterError,
    PosterRenderer, PreparedArtwork, Rgb8, TextBounds, TextPainter, layout_chips,
    render::composite::blend_pixel,
};

/// Each char is a solid 12x24 block; deterministic and font-free.
struct Blocks;

impl TextPainter for Blocks {
    fn measure(&self, _: FontRole, text: &str) -> TextBounds {
        TextBounds {
            left: 0,
            top: 0,
            right: 12 * text.chars().count() as i32,
            bottom: 24,
        }
    }

    fn draw(&self, canvas: &mut RgbImage, _: FontRole, x: i32, y: i32, color: Rgb8, text: &str) {
        let w = 12 * text.chars().count() as i64;
        for dy in 0..24i64 {
            for dx in 0..w {
                blend_pixel(canvas, i64::from(x) + dx, i64::from(y) + dy, color, 255);
            }
        }
    }
}

fn png(w: u32, h: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_fn(w, h, |x, y| image::Rgb(f(x, y)));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn record() -> MediaRecord {
    MediaRecord {
        display_title: "Fullmetal Alchemist: Brotherhood".to_string(),
        cover_image_ref: "cover.png".to_string(),
        backdrop_image_ref: Some("banner.png".to_string()),
        period_label: "Spring 2009".to_string(),
        episode_count: Some(64),
        format_label: "Tv".to_string(),
        score_percent: Some(90),
        genres: vec![
            "Action".to_string(),
            "Adventure".to_string(),
            "Drama".to_string(),
            "Fantasy".to_string(),
            "Mystery".to_string(),
        ],
    }
}

fn source() -> MemoryImageSource {
    let mut src = MemoryImageSource::new();
    src.insert("cover.png", png(60, 90, |x, y| [(x * 4) as u8, (y * 2) as u8, 120]));
    src.insert("banner.png", png(160, 40, |x, _| [200, (x % 256) as u8, 40]));
    src
}

fn decode(jpeg: &[u8]) -> RgbImage {
    image::load_from_memory_with_format(jpeg, image::ImageFormat::Jpeg)
        .unwrap()
        .to_rgb8()
}

#[test]
fn renders_decodable_1280x720_jpeg() {
    let renderer = PosterRenderer::with_painter(Blocks, "Join Our Telegram Channel");
    let jpeg = renderer
        .render_record(&record(), &source(), None, "Anime Vault")
        .unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    assert_eq!(decode(&jpeg).dimensions(), (1280, 720));
}

#[test]
fn identical_inputs_give_identical_bytes() {
    let renderer = PosterRenderer::with_painter(Blocks, "Join Our Telegram Channel");
    let thumb = png(32, 32, |_, _| [10, 200, 10]);
    let a = renderer
        .render_record(&record(), &source(), Some(&thumb), "Anime Vault")
        .unwrap();
    let b = renderer
        .render_record(&record(), &source(), Some(&thumb), "Anime Vault")
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn thumbnail_failures_never_fail_the_render() {
    let renderer = PosterRenderer::with_painter(Blocks, "Join Our Telegram Channel");
    let art = PreparedArtwork::prepare(&record(), &source()).unwrap();

    let without = renderer.compose(&record(), &art, None, "Anime Vault").unwrap();
    let empty = renderer
        .compose(&record(), &art, Some(&RgbImage::new(0, 0)), "Anime Vault")
        .unwrap();
    assert_eq!(without, empty);

    let garbage = renderer
        .render_record(&record(), &source(), Some(&[0u8, 1, 2, 3]), "Anime Vault")
        .unwrap();
    assert_eq!(decode(&garbage).dimensions(), (1280, 720));
}

#[test]
fn thumbnail_shifts_the_branding_name() {
    let renderer = PosterRenderer::with_painter(Blocks, "Join");
    let art = PreparedArtwork::prepare(&record(), &source()).unwrap();
    let thumb = RgbImage::from_pixel(16, 16, image::Rgb([0, 255, 0]));

    let with = renderer.compose(&record(), &art, Some(&thumb), "Vault").unwrap();
    let without = renderer.compose(&record(), &art, None, "Vault").unwrap();
    assert_ne!(with, without);

    // caption "Join" (48px) sits at y=590; the branding row starts at 590 + 24 + 20
    let group_x = (768 - (80 + 20 + 60)) / 2;
    assert_eq!(with.get_pixel(group_x as u32 + 40, 634 + 40).0, [0, 255, 0]);
}

#[test]
fn missing_backdrop_reuses_cover() {
    let mut rec = record();
    rec.backdrop_image_ref = None;
    let renderer = PosterRenderer::with_painter(Blocks, "Join");
    let jpeg = renderer.render_record(&rec, &source(), None, "").unwrap();
    assert_eq!(decode(&jpeg).dimensions(), (1280, 720));
}

#[test]
fn undecodable_cover_is_decode_error() {
    let mut src = MemoryImageSource::new();
    src.insert("cover.png", b"definitely not a png".to_vec());
    let mut rec = record();
    rec.backdrop_image_ref = None;

    let renderer = PosterRenderer::with_painter(Blocks, "Join");
    let err = renderer.render_record(&rec, &src, None, "").unwrap_err();
    assert!(matches!(err, PosterError::Decode(_)), "{err}");
}

#[test]
fn only_first_four_genres_are_laid_out() {
    let rec = record();
    let chips = layout_chips(&Blocks, rec.rendered_genres(), 400, 718);
    let labels: Vec<&str> = chips.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Action", "Adventure", "Drama", "Fantasy"]);
}

#[test]
fn long_genres_wrap_to_a_second_row() {
    let genres: Vec<String> = ["Mahou Shoujo Action", "Psychological Thriller", "Slice of Life"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let chips = layout_chips(&Blocks, &genres, 400, 718);
    assert_eq!(chips[0].row, 0);
    assert!(chips.iter().any(|c| c.row == 1));
    for c in &chips {
        assert!(c.rect.x1 <= 718.0);
    }
}

#[test]
fn loaded_fonts_render_deterministically() {
    let config = PosterConfig::default();
    let fonts = FontTable::load(&config).unwrap();
    let renderer = PosterRenderer::with_painter(fonts, config.caption.clone());
    let a = renderer
        .render_record(&record(), &source(), None, "Anime Vault")
        .unwrap();
    let b = renderer
        .render_record(&record(), &source(), None, "Anime Vault")
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(decode(&a).dimensions(), (1280, 720));
}
