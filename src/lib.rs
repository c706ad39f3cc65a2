//! Deterministic 1280x720 promotional posters for anime and movie/TV titles.
//!
//! A [`MediaRecord`] plus its decoded artwork goes through [`PosterRenderer`], which paints a
//! blurred backdrop panel, the cover, a wrapped title with metadata, a rating row, genre chips
//! and a branding row, then encodes the result as JPEG.
//!
//! Provider payloads are mapped to records by [`providers::anilist`] and [`providers::tmdb`].
#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod model;
pub mod providers;
pub mod render;
pub mod text;

pub use assets::{
    decode::{decode_rgb, decode_thumbnail},
    store::{FsImageSource, ImageSource, MemoryImageSource, PreparedArtwork},
};
pub use config::{FontRole, FontSpec, FontsConfig, PosterConfig};
pub use foundation::core::{Canvas, POSTER_CANVAS, Rgb8};
pub use foundation::error::{PosterError, PosterResult, Stage};
pub use model::{MediaRecord, NO_TITLE, NOT_AVAILABLE, resolve_display_title};
pub use render::{
    encode::{JPEG_QUALITY, encode_jpeg},
    genres::{Chip, layout_chips},
    pipeline::PosterRenderer,
};
pub use text::{
    fonts::{FaceOrigin, FontTable},
    painter::{TextBounds, TextPainter},
    wrap::wrap_words,
};
