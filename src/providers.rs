//! Pure mappings from upstream provider payloads into [`crate::MediaRecord`].

pub mod anilist;
pub mod tmdb;
