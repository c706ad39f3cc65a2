//! TMDB movie / TV details payloads.

use crate::{
    foundation::error::{PosterError, PosterResult},
    model::{MediaRecord, NOT_AVAILABLE, resolve_display_title},
};

/// Base URL prepended to TMDB `poster_path` / `backdrop_path` values.
pub const TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TmdbKind {
    Movie,
    Tv,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct TmdbGenre {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

/// Union of the movie and TV details fields the poster needs.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct TmdbDetails {
    #[serde(default)]
    pub id: i64,
    // movie
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    // tv
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub number_of_episodes: Option<u32>,
    // shared
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<i64>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

/// Map a TMDB details payload into a [`MediaRecord`].
pub fn to_media_record(details: &TmdbDetails, kind: TmdbKind) -> PosterResult<MediaRecord> {
    let (localized, original, date) = match kind {
        TmdbKind::Movie => (
            details.title.as_deref(),
            details.original_title.as_deref(),
            details.release_date.as_deref(),
        ),
        TmdbKind::Tv => (
            details.name.as_deref(),
            details.original_name.as_deref(),
            details.first_air_date.as_deref(),
        ),
    };

    let poster = image_url(details.poster_path.as_deref());
    let backdrop = image_url(details.backdrop_path.as_deref());
    let cover_image_ref = poster.clone().or_else(|| backdrop.clone()).ok_or_else(|| {
        PosterError::input(format!(
            "tmdb {kind:?} {} has no poster or backdrop image",
            details.id
        ))
    })?;

    Ok(MediaRecord {
        display_title: resolve_display_title(localized, original),
        cover_image_ref,
        backdrop_image_ref: backdrop,
        period_label: year_of(date).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        episode_count: match kind {
            TmdbKind::Movie => None,
            TmdbKind::Tv => details.number_of_episodes,
        },
        format_label: match kind {
            TmdbKind::Movie => "Movie".to_string(),
            TmdbKind::Tv => "TV".to_string(),
        },
        score_percent: score_percent(details.vote_average, details.vote_count),
        genres: details.genres.iter().map(|g| g.name.clone()).collect(),
    })
}

fn image_url(path: Option<&str>) -> Option<String> {
    let path = path.map(str::trim).filter(|p| !p.is_empty())?;
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }
    Some(format!("{TMDB_IMAGE_BASE_URL}{path}"))
}

fn year_of(date: Option<&str>) -> Option<String> {
    date.and_then(|d| d.split('-').next())
        .and_then(|y| y.trim().parse::<i32>().ok())
        .map(|y| y.to_string())
}

/// `vote_average` is on a 0-10 scale; zero votes means the score is unknown.
fn score_percent(vote_average: Option<f64>, vote_count: Option<i64>) -> Option<u8> {
    if vote_count == Some(0) {
        return None;
    }
    let avg = vote_average.filter(|v| v.is_finite())?;
    if avg <= 0.0 {
        return None;
    }
    Some((avg * 10.0).round().clamp(0.0, 100.0) as u8)
}
