//! AniList media details payload (`Media` from the GraphQL details query).

use crate::{
    foundation::error::{PosterError, PosterResult},
    model::{MediaRecord, NOT_AVAILABLE, resolve_display_title},
};

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AniListMedia {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: AniListTitle,
    #[serde(default)]
    pub cover_image: AniListCoverImage,
    #[serde(default)]
    pub banner_image: Option<String>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub season_year: Option<i32>,
    #[serde(default)]
    pub episodes: Option<u32>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub average_score: Option<i64>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct AniListTitle {
    #[serde(default)]
    pub romaji: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AniListCoverImage {
    #[serde(default)]
    pub extra_large: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

/// Map an AniList media payload into a [`MediaRecord`].
///
/// Fails with [`PosterError::Input`] when neither a cover nor a banner image is available.
pub fn to_media_record(media: &AniListMedia) -> PosterResult<MediaRecord> {
    let cover = non_empty(media.cover_image.extra_large.as_deref())
        .or_else(|| non_empty(media.cover_image.large.as_deref()));
    let banner = non_empty(media.banner_image.as_deref());

    let cover_image_ref = cover.or(banner).ok_or_else(|| {
        PosterError::input(format!(
            "anilist media {} has no cover or banner image",
            media.id.map_or_else(|| "?".to_string(), |id| id.to_string())
        ))
    })?;

    Ok(MediaRecord {
        display_title: resolve_display_title(
            media.title.english.as_deref(),
            media.title.romaji.as_deref(),
        ),
        cover_image_ref: cover_image_ref.to_string(),
        backdrop_image_ref: banner.map(str::to_string),
        period_label: period_label(media.season.as_deref(), media.season_year),
        episode_count: media.episodes,
        format_label: media
            .format
            .as_deref()
            .and_then(|f| non_empty(Some(f)))
            .map(format_label)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        score_percent: media.average_score.map(|s| s.clamp(0, 100) as u8),
        genres: media.genres.clone(),
    })
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn period_label(season: Option<&str>, year: Option<i32>) -> String {
    match (non_empty(season), year) {
        (Some(s), Some(y)) => format!("{} {y}", capitalize(s)),
        (None, Some(y)) => y.to_string(),
        (Some(s), None) => format!("{} {NOT_AVAILABLE}", capitalize(s)),
        (None, None) => NOT_AVAILABLE.to_string(),
    }
}

/// `TV_SHORT` -> `Tv Short`.
fn format_label(raw: &str) -> String {
    raw.split('_')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
