/// Placeholder drawn when a title has neither an English nor a romanized form.
pub const NO_TITLE: &str = "No Title";

/// Placeholder drawn for unknown metadata values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Provider-neutral description of one media title.
///
/// Adapters in [`crate::providers`] build this from upstream payloads; the renderer never sees
/// provider-specific fields.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MediaRecord {
    pub display_title: String,
    pub cover_image_ref: String,
    #[serde(default)]
    pub backdrop_image_ref: Option<String>,
    pub period_label: String,
    #[serde(default)]
    pub episode_count: Option<u32>,
    pub format_label: String,
    #[serde(default)]
    pub score_percent: Option<u8>,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl MediaRecord {
    /// Maximum number of genre chips drawn on a poster.
    pub const MAX_GENRES: usize = 4;

    /// Reference used as the blurred backdrop source (falls back to the cover).
    pub fn backdrop_or_cover(&self) -> &str {
        self.backdrop_image_ref
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.cover_image_ref)
    }

    /// Genres that will actually be rendered, in original order.
    pub fn rendered_genres(&self) -> &[String] {
        let n = self.genres.len().min(Self::MAX_GENRES);
        &self.genres[..n]
    }

    pub fn episodes_text(&self) -> String {
        match self.episode_count {
            Some(n) => n.to_string(),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// `"87%"` for a known score, `"N/A"` otherwise.
    pub fn score_text(&self) -> String {
        match self.score_percent {
            Some(s) => format!("{}%", s.min(100)),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// The three metadata lines, always present and always in this order.
    pub fn metadata_lines(&self) -> [String; 3] {
        [
            format!("Season: {}", non_empty_or_na(&self.period_label)),
            format!("Episodes: {}", self.episodes_text()),
            format!("Type: {}", non_empty_or_na(&self.format_label)),
        ]
    }
}

fn non_empty_or_na(s: &str) -> &str {
    let t = s.trim();
    if t.is_empty() { NOT_AVAILABLE } else { t }
}

/// Pick the display title from an English/localized and a romanized/original title.
///
/// Both present and different yields `"English / Romanized"`.
pub fn resolve_display_title(english: Option<&str>, romanized: Option<&str>) -> String {
    let english = english.map(str::trim).filter(|s| !s.is_empty());
    let romanized = romanized.map(str::trim).filter(|s| !s.is_empty());
    match (english, romanized) {
        (Some(e), Some(r)) if e != r => format!("{e} / {r}"),
        (Some(e), _) => e.to_string(),
        (None, Some(r)) => r.to_string(),
        (None, None) => NO_TITLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MediaRecord {
        MediaRecord {
            display_title: "Frieren".to_string(),
            cover_image_ref: "cover.png".to_string(),
            backdrop_image_ref: None,
            period_label: "Fall 2023".to_string(),
            episode_count: Some(28),
            format_label: "Tv".to_string(),
            score_percent: Some(87),
            genres: vec![
                "Adventure".to_string(),
                "Drama".to_string(),
                "Fantasy".to_string(),
                "Slice of Life".to_string(),
                "Mystery".to_string(),
            ],
        }
    }

    #[test]
    fn title_joins_distinct_english_and_romanized() {
        assert_eq!(
            resolve_display_title(Some("Attack on Titan"), Some("Shingeki no Kyojin")),
            "Attack on Titan / Shingeki no Kyojin"
        );
    }

    #[test]
    fn title_falls_back_to_whichever_is_present() {
        assert_eq!(
            resolve_display_title(None, Some("Shingeki no Kyojin")),
            "Shingeki no Kyojin"
        );
        assert_eq!(
            resolve_display_title(Some("  "), Some("Shingeki no Kyojin")),
            "Shingeki no Kyojin"
        );
        assert_eq!(resolve_display_title(Some("Monster"), None), "Monster");
        assert_eq!(resolve_display_title(Some("Monster"), Some("Monster")), "Monster");
        assert_eq!(resolve_display_title(None, Some("")), NO_TITLE);
    }

    #[test]
    fn score_text_placeholder() {
        let mut r = record();
        assert_eq!(r.score_text(), "87%");
        r.score_percent = None;
        assert_eq!(r.score_text(), "N/A");
    }

    #[test]
    fn metadata_lines_never_omit_missing_fields() {
        let mut r = record();
        r.episode_count = None;
        r.format_label = String::new();
        let lines = r.metadata_lines();
        assert_eq!(lines[0], "Season: Fall 2023");
        assert_eq!(lines[1], "Episodes: N/A");
        assert_eq!(lines[2], "Type: N/A");
    }

    #[test]
    fn only_first_four_genres_are_rendered() {
        let r = record();
        assert_eq!(
            r.rendered_genres(),
            &["Adventure", "Drama", "Fantasy", "Slice of Life"]
        );
    }

    #[test]
    fn backdrop_defaults_to_cover() {
        let mut r = record();
        assert_eq!(r.backdrop_or_cover(), "cover.png");
        r.backdrop_image_ref = Some("banner.jpg".to_string());
        assert_eq!(r.backdrop_or_cover(), "banner.jpg");
    }

    #[test]
    fn record_deserializes_with_optional_fields_missing() {
        let json = r#"{
            "display_title": "Perfect Blue",
            "cover_image_ref": "cover.jpg",
            "period_label": "1997",
            "format_label": "Movie"
        }"#;
        let r: MediaRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.episode_count, None);
        assert_eq!(r.score_percent, None);
        assert!(r.genres.is_empty());
    }
}
