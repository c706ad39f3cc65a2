use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::error::{PosterError, PosterResult};

/// Named font faces used by the poster layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontRole {
    /// Wrapped title lines.
    Title,
    /// "Join the channel" caption.
    Subtitle,
    /// Season / episodes / type lines.
    Detail,
    /// Star glyph and score; must cover U+2605.
    Rating,
    /// Text inside genre chips.
    Genre,
    /// Channel name in the branding row.
    Channel,
}

impl FontRole {
    pub const ALL: [FontRole; 6] = [
        FontRole::Title,
        FontRole::Subtitle,
        FontRole::Detail,
        FontRole::Rating,
        FontRole::Genre,
        FontRole::Channel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::Detail => "detail",
            Self::Rating => "rating",
            Self::Genre => "genre",
            Self::Channel => "channel",
        }
    }

    /// Weight requested from the system font database when the configured file is unusable.
    pub fn fallback_weight(self) -> u16 {
        match self {
            Self::Title | Self::Rating | Self::Channel => 700,
            Self::Subtitle | Self::Genre => 500,
            Self::Detail => 400,
        }
    }
}

/// One configured font face: a file under [`PosterConfig::font_dir`] and a pixel size.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    pub file: String,
    pub size_px: f32,
}

impl FontSpec {
    fn new(file: &str, size_px: f32) -> Self {
        Self {
            file: file.to_string(),
            size_px,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    pub title: FontSpec,
    pub subtitle: FontSpec,
    pub detail: FontSpec,
    pub rating: FontSpec,
    pub genre: FontSpec,
    pub channel: FontSpec,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            title: FontSpec::new("Montserrat-Bold.ttf", 48.0),
            subtitle: FontSpec::new("Montserrat-Medium.ttf", 28.0),
            detail: FontSpec::new("Montserrat-Regular.ttf", 28.0),
            rating: FontSpec::new("DejaVuSans-Bold.ttf", 60.0),
            genre: FontSpec::new("Montserrat-Medium.ttf", 23.0),
            channel: FontSpec::new("Montserrat-Bold.ttf", 36.0),
        }
    }
}

impl FontsConfig {
    pub fn spec(&self, role: FontRole) -> &FontSpec {
        match role {
            FontRole::Title => &self.title,
            FontRole::Subtitle => &self.subtitle,
            FontRole::Detail => &self.detail,
            FontRole::Rating => &self.rating,
            FontRole::Genre => &self.genre,
            FontRole::Channel => &self.channel,
        }
    }
}

/// Startup configuration for [`crate::PosterRenderer`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PosterConfig {
    /// Directory that font files are resolved against.
    pub font_dir: PathBuf,
    pub fonts: FontsConfig,
    /// Caption drawn above the branding row.
    pub caption: String,
    /// Consult the host font database before the bundled face when a file is unusable.
    pub system_fonts: bool,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            font_dir: PathBuf::from("fonts"),
            fonts: FontsConfig::default(),
            caption: "Join Our Telegram Channel".to_string(),
            system_fonts: true,
        }
    }
}

impl PosterConfig {
    /// Read a JSON config file; absent keys take their defaults.
    pub fn from_json_file(path: &Path) -> PosterResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: PosterConfig = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            PosterError::validation(format!("parse config JSON '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> PosterResult<()> {
        for role in FontRole::ALL {
            let spec = self.fonts.spec(role);
            if !spec.size_px.is_finite() || spec.size_px <= 0.0 {
                return Err(PosterError::validation(format!(
                    "font '{}' size_px must be finite and > 0",
                    role.as_str()
                )));
            }
        }
        if self.caption.trim().is_empty() {
            return Err(PosterError::validation("caption must be non-empty"));
        }
        Ok(())
    }

    pub fn font_path(&self, role: FontRole) -> PathBuf {
        self.font_dir.join(&self.fonts.spec(role).file)
    }
}
