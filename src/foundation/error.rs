use std::fmt;

/// Convenience result type used across posterforge.
pub type PosterResult<T> = Result<T, PosterError>;

/// Pipeline stage that was running when a [`PosterError::Render`] was raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Cover panel and blurred backdrop panel.
    Background,
    /// Title block and metadata lines.
    Text,
    /// Star glyph and score.
    Rating,
    /// Genre chip rows.
    Genres,
    /// Caption, thumbnail and channel name.
    Branding,
    /// JPEG serialization.
    Encode,
}

impl Stage {
    /// Stable lower-case name used in error messages and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Text => "text",
            Self::Rating => "rating",
            Self::Genres => "genres",
            Self::Branding => "branding",
            Self::Encode => "encode",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PosterError {
    /// A required image reference is missing or could not be fetched.
    #[error("input error: {0}")]
    Input(String),

    /// A supplied raster could not be decoded or is unusable.
    #[error("decode error: {0}")]
    Decode(String),

    /// Unexpected failure inside one pipeline stage.
    #[error("render error in {stage} stage: {message}")]
    Render {
        /// Stage that failed.
        stage: Stage,
        /// Human-readable cause.
        message: String,
    },

    /// Invalid configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterError {
    /// Build a [`PosterError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`PosterError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PosterError::Render`] value for `stage`.
    pub fn render(stage: Stage, msg: impl Into<String>) -> Self {
        Self::Render {
            stage,
            message: msg.into(),
        }
    }

    /// Build a [`PosterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
