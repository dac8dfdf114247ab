/// Result alias used by fallible pagefx APIs.
pub type PagefxResult<T> = Result<T, PagefxError>;

/// Top-level error type for pagefx.
///
/// Runtime paths (interpolation, progress, frame ticks, trigger wiring) are total and never
/// produce this type; it only surfaces from loading and validating declarative records.
#[derive(thiserror::Error, Debug)]
pub enum PagefxError {
    /// A declarative record or config value failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// An effect timeline could not be sampled as described.
    #[error("animation error: {0}")]
    Animation(String),

    /// JSON (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PagefxError {
    /// Build a [`PagefxError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PagefxError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`PagefxError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for PagefxError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}
