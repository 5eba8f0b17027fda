/// Convenience result type used across scanpaint.
pub type ScanpaintResult<T> = Result<T, ScanpaintError>;

/// Top-level error taxonomy.
///
/// Geometry never fails: out-of-range coordinates and degenerate shapes are clipped or skipped.
/// Only construction, configuration, scene parsing, the compressor and IO produce errors.
#[derive(thiserror::Error, Debug)]
pub enum ScanpaintError {
    /// Rejected dimensions, configuration or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The deflate compressor reported a status other than success.
    #[error("compression error: {0}")]
    Compression(String),

    /// Scene JSON could not be parsed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// IO and other context-carrying failures.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScanpaintError {
    /// Build a [`ScanpaintError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScanpaintError::Compression`] value.
    pub fn compression(msg: impl Into<String>) -> Self {
        Self::Compression(msg.into())
    }

    /// Build a [`ScanpaintError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
