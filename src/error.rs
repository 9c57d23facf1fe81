//! Error type for the crate's outer surfaces (JSON input, settings, FFI).
//!
//! The layout algorithm itself never fails; it clamps.

/// Result alias that carries [`LayoutError`].
pub type Result<T> = std::result::Result<T, LayoutError>;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// Score or settings JSON could not be read.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The scale factor must be a finite number greater than zero.
    #[error("scale must be a finite value > 0, got {0}")]
    InvalidScale(f64),
}
