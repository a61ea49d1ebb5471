//! Error types for the komawari panel reconstruction library.

use thiserror::Error;

/// Primary error type for page analysis.
///
/// Only configuration problems surface to callers of the page pipeline.
/// Geometric degeneracies are recovered inside the phase that meets them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("unknown reading direction: {0}")]
    UnknownReadingDirection(String),

    #[error("unknown background: {0}")]
    UnknownBackground(String),

    #[error("invalid page size {width}x{height}")]
    InvalidPageSize { width: u32, height: u32 },

    #[error("minimum panel size ratio must be in (0, 1], got {0}")]
    InvalidPanelRatio(f64),

    #[error("segment tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

impl LayoutError {
    /// True for the errors reported at page construction.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownReadingDirection(_)
                | Self::UnknownBackground(_)
                | Self::InvalidPageSize { .. }
                | Self::InvalidPanelRatio(_)
                | Self::InvalidTolerance(_)
        )
    }
}

/// Convenience Result type alias for LayoutError.
pub type Result<T> = std::result::Result<T, LayoutError>;
