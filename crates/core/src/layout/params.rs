//! Page analysis parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Order in which a reader scans panels within a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingDirection {
    /// Left to right, as in western comics.
    #[default]
    Ltr,
    /// Right to left, as in manga.
    Rtl,
}

impl FromStr for ReadingDirection {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltr" => Ok(Self::Ltr),
            "rtl" => Ok(Self::Rtl),
            other => Err(LayoutError::UnknownReadingDirection(other.to_string())),
        }
    }
}

impl fmt::Display for ReadingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ltr => f.write_str("ltr"),
            Self::Rtl => f.write_str("rtl"),
        }
    }
}

/// Assumed colour of the page behind the panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    #[serde(alias = "white")]
    Light,
    #[serde(alias = "black")]
    Dark,
}

impl FromStr for Background {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" | "white" => Ok(Self::Light),
            "dark" | "black" => Ok(Self::Dark),
            other => Err(LayoutError::UnknownBackground(other.to_string())),
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("light"),
            Self::Dark => f.write_str("dark"),
        }
    }
}

/// Parameters for panel reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageParams {
    /// Panels narrower or shorter than this fraction of the page width or
    /// height are considered small.
    pub min_panel_size_ratio: f64,

    /// Reading direction used for neighbour queries and the final order.
    pub reading_direction: ReadingDirection,

    /// Distance in pixels within which a detected segment is considered to
    /// lie on a panel boundary.
    pub segment_tolerance: f64,

    /// Record a snapshot of the panel set after every phase.
    pub trace: bool,

    /// Cap on reinsertions during reading order correction. None derives
    /// the cap from the panel count.
    pub max_reorder_passes: Option<usize>,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            min_panel_size_ratio: 1.0 / 15.0,
            reading_direction: ReadingDirection::Ltr,
            segment_tolerance: 10.0,
            trace: false,
            max_reorder_passes: None,
        }
    }
}

impl PageParams {
    /// Creates parameters with the given ratio and direction, other fields
    /// at their defaults.
    pub fn new(min_panel_size_ratio: f64, reading_direction: ReadingDirection) -> Result<Self> {
        let params = Self {
            min_panel_size_ratio,
            reading_direction,
            ..Self::default()
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let ratio = self.min_panel_size_ratio;
        if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
            return Err(LayoutError::InvalidPanelRatio(ratio));
        }
        let tol = self.segment_tolerance;
        if !tol.is_finite() || tol < 0.0 {
            return Err(LayoutError::InvalidTolerance(tol));
        }
        Ok(())
    }

    /// Reinsertion cap for a page holding `n` panels.
    pub fn reorder_cap(&self, n: usize) -> usize {
        self.max_reorder_passes.unwrap_or(2 * n * n + 8)
    }
}
