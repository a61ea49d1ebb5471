//! High-level API module for panel reconstruction.
//!
//! # Example
//!
//! ```ignore
//! use komawari_core::api::{analyze_page, AnalyzeOptions, PageInput};
//!
//! let input: PageInput = serde_json::from_str(&json)?;
//! let layout = analyze_page(&input, &AnalyzeOptions::default())?;
//! ```

pub mod high_level;

pub use high_level::{
    AnalyzeOptions, PageInput, ShapeSet, analyze_page, analyze_pages, process_pages,
};
