//! komawari - comic page panel reconstruction.
//!
//! Turns the shape outlines and straight line segments detected on a comic
//! page into an ordered list of rectangular panels.

pub mod api;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod utils;

pub use api::high_level;
pub use api::{AnalyzeOptions, PageInput, ShapeSet, analyze_page, analyze_pages};
pub use error::{LayoutError, Result};
pub use geometry::{Polygon, Segment};
pub use layout::{
    Background, Gutters, Page, PageLayout, PageParams, Panel, PipelineStep, ReadingDirection,
};
