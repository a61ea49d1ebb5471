//! Panel layout reconstruction.
//!
//! This module contains:
//! - The panel entity and its predicates (`elements`)
//! - Page parameters (`PageParams`, `ReadingDirection`, `Background`)
//! - Polygon splitting validated by segment coverage (`split`)
//! - The pipeline phases (`analysis`) and their driver (`page`)

pub mod analysis;
pub mod arena;
pub mod elements;
pub mod page;
pub mod params;
pub mod split;
pub mod types;

pub use arena::{PanelArena, PanelId};
pub use elements::Panel;
pub use page::{Page, PageContext, PageLayout, PipelineStep};
pub use params::*;
pub use types::{Gutters, Side};
