//! Page pipeline phases.
//!
//! Each phase takes the panel set produced by the previous one and returns a
//! new set:
//! - Grouping small panels into larger ones
//! - Splitting outlines that wrap several panels
//! - Merging contained panels and excluding small ones
//! - Removing overlaps between neighbours
//! - Inferring gutters and expanding panels
//! - Reading order

mod deoverlap;
mod expansion;
mod grouping;
mod merging;
mod ordering;
mod splitting;

pub use deoverlap::deoverlap_panels;
pub use expansion::{actual_gutters, expand_panels};
pub use grouping::group_small_panels;
pub use merging::{exclude_small_panels, merge_panels};
pub use ordering::{order_panels, reading_constraints, settle_order, sort_panels};
pub use splitting::{split_cap, split_panels};
