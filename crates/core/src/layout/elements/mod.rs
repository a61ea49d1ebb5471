//! Layout element types.

pub mod panel;

pub use panel::Panel;
