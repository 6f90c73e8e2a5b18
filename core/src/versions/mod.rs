//! versions/mod.rs
//! Registry lookup and the selectable version list.

pub mod types;
pub mod catalog;

pub use types::*;
pub use catalog::*;
