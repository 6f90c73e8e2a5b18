//! history/mod.rs
//! Session history: the operation log, its views, and persistence.

pub mod types;
pub mod store;
pub mod persist;

pub use types::*;
pub use store::*;
pub use persist::*;
