//! lz4-session
//!
//! Compression session engine: versioned codec loading, safe performance
//! metrics, an append-only operation history, and compact share tokens.
//! No UI, no network I/O; remote pieces plug in through traits.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Engine components
pub mod compression;
pub mod telemetry;
pub mod share;
pub mod history;
pub mod versions;

// Orchestrator
pub mod session;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{Codec, CodecError, CodecLoader, CodecRegistry, CodecResolver};
    pub use crate::history::{FileStore, HistoryEntry, HistoryFilter, HistoryStore, KeyValueStore, MemoryStore, Page};
    pub use crate::session::{InputSource, OutputText, ProcessOutcome, ProcessRequest, Session, SessionConfig};
    pub use crate::share::{DecodedShare, ShareToken};
    pub use crate::telemetry::PerformanceMetrics;
    pub use crate::types::{Mode, SessionError, SessionFields};
    pub use crate::versions::{VersionCatalog, VersionInfo};
}
