//! constants.rs
//! Session-wide defaults and limits.

/// Minimum duration in milliseconds.
/// Substituted for zero/negative timings before any division.
pub const MIN_DURATION_MS: f64 = 0.001;

/// Throughput sanity cap in MB/s (10 GB/s). Anything above is reported as 0.
pub const MAX_SPEED_MBPS: f64 = 10_000.0;

/// Bytes per megabyte used for throughput.
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Max length of the base64 input field carried inside a share token.
pub const MAX_URL_DATA_SIZE: usize = 2000;

/// Query parameter carrying the share token.
pub const SHARE_STATE_PARAM: &str = "state";

/// Share token schema written by this crate.
/// Tokens without a schema tag are legacy (0).
pub const SHARE_SCHEMA_V1: u8 = 1;
pub const SHARE_SCHEMA_LEGACY: u8 = 0;

/// Last-known-good codec version used when the requested one fails to load.
pub const FALLBACK_CODEC_VERSION: &str = "0.3.2";

/// Version reported when the registry cannot be reached.
pub const DEFAULT_REGISTRY_VERSION: &str = "0.3.4";

/// Versions the built-in codec registry knows how to serve.
pub const BUILTIN_CODEC_VERSIONS: &[&str] = &["0.3.0", "0.3.1", "0.3.2", "0.3.3", "0.3.4"];

/// File extension for compressed output.
pub const LZ4_EXTENSION: &str = ".lz4";

/// Persistence keys.
pub const HISTORY_STORAGE_KEY: &str = "lz4-compression-history";
pub const METRICS_STORAGE_KEY: &str = "lz4-last-metrics";

/// History page size used when none is given.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default number of history points handed to charts.
pub const DEFAULT_CHART_POINTS: usize = 10;
