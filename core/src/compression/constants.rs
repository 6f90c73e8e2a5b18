/// Stable codec family names used in logs and error messages.
pub mod codec_names {
    pub const LZ4_BLOCK: &str = "lz4";
}

/// Width of the little-endian length prefix in front of every LZ4 block.
pub const SIZE_PREFIX_LEN: usize = 4;

/// Max decompressed size sanity bound (256 MiB).
/// A corrupted size prefix must not turn into a multi-GiB allocation.
pub const MAX_DECOMPRESSED_SIZE: usize = 256 * 1024 * 1024;
