//! codecs/lz4.rs
//! LZ4 block codec (size-prepended, one block per payload).
use lz4_flex::block::{compress_prepend_size, decompress_size_prepended};

use crate::compression::{
    constants::{codec_names, MAX_DECOMPRESSED_SIZE, SIZE_PREFIX_LEN},
    types::{Codec, CodecError},
};

/// LZ4 block codec backed by `lz4_flex`.
/// Every registered version maps onto the same block format; the version only
/// tags the instance so callers can tell which one served a request.
#[derive(Debug, Clone)]
pub struct Lz4BlockCodec {
    version: String,
}

impl Lz4BlockCodec {
    pub fn new(version: impl Into<String>) -> Self {
        Self { version: version.into() }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn process_failed(&self, msg: impl Into<String>) -> CodecError {
        CodecError::ProcessFailed { codec: self.name(), msg: msg.into() }
    }
}

impl Codec for Lz4BlockCodec {
    fn name(&self) -> String {
        format!("{}@{}", codec_names::LZ4_BLOCK, self.version)
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(compress_prepend_size(input))
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        let Some(prefix) = input.get(..SIZE_PREFIX_LEN) else {
            return Err(self.process_failed("input too short for size prefix"));
        };
        let mut len = [0u8; SIZE_PREFIX_LEN];
        len.copy_from_slice(prefix);
        let declared = u32::from_le_bytes(len) as usize;
        if declared > MAX_DECOMPRESSED_SIZE {
            return Err(self.process_failed(format!(
                "declared size too large: {} > {}",
                declared, MAX_DECOMPRESSED_SIZE
            )));
        }

        decompress_size_prepended(input).map_err(|e| self.process_failed(e.to_string()))
    }
}
