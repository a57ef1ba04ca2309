//! Weight file: a 64-byte header followed by (metadata, blob) pairs.
//!
//! ```text
//! 0     header        count, version
//! 64    metadata[0]   sentinel, type, size, blob offset
//! 128   blob[0]       raw bytes, zero padded to 64 unless last
//! ...   metadata[1]
//! ```
//!
//! Every record starts on a 64-byte boundary. The file ends with the last
//! blob's final byte. Programs reference a blob by the
//! offset of its metadata record.

mod builder;
mod header;
mod reader;

#[cfg(test)]
mod header_tests;

pub use builder::WeightFileBuilder;
pub use header::{BlobDataType, BlobMetadata, WeightHeader};
pub use reader::{WeightEntry, WeightFile};

/// Alignment of every record in the file.
pub const WEIGHT_ALIGN: u64 = 64;

/// Format version stored in the header.
pub const WEIGHTS_VERSION: u32 = 2;

/// Marks the start of every metadata record.
pub const BLOB_SENTINEL: u32 = 0xDEAD_BEEF;

/// Path programs use to reference the weight file.
pub const WEIGHTS_PATH: &str = "@model_path/weights/weights.bin";

/// Round `value` up to the next multiple of `align` (a power of two).
#[inline]
pub fn align_up(value: u64, align: u64) -> u64 {
    (value + align - 1) & !(align - 1)
}
