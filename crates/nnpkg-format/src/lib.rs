#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! On-disk formats of a model package.
//!
//! - [`program`]: the target IR program and its model wrapper, stored as
//!   `Data/model.mlmodel`.
//! - [`weights`]: the 64-byte aligned blob file at `Data/weights/weights.bin`.
//! - [`manifest`]: `Manifest.json` at the package root.

pub mod dump;
pub mod manifest;
pub mod program;
pub mod weights;

#[cfg(test)]
mod program_tests;

pub use manifest::Manifest;
pub use program::{
    ArrayDataType, Binding, Block, DataType, FeatureDescription, Function, Model,
    ModelDescription, NamedValueType, Operation, Program, TensorData, TensorType, Value,
    ValueData,
};
pub use weights::{BlobDataType, BlobMetadata, WeightFile, WeightFileBuilder, WeightHeader};

/// Errors raised while decoding package files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid program bytes: {0}")]
    Program(#[from] postcard::Error),

    #[error("weight file truncated: {needed} bytes needed at offset {offset}, file has {len}")]
    Truncated { offset: u64, needed: u64, len: u64 },

    #[error("weight record offset {0} is not 64-byte aligned")]
    Misaligned(u64),

    #[error("bad blob sentinel {found:#010x} at offset {offset}")]
    BadSentinel { offset: u64, found: u32 },

    #[error("unknown blob data type {0}")]
    UnknownBlobType(u32),

    #[error("unsupported weight file version {0}")]
    UnsupportedVersion(u32),
}

pub type Result<T> = std::result::Result<T, Error>;
