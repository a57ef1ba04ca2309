//! On-disk layout of a model package.
//!
//! ```text
//! <token>.mlpackage/
//!   Manifest.json
//!   Data/
//!     model.mlmodel
//!     weights/weights.bin
//! ```

use std::path::{Path, PathBuf};

use nnpkg_format::manifest::{MODEL_FILE_NAME, WEIGHTS_DIR_NAME};

pub const PACKAGE_EXTENSION: &str = "mlpackage";
pub const DATA_DIR_NAME: &str = "Data";
pub const MANIFEST_FILE_NAME: &str = "Manifest.json";
pub const WEIGHTS_FILE_NAME: &str = "weights.bin";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageLayout {
    root: PathBuf,
}

impl PackageLayout {
    /// Layout of `<working_dir>/<token>.mlpackage`.
    pub fn new(working_dir: &Path, token: &str) -> Self {
        Self::at(working_dir.join(format!("{token}.{PACKAGE_EXTENSION}")))
    }

    pub fn at(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(DATA_DIR_NAME)
    }

    pub fn model_file(&self) -> PathBuf {
        self.data_dir().join(MODEL_FILE_NAME)
    }

    pub fn weights_dir(&self) -> PathBuf {
        self.data_dir().join(WEIGHTS_DIR_NAME)
    }

    pub fn weights_file(&self) -> PathBuf {
        self.weights_dir().join(WEIGHTS_FILE_NAME)
    }

    pub fn manifest_file(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE_NAME)
    }

    pub fn into_root(self) -> PathBuf {
        self.root
    }
}

/// 32 uppercase hex characters.
pub fn package_token() -> String {
    let bytes: [u8; 16] = rand::random();
    hex::encode_upper(bytes)
}

/// Random version-4 UUID in lowercase hyphenated form.
pub fn uuid_v4() -> String {
    let mut bytes: [u8; 16] = rand::random();
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    let hex = hex::encode(bytes);
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}
