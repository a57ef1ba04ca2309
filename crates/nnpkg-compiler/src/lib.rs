#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Graph-to-package compiler.
//!
//! [`GraphCompiler::build`] is pure: it registers operands, lowers every
//! operation into target IR and places constants, producing a [`BuildPlan`].
//! [`BuildPlan::write_to`] then lays the package out on disk. `compile` runs
//! both.
//!
//! ```text
//! GraphInfo ──► OperandRegistry ──► Lowerer ──► Model + weights ──► .mlpackage
//! ```

pub mod constants;
mod invariants;
pub mod lower;
pub mod package;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_utils;

pub use package::{BuildPlan, CompiledPackage, GraphCompiler};
pub use registry::{OperandInfo, OperandRegistry};

/// Caller-visible error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The graph cannot be expressed in the package format.
    NotSupported,
    /// Anything that is not a property of the graph.
    Unknown,
}

/// Errors that can occur while building or writing a package.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    NotSupported(String),

    #[error("Number of operands in graph exceeds limit.")]
    CapacityExceeded,

    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Unknown(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotSupported(_) => ErrorKind::NotSupported,
            Error::CapacityExceeded | Error::Io { .. } | Error::Unknown(_) => ErrorKind::Unknown,
        }
    }

    pub(crate) fn not_supported(message: impl Into<String>) -> Self {
        Error::NotSupported(message.into())
    }

    pub(crate) fn io(context: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| Error::Io { context, source }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;
