#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Graph IR consumed by the nnpkg compiler.
//!
//! A graph is a set of operands keyed by id plus an ordered list of operations
//! over them. The operation list is expected to be topologically sorted by
//! the producer; nothing in this crate re-validates that.
//!
//! [`DataTypeLimits`] describes which element types each operator port accepts
//! on a given backend. It is negotiated by the host and handed to the compiler
//! read-only.

mod data_type;
mod graph;
mod invariants;
mod limits;
mod operand;
pub mod operation;

#[cfg(test)]
mod data_type_tests;
#[cfg(test)]
mod limits_tests;

pub use data_type::{OperandDataType, SupportedDataTypes};
pub use graph::GraphInfo;
pub use limits::DataTypeLimits;
pub use operand::{ConstantOperand, MAX_RANK, Operand, OperandDescriptor, OperandId, OperandKind};
pub use operation::Operation;
