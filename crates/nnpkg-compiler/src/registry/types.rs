//! Element type mapping between the graph IR, the target IR and the weight
//! file. Graph to target is total; the other directions are partial.

use nnpkg_core::OperandDataType;
use nnpkg_format::{ArrayDataType, BlobDataType, DataType};

pub fn to_target(data_type: OperandDataType) -> DataType {
    match data_type {
        OperandDataType::Float32 => DataType::Float32,
        OperandDataType::Float16 => DataType::Float16,
        OperandDataType::Int32 => DataType::Int32,
        OperandDataType::Uint32 => DataType::Uint32,
        OperandDataType::Int64 => DataType::Int64,
        OperandDataType::Uint64 => DataType::Uint64,
        OperandDataType::Int8 => DataType::Int8,
        OperandDataType::Uint8 => DataType::Uint8,
    }
}

/// `None` for target-only types (bool, string).
pub fn to_operand(data_type: DataType) -> Option<OperandDataType> {
    Some(match data_type {
        DataType::Float32 => OperandDataType::Float32,
        DataType::Float16 => OperandDataType::Float16,
        DataType::Int32 => OperandDataType::Int32,
        DataType::Uint32 => OperandDataType::Uint32,
        DataType::Int64 => OperandDataType::Int64,
        DataType::Uint64 => OperandDataType::Uint64,
        DataType::Int8 => OperandDataType::Int8,
        DataType::Uint8 => OperandDataType::Uint8,
        DataType::Bool | DataType::String => return None,
    })
}

/// Blob tag for weight-file storage; `None` if the type cannot be stored.
pub fn to_blob(data_type: DataType) -> Option<BlobDataType> {
    match data_type {
        DataType::Float16 => Some(BlobDataType::Float16),
        DataType::Float32 => Some(BlobDataType::Float32),
        DataType::Uint8 => Some(BlobDataType::UInt8),
        DataType::Int8 => Some(BlobDataType::Int8),
        DataType::Int32
        | DataType::Uint32
        | DataType::Int64
        | DataType::Uint64
        | DataType::Bool
        | DataType::String => None,
    }
}

/// Element type of a package feature; `None` if features cannot carry it.
pub fn to_array(data_type: OperandDataType) -> Option<ArrayDataType> {
    match data_type {
        OperandDataType::Float32 => Some(ArrayDataType::Float32),
        OperandDataType::Float16 => Some(ArrayDataType::Float16),
        OperandDataType::Int32 => Some(ArrayDataType::Int32),
        _ => None,
    }
}
