use nnpkg_core::OperandDataType;
use nnpkg_format::{ArrayDataType, BlobDataType, DataType};

use super::types::{to_array, to_blob, to_operand, to_target};

#[test]
fn graph_types_map_to_target_and_back() {
    for ty in OperandDataType::ALL {
        assert_eq!(to_operand(to_target(ty)), Some(ty), "{ty}");
    }
}

#[test]
fn target_only_types_have_no_graph_type() {
    assert_eq!(to_operand(DataType::Bool), None);
    assert_eq!(to_operand(DataType::String), None);
}

#[test]
fn only_floats_and_bytes_are_stored_as_blobs() {
    assert_eq!(to_blob(DataType::Float32), Some(BlobDataType::Float32));
    assert_eq!(to_blob(DataType::Float16), Some(BlobDataType::Float16));
    assert_eq!(to_blob(DataType::Uint8), Some(BlobDataType::UInt8));
    assert_eq!(to_blob(DataType::Int8), Some(BlobDataType::Int8));

    for ty in [
        DataType::Int32,
        DataType::Uint32,
        DataType::Int64,
        DataType::Uint64,
        DataType::Bool,
        DataType::String,
    ] {
        assert_eq!(to_blob(ty), None, "{}", ty.name());
    }
}

#[test]
fn features_carry_float32_float16_and_int32() {
    assert_eq!(to_array(OperandDataType::Float32), Some(ArrayDataType::Float32));
    assert_eq!(to_array(OperandDataType::Float16), Some(ArrayDataType::Float16));
    assert_eq!(to_array(OperandDataType::Int32), Some(ArrayDataType::Int32));

    let unsupported: Vec<_> = OperandDataType::ALL
        .into_iter()
        .filter(|&ty| to_array(ty).is_none())
        .collect();
    assert_eq!(
        unsupported,
        [
            OperandDataType::Uint32,
            OperandDataType::Int64,
            OperandDataType::Uint64,
            OperandDataType::Int8,
            OperandDataType::Uint8,
        ]
    );
}
