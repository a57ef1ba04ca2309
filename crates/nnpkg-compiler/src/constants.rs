//! Constant placement.
//!
//! Scalars and int32 tensors become immediate values inside the program.
//! Everything else is appended to the weight file and referenced by the
//! offset of its metadata record. A constant is never stored both ways.

use indexmap::IndexMap;
use nnpkg_core::{ConstantOperand, DataTypeLimits, OperandDataType, OperandDescriptor, OperandId};
use nnpkg_format::weights::WEIGHTS_PATH;
use nnpkg_format::{self as ir, TensorData, TensorType, Value, WeightFileBuilder};

use crate::registry::{OperandRegistry, types};
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Immediate,
    File,
}

pub fn placement_for(descriptor: &OperandDescriptor) -> Placement {
    if descriptor.is_scalar() || descriptor.data_type == OperandDataType::Int32 {
        Placement::Immediate
    } else {
        Placement::File
    }
}

/// Emit one `const` operation per constant, in map order, appending file
/// constants to `weights`.
pub fn place_constants(
    constants: &IndexMap<OperandId, ConstantOperand>,
    registry: &OperandRegistry,
    limits: &DataTypeLimits,
    weights: &mut WeightFileBuilder,
) -> Result<Vec<ir::Operation>> {
    constants
        .iter()
        .map(|(&id, constant)| place_constant(id, constant, registry, limits, weights))
        .collect()
}

fn place_constant(
    id: OperandId,
    constant: &ConstantOperand,
    registry: &OperandRegistry,
    limits: &DataTypeLimits,
    weights: &mut WeightFileBuilder,
) -> Result<ir::Operation> {
    let descriptor = &constant.descriptor;
    if !limits.constant.has(descriptor.data_type) {
        return Err(Error::not_supported(format!(
            "Unsupported data type {} for constant.",
            descriptor.data_type
        )));
    }
    let expected = descriptor.byte_length();
    if expected != Some(constant.bytes.len() as u64) {
        return Err(Error::Unknown(format!(
            "constant {id} holds {} bytes, its descriptor needs {}",
            constant.bytes.len(),
            expected.map_or_else(|| "more than u64::MAX".to_owned(), |n| n.to_string()),
        )));
    }

    let info = registry.lookup(id);
    let ty = TensorType::new(info.data_type, descriptor.shape.clone());
    let value = match placement_for(descriptor) {
        Placement::Immediate => {
            let data = immediate_data(descriptor.data_type, &constant.bytes)?;
            Value::immediate(ty, data)
        }
        Placement::File => {
            let blob_type = types::to_blob(info.data_type)
                .ok_or_else(|| Error::not_supported("Unsupported constant type."))?;
            let offset = weights.append(blob_type, &constant.bytes);
            tracing::debug!(id, offset, bytes = constant.bytes.len(), "stored constant blob");
            Value::blob_file(ty, WEIGHTS_PATH, offset)
        }
    };

    Ok(ir::Operation::new("const")
        .attribute("name", Value::string(info.name.clone()))
        .attribute("val", value)
        .output(info.named_type()))
}

fn immediate_data(data_type: OperandDataType, bytes: &[u8]) -> Result<TensorData> {
    match data_type {
        OperandDataType::Float32 => Ok(TensorData::Floats(
            bytes
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        )),
        OperandDataType::Float16 => Ok(TensorData::Bytes(bytes.to_vec())),
        OperandDataType::Int32 => Ok(TensorData::Ints(
            bytes
                .chunks_exact(4)
                .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        )),
        other => Err(Error::not_supported(format!(
            "Unsupported data type {other} for immediate constant."
        ))),
    }
}
