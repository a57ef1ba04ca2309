use serde::{Deserialize, Serialize};

use crate::OperandDataType;

/// Identifier of an operand, unique within one graph.
pub type OperandId = u64;

/// Highest tensor rank the package format can describe.
pub const MAX_RANK: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperandKind {
    Input,
    Constant,
    Output,
}

/// Element type and shape. An empty shape is a scalar.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperandDescriptor {
    pub data_type: OperandDataType,
    #[serde(default)]
    pub shape: Vec<u32>,
}

impl OperandDescriptor {
    pub fn new(data_type: OperandDataType, shape: impl Into<Vec<u32>>) -> Self {
        Self {
            data_type,
            shape: shape.into(),
        }
    }

    pub fn scalar(data_type: OperandDataType) -> Self {
        Self::new(data_type, Vec::new())
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    pub fn element_count(&self) -> u64 {
        self.shape.iter().map(|&d| u64::from(d)).product()
    }

    /// Total size in bytes, `None` if it does not fit in `u64`.
    pub fn byte_length(&self) -> Option<u64> {
        self.shape
            .iter()
            .try_fold(self.data_type.byte_size() as u64, |acc, &d| {
                acc.checked_mul(u64::from(d))
            })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operand {
    pub kind: OperandKind,
    #[serde(flatten)]
    pub descriptor: OperandDescriptor,
    /// User-visible name; present on inputs and usually on outputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Operand {
    pub fn input(name: impl Into<String>, descriptor: OperandDescriptor) -> Self {
        Self {
            kind: OperandKind::Input,
            descriptor,
            name: Some(name.into()),
        }
    }

    pub fn output(name: Option<String>, descriptor: OperandDescriptor) -> Self {
        Self {
            kind: OperandKind::Output,
            descriptor,
            name,
        }
    }

    pub fn constant(descriptor: OperandDescriptor) -> Self {
        Self {
            kind: OperandKind::Constant,
            descriptor,
            name: None,
        }
    }

    pub fn data_type(&self) -> OperandDataType {
        self.descriptor.data_type
    }

    pub fn shape(&self) -> &[u32] {
        &self.descriptor.shape
    }
}

/// Raw little-endian bytes of a constant operand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantOperand {
    #[serde(flatten)]
    pub descriptor: OperandDescriptor,
    pub bytes: Vec<u8>,
}

impl ConstantOperand {
    pub fn new(descriptor: OperandDescriptor, bytes: Vec<u8>) -> Self {
        Self { descriptor, bytes }
    }

    pub fn from_f32(shape: impl Into<Vec<u32>>, values: &[f32]) -> Self {
        let bytes = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        Self::new(OperandDescriptor::new(OperandDataType::Float32, shape), bytes)
    }

    pub fn from_i32(shape: impl Into<Vec<u32>>, values: &[i32]) -> Self {
        let bytes = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        Self::new(OperandDescriptor::new(OperandDataType::Int32, shape), bytes)
    }
}
