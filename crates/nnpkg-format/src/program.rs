//! Target IR: a typed SSA program of named operations.
//!
//! Operands are referred to by name. Every operation input is a list of
//! bindings, each either a name produced earlier in the block or an
//! immediate value. Attributes are always immediate.

use half::f16;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Model specification version written to every package.
pub const SPECIFICATION_VERSION: u32 = 8;
pub const PROGRAM_VERSION: u32 = 1;
pub const MAIN_FUNCTION: &str = "main";
pub const OPSET: &str = "CoreML7";

/// Element type of a target IR tensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Float16,
    Float32,
    Int8,
    Uint8,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Bool,
    String,
}

impl DataType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Float16 => "fp16",
            Self::Float32 => "fp32",
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Bool => "bool",
            Self::String => "string",
        }
    }

    /// Spelling accepted by the `dtype` parameter of `cast`.
    pub fn cast_name(self) -> Option<&'static str> {
        match self {
            Self::Float16 | Self::Float32 | Self::Int8 | Self::Uint8 | Self::Int32 | Self::Bool => {
                Some(self.name())
            }
            Self::Uint32 | Self::Int64 | Self::Uint64 | Self::String => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorType {
    pub data_type: DataType,
    /// Empty for scalars.
    pub dimensions: Vec<u32>,
}

impl TensorType {
    pub fn new(data_type: DataType, dimensions: impl Into<Vec<u32>>) -> Self {
        Self {
            data_type,
            dimensions: dimensions.into(),
        }
    }

    pub fn scalar(data_type: DataType) -> Self {
        Self::new(data_type, Vec::new())
    }

    pub fn rank(&self) -> usize {
        self.dimensions.len()
    }
}

/// Payload of an immediate value. fp16 data travels as raw little-endian bytes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TensorData {
    Floats(Vec<f32>),
    Ints(Vec<i32>),
    Bools(Vec<bool>),
    Strings(Vec<String>),
    Bytes(Vec<u8>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ValueData {
    Immediate(TensorData),
    /// Reference into the weight file. `offset` points at the blob's
    /// metadata record, not at the blob itself.
    BlobFile { file_name: String, offset: u64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Value {
    pub ty: TensorType,
    pub data: ValueData,
}

impl Value {
    pub fn immediate(ty: TensorType, data: TensorData) -> Self {
        Self {
            ty,
            data: ValueData::Immediate(data),
        }
    }

    pub fn blob_file(ty: TensorType, file_name: impl Into<String>, offset: u64) -> Self {
        Self {
            ty,
            data: ValueData::BlobFile {
                file_name: file_name.into(),
                offset,
            },
        }
    }

    pub fn scalar_f32(value: f32) -> Self {
        Self::immediate(
            TensorType::scalar(DataType::Float32),
            TensorData::Floats(vec![value]),
        )
    }

    pub fn scalar_f16(value: f32) -> Self {
        Self::immediate(
            TensorType::scalar(DataType::Float16),
            TensorData::Bytes(f16::from_f32(value).to_le_bytes().to_vec()),
        )
    }

    pub fn scalar_i32(value: i32) -> Self {
        Self::immediate(
            TensorType::scalar(DataType::Int32),
            TensorData::Ints(vec![value]),
        )
    }

    pub fn scalar_bool(value: bool) -> Self {
        Self::immediate(
            TensorType::scalar(DataType::Bool),
            TensorData::Bools(vec![value]),
        )
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::immediate(
            TensorType::scalar(DataType::String),
            TensorData::Strings(vec![value.into()]),
        )
    }

    /// Rank-1 int32 tensor.
    pub fn ints(values: &[i32]) -> Self {
        Self::immediate(
            TensorType::new(DataType::Int32, [values.len() as u32]),
            TensorData::Ints(values.to_vec()),
        )
    }

    /// Rank-1 int32 tensor from unsigned attribute values.
    pub fn ints_from_u32(values: &[u32]) -> Self {
        let ints: Vec<i32> = values.iter().map(|&v| v as i32).collect();
        Self::ints(&ints)
    }

    /// Float scalar typed as `data_type`; `None` for non-float types.
    pub fn float_of(data_type: DataType, value: f32) -> Option<Self> {
        match data_type {
            DataType::Float32 => Some(Self::scalar_f32(value)),
            DataType::Float16 => Some(Self::scalar_f16(value)),
            _ => None,
        }
    }

    /// Immediate floats decoded to `f32`, including fp16 bytes.
    pub fn to_f32_vec(&self) -> Option<Vec<f32>> {
        match &self.data {
            ValueData::Immediate(TensorData::Floats(v)) => Some(v.clone()),
            ValueData::Immediate(TensorData::Bytes(b)) if self.ty.data_type == DataType::Float16 => {
                Some(
                    b.chunks_exact(2)
                        .map(|c| f16::from_le_bytes([c[0], c[1]]).to_f32())
                        .collect(),
                )
            }
            ValueData::Immediate(TensorData::Ints(v)) => {
                Some(v.iter().map(|&i| i as f32).collect())
            }
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Binding {
    Name(String),
    Value(Value),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedValueType {
    pub name: String,
    pub ty: TensorType,
}

impl NamedValueType {
    pub fn new(name: impl Into<String>, ty: TensorType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub op_type: String,
    pub inputs: IndexMap<String, Vec<Binding>>,
    pub outputs: Vec<NamedValueType>,
    pub attributes: IndexMap<String, Value>,
}

impl Operation {
    pub fn new(op_type: impl Into<String>) -> Self {
        Self {
            op_type: op_type.into(),
            inputs: IndexMap::new(),
            outputs: Vec::new(),
            attributes: IndexMap::new(),
        }
    }

    /// Bind `param` to a named operand. Repeating a param appends.
    pub fn arg(mut self, param: &str, name: impl Into<String>) -> Self {
        self.bindings_mut(param).push(Binding::Name(name.into()));
        self
    }

    /// Bind `param` to an immediate value.
    pub fn value(mut self, param: &str, value: Value) -> Self {
        self.bindings_mut(param).push(Binding::Value(value));
        self
    }

    pub fn output(mut self, output: NamedValueType) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn attribute(mut self, key: &str, value: Value) -> Self {
        self.attributes.insert(key.to_owned(), value);
        self
    }

    pub fn input(&self, param: &str) -> Option<&[Binding]> {
        self.inputs.get(param).map(Vec::as_slice)
    }

    /// Name bound to `param`, if it is bound to exactly one name.
    pub fn input_name(&self, param: &str) -> Option<&str> {
        match self.input(param)? {
            [Binding::Name(name)] => Some(name),
            _ => None,
        }
    }

    /// Immediate value bound to `param`, if it is bound to exactly one value.
    pub fn input_value(&self, param: &str) -> Option<&Value> {
        match self.input(param)? {
            [Binding::Value(value)] => Some(value),
            _ => None,
        }
    }

    fn bindings_mut(&mut self, param: &str) -> &mut Vec<Binding> {
        self.inputs.entry(param.to_owned()).or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub operations: Vec<Operation>,
    pub outputs: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub inputs: Vec<NamedValueType>,
    pub opset: String,
    pub block: Block,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub version: u32,
    pub functions: IndexMap<String, Function>,
}

impl Program {
    pub fn main(&self) -> Option<&Function> {
        self.functions.get(MAIN_FUNCTION)
    }
}

/// Element types a package input or output may have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrayDataType {
    Float32,
    Float16,
    Int32,
}

impl ArrayDataType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Float32 => "FLOAT32",
            Self::Float16 => "FLOAT16",
            Self::Int32 => "INT32",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDescription {
    pub name: String,
    pub data_type: ArrayDataType,
    pub shape: Vec<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescription {
    pub inputs: Vec<FeatureDescription>,
    pub outputs: Vec<FeatureDescription>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub specification_version: u32,
    pub is_updatable: bool,
    pub description: ModelDescription,
    pub program: Program,
}

impl Model {
    /// A model with an empty `main` function.
    pub fn new() -> Self {
        let main = Function {
            inputs: Vec::new(),
            opset: OPSET.to_owned(),
            block: Block::default(),
        };
        Self {
            specification_version: SPECIFICATION_VERSION,
            is_updatable: false,
            description: ModelDescription::default(),
            program: Program {
                version: PROGRAM_VERSION,
                functions: IndexMap::from([(MAIN_FUNCTION.to_owned(), main)]),
            },
        }
    }

    pub fn main(&self) -> &Function {
        self.program
            .main()
            .unwrap_or_else(|| panic!("Model: `{MAIN_FUNCTION}` function missing"))
    }

    pub fn main_mut(&mut self) -> &mut Function {
        self.program
            .functions
            .get_mut(MAIN_FUNCTION)
            .unwrap_or_else(|| panic!("Model: `{MAIN_FUNCTION}` function missing"))
    }

    pub fn from_bytes(bytes: &[u8]) -> crate::Result<Self> {
        Ok(postcard::from_bytes(bytes)?)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        postcard::to_allocvec(self).expect("serialization should not fail")
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}
