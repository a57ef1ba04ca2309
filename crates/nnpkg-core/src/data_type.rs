use std::fmt;

use serde::{Deserialize, Serialize};

/// Element type of a graph operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum OperandDataType {
    Float32 = 0,
    Float16 = 1,
    Int32 = 2,
    Uint32 = 3,
    Int64 = 4,
    Uint64 = 5,
    Int8 = 6,
    Uint8 = 7,
}

impl OperandDataType {
    pub const ALL: [OperandDataType; 8] = [
        Self::Float32,
        Self::Float16,
        Self::Int32,
        Self::Uint32,
        Self::Int64,
        Self::Uint64,
        Self::Int8,
        Self::Uint8,
    ];

    /// Size of one element in bytes.
    pub const fn byte_size(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Float16 => 2,
            Self::Float32 | Self::Int32 | Self::Uint32 => 4,
            Self::Int64 | Self::Uint64 => 8,
        }
    }

    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float16)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Float32 => "float32",
            Self::Float16 => "float16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
        }
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for OperandDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of element types, one bit per [`OperandDataType`].
///
/// Serialized as a plain list so capability tables stay readable as JSON.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<OperandDataType>", into = "Vec<OperandDataType>")]
pub struct SupportedDataTypes(u8);

impl SupportedDataTypes {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn from_slice(types: &[OperandDataType]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < types.len() {
            bits |= types[i].bit();
            i += 1;
        }
        Self(bits)
    }

    pub const fn has(self, data_type: OperandDataType) -> bool {
        self.0 & data_type.bit() != 0
    }

    pub fn insert(&mut self, data_type: OperandDataType) {
        self.0 |= data_type.bit();
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = OperandDataType> {
        OperandDataType::ALL.into_iter().filter(move |t| self.has(*t))
    }
}

impl From<Vec<OperandDataType>> for SupportedDataTypes {
    fn from(types: Vec<OperandDataType>) -> Self {
        Self::from_slice(&types)
    }
}

impl From<SupportedDataTypes> for Vec<OperandDataType> {
    fn from(set: SupportedDataTypes) -> Self {
        set.iter().collect()
    }
}

impl FromIterator<OperandDataType> for SupportedDataTypes {
    fn from_iter<I: IntoIterator<Item = OperandDataType>>(iter: I) -> Self {
        let mut set = Self::empty();
        for t in iter {
            set.insert(t);
        }
        set
    }
}

impl fmt::Debug for SupportedDataTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
