use super::{BLOB_SENTINEL, WEIGHTS_VERSION};

/// Element type tag of a stored blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BlobDataType {
    Float16 = 1,
    Float32 = 2,
    UInt8 = 3,
    Int8 = 4,
    BFloat16 = 5,
    Int16 = 6,
    UInt16 = 7,
}

impl BlobDataType {
    pub fn from_u32(tag: u32) -> Option<Self> {
        Some(match tag {
            1 => Self::Float16,
            2 => Self::Float32,
            3 => Self::UInt8,
            4 => Self::Int8,
            5 => Self::BFloat16,
            6 => Self::Int16,
            7 => Self::UInt16,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Float16 => "fp16",
            Self::Float32 => "fp32",
            Self::UInt8 => "uint8",
            Self::Int8 => "int8",
            Self::BFloat16 => "bf16",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
        }
    }
}

/// First 64 bytes of the weight file.
///
/// - 0-3: number of constants in the graph, immediates included
/// - 4-7: format version
/// - 8-63: reserved
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, align(64))]
pub struct WeightHeader {
    pub count: u32,
    pub version: u32,
    pub _reserved: [u8; 56],
}

const _: () = assert!(std::mem::size_of::<WeightHeader>() == 64);

impl WeightHeader {
    pub fn new(count: u32) -> Self {
        Self {
            count,
            version: WEIGHTS_VERSION,
            _reserved: [0; 56],
        }
    }

    pub fn from_bytes(bytes: &[u8; 64]) -> Self {
        let mut reserved = [0u8; 56];
        reserved.copy_from_slice(&bytes[8..64]);

        Self {
            count: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            version: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            _reserved: reserved,
        }
    }

    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[0..4].copy_from_slice(&self.count.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8..64].copy_from_slice(&self._reserved);
        bytes
    }
}

/// 64-byte record preceding each blob.
///
/// - 0-3: sentinel `0xDEADBEEF`
/// - 4-7: [`BlobDataType`] tag
/// - 8-15: blob size in bytes
/// - 16-23: absolute offset of the blob
/// - 24-63: reserved
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, align(64))]
pub struct BlobMetadata {
    pub sentinel: u32,
    pub data_type: u32,
    pub size_in_bytes: u64,
    pub offset: u64,
    pub _reserved: [u8; 40],
}

const _: () = assert!(std::mem::size_of::<BlobMetadata>() == 64);

impl BlobMetadata {
    pub fn new(data_type: BlobDataType, size_in_bytes: u64, offset: u64) -> Self {
        Self {
            sentinel: BLOB_SENTINEL,
            data_type: data_type as u32,
            size_in_bytes,
            offset,
            _reserved: [0; 40],
        }
    }

    pub fn from_bytes(bytes: &[u8; 64]) -> Self {
        let mut reserved = [0u8; 40];
        reserved.copy_from_slice(&bytes[24..64]);

        let mut size = [0u8; 8];
        size.copy_from_slice(&bytes[8..16]);
        let mut offset = [0u8; 8];
        offset.copy_from_slice(&bytes[16..24]);

        Self {
            sentinel: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            data_type: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            size_in_bytes: u64::from_le_bytes(size),
            offset: u64::from_le_bytes(offset),
            _reserved: reserved,
        }
    }

    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[0..4].copy_from_slice(&self.sentinel.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.data_type.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.size_in_bytes.to_le_bytes());
        bytes[16..24].copy_from_slice(&self.offset.to_le_bytes());
        bytes[24..64].copy_from_slice(&self._reserved);
        bytes
    }

    pub fn validate_sentinel(&self) -> bool {
        self.sentinel == BLOB_SENTINEL
    }

    pub fn blob_data_type(&self) -> Option<BlobDataType> {
        BlobDataType::from_u32(self.data_type)
    }
}
