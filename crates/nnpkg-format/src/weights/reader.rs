use crate::{Error, Result};

use super::{BlobDataType, BlobMetadata, WEIGHT_ALIGN, WEIGHTS_VERSION, WeightHeader};

/// A validated view over weight file bytes.
#[derive(Debug)]
pub struct WeightFile<'a> {
    bytes: &'a [u8],
    header: WeightHeader,
}

/// One decoded (metadata, blob) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightEntry<'a> {
    pub metadata_offset: u64,
    pub data_type: BlobDataType,
    pub blob_offset: u64,
    pub bytes: &'a [u8],
}

impl<'a> WeightFile<'a> {
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let header = WeightHeader::from_bytes(record(bytes, 0)?);
        if header.version != WEIGHTS_VERSION {
            return Err(Error::UnsupportedVersion(header.version));
        }
        Ok(Self { bytes, header })
    }

    pub fn header(&self) -> &WeightHeader {
        &self.header
    }

    /// Decode the metadata record at `offset` and the blob it describes.
    pub fn entry_at(&self, offset: u64) -> Result<WeightEntry<'a>> {
        if offset % WEIGHT_ALIGN != 0 {
            return Err(Error::Misaligned(offset));
        }
        let metadata = BlobMetadata::from_bytes(record(self.bytes, offset)?);
        if !metadata.validate_sentinel() {
            return Err(Error::BadSentinel {
                offset,
                found: metadata.sentinel,
            });
        }
        let data_type = metadata
            .blob_data_type()
            .ok_or(Error::UnknownBlobType(metadata.data_type))?;
        if metadata.offset % WEIGHT_ALIGN != 0 {
            return Err(Error::Misaligned(metadata.offset));
        }

        let bytes = slice(self.bytes, metadata.offset, metadata.size_in_bytes)?;
        Ok(WeightEntry {
            metadata_offset: offset,
            data_type,
            blob_offset: metadata.offset,
            bytes,
        })
    }

    /// Blob bytes referenced by a metadata offset.
    pub fn blob_at(&self, offset: u64) -> Result<&'a [u8]> {
        Ok(self.entry_at(offset)?.bytes)
    }

    /// Walk all stored records in file order, up to the end of the file.
    ///
    /// The header count is not used as a bound: it counts immediates too.
    pub fn entries(&self) -> Result<Vec<WeightEntry<'a>>> {
        let mut entries = Vec::new();
        let mut offset = WEIGHT_ALIGN;
        while offset < self.bytes.len() as u64 {
            let entry = self.entry_at(offset)?;
            offset = super::align_up(entry.blob_offset + entry.bytes.len() as u64, WEIGHT_ALIGN);
            entries.push(entry);
        }
        Ok(entries)
    }
}

fn slice(bytes: &[u8], offset: u64, len: u64) -> Result<&[u8]> {
    let truncated = || Error::Truncated {
        offset,
        needed: len,
        len: bytes.len() as u64,
    };
    let end = offset.checked_add(len).ok_or_else(truncated)?;
    if end > bytes.len() as u64 {
        return Err(truncated());
    }
    Ok(&bytes[offset as usize..end as usize])
}

fn record(bytes: &[u8], offset: u64) -> Result<&[u8; 64]> {
    let raw = slice(bytes, offset, WEIGHT_ALIGN)?;
    Ok(raw.try_into().expect("slice is exactly one record long"))
}
