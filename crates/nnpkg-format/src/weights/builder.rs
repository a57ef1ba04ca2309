use super::{BlobDataType, BlobMetadata, WEIGHT_ALIGN, WeightHeader, align_up};

/// Builds a weight file in memory.
///
/// The header is reserved up front and filled in by [`finish`](Self::finish).
/// Records are aligned as they are appended, so the file ends right after the
/// last blob.
#[derive(Debug)]
pub struct WeightFileBuilder {
    buf: Vec<u8>,
    count: u32,
}

impl WeightFileBuilder {
    pub fn new() -> Self {
        Self {
            buf: vec![0; WEIGHT_ALIGN as usize],
            count: 0,
        }
    }

    /// Append one blob and return the offset of its metadata record.
    pub fn append(&mut self, data_type: BlobDataType, bytes: &[u8]) -> u64 {
        self.pad_to_record();
        let metadata_offset = self.buf.len() as u64;
        let blob_offset = metadata_offset + WEIGHT_ALIGN;

        let metadata = BlobMetadata::new(data_type, bytes.len() as u64, blob_offset);
        self.buf.extend_from_slice(&metadata.to_bytes());
        self.buf.extend_from_slice(bytes);
        self.count += 1;

        metadata_offset
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Current size of the file, header included.
    pub fn len(&self) -> u64 {
        self.buf.len() as u64
    }

    /// Finish with the number of appended blobs in the header.
    pub fn finish(self) -> Vec<u8> {
        let count = self.count;
        self.finish_with_count(count)
    }

    /// Finish with `count` in the header.
    ///
    /// Packages record every constant of the graph here, immediates included,
    /// so the count can exceed the number of stored blobs.
    pub fn finish_with_count(mut self, count: u32) -> Vec<u8> {
        let header = WeightHeader::new(count);
        self.buf[..WEIGHT_ALIGN as usize].copy_from_slice(&header.to_bytes());
        self.buf
    }

    fn pad_to_record(&mut self) {
        let aligned = align_up(self.buf.len() as u64, WEIGHT_ALIGN) as usize;
        self.buf.resize(aligned, 0);
    }
}

impl Default for WeightFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
