use super::{BLOB_SENTINEL, BlobDataType, BlobMetadata, WeightHeader};

#[test]
fn header_layout() {
    let bytes = WeightHeader::new(3).to_bytes();

    assert_eq!(&bytes[0..4], &3u32.to_le_bytes());
    assert_eq!(&bytes[4..8], &2u32.to_le_bytes());
    assert!(bytes[8..].iter().all(|&b| b == 0));
}

#[test]
fn header_roundtrip() {
    let header = WeightHeader::new(17);
    assert_eq!(WeightHeader::from_bytes(&header.to_bytes()), header);
}

#[test]
fn metadata_layout() {
    let bytes = BlobMetadata::new(BlobDataType::Float32, 24, 128).to_bytes();

    assert_eq!(&bytes[0..4], &[0xEF, 0xBE, 0xAD, 0xDE]);
    assert_eq!(&bytes[4..8], &2u32.to_le_bytes());
    assert_eq!(&bytes[8..16], &24u64.to_le_bytes());
    assert_eq!(&bytes[16..24], &128u64.to_le_bytes());
    assert!(bytes[24..].iter().all(|&b| b == 0));
}

#[test]
fn metadata_roundtrip() {
    let metadata = BlobMetadata::new(BlobDataType::Int8, 5, 192);
    let decoded = BlobMetadata::from_bytes(&metadata.to_bytes());

    assert_eq!(decoded, metadata);
    assert_eq!(decoded.sentinel, BLOB_SENTINEL);
    assert_eq!(decoded.blob_data_type(), Some(BlobDataType::Int8));
}

#[test]
fn blob_type_tags() {
    assert_eq!(BlobDataType::Float16 as u32, 1);
    assert_eq!(BlobDataType::UInt16 as u32, 7);
    assert_eq!(BlobDataType::from_u32(3), Some(BlobDataType::UInt8));
    assert_eq!(BlobDataType::from_u32(0), None);
    assert_eq!(BlobDataType::from_u32(8), None);
}
