use crate::{OperandDataType, SupportedDataTypes};

#[test]
fn byte_sizes() {
    assert_eq!(OperandDataType::Float16.byte_size(), 2);
    assert_eq!(OperandDataType::Float32.byte_size(), 4);
    assert_eq!(OperandDataType::Uint64.byte_size(), 8);
    assert_eq!(OperandDataType::Int8.byte_size(), 1);
}

#[test]
fn set_membership() {
    let set = SupportedDataTypes::from_slice(&[OperandDataType::Float16, OperandDataType::Int32]);

    assert!(set.has(OperandDataType::Float16));
    assert!(set.has(OperandDataType::Int32));
    assert!(!set.has(OperandDataType::Float32));
    assert!(!SupportedDataTypes::empty().has(OperandDataType::Uint8));
}

#[test]
fn set_iterates_in_declaration_order() {
    let set: SupportedDataTypes = [OperandDataType::Uint8, OperandDataType::Float32]
        .into_iter()
        .collect();

    let types: Vec<_> = set.iter().collect();
    assert_eq!(types, vec![OperandDataType::Float32, OperandDataType::Uint8]);
}

#[test]
fn set_json_is_a_list() {
    let set = SupportedDataTypes::from_slice(&[OperandDataType::Float32, OperandDataType::Int8]);

    let json = serde_json::to_string(&set).unwrap();
    assert_eq!(json, r#"["float32","int8"]"#);

    let back: SupportedDataTypes = serde_json::from_str(&json).unwrap();
    assert_eq!(back, set);
}

#[test]
fn union_merges_bits() {
    let a = SupportedDataTypes::from_slice(&[OperandDataType::Float32]);
    let b = SupportedDataTypes::from_slice(&[OperandDataType::Int64]);

    let u = a.union(b);
    assert!(u.has(OperandDataType::Float32));
    assert!(u.has(OperandDataType::Int64));
    assert!(!u.is_empty());
}
