use crate::{DataTypeLimits, OperandDataType, SupportedDataTypes};

#[test]
fn baseline_float_only_ports() {
    let limits = DataTypeLimits::baseline();

    assert!(limits.relu_input.has(OperandDataType::Float16));
    assert!(limits.relu_input.has(OperandDataType::Float32));
    assert!(!limits.relu_input.has(OperandDataType::Int32));
}

#[test]
fn baseline_unlowered_ports_are_empty() {
    let limits = DataTypeLimits::baseline();

    assert!(limits.lstm_input.is_empty());
    assert!(limits.tile_input.is_empty());
    assert!(limits.sign_input.is_empty());
}

#[test]
fn baseline_logical_ports_are_uint8() {
    let limits = DataTypeLimits::baseline();
    let uint8 = SupportedDataTypes::from_slice(&[OperandDataType::Uint8]);

    assert_eq!(limits.logical_output, uint8);
    assert_eq!(limits.logical_not_input, uint8);
    assert_eq!(limits.where_condition, uint8);
}

#[test]
fn missing_ports_deserialize_empty() {
    let limits: DataTypeLimits =
        serde_json::from_str(r#"{ "input": ["float32"], "relu_input": ["float16"] }"#).unwrap();

    assert!(limits.input.has(OperandDataType::Float32));
    assert!(limits.relu_input.has(OperandDataType::Float16));
    assert!(limits.constant.is_empty());
    assert!(limits.matmul_input.is_empty());
}

#[test]
fn baseline_survives_json() {
    let limits = DataTypeLimits::baseline();
    let json = serde_json::to_string(&limits).unwrap();
    let back: DataTypeLimits = serde_json::from_str(&json).unwrap();

    assert_eq!(back, limits);
}
