use crate::program::{
    Binding, DataType, MAIN_FUNCTION, Model, NamedValueType, OPSET, Operation, TensorData,
    TensorType, Value, ValueData,
};

#[test]
fn new_model_has_empty_main() {
    let model = Model::new();

    assert_eq!(model.specification_version, 8);
    assert_eq!(model.program.version, 1);
    assert!(model.program.functions.contains_key(MAIN_FUNCTION));
    assert_eq!(model.main().opset, OPSET);
    assert!(model.main().block.operations.is_empty());
}

#[test]
fn model_bytes_roundtrip() {
    let mut model = Model::new();
    model.main_mut().block.operations.push(
        Operation::new("const")
            .output(NamedValueType::new(
                "var_3",
                TensorType::new(DataType::Float16, [2, 2]),
            ))
            .attribute("name", Value::string("var_3"))
            .attribute(
                "val",
                Value::blob_file(TensorType::new(DataType::Float16, [2, 2]), "w", 64),
            ),
    );

    let decoded = Model::from_bytes(&model.to_bytes()).unwrap();
    assert_eq!(decoded, model);
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(Model::from_bytes(&[0xFF, 0xFF, 0xFF]).is_err());
}

#[test]
fn fp16_scalar_is_stored_as_bytes() {
    let v = Value::scalar_f16(1.0);

    assert_eq!(v.ty.data_type, DataType::Float16);
    assert_eq!(v.data, ValueData::Immediate(TensorData::Bytes(vec![0x00, 0x3C])));
    assert_eq!(v.to_f32_vec(), Some(vec![1.0]));
}

#[test]
fn float_of_rejects_integers() {
    assert!(Value::float_of(DataType::Float32, 1.0).is_some());
    assert!(Value::float_of(DataType::Float16, 1.0).is_some());
    assert!(Value::float_of(DataType::Int32, 1.0).is_none());
}

#[test]
fn repeated_args_append() {
    let op = Operation::new("concat").arg("values", "a").arg("values", "b");

    assert_eq!(
        op.input("values"),
        Some(&[Binding::Name("a".into()), Binding::Name("b".into())][..])
    );
    assert_eq!(op.input_name("values"), None);
}

#[test]
fn cast_names() {
    assert_eq!(DataType::Uint8.cast_name(), Some("uint8"));
    assert_eq!(DataType::Bool.cast_name(), Some("bool"));
    assert_eq!(DataType::Int64.cast_name(), None);
}
