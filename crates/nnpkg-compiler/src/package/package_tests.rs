use std::fs;

use indexmap::IndexMap;
use indoc::indoc;

use nnpkg_core::operation::{Activation, ElementWiseUnary, UnaryKind};
use nnpkg_core::{ConstantOperand, DataTypeLimits, GraphInfo, OperandDataType, Operation};
use nnpkg_format::{Manifest, Model, WeightFile, dump};

use crate::{ErrorKind, GraphCompiler};
use crate::test_utils::GraphBuilder;

fn relu_graph(input_shape: &[u32]) -> GraphBuilder {
    let mut g = GraphBuilder::new();
    let x = g.input("x", OperandDataType::Float32, input_shape);
    let y = g.output("y", OperandDataType::Float32, input_shape);
    g.op(Operation::Relu(Activation {
        input: x,
        output: y,
    }));
    g
}

fn is_empty_dir(path: &std::path::Path) -> bool {
    fs::read_dir(path).unwrap().next().is_none()
}

#[test]
fn build_describes_features_inputs_and_outputs() {
    let g = relu_graph(&[2]);

    let plan = g.build(&DataTypeLimits::baseline()).unwrap();

    insta::assert_snapshot!(dump::dump_model(&plan.model), @r"
    [features]
    in  input_x_1: FLOAT32 [2]
    out output_y_2: FLOAT32 [2]

    [inputs]
    input_x_1: fp32[2]

    [operations]
    output_y_2: fp32[2] = relu(x: input_x_1)

    [outputs]
    output_y_2
    ");
    assert_eq!(WeightFile::parse(&plan.weights).unwrap().header().count, 0);
}

#[test]
fn graph_without_inputs_gets_placeholder() {
    let mut g = GraphBuilder::new();
    let c = g.constant(ConstantOperand::from_f32([2], &[-1.0, 1.0]));
    let y = g.output("y", OperandDataType::Float32, &[2]);
    g.op(Operation::Relu(Activation {
        input: c,
        output: y,
    }));

    let plan = g.build(&DataTypeLimits::baseline()).unwrap();

    insta::assert_snapshot!(dump::dump_model(&plan.model), @r#"
    [features]
    in  placeholder_input: FLOAT16 [1]
    out output_y_2: FLOAT32 [2]

    [inputs]
    placeholder_input: fp16[1]

    [operations]
    placeholder_output: fp16[1] = add(x: placeholder_input, y: placeholder_input)
    var_1: fp32[2] = const() {name: "var_1", val: @weights+64:fp32[2]}
    output_y_2: fp32[2] = relu(x: var_1)

    [outputs]
    output_y_2
    "#);
    assert_eq!(WeightFile::parse(&plan.weights).unwrap().header().count, 1);
}

#[test]
fn weight_header_counts_immediates_too() {
    let mut g = relu_graph(&[2]);
    g.constant(ConstantOperand::from_f32(Vec::new(), &[2.5]));
    g.constant(ConstantOperand::from_i32([3], &[1, 2, 3]));
    g.constant(ConstantOperand::from_f32([2, 2], &[1.0, 2.0, 3.0, 4.0]));

    let plan = g.build(&DataTypeLimits::baseline()).unwrap();
    let file = WeightFile::parse(&plan.weights).unwrap();

    assert_eq!(file.header().count, 3);
    assert_eq!(file.entries().unwrap().len(), 1);
    // one f32[2, 2] blob at 128, nothing after it
    assert_eq!(plan.weights.len(), 144);
}

#[test]
fn scalar_input_is_fed_as_rank_one_and_reshaped() {
    let g = relu_graph(&[]);

    let plan = g.build(&DataTypeLimits::baseline()).unwrap();

    insta::assert_snapshot!(dump::dump_model(&plan.model), @r"
    [features]
    in  input_x_1: FLOAT32 [1]
    out output_y_2: FLOAT32 [1]

    [inputs]
    input_x_1: fp32[1]

    [operations]
    internal_3: fp32[] = reshape(x: input_x_1, shape: []:int32[0])
    output_y_2: fp32[] = relu(x: internal_3)

    [outputs]
    output_y_2
    ");
    let info = plan.registry.lookup(1);
    assert_eq!(info.name, "internal_3");
    assert_eq!(info.external_name, "input_x_1");
}

#[test]
fn rank_six_input_fails_without_writing() {
    let g = relu_graph(&[1, 1, 1, 1, 1, 2]);
    let dir = tempfile::tempdir().unwrap();

    let err = g.compile(dir.path()).err().unwrap();

    assert_eq!(err.kind(), ErrorKind::NotSupported);
    assert_eq!(
        err.to_string(),
        "Unsupported rank for input. It should be between 0 to 5."
    );
    assert!(is_empty_dir(dir.path()));
}

#[test]
fn feature_types_are_limited() {
    let mut g = GraphBuilder::new();
    let x = g.input("x", OperandDataType::Uint8, &[2]);
    let y = g.output("y", OperandDataType::Uint8, &[2]);
    g.op(Operation::ElementWiseUnary(ElementWiseUnary {
        kind: UnaryKind::Identity,
        input: x,
        output: y,
    }));

    let err = g.build(&DataTypeLimits::baseline()).err().unwrap();

    assert_eq!(
        err.to_string(),
        "Unsupported data type uint8 for input or output."
    );
}

#[test]
fn lowering_failure_writes_nothing() {
    let mut g = GraphBuilder::new();
    let x = g.input("x", OperandDataType::Float32, &[2]);
    let y = g.output("y", OperandDataType::Float32, &[2]);
    g.op(Operation::Gelu(Activation {
        input: x,
        output: y,
    }));
    let dir = tempfile::tempdir().unwrap();

    let err = g.compile(dir.path()).err().unwrap();

    assert_eq!(err.to_string(), "Unsupported operator gelu.");
    assert!(is_empty_dir(dir.path()));
}

#[test]
fn compile_writes_complete_package() {
    let mut g = relu_graph(&[2, 2]);
    g.constant(ConstantOperand::from_f32([4], &[1.0, 2.0, 3.0, 4.0]));
    let limits = DataTypeLimits::baseline();
    let dir = tempfile::tempdir().unwrap();

    let package = g.compile(dir.path()).unwrap();
    let expected = g.build(&limits).unwrap();

    let root = package.package_dir();
    assert_eq!(root.parent(), Some(dir.path()));
    let file_name = root.file_name().unwrap().to_str().unwrap();
    let token = file_name.strip_suffix(".mlpackage").unwrap();
    assert_eq!(token.len(), 32);

    let model = Model::from_bytes(&fs::read(package.model_file()).unwrap()).unwrap();
    assert_eq!(model, expected.model);

    let weights = fs::read(package.weights_file()).unwrap();
    assert_eq!(weights, expected.weights);
    let file = WeightFile::parse(&weights).unwrap();
    assert_eq!(
        file.blob_at(64).unwrap(),
        ConstantOperand::from_f32([4], &[1.0, 2.0, 3.0, 4.0]).bytes
    );

    let manifest =
        Manifest::from_json(&fs::read_to_string(package.manifest_file()).unwrap()).unwrap();
    assert_eq!(manifest.item_info_entries.len(), 2);
    let root_item = manifest.root_item().unwrap();
    assert_eq!(root_item.path, "model.mlmodel");
    let ids: Vec<&String> = manifest.item_info_entries.keys().collect();
    assert_ne!(ids[0], ids[1]);

    assert_eq!(package.operand_info(2).name, "output_y_2");
}

#[test]
fn each_compile_gets_a_fresh_directory() {
    let g = relu_graph(&[2]);
    let dir = tempfile::tempdir().unwrap();

    let first = g.compile(dir.path()).unwrap();
    let second = g.compile(dir.path()).unwrap();

    assert_ne!(first.package_dir(), second.package_dir());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn graph_from_json() {
    let graph: GraphInfo = serde_json::from_str(indoc! {r#"
        {
          "operands": {
            "1": { "kind": "input", "dataType": "float32", "shape": [1, 4], "name": "x" },
            "2": { "kind": "constant", "dataType": "float32", "shape": [4, 2] },
            "3": { "kind": "output", "dataType": "float32", "shape": [1, 2], "name": "y" }
          },
          "inputOperands": [1],
          "outputOperands": [3],
          "operations": [
            { "op": "matmul", "a": 1, "b": 2, "output": 3 }
          ]
        }
    "#})
    .unwrap();
    let constants = IndexMap::from([(2, ConstantOperand::from_f32([4, 2], &[0.5; 8]))]);
    let limits = DataTypeLimits::baseline();

    let plan = GraphCompiler::new(&graph, &limits, &constants).build().unwrap();

    let ops: Vec<String> = plan.model.main().block.operations.iter().map(dump::operation).collect();
    assert_eq!(
        ops,
        [
            r#"var_2: fp32[4, 2] = const() {name: "var_2", val: @weights+64:fp32[4, 2]}"#,
            "output_y_3: fp32[1, 2] = matmul(x: input_x_1, y: var_2, transpose_x: false, transpose_y: false)",
        ]
    );
    assert_eq!(plan.model.main().block.outputs, ["output_y_3"]);
}
