use std::io::Write;

use indoc::indoc;
use nnpkg_compiler::GraphCompiler;
use nnpkg_core::{DataTypeLimits, OperandDataType};
use nnpkg_format::dump::dump_model;

use super::graph_loader::{GraphDocument, load_graph, load_limits};

const DOCUMENT: &str = indoc! {r#"
    {
      "graph": {
        "operands": {
          "1": { "kind": "input", "dataType": "float32", "shape": [2], "name": "x" },
          "2": { "kind": "constant", "dataType": "float32", "shape": [2] },
          "3": { "kind": "output", "dataType": "float32", "shape": [2], "name": "y" }
        },
        "inputOperands": [1],
        "outputOperands": [3],
        "operations": [
          { "op": "elementWiseBinary", "kind": "add", "lhs": 1, "rhs": 2, "output": 3 }
        ]
      },
      "constants": {
        "2": { "dataType": "float32", "shape": [2], "bytes": [0, 0, 128, 63, 0, 0, 0, 64] }
      }
    }
"#};

#[test]
fn parses_graph_and_constants() {
    let doc = GraphDocument::parse(DOCUMENT).unwrap();

    assert_eq!(doc.graph.operands.len(), 3);
    assert_eq!(doc.graph.input_operands, [1]);
    let constant = &doc.constants[&2];
    assert_eq!(constant.descriptor.data_type, OperandDataType::Float32);
    assert_eq!(constant.bytes.len(), 8);
}

#[test]
fn document_compiles() {
    let doc = GraphDocument::parse(DOCUMENT).unwrap();
    let limits = DataTypeLimits::baseline();

    let plan = GraphCompiler::new(&doc.graph, &limits, &doc.constants)
        .build()
        .unwrap();

    let dump = dump_model(&plan.model);
    assert!(dump.contains("add(x: input_x_1, y: var_2)"), "{dump}");
}

#[test]
fn constants_are_optional() {
    let doc = GraphDocument::parse(indoc! {r#"
        { "graph": { "operands": {} } }
    "#})
    .unwrap();

    assert!(doc.graph.operands.is_empty());
    assert!(doc.constants.is_empty());
}

#[test]
fn undeclared_output_is_rejected() {
    let err = GraphDocument::parse(indoc! {r#"
        { "graph": { "operands": {}, "outputOperands": [4] } }
    "#})
    .unwrap_err();

    assert_eq!(err, "operand 4 is not declared in the graph");
}

#[test]
fn undeclared_operation_operand_is_rejected() {
    let err = GraphDocument::parse(indoc! {r#"
        {
          "graph": {
            "operands": {
              "1": { "kind": "input", "dataType": "float32", "shape": [2], "name": "x" }
            },
            "inputOperands": [1],
            "operations": [{ "op": "relu", "input": 1, "output": 9 }]
          }
        }
    "#})
    .unwrap_err();

    assert_eq!(err, "operation relu refers to undeclared operand 9");
}

#[test]
fn malformed_json_is_reported() {
    let err = GraphDocument::parse("{").unwrap_err();

    assert!(err.starts_with("invalid graph document:"), "{err}");
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DOCUMENT.as_bytes()).unwrap();

    let doc = load_graph(file.path()).unwrap();

    assert_eq!(doc.graph.operations.len(), 1);
}

#[test]
fn missing_file_is_reported() {
    let err = load_graph(std::path::Path::new("/nonexistent/graph.json")).unwrap_err();

    assert!(err.starts_with("failed to read '/nonexistent/graph.json'"), "{err}");
}

#[test]
fn limits_default_to_baseline() {
    assert_eq!(load_limits(None).unwrap(), DataTypeLimits::baseline());
}

#[test]
fn limits_file_overrides_baseline() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"{ "input": ["float32"], "relu_input": ["float16"] }"#)
        .unwrap();

    let limits = load_limits(Some(file.path())).unwrap();

    assert!(limits.input.has(OperandDataType::Float32));
    assert!(!limits.input.has(OperandDataType::Int32));
    assert!(limits.relu_input.has(OperandDataType::Float16));
    assert!(limits.add_input.is_empty());
}
