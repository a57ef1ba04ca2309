//! Reading graph documents and limit tables from disk.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use indexmap::IndexMap;
use nnpkg_core::{ConstantOperand, DataTypeLimits, GraphInfo, OperandId};
use serde::Deserialize;

/// A graph plus the bytes of its constant operands.
///
/// ```json
/// { "graph": { "operands": {...}, "inputOperands": [...], ... },
///   "constants": { "2": { "dataType": "float32", "shape": [4], "bytes": [...] } } }
/// ```
#[derive(Debug, Deserialize)]
pub struct GraphDocument {
    pub graph: GraphInfo,
    #[serde(default)]
    pub constants: IndexMap<OperandId, ConstantOperand>,
}

impl GraphDocument {
    pub fn parse(text: &str) -> Result<Self, String> {
        let doc: GraphDocument =
            serde_json::from_str(text).map_err(|e| format!("invalid graph document: {}", e))?;
        doc.check_references()?;
        Ok(doc)
    }

    // Dangling ids are a panic inside the compiler; report them here instead.
    fn check_references(&self) -> Result<(), String> {
        let graph = &self.graph;
        let listed = graph
            .input_operands
            .iter()
            .chain(&graph.output_operands)
            .chain(self.constants.keys());
        for &id in listed {
            if graph.get(id).is_none() {
                return Err(format!("operand {} is not declared in the graph", id));
            }
        }
        for operation in &graph.operations {
            for id in operation.operand_ids() {
                if graph.get(id).is_none() {
                    return Err(format!(
                        "operation {} refers to undeclared operand {}",
                        operation, id
                    ));
                }
            }
        }
        Ok(())
    }
}

pub fn load_graph(path: &Path) -> Result<GraphDocument, String> {
    let text = if path.as_os_str() == "-" {
        read_stdin()?
    } else {
        read_file(path)?
    };
    GraphDocument::parse(&text)
}

/// Limits from `path`, or the baseline table.
pub fn load_limits(path: Option<&Path>) -> Result<DataTypeLimits, String> {
    let Some(path) = path else {
        return Ok(DataTypeLimits::baseline());
    };
    let text = read_file(path)?;
    serde_json::from_str(&text)
        .map_err(|e| format!("invalid limits file '{}': {}", path.display(), e))
}

fn read_stdin() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(buf)
}

fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}
