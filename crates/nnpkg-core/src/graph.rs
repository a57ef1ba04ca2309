use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Operand, OperandId, Operation};

/// A fully resolved computation graph.
///
/// `operations` must already be in topological order: every operand an
/// operation reads is either a graph input, a constant, or the output of an
/// earlier operation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphInfo {
    pub operands: IndexMap<OperandId, Operand>,
    #[serde(default)]
    pub input_operands: Vec<OperandId>,
    #[serde(default)]
    pub output_operands: Vec<OperandId>,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl GraphInfo {
    pub fn get(&self, id: OperandId) -> Option<&Operand> {
        self.operands.get(&id)
    }

    /// Operand by id. Panics if the id is not part of the graph.
    pub fn operand(&self, id: OperandId) -> &Operand {
        self.ensure_operand(id)
    }

    /// Largest operand id in use, or 0 for an empty graph.
    pub fn max_operand_id(&self) -> OperandId {
        self.operands.keys().copied().max().unwrap_or(0)
    }
}
