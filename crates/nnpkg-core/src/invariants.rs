//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{GraphInfo, Operand, OperandId};

impl GraphInfo {
    pub(crate) fn ensure_operand(&self, id: OperandId) -> &Operand {
        self.get(id).unwrap_or_else(|| {
            panic!(
                "GraphInfo: operand {id} not found \
                 (operations must only reference declared operands)"
            )
        })
    }
}
