//! Target IR value names.
//!
//! Each namespace gets its own prefix so user names, constants and internal
//! operands never collide: `input_<name>_<id>`, `output_<name>_<id>`,
//! `var_<id>` and `internal_<id>`.

use nnpkg_core::{Operand, OperandId, OperandKind};

pub const PLACEHOLDER_INPUT: &str = "placeholder_input";
pub const PLACEHOLDER_OUTPUT: &str = "placeholder_output";

/// Keep only characters valid in a target IR identifier.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c == '_' || c == '@')
        .collect()
}

pub fn operand_name(id: OperandId, operand: &Operand) -> String {
    match (operand.kind, operand.name.as_deref()) {
        (OperandKind::Input, Some(name)) => format!("input_{}_{id}", sanitize(name)),
        (OperandKind::Output, Some(name)) => format!("output_{}_{id}", sanitize(name)),
        _ => format!("var_{id}"),
    }
}

pub fn internal_name(id: OperandId) -> String {
    format!("internal_{id}")
}
