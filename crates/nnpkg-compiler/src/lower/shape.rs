use nnpkg_core::operation::{Concat, Expand, Gather, Pad, PaddingMode, Slice, Split, Transpose};
use nnpkg_core::{MAX_RANK, OperandId};
use nnpkg_format::{self as ir, Value};

use super::Lowerer;
use crate::{Error, Result};

/// Non-constant pad modes only reach the last two dimensions.
const EDGE_PADDED_DIMENSIONS: usize = 2;

impl Lowerer<'_> {
    pub(crate) fn reshape(&mut self, input: OperandId, output: OperandId) -> Result<()> {
        self.check("reshape", "input", self.limits.reshape_input, input)?;
        let shape = self.dimensions(output);
        if shape.len() > MAX_RANK {
            return Err(Error::not_supported(
                "Unsupported rank for reshape. It should be between 0 to 5.",
            ));
        }
        let op = ir::Operation::new("reshape")
            .arg("x", self.name(input))
            .value("shape", Value::ints_from_u32(&shape))
            .output(self.output(output));
        self.emit(op);
        Ok(())
    }

    /// Broadcast by reshaping to the output rank, then tiling.
    pub(super) fn lower_expand(&mut self, op: &Expand) -> Result<()> {
        self.check("expand", "input", self.limits.expand_input, op.input)?;
        let input_shape = self.dimensions(op.input);
        let output_shape = self.dimensions(op.output);

        let mut input = op.input;
        let mut aligned = input_shape.clone();
        if input_shape.len() < output_shape.len() {
            // Right-align, filling leading dimensions with 1.
            aligned = vec![1; output_shape.len() - input_shape.len()];
            aligned.extend_from_slice(&input_shape);
            input = self.internal(self.data_type(op.input), aligned.clone())?;
            self.reshape(op.input, input)?;
        }

        let reps = output_shape
            .iter()
            .zip(&aligned)
            .map(|(&to, &from)| match (to, from) {
                _ if to == from => Ok(1),
                (to, 1) => Ok(to as i32),
                _ => Err(Error::not_supported(format!(
                    "Cannot expand dimension of size {from} to {to}."
                ))),
            })
            .collect::<Result<Vec<i32>>>()?;

        let tile = ir::Operation::new("tile")
            .arg("x", self.name(input))
            .value("reps", Value::ints(&reps))
            .output(self.output(op.output));
        self.emit(tile);
        Ok(())
    }

    pub(super) fn lower_concat(&mut self, op: &Concat) -> Result<()> {
        let mut concat = ir::Operation::new("concat");
        for &input in &op.inputs {
            self.check("concat", "inputs", self.limits.concat_inputs, input)?;
            concat = concat.arg("values", self.name(input));
        }
        let concat = concat
            .value("axis", Value::scalar_i32(op.axis as i32))
            .value("interleave", Value::scalar_bool(false))
            .output(self.output(op.output));
        self.emit(concat);
        Ok(())
    }

    pub(super) fn lower_gather(&mut self, op: &Gather) -> Result<()> {
        self.check("gather", "input", self.limits.gather_input, op.input)?;
        self.check("gather", "indices", self.limits.gather_indices, op.indices)?;
        let gather = ir::Operation::new("gather_along_axis")
            .arg("x", self.name(op.input))
            .arg("indices", self.name(op.indices))
            .value("axis", Value::scalar_i32(op.axis as i32))
            .value("validate_indices", Value::scalar_bool(false))
            .output(self.output(op.output));
        self.emit(gather);
        Ok(())
    }

    pub(super) fn lower_pad(&mut self, op: &Pad) -> Result<()> {
        self.check("pad", "input", self.limits.pad_input, op.input)?;
        if op.beginning_padding.len() != op.ending_padding.len() {
            return Err(Error::not_supported(
                "Beginning and ending paddings of pad must have the same length.",
            ));
        }

        let (mode, constant) = match op.mode {
            PaddingMode::Constant { value } => ("constant", value),
            PaddingMode::Edge => ("replicate", 0.0),
            PaddingMode::Reflection => ("reflect", 0.0),
            PaddingMode::Symmetric => {
                return Err(Error::not_supported("Unsupported mode symmetric for pad."));
            }
        };

        let leading = op
            .beginning_padding
            .len()
            .saturating_sub(EDGE_PADDED_DIMENSIONS);
        let pads_leading = op.beginning_padding[..leading]
            .iter()
            .chain(&op.ending_padding[..leading])
            .any(|&p| p != 0);
        if !matches!(op.mode, PaddingMode::Constant { .. }) && pads_leading {
            return Err(Error::not_supported(
                "Unsupported padding for pad, padding for more than two dimensions \
                 only supports 'constant' mode.",
            ));
        }

        let pads: Vec<u32> = op
            .beginning_padding
            .iter()
            .zip(&op.ending_padding)
            .flat_map(|(&begin, &end)| [begin, end])
            .collect();
        let constant = self.float_like("pad", op.input, constant)?;
        let pad = ir::Operation::new("pad")
            .arg("x", self.name(op.input))
            .value("pad", Value::ints_from_u32(&pads))
            .value("mode", Value::string(mode))
            .value("constant_val", constant)
            .output(self.output(op.output));
        self.emit(pad);
        Ok(())
    }

    pub(super) fn lower_slice(&mut self, op: &Slice) -> Result<()> {
        self.check("slice", "input", self.limits.slice_input, op.input)?;
        let (begin, size): (Vec<u32>, Vec<u32>) = op
            .ranges
            .iter()
            .filter(|range| range.size != 0)
            .map(|range| (range.start, range.size))
            .unzip();
        let slice = ir::Operation::new("slice_by_size")
            .arg("x", self.name(op.input))
            .value("begin", Value::ints_from_u32(&begin))
            .value("size", Value::ints_from_u32(&size))
            .output(self.output(op.output));
        self.emit(slice);
        Ok(())
    }

    pub(super) fn lower_split(&mut self, op: &Split) -> Result<()> {
        self.check("split", "input", self.limits.split_input, op.input)?;
        if let [output] = op.outputs[..] {
            self.unary_op("identity", op.input, output);
            return Ok(());
        }

        let axis = op.axis as usize;
        let mut split = ir::Operation::new("split").arg("x", self.name(op.input));
        let mut sizes = Vec::with_capacity(op.outputs.len());
        for &output in &op.outputs {
            let Some(&size) = self.dimensions(output).get(axis) else {
                return Err(Error::not_supported(format!(
                    "Split axis {axis} is out of range."
                )));
            };
            sizes.push(size);
            split = split.output(self.output(output));
        }
        let split = split
            .value("split_sizes", Value::ints_from_u32(&sizes))
            .value("axis", Value::scalar_i32(op.axis as i32));
        self.emit(split);
        Ok(())
    }

    pub(super) fn lower_transpose(&mut self, op: &Transpose) -> Result<()> {
        self.check("transpose", "input", self.limits.transpose_input, op.input)?;
        let transpose = ir::Operation::new("transpose")
            .arg("x", self.name(op.input))
            .value("perm", Value::ints_from_u32(&op.permutation))
            .output(self.output(op.output));
        self.emit(transpose);
        Ok(())
    }
}
