use nnpkg_core::operation::{ArgMinMax, ArgMinMaxKind, Reduce, ReduceKind};
use nnpkg_format::{self as ir, Value};

use super::Lowerer;
use crate::Result;

impl Lowerer<'_> {
    pub(super) fn lower_reduce(&mut self, op: &Reduce) -> Result<()> {
        let limits = self.limits;
        let (op_type, allowed) = match op.kind {
            ReduceKind::L1 => ("reduce_l1_norm", limits.reduce_l1_input),
            ReduceKind::L2 => ("reduce_l2_norm", limits.reduce_l2_input),
            ReduceKind::LogSum => ("reduce_log_sum", limits.reduce_log_sum_input),
            ReduceKind::LogSumExp => ("reduce_log_sum_exp", limits.reduce_log_sum_exp_input),
            ReduceKind::Max => ("reduce_max", limits.reduce_max_input),
            ReduceKind::Mean => ("reduce_mean", limits.reduce_mean_input),
            ReduceKind::Min => ("reduce_min", limits.reduce_min_input),
            ReduceKind::Product => ("reduce_prod", limits.reduce_product_input),
            ReduceKind::Sum => ("reduce_sum", limits.reduce_sum_input),
            ReduceKind::SumSquare => ("reduce_sum_square", limits.reduce_sum_square_input),
        };
        self.check(op.kind.name(), "input", allowed, op.input)?;

        // The target reduction has no empty-axes form. Reducing nothing applies
        // the per-element part of the reduction only.
        if op.axes.is_empty() || self.dimensions(op.input).is_empty() {
            return match op.kind {
                ReduceKind::LogSum => self.lower_log(op.input, op.output),
                ReduceKind::SumSquare => self.square(op.input, op.output),
                ReduceKind::L1
                | ReduceKind::L2
                | ReduceKind::LogSumExp
                | ReduceKind::Max
                | ReduceKind::Mean
                | ReduceKind::Min
                | ReduceKind::Product
                | ReduceKind::Sum => {
                    self.unary_op("identity", op.input, op.output);
                    Ok(())
                }
            };
        }

        let reduce = ir::Operation::new(op_type)
            .arg("x", self.name(op.input))
            .value("axes", Value::ints_from_u32(&op.axes))
            .value("keep_dims", Value::scalar_bool(op.keep_dimensions))
            .output(self.output(op.output));
        self.emit(reduce);
        Ok(())
    }

    /// Rank-0 inputs go through rank 1 and, with `keep_dimensions`, back.
    pub(super) fn lower_arg_min_max(&mut self, op: &ArgMinMax) -> Result<()> {
        let name = match op.kind {
            ArgMinMaxKind::Min => "argMin",
            ArgMinMaxKind::Max => "argMax",
        };
        self.check(name, "input", self.limits.arg_min_max_input, op.input)?;
        self.check(name, "output", self.limits.arg_min_max_output, op.output)?;

        let scalar = self.dimensions(op.input).is_empty();
        let mut input = op.input;
        if scalar {
            input = self.internal(self.data_type(op.input), vec![1])?;
            self.reshape(op.input, input)?;
        }

        let op_type = match op.kind {
            ArgMinMaxKind::Min => "reduce_argmin",
            ArgMinMaxKind::Max => "reduce_argmax",
        };
        let reduce = ir::Operation::new(op_type)
            .arg("x", self.name(input))
            .value("axis", Value::scalar_i32(op.axis as i32))
            .value("keep_dims", Value::scalar_bool(op.keep_dimensions));

        // Without keep_dimensions the result is already rank 0.
        if scalar && op.keep_dimensions {
            let kept = self.internal(self.data_type(op.output), vec![1])?;
            self.emit(reduce.output(self.output(kept)));
            return self.reshape(kept, op.output);
        }
        self.emit(reduce.output(self.output(op.output)));
        Ok(())
    }
}
