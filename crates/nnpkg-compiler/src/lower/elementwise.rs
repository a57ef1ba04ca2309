use nnpkg_core::OperandId;
use nnpkg_core::operation::{
    Activation, BinaryKind, Clamp, ElementWiseUnary, Elu, LeakyRelu, Linear, UnaryKind, Where,
};
use nnpkg_format::{self as ir, DataType, Value};

use super::{Lowerer, Rhs, unsupported_data_type, unsupported_operator};
use crate::Result;

/// hard_sigmoid(x, 1/6, 0.5) * x == x * max(0, min(6, x + 3)) / 6
const HARD_SWISH_ALPHA: f32 = 1.0 / 6.0;
const HARD_SWISH_BETA: f32 = 0.5;

impl Lowerer<'_> {
    pub(crate) fn binary(
        &mut self,
        kind: BinaryKind,
        lhs: OperandId,
        rhs: Rhs,
        output: OperandId,
    ) -> Result<()> {
        let limits = self.limits;
        let (op_type, allowed) = match kind {
            BinaryKind::Add => ("add", limits.add_input),
            BinaryKind::Sub => ("sub", limits.sub_input),
            BinaryKind::Mul => ("mul", limits.mul_input),
            BinaryKind::Div => ("real_div", limits.div_input),
            BinaryKind::Max => ("maximum", limits.max_input),
            BinaryKind::Min => ("minimum", limits.min_input),
            BinaryKind::Pow => ("pow", limits.pow_input),
            BinaryKind::Equal => ("equal", limits.equal_input),
            BinaryKind::Greater => ("greater", limits.greater_input),
            BinaryKind::GreaterOrEqual => ("greater_equal", limits.greater_or_equal_input),
            BinaryKind::Lesser => ("less", limits.lesser_input),
            BinaryKind::LesserOrEqual => ("less_equal", limits.lesser_or_equal_input),
        };
        let name = kind.name();
        self.check(name, "input", allowed, lhs)?;

        let mut op = ir::Operation::new(op_type).arg("x", self.name(lhs));
        op = match rhs {
            Rhs::Operand(id) => {
                self.check(name, "input", allowed, id)?;
                if self.data_type(id) != self.data_type(lhs) {
                    return Err(crate::Error::not_supported(format!(
                        "Mismatched input data types for {name}."
                    )));
                }
                op.arg("y", self.name(id))
            }
            Rhs::Value(value) => op.value("y", value),
        };

        if !kind.is_logical() {
            self.emit(op.output(self.output(output)));
            return Ok(());
        }

        // Comparisons yield bool; the graph expects uint8.
        self.check(name, "output", limits.logical_output, output)?;
        let flags = self.internal(DataType::Bool, self.dimensions(output))?;
        self.emit(op.output(self.output(flags)));
        self.cast(flags, output)
    }

    /// `cast(x, dtype)`. Bool is accepted on either side for internal use.
    pub(crate) fn cast(&mut self, input: OperandId, output: OperandId) -> Result<()> {
        let allowed = self.limits.cast_input;
        for (port, id) in [("input", input), ("output", output)] {
            if self.data_type(id) != DataType::Bool {
                self.check("cast", port, allowed, id)?;
            }
        }
        let target = self.data_type(output);
        let dtype = target
            .cast_name()
            .ok_or_else(|| unsupported_data_type("cast", "output", target))?;

        let op = ir::Operation::new("cast")
            .arg("x", self.name(input))
            .value("dtype", Value::string(dtype))
            .output(self.output(output));
        self.emit(op);
        Ok(())
    }

    pub(super) fn lower_unary(&mut self, op: &ElementWiseUnary) -> Result<()> {
        let limits = self.limits;
        let (input, output) = (op.input, op.output);
        let name = op.kind.name();
        match op.kind {
            UnaryKind::Abs => self.activation(name, "abs", limits.abs_input, input, output),
            UnaryKind::Cast => self.cast(input, output),
            UnaryKind::Ceil => self.activation(name, "ceil", limits.ceil_input, input, output),
            UnaryKind::Cos => self.activation(name, "cos", limits.cos_input, input, output),
            UnaryKind::Erf => self.activation(name, "erf", limits.erf_input, input, output),
            UnaryKind::Exp => self.activation(name, "exp", limits.exp_input, input, output),
            UnaryKind::Floor => self.activation(name, "floor", limits.floor_input, input, output),
            UnaryKind::Identity => {
                self.activation(name, "identity", limits.identity_input, input, output)
            }
            UnaryKind::Sin => self.activation(name, "sin", limits.sin_input, input, output),
            UnaryKind::Sqrt => self.activation(name, "sqrt", limits.sqrt_input, input, output),
            UnaryKind::Tan => self.activation(name, "tan", limits.tan_input, input, output),
            // Default epsilons skew results (reciprocal(4) != 0.25), so pin them to zero.
            UnaryKind::Log => {
                self.check(name, "input", limits.log_input, input)?;
                self.with_zero_epsilon("log", input, output)
            }
            UnaryKind::Reciprocal => {
                self.check(name, "input", limits.reciprocal_input, input)?;
                self.with_zero_epsilon("inverse", input, output)
            }
            UnaryKind::Neg => {
                self.check(name, "input", limits.neg_input, input)?;
                let minus_one = match self.data_type(input) {
                    DataType::Float32 => Value::scalar_f32(-1.0),
                    DataType::Float16 => Value::scalar_f16(-1.0),
                    DataType::Int32 => Value::scalar_i32(-1),
                    other => return Err(unsupported_data_type(name, "input", other)),
                };
                self.binary(BinaryKind::Mul, input, Rhs::Value(minus_one), output)
            }
            UnaryKind::LogicalNot => {
                self.check(name, "input", limits.logical_not_input, input)?;
                let dimensions = self.dimensions(input);
                let flags = self.internal(DataType::Bool, dimensions.clone())?;
                self.cast(input, flags)?;
                let negated = self.internal(DataType::Bool, dimensions)?;
                self.unary_op("logical_not", flags, negated);
                self.cast(negated, output)
            }
            UnaryKind::Sign => Err(unsupported_operator(name)),
        }
    }

    fn with_zero_epsilon(
        &mut self,
        op_type: &str,
        input: OperandId,
        output: OperandId,
    ) -> Result<()> {
        let epsilon = self.float_like(op_type, input, 0.0)?;
        let op = ir::Operation::new(op_type)
            .arg("x", self.name(input))
            .value("epsilon", epsilon)
            .output(self.output(output));
        self.emit(op);
        Ok(())
    }

    pub(super) fn lower_clamp(&mut self, op: &Clamp) -> Result<()> {
        self.check("clamp", "input", self.limits.clamp_input, op.input)?;
        let min = self.float_like("clamp", op.input, op.min_value)?;
        let max = self.float_like("clamp", op.input, op.max_value)?;
        let clip = ir::Operation::new("clip")
            .arg("x", self.name(op.input))
            .value("alpha", min)
            .value("beta", max)
            .output(self.output(op.output));
        self.emit(clip);
        Ok(())
    }

    pub(super) fn lower_elu(&mut self, op: &Elu) -> Result<()> {
        self.check("elu", "input", self.limits.elu_input, op.input)?;
        self.with_alpha("elu", op.input, op.alpha, op.output);
        Ok(())
    }

    pub(super) fn lower_leaky_relu(&mut self, op: &LeakyRelu) -> Result<()> {
        self.check("leakyRelu", "input", self.limits.leaky_relu_input, op.input)?;
        self.with_alpha("leaky_relu", op.input, op.alpha, op.output);
        Ok(())
    }

    /// `op_type(x, alpha)` with an fp32 alpha whatever the input type.
    fn with_alpha(&mut self, op_type: &str, input: OperandId, alpha: f32, output: OperandId) {
        let op = ir::Operation::new(op_type)
            .arg("x", self.name(input))
            .value("alpha", Value::scalar_f32(alpha))
            .output(self.output(output));
        self.emit(op);
    }

    pub(crate) fn hard_sigmoid(
        &mut self,
        input: OperandId,
        alpha: f32,
        beta: f32,
        output: OperandId,
    ) -> Result<()> {
        self.check("hardSigmoid", "input", self.limits.hard_sigmoid_input, input)?;
        let alpha = self.float_like("hardSigmoid", input, alpha)?;
        let beta = self.float_like("hardSigmoid", input, beta)?;
        let op = ir::Operation::new("sigmoid_hard")
            .arg("x", self.name(input))
            .value("alpha", alpha)
            .value("beta", beta)
            .output(self.output(output));
        self.emit(op);
        Ok(())
    }

    pub(super) fn lower_hard_swish(&mut self, op: &Activation) -> Result<()> {
        self.check("hardSwish", "input", self.limits.hard_swish_input, op.input)?;
        let gate = self.internal(self.data_type(op.input), self.dimensions(op.input))?;
        self.hard_sigmoid(op.input, HARD_SWISH_ALPHA, HARD_SWISH_BETA, gate)?;
        self.binary(BinaryKind::Mul, op.input, Rhs::Operand(gate), op.output)
    }

    /// `alpha * x + beta` as a multiply then an add.
    pub(super) fn lower_linear(&mut self, op: &Linear) -> Result<()> {
        self.check("linear", "input", self.limits.linear_input, op.input)?;
        let alpha = self.float_like("linear", op.input, op.alpha)?;
        let beta = self.float_like("linear", op.input, op.beta)?;
        let scaled = self.internal(self.data_type(op.input), self.dimensions(op.input))?;
        self.binary(BinaryKind::Mul, op.input, Rhs::Value(alpha), scaled)?;
        self.binary(BinaryKind::Add, scaled, Rhs::Value(beta), op.output)
    }

    pub(super) fn lower_where(&mut self, op: &Where) -> Result<()> {
        let limits = self.limits;
        self.check("where", "value", limits.where_value, op.true_value)?;
        self.check("where", "value", limits.where_value, op.false_value)?;
        self.check("where", "condition", limits.where_condition, op.condition)?;

        let condition = self.internal(DataType::Bool, self.dimensions(op.condition))?;
        self.cast(op.condition, condition)?;

        let select = ir::Operation::new("select")
            .arg("a", self.name(op.true_value))
            .arg("b", self.name(op.false_value))
            .arg("cond", self.name(condition))
            .output(self.output(op.output));
        self.emit(select);
        Ok(())
    }
}
