//! Lowering of graph operations into target IR.
//!
//! Every operator kind has one routine. A routine checks element types
//! against the capability table, then emits either a single target
//! operation or a short fixed decomposition. Lowering one operation is
//! atomic: on error nothing it emitted or allocated survives.

mod elementwise;
mod nn;
mod reduce;
mod shape;

#[cfg(test)]
mod reduce_tests;

use nnpkg_core::operation::{BinaryKind, ElementWiseUnary};
use nnpkg_core::{DataTypeLimits, OperandId, Operation, SupportedDataTypes};
use nnpkg_format::{self as ir, DataType, NamedValueType, Value};

use crate::registry::{OperandRegistry, types};
use crate::{Error, Result};

/// Right-hand side of an elementwise binary: another operand or an immediate.
#[derive(Clone, Debug)]
pub(crate) enum Rhs {
    Operand(OperandId),
    Value(Value),
}

pub struct Lowerer<'a> {
    limits: &'a DataTypeLimits,
    registry: OperandRegistry,
    operations: Vec<ir::Operation>,
}

impl<'a> Lowerer<'a> {
    pub fn new(limits: &'a DataTypeLimits, registry: OperandRegistry) -> Self {
        Self {
            limits,
            registry,
            operations: Vec::new(),
        }
    }

    /// Append the target operations for `operation`.
    pub fn lower(&mut self, operation: &Operation) -> Result<()> {
        let checkpoint = self.registry.checkpoint();
        let emitted = self.operations.len();

        match self.dispatch(operation) {
            Ok(()) => {
                tracing::debug!(
                    op = %operation,
                    emitted = self.operations.len() - emitted,
                    "lowered operation"
                );
                Ok(())
            }
            Err(err) => {
                self.operations.truncate(emitted);
                self.registry.rollback(checkpoint);
                tracing::debug!(op = %operation, error = %err, "lowering failed");
                Err(err)
            }
        }
    }

    pub fn registry(&self) -> &OperandRegistry {
        &self.registry
    }

    pub fn operations(&self) -> &[ir::Operation] {
        &self.operations
    }

    pub fn into_parts(self) -> (OperandRegistry, Vec<ir::Operation>) {
        (self.registry, self.operations)
    }

    pub(crate) fn registry_mut(&mut self) -> &mut OperandRegistry {
        &mut self.registry
    }

    pub(crate) fn emit(&mut self, operation: ir::Operation) {
        self.operations.push(operation);
    }

    fn dispatch(&mut self, operation: &Operation) -> Result<()> {
        let limits = self.limits;
        match operation {
            Operation::ArgMinMax(op) => self.lower_arg_min_max(op),
            Operation::BatchNormalization(op) => self.lower_batch_normalization(op),
            Operation::Clamp(op) => self.lower_clamp(op),
            Operation::Concat(op) => self.lower_concat(op),
            Operation::Conv2d(op) => self.lower_conv2d(op),
            Operation::ElementWiseBinary(op) => {
                self.binary(op.kind, op.lhs, Rhs::Operand(op.rhs), op.output)
            }
            Operation::ElementWiseUnary(op) => self.lower_unary(op),
            Operation::Elu(op) => self.lower_elu(op),
            Operation::Expand(op) => self.lower_expand(op),
            Operation::Gather(op) => self.lower_gather(op),
            Operation::Gemm(op) => self.lower_gemm(op),
            Operation::HardSigmoid(op) => {
                self.hard_sigmoid(op.input, op.alpha, op.beta, op.output)
            }
            Operation::HardSwish(op) => self.lower_hard_swish(op),
            Operation::InstanceNormalization(op) => self.lower_instance_normalization(op),
            Operation::LayerNormalization(op) => self.lower_layer_normalization(op),
            Operation::LeakyRelu(op) => self.lower_leaky_relu(op),
            Operation::Linear(op) => self.lower_linear(op),
            Operation::Matmul(op) => self.matmul(op.a, op.b, false, false, op.output),
            Operation::Pad(op) => self.lower_pad(op),
            Operation::Pool2d(op) => self.lower_pool2d(op),
            Operation::Reduce(op) => self.lower_reduce(op),
            Operation::Relu(op) => {
                self.activation("relu", "relu", limits.relu_input, op.input, op.output)
            }
            Operation::Resample2d(op) => self.lower_resample2d(op),
            Operation::Reshape(op) => self.reshape(op.input, op.output),
            Operation::Sigmoid(op) => {
                self.activation("sigmoid", "sigmoid", limits.sigmoid_input, op.input, op.output)
            }
            Operation::Slice(op) => self.lower_slice(op),
            Operation::Softmax(op) => self.lower_softmax(op),
            Operation::Softplus(op) => self.activation(
                "softplus",
                "softplus",
                limits.softplus_input,
                op.input,
                op.output,
            ),
            Operation::Softsign(op) => self.activation(
                "softsign",
                "softsign",
                limits.softsign_input,
                op.input,
                op.output,
            ),
            Operation::Split(op) => self.lower_split(op),
            Operation::Tanh(op) => {
                self.activation("tanh", "tanh", limits.tanh_input, op.input, op.output)
            }
            Operation::Transpose(op) => self.lower_transpose(op),
            Operation::Where(op) => self.lower_where(op),
            Operation::CumulativeSum(_)
            | Operation::DequantizeLinear(_)
            | Operation::GatherElements(_)
            | Operation::GatherNd(_)
            | Operation::Gelu(_)
            | Operation::Gru(_)
            | Operation::GruCell(_)
            | Operation::Lstm(_)
            | Operation::LstmCell(_)
            | Operation::Prelu(_)
            | Operation::QuantizeLinear(_)
            | Operation::ScatterNd(_)
            | Operation::Tile(_)
            | Operation::Triangular(_) => Err(unsupported_operator(operation.name())),
        }
    }

    /// Reject `id` unless its element type is in `allowed`.
    fn check(
        &self,
        op: &str,
        port: &str,
        allowed: SupportedDataTypes,
        id: OperandId,
    ) -> Result<()> {
        let data_type = self.registry.lookup(id).data_type;
        match types::to_operand(data_type) {
            Some(ty) if allowed.has(ty) => Ok(()),
            _ => Err(unsupported_data_type(op, port, data_type)),
        }
    }

    fn data_type(&self, id: OperandId) -> DataType {
        self.registry.lookup(id).data_type
    }

    fn dimensions(&self, id: OperandId) -> Vec<u32> {
        self.registry.lookup(id).dimensions.clone()
    }

    fn name(&self, id: OperandId) -> String {
        self.registry.lookup(id).name.clone()
    }

    fn output(&self, id: OperandId) -> NamedValueType {
        self.registry.lookup(id).named_type()
    }

    fn internal(&mut self, data_type: DataType, dimensions: Vec<u32>) -> Result<OperandId> {
        self.registry.allocate_internal(data_type, dimensions)
    }

    /// Float immediate typed like `id`.
    fn float_like(&self, op: &str, id: OperandId, value: f32) -> Result<Value> {
        let data_type = self.data_type(id);
        Value::float_of(data_type, value)
            .ok_or_else(|| unsupported_data_type(op, "input", data_type))
    }

    /// `op_type(x)` with no further parameters.
    pub(crate) fn unary_op(&mut self, op_type: &str, input: OperandId, output: OperandId) {
        let op = ir::Operation::new(op_type)
            .arg("x", self.name(input))
            .output(self.output(output));
        self.emit(op);
    }

    fn activation(
        &mut self,
        op: &str,
        op_type: &str,
        allowed: SupportedDataTypes,
        input: OperandId,
        output: OperandId,
    ) -> Result<()> {
        self.check(op, "input", allowed, input)?;
        self.unary_op(op_type, input, output);
        Ok(())
    }

    fn lower_log(&mut self, input: OperandId, output: OperandId) -> Result<()> {
        self.lower_unary(&ElementWiseUnary {
            kind: nnpkg_core::operation::UnaryKind::Log,
            input,
            output,
        })
    }

    fn square(&mut self, input: OperandId, output: OperandId) -> Result<()> {
        self.binary(BinaryKind::Mul, input, Rhs::Operand(input), output)
    }
}

pub(crate) fn unsupported_operator(name: &str) -> Error {
    Error::not_supported(format!("Unsupported operator {name}."))
}

fn unsupported_data_type(op: &str, port: &str, data_type: DataType) -> Error {
    let name = types::to_operand(data_type).map_or(data_type.name(), |ty| ty.name());
    Error::not_supported(format!("Unsupported data type {name} for {port} of {op}."))
}
