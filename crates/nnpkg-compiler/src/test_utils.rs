//! Graph fixtures and a tiny interpreter for emitted float programs.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use nnpkg_core::{
    ConstantOperand, DataTypeLimits, GraphInfo, Operand, OperandDataType, OperandDescriptor,
    OperandId, Operation,
};
use nnpkg_format::{self as ir, Binding, dump};

use crate::lower::Lowerer;
use crate::registry::OperandRegistry;
use crate::{BuildPlan, CompiledPackage, GraphCompiler, Result};

/// Incrementally assembled graph. Ids start at 1 in creation order.
#[derive(Default)]
pub struct GraphBuilder {
    graph: GraphInfo,
    constants: IndexMap<OperandId, ConstantOperand>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> OperandId {
        self.graph.max_operand_id() + 1
    }

    fn insert(&mut self, operand: Operand) -> OperandId {
        let id = self.next_id();
        self.graph.operands.insert(id, operand);
        id
    }

    pub fn input(&mut self, name: &str, data_type: OperandDataType, shape: &[u32]) -> OperandId {
        let id = self.insert(Operand::input(
            name,
            OperandDescriptor::new(data_type, shape.to_vec()),
        ));
        self.graph.input_operands.push(id);
        id
    }

    /// Named graph output.
    pub fn output(&mut self, name: &str, data_type: OperandDataType, shape: &[u32]) -> OperandId {
        let id = self.insert(Operand::output(
            Some(name.to_owned()),
            OperandDescriptor::new(data_type, shape.to_vec()),
        ));
        self.graph.output_operands.push(id);
        id
    }

    /// Unnamed operand produced by one operation and read by another.
    pub fn intermediate(&mut self, data_type: OperandDataType, shape: &[u32]) -> OperandId {
        self.insert(Operand::output(
            None,
            OperandDescriptor::new(data_type, shape.to_vec()),
        ))
    }

    pub fn constant(&mut self, constant: ConstantOperand) -> OperandId {
        let id = self.insert(Operand::constant(constant.descriptor.clone()));
        self.constants.insert(id, constant);
        id
    }

    pub fn op(&mut self, operation: Operation) -> &mut Self {
        self.graph.operations.push(operation);
        self
    }

    pub fn graph(&self) -> &GraphInfo {
        &self.graph
    }

    pub fn constants(&self) -> &IndexMap<OperandId, ConstantOperand> {
        &self.constants
    }

    pub fn build(&self, limits: &DataTypeLimits) -> Result<BuildPlan> {
        GraphCompiler::new(&self.graph, limits, &self.constants).build()
    }

    /// Compile against the baseline limits.
    pub fn compile(&self, working_dir: &Path) -> Result<CompiledPackage> {
        GraphCompiler::new(&self.graph, &DataTypeLimits::baseline(), &self.constants)
            .compile(working_dir)
    }

    /// Lower only the operations, skipping inputs, constants and outputs.
    pub fn lower(&self, limits: &DataTypeLimits) -> Result<Lowered> {
        let mut lowerer = Lowerer::new(limits, OperandRegistry::for_graph(&self.graph));
        for operation in &self.graph.operations {
            lowerer.lower(operation)?;
        }
        let (registry, operations) = lowerer.into_parts();
        Ok(Lowered {
            registry,
            operations,
        })
    }
}

pub struct Lowered {
    pub registry: OperandRegistry,
    pub operations: Vec<ir::Operation>,
}

impl Lowered {
    /// One dumped operation per line.
    pub fn dump(&self) -> String {
        dump_ops(&self.operations)
    }

    pub fn op_types(&self) -> Vec<&str> {
        self.operations.iter().map(|op| op.op_type.as_str()).collect()
    }
}

pub fn dump_ops(operations: &[ir::Operation]) -> String {
    let lines: Vec<String> = operations.iter().map(dump::operation).collect();
    lines.join("\n")
}

/// Dense f32 tensor, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    pub shape: Vec<u32>,
    pub data: Vec<f32>,
}

impl Tensor {
    pub fn new(shape: &[u32], data: Vec<f32>) -> Self {
        assert_eq!(
            shape.iter().product::<u32>() as usize,
            data.len(),
            "shape {shape:?} does not match {} elements",
            data.len()
        );
        Self {
            shape: shape.to_vec(),
            data,
        }
    }

    fn from_value(value: &ir::Value) -> Self {
        let data = value
            .to_f32_vec()
            .unwrap_or_else(|| panic!("not an immediate float value: {value:?}"));
        Self::new(&value.ty.dimensions, data)
    }
}

/// Run `operations` over named inputs and return every value produced.
///
/// Supports the float subset the decompositions emit: `const`, `add`,
/// `mul`, `sigmoid_hard`, `matmul`, `identity` and `reshape`.
pub fn evaluate(
    operations: &[ir::Operation],
    inputs: &[(&str, Tensor)],
) -> HashMap<String, Tensor> {
    let mut env: HashMap<String, Tensor> = inputs
        .iter()
        .map(|(name, tensor)| ((*name).to_owned(), tensor.clone()))
        .collect();

    for op in operations {
        let arg = |param: &str| -> Tensor {
            match op.input(param) {
                Some([Binding::Name(name)]) => env
                    .get(name)
                    .unwrap_or_else(|| panic!("{}: `{name}` is undefined", op.op_type))
                    .clone(),
                Some([Binding::Value(value)]) => Tensor::from_value(value),
                other => panic!("{}: bad binding for `{param}`: {other:?}", op.op_type),
            }
        };
        let flag = |param: &str| -> bool {
            match op.input_value(param).map(|v| &v.data) {
                Some(ir::ValueData::Immediate(ir::TensorData::Bools(b))) => b[0],
                _ => false,
            }
        };

        let result = match op.op_type.as_str() {
            "const" => Tensor::from_value(&op.attributes["val"]),
            "add" => broadcast(&arg("x"), &arg("y"), |a, b| a + b),
            "mul" => broadcast(&arg("x"), &arg("y"), |a, b| a * b),
            "identity" => arg("x"),
            "reshape" => {
                let x = arg("x");
                Tensor::new(&op.outputs[0].ty.dimensions, x.data)
            }
            "sigmoid_hard" => {
                let x = arg("x");
                let alpha = arg("alpha").data[0];
                let beta = arg("beta").data[0];
                let data = x
                    .data
                    .iter()
                    .map(|&v| (alpha * v + beta).clamp(0.0, 1.0))
                    .collect();
                Tensor::new(&x.shape, data)
            }
            "matmul" => matmul(&arg("x"), &arg("y"), flag("transpose_x"), flag("transpose_y")),
            other => panic!("evaluate: unsupported op `{other}`"),
        };
        env.insert(op.outputs[0].name.clone(), result);
    }
    env
}

fn broadcast(a: &Tensor, b: &Tensor, f: impl Fn(f32, f32) -> f32) -> Tensor {
    let rank = a.shape.len().max(b.shape.len());
    let align = |shape: &[u32]| -> Vec<u32> {
        let mut aligned = vec![1; rank - shape.len()];
        aligned.extend_from_slice(shape);
        aligned
    };
    let (sa, sb) = (align(&a.shape), align(&b.shape));
    let shape: Vec<u32> = sa.iter().zip(&sb).map(|(&x, &y)| x.max(y)).collect();
    let count = shape.iter().product::<u32>() as usize;

    let offset = |index: &[u32], dims: &[u32]| -> usize {
        index.iter().zip(dims).fold(0usize, |acc, (&i, &d)| {
            acc * d as usize + if d == 1 { 0 } else { i as usize }
        })
    };

    let mut data = Vec::with_capacity(count);
    let mut index = vec![0u32; rank];
    for _ in 0..count {
        data.push(f(a.data[offset(&index, &sa)], b.data[offset(&index, &sb)]));
        for axis in (0..rank).rev() {
            index[axis] += 1;
            if index[axis] < shape[axis] {
                break;
            }
            index[axis] = 0;
        }
    }
    Tensor::new(&shape, data)
}

fn matmul(x: &Tensor, y: &Tensor, transpose_x: bool, transpose_y: bool) -> Tensor {
    let at = |t: &Tensor, transposed: bool, r: usize, c: usize| -> f32 {
        let columns = t.shape[1] as usize;
        if transposed {
            t.data[c * columns + r]
        } else {
            t.data[r * columns + c]
        }
    };
    let (m, k) = if transpose_x {
        (x.shape[1], x.shape[0])
    } else {
        (x.shape[0], x.shape[1])
    };
    let n = if transpose_y { y.shape[0] } else { y.shape[1] };

    let mut data = Vec::with_capacity((m * n) as usize);
    for r in 0..m as usize {
        for c in 0..n as usize {
            let sum = (0..k as usize)
                .map(|i| at(x, transpose_x, r, i) * at(y, transpose_y, i, c))
                .sum();
            data.push(sum);
        }
    }
    Tensor::new(&[m, n], data)
}
