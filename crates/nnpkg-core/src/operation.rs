//! The closed set of graph operations.
//!
//! Each variant carries the ids of the operands it reads and writes plus its
//! attributes. Variants that share a payload type (the recurrent family, the
//! plain activations) are distinguished by the variant alone.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::OperandId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Operation {
    ArgMinMax(ArgMinMax),
    BatchNormalization(BatchNormalization),
    Clamp(Clamp),
    Concat(Concat),
    Conv2d(Conv2d),
    CumulativeSum(CumulativeSum),
    DequantizeLinear(QuantizeLinear),
    ElementWiseBinary(ElementWiseBinary),
    ElementWiseUnary(ElementWiseUnary),
    Elu(Elu),
    Expand(Expand),
    Gather(Gather),
    GatherElements(Gather),
    GatherNd(GatherNd),
    Gelu(Activation),
    Gemm(Gemm),
    Gru(Recurrent),
    GruCell(Recurrent),
    HardSigmoid(HardSigmoid),
    HardSwish(Activation),
    InstanceNormalization(InstanceNormalization),
    LayerNormalization(LayerNormalization),
    LeakyRelu(LeakyRelu),
    Linear(Linear),
    Lstm(Recurrent),
    LstmCell(Recurrent),
    Matmul(Matmul),
    Pad(Pad),
    Pool2d(Pool2d),
    Prelu(Prelu),
    QuantizeLinear(QuantizeLinear),
    Reduce(Reduce),
    Relu(Activation),
    Resample2d(Resample2d),
    Reshape(Reshape),
    ScatterNd(ScatterNd),
    Sigmoid(Activation),
    Slice(Slice),
    Softmax(Softmax),
    Softplus(Activation),
    Softsign(Activation),
    Split(Split),
    Tanh(Activation),
    Tile(Tile),
    Transpose(Transpose),
    Triangular(Triangular),
    Where(Where),
}

impl Operation {
    /// Operator name as used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ArgMinMax(op) => match op.kind {
                ArgMinMaxKind::Min => "argMin",
                ArgMinMaxKind::Max => "argMax",
            },
            Self::BatchNormalization(_) => "batchNormalization",
            Self::Clamp(_) => "clamp",
            Self::Concat(_) => "concat",
            Self::Conv2d(op) => match op.kind {
                Conv2dKind::Direct => "conv2d",
                Conv2dKind::Transposed => "convTranspose2d",
            },
            Self::CumulativeSum(_) => "cumulativeSum",
            Self::DequantizeLinear(_) => "dequantizeLinear",
            Self::ElementWiseBinary(op) => op.kind.name(),
            Self::ElementWiseUnary(op) => op.kind.name(),
            Self::Elu(_) => "elu",
            Self::Expand(_) => "expand",
            Self::Gather(_) => "gather",
            Self::GatherElements(_) => "gatherElements",
            Self::GatherNd(_) => "gatherNd",
            Self::Gelu(_) => "gelu",
            Self::Gemm(_) => "gemm",
            Self::Gru(_) => "gru",
            Self::GruCell(_) => "gruCell",
            Self::HardSigmoid(_) => "hardSigmoid",
            Self::HardSwish(_) => "hardSwish",
            Self::InstanceNormalization(_) => "instanceNormalization",
            Self::LayerNormalization(_) => "layerNormalization",
            Self::LeakyRelu(_) => "leakyRelu",
            Self::Linear(_) => "linear",
            Self::Lstm(_) => "lstm",
            Self::LstmCell(_) => "lstmCell",
            Self::Matmul(_) => "matmul",
            Self::Pad(_) => "pad",
            Self::Pool2d(op) => op.kind.name(),
            Self::Prelu(_) => "prelu",
            Self::QuantizeLinear(_) => "quantizeLinear",
            Self::Reduce(op) => op.kind.name(),
            Self::Relu(_) => "relu",
            Self::Resample2d(_) => "resample2d",
            Self::Reshape(_) => "reshape",
            Self::ScatterNd(_) => "scatterNd",
            Self::Sigmoid(_) => "sigmoid",
            Self::Slice(_) => "slice",
            Self::Softmax(_) => "softmax",
            Self::Softplus(_) => "softplus",
            Self::Softsign(_) => "softsign",
            Self::Split(_) => "split",
            Self::Tanh(_) => "tanh",
            Self::Tile(_) => "tile",
            Self::Transpose(_) => "transpose",
            Self::Triangular(_) => "triangular",
            Self::Where(_) => "where",
        }
    }
}

impl Operation {
    /// Every operand id the operation reads or writes, inputs first.
    pub fn operand_ids(&self) -> Vec<OperandId> {
        fn opt(id: Option<OperandId>) -> impl Iterator<Item = OperandId> {
            id.into_iter()
        }
        match self {
            Self::ArgMinMax(op) => vec![op.input, op.output],
            Self::BatchNormalization(op) => [op.input, op.mean, op.variance]
                .into_iter()
                .chain(opt(op.scale))
                .chain(opt(op.bias))
                .chain([op.output])
                .collect(),
            Self::Clamp(op) => vec![op.input, op.output],
            Self::Concat(op) => op.inputs.iter().copied().chain([op.output]).collect(),
            Self::Conv2d(op) => [op.input, op.filter]
                .into_iter()
                .chain(opt(op.bias))
                .chain([op.output])
                .collect(),
            Self::CumulativeSum(op) => vec![op.input, op.output],
            Self::DequantizeLinear(op) | Self::QuantizeLinear(op) => {
                vec![op.input, op.scale, op.zero_point, op.output]
            }
            Self::ElementWiseBinary(op) => vec![op.lhs, op.rhs, op.output],
            Self::ElementWiseUnary(op) => vec![op.input, op.output],
            Self::Elu(op) => vec![op.input, op.output],
            Self::Expand(op) => vec![op.input, op.output],
            Self::Gather(op) | Self::GatherElements(op) => vec![op.input, op.indices, op.output],
            Self::GatherNd(op) => vec![op.input, op.indices, op.output],
            Self::Gemm(op) => [op.a, op.b]
                .into_iter()
                .chain(opt(op.c))
                .chain([op.output])
                .collect(),
            Self::Gru(op) | Self::GruCell(op) | Self::Lstm(op) | Self::LstmCell(op) => {
                op.inputs.iter().chain(&op.outputs).copied().collect()
            }
            Self::Gelu(op)
            | Self::HardSwish(op)
            | Self::Relu(op)
            | Self::Sigmoid(op)
            | Self::Softplus(op)
            | Self::Softsign(op)
            | Self::Tanh(op) => vec![op.input, op.output],
            Self::HardSigmoid(op) => vec![op.input, op.output],
            Self::InstanceNormalization(op) => [op.input]
                .into_iter()
                .chain(opt(op.scale))
                .chain(opt(op.bias))
                .chain([op.output])
                .collect(),
            Self::LayerNormalization(op) => [op.input]
                .into_iter()
                .chain(opt(op.scale))
                .chain(opt(op.bias))
                .chain([op.output])
                .collect(),
            Self::LeakyRelu(op) => vec![op.input, op.output],
            Self::Linear(op) => vec![op.input, op.output],
            Self::Matmul(op) => vec![op.a, op.b, op.output],
            Self::Pad(op) => vec![op.input, op.output],
            Self::Pool2d(op) => vec![op.input, op.output],
            Self::Prelu(op) => vec![op.input, op.slope, op.output],
            Self::Reduce(op) => vec![op.input, op.output],
            Self::Resample2d(op) => vec![op.input, op.output],
            Self::Reshape(op) => vec![op.input, op.output],
            Self::ScatterNd(op) => vec![op.input, op.indices, op.updates, op.output],
            Self::Slice(op) => vec![op.input, op.output],
            Self::Softmax(op) => vec![op.input, op.output],
            Self::Split(op) => [op.input].into_iter().chain(op.outputs.iter().copied()).collect(),
            Self::Tile(op) => vec![op.input, op.output],
            Self::Transpose(op) => vec![op.input, op.output],
            Self::Triangular(op) => vec![op.input, op.output],
            Self::Where(op) => vec![op.condition, op.true_value, op.false_value, op.output],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Height/width pair used by the 2-D window operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size2d {
    pub height: u32,
    pub width: u32,
}

impl Size2d {
    pub const ONE: Size2d = Size2d::new(1, 1);

    pub const fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding2d {
    pub beginning: Size2d,
    pub ending: Size2d,
}

impl Padding2d {
    pub const ZERO: Padding2d = Padding2d {
        beginning: Size2d::new(0, 0),
        ending: Size2d::new(0, 0),
    };
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputOperandLayout {
    #[default]
    ChannelsFirst,
    ChannelsLast,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArgMinMaxKind {
    Min,
    Max,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgMinMax {
    pub kind: ArgMinMaxKind,
    pub input: OperandId,
    pub output: OperandId,
    pub axis: u32,
    #[serde(default)]
    pub keep_dimensions: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchNormalization {
    pub input: OperandId,
    pub mean: OperandId,
    pub variance: OperandId,
    #[serde(default)]
    pub scale: Option<OperandId>,
    #[serde(default)]
    pub bias: Option<OperandId>,
    pub output: OperandId,
    pub axis: u32,
    pub epsilon: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clamp {
    pub input: OperandId,
    pub output: OperandId,
    pub min_value: f32,
    pub max_value: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concat {
    pub inputs: Vec<OperandId>,
    pub output: OperandId,
    pub axis: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Conv2dKind {
    Direct,
    Transposed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conv2d {
    pub kind: Conv2dKind,
    pub input: OperandId,
    pub filter: OperandId,
    #[serde(default)]
    pub bias: Option<OperandId>,
    pub output: OperandId,
    pub strides: Size2d,
    pub dilations: Size2d,
    pub padding: Padding2d,
    pub groups: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeSum {
    pub input: OperandId,
    pub output: OperandId,
    pub axis: u32,
    #[serde(default)]
    pub exclusive: bool,
    #[serde(default)]
    pub reversed: bool,
}

/// Payload shared by quantizeLinear and dequantizeLinear.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantizeLinear {
    pub input: OperandId,
    pub scale: OperandId,
    pub zero_point: OperandId,
    pub output: OperandId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BinaryKind {
    Add,
    Sub,
    Mul,
    Div,
    Max,
    Min,
    Pow,
    Equal,
    Greater,
    GreaterOrEqual,
    Lesser,
    LesserOrEqual,
}

impl BinaryKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Max => "max",
            Self::Min => "min",
            Self::Pow => "pow",
            Self::Equal => "equal",
            Self::Greater => "greater",
            Self::GreaterOrEqual => "greaterOrEqual",
            Self::Lesser => "lesser",
            Self::LesserOrEqual => "lesserOrEqual",
        }
    }

    /// Comparisons produce a boolean result.
    pub fn is_logical(self) -> bool {
        matches!(
            self,
            Self::Equal
                | Self::Greater
                | Self::GreaterOrEqual
                | Self::Lesser
                | Self::LesserOrEqual
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementWiseBinary {
    pub kind: BinaryKind,
    pub lhs: OperandId,
    pub rhs: OperandId,
    pub output: OperandId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnaryKind {
    Abs,
    Cast,
    Ceil,
    Cos,
    Erf,
    Exp,
    Floor,
    Identity,
    Log,
    LogicalNot,
    Neg,
    Reciprocal,
    Sign,
    Sin,
    Sqrt,
    Tan,
}

impl UnaryKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Cast => "cast",
            Self::Ceil => "ceil",
            Self::Cos => "cos",
            Self::Erf => "erf",
            Self::Exp => "exp",
            Self::Floor => "floor",
            Self::Identity => "identity",
            Self::Log => "log",
            Self::LogicalNot => "logicalNot",
            Self::Neg => "neg",
            Self::Reciprocal => "reciprocal",
            Self::Sign => "sign",
            Self::Sin => "sin",
            Self::Sqrt => "sqrt",
            Self::Tan => "tan",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementWiseUnary {
    pub kind: UnaryKind,
    pub input: OperandId,
    pub output: OperandId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Elu {
    pub input: OperandId,
    pub output: OperandId,
    pub alpha: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expand {
    pub input: OperandId,
    pub output: OperandId,
}

/// Payload shared by gather and gatherElements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gather {
    pub input: OperandId,
    pub indices: OperandId,
    pub output: OperandId,
    pub axis: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatherNd {
    pub input: OperandId,
    pub indices: OperandId,
    pub output: OperandId,
}

/// `alpha * op(A) x op(B) + beta * C`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gemm {
    pub a: OperandId,
    pub b: OperandId,
    #[serde(default)]
    pub c: Option<OperandId>,
    pub output: OperandId,
    pub alpha: f32,
    pub beta: f32,
    #[serde(default)]
    pub a_transpose: bool,
    #[serde(default)]
    pub b_transpose: bool,
}

/// Payload of the recurrent family (gru, gruCell, lstm, lstmCell).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recurrent {
    pub inputs: Vec<OperandId>,
    pub outputs: Vec<OperandId>,
}

/// Single input, single output, no attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    pub input: OperandId,
    pub output: OperandId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardSigmoid {
    pub input: OperandId,
    pub output: OperandId,
    pub alpha: f32,
    pub beta: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceNormalization {
    pub input: OperandId,
    #[serde(default)]
    pub scale: Option<OperandId>,
    #[serde(default)]
    pub bias: Option<OperandId>,
    pub output: OperandId,
    pub epsilon: f32,
    #[serde(default)]
    pub layout: InputOperandLayout,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerNormalization {
    pub input: OperandId,
    #[serde(default)]
    pub scale: Option<OperandId>,
    #[serde(default)]
    pub bias: Option<OperandId>,
    pub output: OperandId,
    pub axes: Vec<u32>,
    pub epsilon: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeakyRelu {
    pub input: OperandId,
    pub output: OperandId,
    pub alpha: f32,
}

/// `alpha * x + beta`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Linear {
    pub input: OperandId,
    pub output: OperandId,
    pub alpha: f32,
    pub beta: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matmul {
    pub a: OperandId,
    pub b: OperandId,
    pub output: OperandId,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PaddingMode {
    Constant { value: f32 },
    Edge,
    Reflection,
    Symmetric,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pad {
    pub input: OperandId,
    pub output: OperandId,
    pub beginning_padding: Vec<u32>,
    pub ending_padding: Vec<u32>,
    pub mode: PaddingMode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pool2dKind {
    AveragePool2d,
    L2Pool2d,
    MaxPool2d,
}

impl Pool2dKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::AveragePool2d => "averagePool2d",
            Self::L2Pool2d => "l2Pool2d",
            Self::MaxPool2d => "maxPool2d",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool2d {
    pub kind: Pool2dKind,
    pub input: OperandId,
    pub output: OperandId,
    pub window_dimensions: Size2d,
    pub padding: Padding2d,
    pub strides: Size2d,
    pub dilations: Size2d,
    #[serde(default)]
    pub layout: InputOperandLayout,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prelu {
    pub input: OperandId,
    pub slope: OperandId,
    pub output: OperandId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReduceKind {
    L1,
    L2,
    LogSum,
    LogSumExp,
    Max,
    Mean,
    Min,
    Product,
    Sum,
    SumSquare,
}

impl ReduceKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::L1 => "reduceL1",
            Self::L2 => "reduceL2",
            Self::LogSum => "reduceLogSum",
            Self::LogSumExp => "reduceLogSumExp",
            Self::Max => "reduceMax",
            Self::Mean => "reduceMean",
            Self::Min => "reduceMin",
            Self::Product => "reduceProduct",
            Self::Sum => "reduceSum",
            Self::SumSquare => "reduceSumSquare",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reduce {
    pub kind: ReduceKind,
    pub input: OperandId,
    pub output: OperandId,
    pub axes: Vec<u32>,
    #[serde(default)]
    pub keep_dimensions: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterpolationMode {
    NearestNeighbor,
    Linear,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resample2d {
    pub input: OperandId,
    pub output: OperandId,
    pub mode: InterpolationMode,
    /// Height and width scale factors; derived from the shapes when absent.
    #[serde(default)]
    pub scales: Option<[f32; 2]>,
    pub axes: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reshape {
    pub input: OperandId,
    pub output: OperandId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterNd {
    pub input: OperandId,
    pub indices: OperandId,
    pub updates: OperandId,
    pub output: OperandId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceRange {
    pub start: u32,
    pub size: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slice {
    pub input: OperandId,
    pub output: OperandId,
    pub ranges: Vec<SliceRange>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Softmax {
    pub input: OperandId,
    pub output: OperandId,
    pub axis: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    pub input: OperandId,
    pub outputs: Vec<OperandId>,
    pub axis: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub input: OperandId,
    pub output: OperandId,
    pub repetitions: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transpose {
    pub input: OperandId,
    pub output: OperandId,
    pub permutation: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Triangular {
    pub input: OperandId,
    pub output: OperandId,
    #[serde(default)]
    pub upper: bool,
    #[serde(default)]
    pub diagonal: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Where {
    pub condition: OperandId,
    pub true_value: OperandId,
    pub false_value: OperandId,
    pub output: OperandId,
}
