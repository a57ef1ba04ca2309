use nnpkg_core::operation::{ArgMinMax, ArgMinMaxKind, Reduce, ReduceKind};
use nnpkg_core::{DataTypeLimits, OperandDataType, Operation};

use crate::test_utils::{GraphBuilder, Lowered};

fn reduce(
    kind: ReduceKind,
    data_type: OperandDataType,
    input: &[u32],
    output: &[u32],
    axes: Vec<u32>,
) -> crate::Result<Lowered> {
    let mut g = GraphBuilder::new();
    let x = g.input("x", data_type, input);
    let y = g.output("y", data_type, output);
    g.op(Operation::Reduce(Reduce {
        kind,
        input: x,
        output: y,
        axes,
        keep_dimensions: false,
    }));
    g.lower(&DataTypeLimits::baseline())
}

fn arg_min_max(
    kind: ArgMinMaxKind,
    input: &[u32],
    output: &[u32],
    keep_dimensions: bool,
) -> crate::Result<Lowered> {
    let mut g = GraphBuilder::new();
    let x = g.input("x", OperandDataType::Float32, input);
    let y = g.output("y", OperandDataType::Int32, output);
    g.op(Operation::ArgMinMax(ArgMinMax {
        kind,
        input: x,
        output: y,
        axis: 0,
        keep_dimensions,
    }));
    g.lower(&DataTypeLimits::baseline())
}

#[test]
fn reduce_over_axes() {
    let lowered = reduce(
        ReduceKind::Sum,
        OperandDataType::Float32,
        &[2, 3],
        &[2],
        vec![1],
    )
    .unwrap();

    insta::assert_snapshot!(lowered.dump(), @"output_y_2: fp32[2] = reduce_sum(x: input_x_1, axes: 1:int32[1], keep_dims: false)");
}

#[test]
fn reduce_kinds_map_to_target_names() {
    let cases = [
        (ReduceKind::L1, "reduce_l1_norm"),
        (ReduceKind::L2, "reduce_l2_norm"),
        (ReduceKind::LogSum, "reduce_log_sum"),
        (ReduceKind::LogSumExp, "reduce_log_sum_exp"),
        (ReduceKind::Max, "reduce_max"),
        (ReduceKind::Mean, "reduce_mean"),
        (ReduceKind::Min, "reduce_min"),
        (ReduceKind::Product, "reduce_prod"),
        (ReduceKind::Sum, "reduce_sum"),
        (ReduceKind::SumSquare, "reduce_sum_square"),
    ];
    for (kind, op_type) in cases {
        let lowered =
            reduce(kind, OperandDataType::Float16, &[4, 2], &[2], vec![0]).unwrap();
        assert_eq!(lowered.op_types(), [op_type]);
    }
}

#[test]
fn reducing_no_axes_applies_the_elementwise_part() {
    let sum = reduce(ReduceKind::Sum, OperandDataType::Float32, &[2], &[2], vec![]);
    let log_sum = reduce(ReduceKind::LogSum, OperandDataType::Float32, &[2], &[2], vec![]);
    let sum_square = reduce(
        ReduceKind::SumSquare,
        OperandDataType::Float32,
        &[2],
        &[2],
        vec![],
    );

    assert_eq!(sum.unwrap().dump(), "output_y_2: fp32[2] = identity(x: input_x_1)");
    assert_eq!(
        log_sum.unwrap().dump(),
        "output_y_2: fp32[2] = log(x: input_x_1, epsilon: 0.0)"
    );
    assert_eq!(
        sum_square.unwrap().dump(),
        "output_y_2: fp32[2] = mul(x: input_x_1, y: input_x_1)"
    );
}

#[test]
fn reducing_a_scalar_is_identity() {
    let lowered = reduce(ReduceKind::Max, OperandDataType::Int32, &[], &[], vec![0]).unwrap();

    assert_eq!(lowered.dump(), "output_y_2: int32[] = identity(x: input_x_1)");
}

#[test]
fn empty_axes_log_sum_checks_log_capability() {
    let err = reduce(ReduceKind::LogSum, OperandDataType::Int32, &[2], &[2], vec![])
        .err()
        .unwrap();

    assert_eq!(err.to_string(), "Unsupported data type int32 for input of log.");
}

#[test]
fn reduce_checks_its_own_port_first() {
    let err = reduce(ReduceKind::Sum, OperandDataType::Uint8, &[2], &[], vec![0])
        .err()
        .unwrap();

    assert_eq!(err.to_string(), "Unsupported data type uint8 for input of reduceSum.");
}

#[test]
fn arg_max_over_tensor() {
    let lowered = arg_min_max(ArgMinMaxKind::Max, &[3, 2], &[2], false).unwrap();

    assert_eq!(
        lowered.dump(),
        "output_y_2: int32[2] = reduce_argmax(x: input_x_1, axis: 0, keep_dims: false)"
    );
}

#[test]
fn scalar_arg_max_keeping_dimensions_reshapes_both_ways() {
    let lowered = arg_min_max(ArgMinMaxKind::Max, &[], &[], true).unwrap();

    insta::assert_snapshot!(lowered.dump(), @r"
    internal_3: fp32[1] = reshape(x: input_x_1, shape: 1:int32[1])
    internal_4: int32[1] = reduce_argmax(x: internal_3, axis: 0, keep_dims: true)
    output_y_2: int32[] = reshape(x: internal_4, shape: []:int32[0])
    ");
}

#[test]
fn scalar_arg_min_without_keeping_dimensions() {
    let lowered = arg_min_max(ArgMinMaxKind::Min, &[], &[], false).unwrap();

    insta::assert_snapshot!(lowered.dump(), @r"
    internal_3: fp32[1] = reshape(x: input_x_1, shape: 1:int32[1])
    output_y_2: int32[] = reduce_argmin(x: internal_3, axis: 0, keep_dims: false)
    ");
}

#[test]
fn arg_min_max_output_must_be_int32() {
    let mut g = GraphBuilder::new();
    let x = g.input("x", OperandDataType::Float32, &[3]);
    let y = g.output("y", OperandDataType::Float32, &[]);
    g.op(Operation::ArgMinMax(ArgMinMax {
        kind: ArgMinMaxKind::Max,
        input: x,
        output: y,
        axis: 0,
        keep_dimensions: false,
    }));

    let err = g.lower(&DataTypeLimits::baseline()).err().unwrap();

    assert_eq!(err.to_string(), "Unsupported data type float32 for output of argMax.");
}
