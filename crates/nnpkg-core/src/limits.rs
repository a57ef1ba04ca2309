use serde::{Deserialize, Serialize};

use crate::OperandDataType::{Float16, Float32, Int8, Int32, Uint8};
use crate::SupportedDataTypes;

const FLOATS: SupportedDataTypes = SupportedDataTypes::from_slice(&[Float16, Float32]);
const FLOATS_AND_INT32: SupportedDataTypes =
    SupportedDataTypes::from_slice(&[Float16, Float32, Int32]);
const CASTABLE: SupportedDataTypes =
    SupportedDataTypes::from_slice(&[Float32, Float16, Int32, Int8, Uint8]);
const INT32: SupportedDataTypes = SupportedDataTypes::from_slice(&[Int32]);
const UINT8: SupportedDataTypes = SupportedDataTypes::from_slice(&[Uint8]);
const INDICES: SupportedDataTypes = SupportedDataTypes::from_slice(&[Int32, Int8, Uint8]);
const NONE: SupportedDataTypes = SupportedDataTypes::empty();

/// Element types accepted at each operator port.
///
/// Ports missing from a deserialized table accept nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataTypeLimits {
    pub input: SupportedDataTypes,
    pub constant: SupportedDataTypes,
    pub arg_min_max_input: SupportedDataTypes,
    pub arg_min_max_output: SupportedDataTypes,
    pub batch_normalization_input: SupportedDataTypes,
    pub cast_input: SupportedDataTypes,
    pub clamp_input: SupportedDataTypes,
    pub concat_inputs: SupportedDataTypes,
    pub conv2d_input: SupportedDataTypes,
    pub conv_transpose2d_input: SupportedDataTypes,
    pub cumulative_sum_input: SupportedDataTypes,
    pub dequantize_linear_input: SupportedDataTypes,
    pub add_input: SupportedDataTypes,
    pub sub_input: SupportedDataTypes,
    pub mul_input: SupportedDataTypes,
    pub div_input: SupportedDataTypes,
    pub max_input: SupportedDataTypes,
    pub min_input: SupportedDataTypes,
    pub pow_input: SupportedDataTypes,
    pub equal_input: SupportedDataTypes,
    pub greater_input: SupportedDataTypes,
    pub greater_or_equal_input: SupportedDataTypes,
    pub lesser_input: SupportedDataTypes,
    pub lesser_or_equal_input: SupportedDataTypes,
    pub logical_not_input: SupportedDataTypes,
    pub logical_output: SupportedDataTypes,
    pub abs_input: SupportedDataTypes,
    pub ceil_input: SupportedDataTypes,
    pub cos_input: SupportedDataTypes,
    pub erf_input: SupportedDataTypes,
    pub exp_input: SupportedDataTypes,
    pub floor_input: SupportedDataTypes,
    pub identity_input: SupportedDataTypes,
    pub log_input: SupportedDataTypes,
    pub neg_input: SupportedDataTypes,
    pub reciprocal_input: SupportedDataTypes,
    pub sign_input: SupportedDataTypes,
    pub sin_input: SupportedDataTypes,
    pub sqrt_input: SupportedDataTypes,
    pub tan_input: SupportedDataTypes,
    pub elu_input: SupportedDataTypes,
    pub expand_input: SupportedDataTypes,
    pub gather_input: SupportedDataTypes,
    pub gather_indices: SupportedDataTypes,
    pub gather_elements_input: SupportedDataTypes,
    pub gather_nd_input: SupportedDataTypes,
    pub gelu_input: SupportedDataTypes,
    pub gemm_input: SupportedDataTypes,
    pub gru_input: SupportedDataTypes,
    pub gru_cell_input: SupportedDataTypes,
    pub hard_sigmoid_input: SupportedDataTypes,
    pub hard_swish_input: SupportedDataTypes,
    pub instance_normalization_input: SupportedDataTypes,
    pub layer_normalization_input: SupportedDataTypes,
    pub leaky_relu_input: SupportedDataTypes,
    pub linear_input: SupportedDataTypes,
    pub lstm_input: SupportedDataTypes,
    pub lstm_cell_input: SupportedDataTypes,
    pub matmul_input: SupportedDataTypes,
    pub pad_input: SupportedDataTypes,
    pub average_pool2d_input: SupportedDataTypes,
    pub l2_pool2d_input: SupportedDataTypes,
    pub max_pool2d_input: SupportedDataTypes,
    pub prelu_input: SupportedDataTypes,
    pub quantize_linear_input: SupportedDataTypes,
    pub reduce_l1_input: SupportedDataTypes,
    pub reduce_l2_input: SupportedDataTypes,
    pub reduce_log_sum_input: SupportedDataTypes,
    pub reduce_log_sum_exp_input: SupportedDataTypes,
    pub reduce_max_input: SupportedDataTypes,
    pub reduce_mean_input: SupportedDataTypes,
    pub reduce_min_input: SupportedDataTypes,
    pub reduce_product_input: SupportedDataTypes,
    pub reduce_sum_input: SupportedDataTypes,
    pub reduce_sum_square_input: SupportedDataTypes,
    pub relu_input: SupportedDataTypes,
    pub resample2d_input: SupportedDataTypes,
    pub reshape_input: SupportedDataTypes,
    pub scatter_nd_input: SupportedDataTypes,
    pub sigmoid_input: SupportedDataTypes,
    pub slice_input: SupportedDataTypes,
    pub softmax_input: SupportedDataTypes,
    pub softplus_input: SupportedDataTypes,
    pub softsign_input: SupportedDataTypes,
    pub split_input: SupportedDataTypes,
    pub tanh_input: SupportedDataTypes,
    pub tile_input: SupportedDataTypes,
    pub transpose_input: SupportedDataTypes,
    pub triangular_input: SupportedDataTypes,
    pub where_condition: SupportedDataTypes,
    pub where_value: SupportedDataTypes,
}

impl DataTypeLimits {
    /// The table hosts usually negotiate for the ML program backend.
    ///
    /// Operators without a lowering get empty sets.
    pub fn baseline() -> Self {
        Self {
            input: FLOATS_AND_INT32,
            constant: FLOATS_AND_INT32,
            arg_min_max_input: FLOATS_AND_INT32,
            arg_min_max_output: INT32,
            batch_normalization_input: FLOATS,
            cast_input: CASTABLE,
            clamp_input: FLOATS,
            concat_inputs: FLOATS_AND_INT32,
            conv2d_input: FLOATS,
            conv_transpose2d_input: FLOATS,
            cumulative_sum_input: NONE,
            dequantize_linear_input: NONE,
            add_input: FLOATS_AND_INT32,
            sub_input: FLOATS_AND_INT32,
            mul_input: FLOATS_AND_INT32,
            div_input: FLOATS_AND_INT32,
            max_input: FLOATS_AND_INT32,
            min_input: FLOATS_AND_INT32,
            pow_input: FLOATS_AND_INT32,
            equal_input: FLOATS_AND_INT32,
            greater_input: FLOATS_AND_INT32,
            greater_or_equal_input: FLOATS_AND_INT32,
            lesser_input: FLOATS_AND_INT32,
            lesser_or_equal_input: FLOATS_AND_INT32,
            logical_not_input: UINT8,
            logical_output: UINT8,
            abs_input: FLOATS_AND_INT32,
            ceil_input: FLOATS,
            cos_input: FLOATS,
            erf_input: FLOATS,
            exp_input: FLOATS,
            floor_input: FLOATS,
            identity_input: FLOATS_AND_INT32,
            log_input: FLOATS,
            neg_input: FLOATS_AND_INT32,
            reciprocal_input: FLOATS,
            sign_input: NONE,
            sin_input: FLOATS,
            sqrt_input: FLOATS,
            tan_input: FLOATS,
            elu_input: FLOATS,
            expand_input: FLOATS_AND_INT32,
            gather_input: CASTABLE,
            gather_indices: INDICES,
            gather_elements_input: NONE,
            gather_nd_input: NONE,
            gelu_input: FLOATS,
            gemm_input: FLOATS,
            gru_input: NONE,
            gru_cell_input: NONE,
            hard_sigmoid_input: FLOATS,
            hard_swish_input: FLOATS,
            instance_normalization_input: FLOATS,
            layer_normalization_input: FLOATS,
            leaky_relu_input: FLOATS,
            linear_input: FLOATS,
            lstm_input: NONE,
            lstm_cell_input: NONE,
            matmul_input: FLOATS_AND_INT32,
            pad_input: FLOATS,
            average_pool2d_input: FLOATS,
            l2_pool2d_input: FLOATS,
            max_pool2d_input: FLOATS,
            prelu_input: NONE,
            quantize_linear_input: NONE,
            reduce_l1_input: FLOATS_AND_INT32,
            reduce_l2_input: FLOATS_AND_INT32,
            reduce_log_sum_input: FLOATS_AND_INT32,
            reduce_log_sum_exp_input: FLOATS_AND_INT32,
            reduce_max_input: FLOATS_AND_INT32,
            reduce_mean_input: FLOATS_AND_INT32,
            reduce_min_input: FLOATS_AND_INT32,
            reduce_product_input: FLOATS_AND_INT32,
            reduce_sum_input: FLOATS_AND_INT32,
            reduce_sum_square_input: FLOATS_AND_INT32,
            relu_input: FLOATS,
            resample2d_input: FLOATS,
            reshape_input: FLOATS_AND_INT32,
            scatter_nd_input: NONE,
            sigmoid_input: FLOATS,
            slice_input: CASTABLE,
            softmax_input: FLOATS,
            softplus_input: FLOATS,
            softsign_input: FLOATS,
            split_input: FLOATS_AND_INT32,
            tanh_input: FLOATS,
            tile_input: NONE,
            transpose_input: FLOATS_AND_INT32,
            triangular_input: NONE,
            where_condition: UINT8,
            where_value: FLOATS_AND_INT32,
        }
    }
}
