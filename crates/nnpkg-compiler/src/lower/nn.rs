use nnpkg_core::OperandId;
use nnpkg_core::operation::{
    BatchNormalization, BinaryKind, Conv2d, Conv2dKind, Gemm, InputOperandLayout,
    InstanceNormalization, InterpolationMode, LayerNormalization, Padding2d, Pool2d, Pool2dKind,
    Resample2d, Size2d, Softmax,
};
use nnpkg_format::{self as ir, Value};

use super::{Lowerer, Rhs};
use crate::{Error, Result};

const RESAMPLE_AXES: [u32; 2] = [2, 3];

fn size2d(size: Size2d) -> Value {
    Value::ints_from_u32(&[size.height, size.width])
}

/// `[top, bottom, left, right]`.
fn padding2d(padding: Padding2d) -> Value {
    Value::ints_from_u32(&[
        padding.beginning.height,
        padding.ending.height,
        padding.beginning.width,
        padding.ending.width,
    ])
}

impl Lowerer<'_> {
    pub(super) fn lower_conv2d(&mut self, op: &Conv2d) -> Result<()> {
        let (name, op_type, allowed) = match op.kind {
            Conv2dKind::Direct => ("conv2d", "conv", self.limits.conv2d_input),
            Conv2dKind::Transposed => (
                "convTranspose2d",
                "conv_transpose",
                self.limits.conv_transpose2d_input,
            ),
        };
        self.check(name, "input", allowed, op.input)?;

        let mut conv = ir::Operation::new(op_type)
            .arg("x", self.name(op.input))
            .arg("weight", self.name(op.filter))
            .value("strides", size2d(op.strides))
            .value("pad_type", Value::string("custom"))
            .value("pad", padding2d(op.padding))
            .value("dilations", size2d(op.dilations))
            .value("groups", Value::scalar_i32(op.groups as i32));
        if let Some(bias) = op.bias {
            conv = conv.arg("bias", self.name(bias));
        }
        if op.kind == Conv2dKind::Transposed {
            conv = conv.value("output_shape", Value::ints_from_u32(&self.dimensions(op.output)));
        }
        self.emit(conv.output(self.output(op.output)));
        Ok(())
    }

    pub(super) fn lower_batch_normalization(&mut self, op: &BatchNormalization) -> Result<()> {
        let name = "batchNormalization";
        self.check(name, "input", self.limits.batch_normalization_input, op.input)?;
        if !(3..=5).contains(&self.dimensions(op.input).len()) {
            return Err(Error::not_supported(
                "Unsupported rank for batchNormalization. It must be between 3 and 5.",
            ));
        }
        // Only the channel dimension of NCH / NCHW / NCDHW.
        if op.axis != 1 {
            return Err(Error::not_supported(
                "Unsupported axis for batchNormalization. It must be the channel dimension.",
            ));
        }

        let epsilon = self.float_like(name, op.input, op.epsilon)?;
        let mut norm = ir::Operation::new("batch_norm")
            .arg("x", self.name(op.input))
            .arg("mean", self.name(op.mean))
            .arg("variance", self.name(op.variance));
        norm = self.affine_params(norm, op.scale, op.bias);
        self.emit(norm.value("epsilon", epsilon).output(self.output(op.output)));
        Ok(())
    }

    pub(super) fn lower_instance_normalization(&mut self, op: &InstanceNormalization) -> Result<()> {
        let name = "instanceNormalization";
        self.check(name, "input", self.limits.instance_normalization_input, op.input)?;
        if op.layout != InputOperandLayout::ChannelsFirst {
            return Err(Error::not_supported("Unsupported input layout."));
        }

        let epsilon = self.float_like(name, op.input, op.epsilon)?;
        let mut norm = ir::Operation::new("instance_norm").arg("x", self.name(op.input));
        norm = self.affine_params(norm, op.scale, op.bias);
        self.emit(norm.value("epsilon", epsilon).output(self.output(op.output)));
        Ok(())
    }

    pub(super) fn lower_layer_normalization(&mut self, op: &LayerNormalization) -> Result<()> {
        let name = "layerNormalization";
        self.check(name, "input", self.limits.layer_normalization_input, op.input)?;
        if !op.axes.is_sorted() {
            return Err(Error::not_supported(
                "Axes must be ordered for layerNormalization.",
            ));
        }

        let epsilon = self.float_like(name, op.input, op.epsilon)?;
        let mut norm = ir::Operation::new("layer_norm")
            .arg("x", self.name(op.input))
            .value("axes", Value::ints_from_u32(&op.axes));
        norm = self.affine_params(norm, op.scale, op.bias);
        self.emit(norm.value("epsilon", epsilon).output(self.output(op.output)));
        Ok(())
    }

    fn affine_params(
        &self,
        mut op: ir::Operation,
        scale: Option<OperandId>,
        bias: Option<OperandId>,
    ) -> ir::Operation {
        if let Some(scale) = scale {
            op = op.arg("gamma", self.name(scale));
        }
        if let Some(bias) = bias {
            op = op.arg("beta", self.name(bias));
        }
        op
    }

    pub(super) fn lower_pool2d(&mut self, op: &Pool2d) -> Result<()> {
        let limits = self.limits;
        let (op_type, allowed) = match op.kind {
            Pool2dKind::AveragePool2d => ("avg_pool", limits.average_pool2d_input),
            Pool2dKind::L2Pool2d => ("l2_pool", limits.l2_pool2d_input),
            Pool2dKind::MaxPool2d => ("max_pool", limits.max_pool2d_input),
        };
        self.check(op.kind.name(), "input", allowed, op.input)?;
        if op.dilations != Size2d::ONE {
            return Err(Error::not_supported("Unsupported dilations."));
        }
        if op.layout != InputOperandLayout::ChannelsFirst {
            return Err(Error::not_supported("Unsupported input layout."));
        }

        let mut pool = ir::Operation::new(op_type);
        if op.kind == Pool2dKind::AveragePool2d {
            pool = pool.value("exclude_padding_from_average", Value::scalar_bool(true));
        }
        let pool = pool
            .arg("x", self.name(op.input))
            .value("kernel_sizes", size2d(op.window_dimensions))
            .value("strides", size2d(op.strides))
            .value("pad_type", Value::string("custom"))
            .value("pad", padding2d(op.padding))
            .value("ceil_mode", Value::scalar_bool(false))
            .output(self.output(op.output));
        self.emit(pool);
        Ok(())
    }

    pub(crate) fn matmul(
        &mut self,
        a: OperandId,
        b: OperandId,
        transpose_a: bool,
        transpose_b: bool,
        output: OperandId,
    ) -> Result<()> {
        let allowed = self.limits.matmul_input;
        self.check("matmul", "input", allowed, a)?;
        self.check("matmul", "input", allowed, b)?;
        let op = ir::Operation::new("matmul")
            .arg("x", self.name(a))
            .arg("y", self.name(b))
            .value("transpose_x", Value::scalar_bool(transpose_a))
            .value("transpose_y", Value::scalar_bool(transpose_b))
            .output(self.output(output));
        self.emit(op);
        Ok(())
    }

    /// `alpha * (A x B) + beta * C` via matmul, mul and add.
    pub(super) fn lower_gemm(&mut self, op: &Gemm) -> Result<()> {
        let allowed = self.limits.gemm_input;
        self.check("gemm", "input", allowed, op.a)?;
        self.check("gemm", "input", allowed, op.b)?;
        if let Some(c) = op.c {
            self.check("gemm", "input", allowed, c)?;
        }

        let a = self.dimensions(op.a);
        let b = self.dimensions(op.b);
        let (&[a0, a1], &[b0, b1]) = (a.as_slice(), b.as_slice()) else {
            return Err(Error::not_supported(
                "Unsupported rank for gemm. It must be 2.",
            ));
        };
        let rows = if op.a_transpose { a1 } else { a0 };
        let columns = if op.b_transpose { b0 } else { b1 };

        if op.alpha == 1.0 && op.c.is_none() {
            return self.matmul(op.a, op.b, op.a_transpose, op.b_transpose, op.output);
        }

        let data_type = self.data_type(op.a);
        let mut product = self.internal(data_type, vec![rows, columns])?;
        self.matmul(op.a, op.b, op.a_transpose, op.b_transpose, product)?;

        if op.alpha != 1.0 {
            let scaled = match op.c {
                Some(_) => self.internal(data_type, vec![rows, columns])?,
                None => op.output,
            };
            let alpha = self.float_like("gemm", op.a, op.alpha)?;
            self.binary(BinaryKind::Mul, product, Rhs::Value(alpha), scaled)?;
            product = scaled;
        }

        let Some(mut c) = op.c else {
            return Ok(());
        };
        if op.beta != 1.0 {
            let scaled = self.internal(self.data_type(c), self.dimensions(c))?;
            let beta = self.float_like("gemm", c, op.beta)?;
            self.binary(BinaryKind::Mul, c, Rhs::Value(beta), scaled)?;
            c = scaled;
        }
        self.binary(BinaryKind::Add, product, Rhs::Operand(c), op.output)
    }

    pub(super) fn lower_softmax(&mut self, op: &Softmax) -> Result<()> {
        self.check("softmax", "input", self.limits.softmax_input, op.input)?;
        let softmax = ir::Operation::new("softmax")
            .arg("x", self.name(op.input))
            .value("axis", Value::scalar_i32(op.axis as i32))
            .output(self.output(op.output));
        self.emit(softmax);
        Ok(())
    }

    pub(super) fn lower_resample2d(&mut self, op: &Resample2d) -> Result<()> {
        self.check("resample2d", "input", self.limits.resample2d_input, op.input)?;
        if op.axes != RESAMPLE_AXES {
            return Err(Error::not_supported(
                "Unsupported axes for resample2d. They must be [2, 3].",
            ));
        }

        let scales = match op.scales {
            Some(scales) => scales,
            None => {
                let input = self.dimensions(op.input);
                let output = self.dimensions(op.output);
                let mut scales = [1.0; 2];
                for (scale, axis) in scales.iter_mut().zip(RESAMPLE_AXES) {
                    let axis = axis as usize;
                    let (Some(&from), Some(&to)) = (input.get(axis), output.get(axis)) else {
                        return Err(Error::not_supported(
                            "Unsupported rank for resample2d. It must be 4.",
                        ));
                    };
                    *scale = to as f32 / from as f32;
                }
                scales
            }
        };

        let mut resample = match op.mode {
            InterpolationMode::Linear => ir::Operation::new("upsample_bilinear")
                .value("align_corners", Value::scalar_bool(false)),
            InterpolationMode::NearestNeighbor => {
                ir::Operation::new("upsample_nearest_neighbor")
            }
        };
        resample = resample
            .arg("x", self.name(op.input))
            .value("scale_factor_height", Value::scalar_f32(scales[0]))
            .value("scale_factor_width", Value::scalar_f32(scales[1]))
            .output(self.output(op.output));
        self.emit(resample);
        Ok(())
    }
}
