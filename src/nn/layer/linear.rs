/*
 * @Author       : 老董
 * @Date         : 2026-01-17
 * @Description  : Linear (全连接) 层
 */

use rand::Rng;

use crate::nn::{Init, Module, NnError, Parameter};
use crate::tensor::Tensor;

/// Linear (全连接) 层
///
/// PyTorch 风格的全连接层：`output = x @ W + b`
///
/// # 输入/输出形状
/// - 输入：[batch_size, in_features]
/// - 输出：[batch_size, out_features]
///
/// 前向时缓存输入，反向时据此计算：
/// - dW = xᵀ @ g
/// - db = Σ_batch g
/// - dx = g @ Wᵀ
pub struct Linear {
    /// 权重参数 [in_features, out_features]
    weights: Parameter,
    /// 偏置参数 [1, out_features]
    bias: Parameter,
    in_features: usize,
    out_features: usize,
    name: String,
    /// 最近一次前向的输入
    input_cache: Option<Tensor>,
}

impl Linear {
    /// 创建新的 Linear 层，权重与偏置均采用 `PyTorch` 默认的 U(-1/√in, 1/√in) 初始化
    ///
    /// 参数名为 `{name}.weight` 与 `{name}.bias`
    pub fn new<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        name: &str,
        rng: &mut R,
    ) -> Self {
        let init = Init::FanInUniform {
            fan_in: in_features,
        };
        Self::with_init(in_features, out_features, name, &init, &init, rng)
    }

    /// 以指定初始化策略创建 Linear 层
    pub fn with_init<R: Rng + ?Sized>(
        in_features: usize,
        out_features: usize,
        name: &str,
        weight_init: &Init,
        bias_init: &Init,
        rng: &mut R,
    ) -> Self {
        let weights = Parameter::new(
            &format!("{name}.weight"),
            weight_init.generate_with_rng(&[in_features, out_features], rng),
        );
        let bias = Parameter::new(
            &format!("{name}.bias"),
            bias_init.generate_with_rng(&[1, out_features], rng),
        );
        Self {
            weights,
            bias,
            in_features,
            out_features,
            name: name.to_string(),
            input_cache: None,
        }
    }

    /// 前向传播（训练用）：计算 `x @ W + b` 并缓存输入
    pub fn forward(&mut self, x: &Tensor) -> Result<Tensor, NnError> {
        let output = self.infer(x)?;
        self.input_cache = Some(x.clone());
        Ok(output)
    }

    /// 前向传播（推理用）：不缓存任何东西
    pub fn infer(&self, x: &Tensor) -> Result<Tensor, NnError> {
        if x.dimension() != 2 || x.shape()[1] != self.in_features {
            return Err(NnError::ShapeMismatch {
                expected: vec![x.shape().first().copied().unwrap_or(0), self.in_features],
                got: x.shape().to_vec(),
                message: format!("层`{}`的输入须为[batch, {}]", self.name, self.in_features),
            });
        }
        Ok(x.mat_mul(self.weights.value()) + self.bias.value())
    }

    /// 反向传播：累加 W、b 的梯度，并返回对输入的梯度
    pub fn backward(&mut self, grad_output: &Tensor) -> Result<Tensor, NnError> {
        let x = self
            .input_cache
            .as_ref()
            .ok_or_else(|| NnError::MissingForward(self.name.clone()))?;

        let expected = [x.shape()[0], self.out_features];
        if grad_output.shape() != expected {
            return Err(NnError::ShapeMismatch {
                expected: expected.to_vec(),
                got: grad_output.shape().to_vec(),
                message: format!("层`{}`的输出梯度", self.name),
            });
        }

        let grad_weights = x.transpose().mat_mul(grad_output);
        let grad_bias = grad_output.sum_axis0();
        let grad_input = grad_output.mat_mul(&self.weights.value().transpose());

        self.weights.accumulate_grad(grad_weights)?;
        self.bias.accumulate_grad(grad_bias)?;
        Ok(grad_input)
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }

    pub fn weights(&self) -> &Parameter {
        &self.weights
    }

    pub fn bias(&self) -> &Parameter {
        &self.bias
    }
}

impl Module for Linear {
    fn parameters(&self) -> Vec<&Parameter> {
        vec![&self.weights, &self.bias]
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        vec![&mut self.weights, &mut self.bias]
    }
}
