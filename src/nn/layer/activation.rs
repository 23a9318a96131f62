use crate::nn::NnError;
use crate::tensor::Tensor;

/// `ReLU` 激活：max(0, x)
///
/// 前向时缓存掩码（x > 0 处为 1，其余为 0），反向时梯度与掩码逐元素相乘。
#[derive(Default)]
pub struct Relu {
    mask: Option<Tensor>,
}

impl Relu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forward(&mut self, x: &Tensor) -> Tensor {
        self.mask = Some(x.map(|v| if v > 0. { 1. } else { 0. }));
        Self::infer(x)
    }

    pub fn infer(x: &Tensor) -> Tensor {
        x.map(|v| v.max(0.))
    }

    pub fn backward(&mut self, grad_output: &Tensor) -> Result<Tensor, NnError> {
        let mask = self
            .mask
            .as_ref()
            .ok_or_else(|| NnError::MissingForward("relu".to_string()))?;
        if !mask.is_same_shape(grad_output) {
            return Err(NnError::ShapeMismatch {
                expected: mask.shape().to_vec(),
                got: grad_output.shape().to_vec(),
                message: "ReLU 的输出梯度".to_string(),
            });
        }
        Ok(grad_output * mask)
    }
}
