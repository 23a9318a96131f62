use rand::Rng;

use crate::tensor::Tensor;

/// 参数初始化策略
///
/// 权重形状约定为`[fan_in, fan_out]`（与`Linear`一致）。
#[derive(Debug, Clone, PartialEq)]
pub enum Init {
    /// 常数初始化
    Constant(f32),
    /// 全零
    Zeros,
    /// 均匀分布 U(-bound, bound)
    Uniform { bound: f32 },
    /// `PyTorch` `nn.Linear` 的默认初始化：U(-1/√fan_in, 1/√fan_in)
    FanInUniform { fan_in: usize },
    /// Kaiming/He 初始化（适用于 `ReLU`）
    Kaiming,
    /// Xavier/Glorot 初始化（适用于 Sigmoid/Tanh）
    Xavier,
}

impl Init {
    /// 生成初始化后的 Tensor（使用指定的 RNG，保证可复现）
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, shape: &[usize], rng: &mut R) -> Tensor {
        match self {
            Self::Constant(v) => Tensor::full(*v, shape),
            Self::Zeros => Tensor::zeros(shape),
            Self::Uniform { bound } => Tensor::uniform_with_rng(-*bound, *bound, shape, rng),
            Self::FanInUniform { fan_in } => {
                let bound = 1.0 / ((*fan_in).max(1) as f32).sqrt();
                Tensor::uniform_with_rng(-bound, bound, shape, rng)
            }
            Self::Kaiming => {
                let fan_in = shape.first().copied().unwrap_or(1).max(1);
                let std = (2.0 / fan_in as f32).sqrt();
                Tensor::normal_with_rng(0.0, std, shape, rng)
            }
            Self::Xavier => {
                let (fan_in, fan_out) = (
                    shape.first().copied().unwrap_or(1),
                    shape.get(1).copied().unwrap_or(1),
                );
                let std = (2.0 / (fan_in + fan_out).max(1) as f32).sqrt();
                Tensor::normal_with_rng(0.0, std, shape, rng)
            }
        }
    }
}
