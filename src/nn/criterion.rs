/*
 * @Author       : 老董
 * @Date         : 2025-01-21
 * @Description  : 损失函数封装（PyTorch 风格 API）
 */

use super::NnError;
use crate::tensor::Tensor;

/// 一次损失计算的结果
#[derive(Debug, Clone)]
pub struct LossOutput {
    /// batch 平均损失
    pub loss: f32,
    /// 损失对 logits 的梯度，形状同 logits
    pub grad: Tensor,
}

/// 交叉熵损失函数（PyTorch 风格）
///
/// 内置 Softmax，适用于多分类任务；对 batch 取平均（即 `reduction="mean"`）。
///
/// ## 数值稳定计算
/// ```text
/// softmax(x)_i = exp(x_i - max(x)) / Σ exp(x_j - max(x))
/// L = -Σ y_i * (x_i - max(x) - log(Σ exp(x_j - max(x))))
/// ∂L/∂x = (softmax(x) - y) / batch
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntropyLoss;

impl CrossEntropyLoss {
    pub fn new() -> Self {
        Self
    }

    /// 计算损失与梯度
    ///
    /// # 参数
    /// - `logits`: 模型输出，形状 [batch, num_classes]
    /// - `target`: 目标标签（one-hot 编码），形状同 `logits`
    pub fn forward(&self, logits: &Tensor, target: &Tensor) -> Result<LossOutput, NnError> {
        if logits.dimension() != 2 || !logits.is_same_shape(target) {
            return Err(NnError::ShapeMismatch {
                expected: logits.shape().to_vec(),
                got: target.shape().to_vec(),
                message: "logits 和 labels 形状必须相同，且为[batch, num_classes]".to_string(),
            });
        }
        let batch_size = logits.shape()[0];
        if batch_size == 0 {
            return Err(NnError::InvalidOperation("空 batch 无法计算损失".to_string()));
        }

        let softmax = stable_softmax(logits);
        let loss = stable_cross_entropy(logits, target);
        let grad = (&softmax - target) / batch_size as f32;
        Ok(LossOutput { loss, grad })
    }
}

/// 计算数值稳定的 softmax（逐行）
pub fn stable_softmax(logits: &Tensor) -> Tensor {
    let shape = logits.shape();
    let (batch_size, num_classes) = (shape[0], shape[1]);

    let mut result = Tensor::zeros(shape);
    for b in 0..batch_size {
        let max_val = row_max(logits, b, num_classes);

        let mut sum_exp = 0.0f32;
        for c in 0..num_classes {
            let exp_val = (logits[[b, c]] - max_val).exp();
            result[[b, c]] = exp_val;
            sum_exp += exp_val;
        }

        for c in 0..num_classes {
            result[[b, c]] /= sum_exp;
        }
    }
    result
}

/// 计算数值稳定的交叉熵损失（返回 batch 平均值）
fn stable_cross_entropy(logits: &Tensor, labels: &Tensor) -> f32 {
    let shape = logits.shape();
    let (batch_size, num_classes) = (shape[0], shape[1]);

    let mut total_loss = 0.0f32;
    for b in 0..batch_size {
        let max_val = row_max(logits, b, num_classes);

        let mut sum_exp = 0.0f32;
        let mut label_sum = 0.0f32;
        let mut dot_product = 0.0f32;
        for c in 0..num_classes {
            sum_exp += (logits[[b, c]] - max_val).exp();
            label_sum += labels[[b, c]];
            dot_product += logits[[b, c]] * labels[[b, c]];
        }
        let log_sum_exp = sum_exp.ln();

        // L = -Σ y_i * (x_i - max - log_sum_exp)
        total_loss += -dot_product + label_sum * (max_val + log_sum_exp);
    }

    total_loss / batch_size as f32
}

fn row_max(logits: &Tensor, row: usize, num_classes: usize) -> f32 {
    (0..num_classes)
        .map(|c| logits[[row, c]])
        .fold(f32::NEG_INFINITY, f32::max)
}
