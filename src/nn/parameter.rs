/*
 * @Author       : 老董
 * @Date         : 2026-01-08
 * @Description  : 可训练参数：值 + 梯度
 */

use super::NnError;
use crate::tensor::Tensor;

/// 可训练参数
///
/// - `grad` 由各层的 `backward` 累加写入（与 `PyTorch` 一致：`zero_grad` 之后才是本批次的梯度）
/// - 优化器通过 [`Parameter::update_with`] 读 `grad` 算出增量，再修改 `value`
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    value: Tensor,
    grad: Option<Tensor>,
}

impl Parameter {
    pub fn new(name: &str, value: Tensor) -> Self {
        Self {
            name: name.to_string(),
            value,
            grad: None,
        }
    }

    /// 参数名，优化器以此为键保存每个参数的状态（动量等）
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Tensor {
        &self.value
    }

    /// 直接设置参数值（形状须与原值一致）
    pub fn set_value(&mut self, value: Tensor) -> Result<(), NnError> {
        self.check_shape(&value, "设置参数值")?;
        self.value = value;
        Ok(())
    }

    pub fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    /// 累加梯度；尚无梯度时直接写入
    pub fn accumulate_grad(&mut self, grad: Tensor) -> Result<(), NnError> {
        self.check_shape(&grad, "累加梯度")?;
        match self.grad.as_mut() {
            Some(existing) => *existing += &grad,
            None => self.grad = Some(grad),
        }
        Ok(())
    }

    /// 清空梯度
    pub fn zero_grad(&mut self) {
        self.grad = None;
    }

    /// θ ← θ − delta
    pub fn apply_update(&mut self, delta: &Tensor) -> Result<(), NnError> {
        self.check_shape(delta, "参数更新")?;
        self.value -= delta;
        Ok(())
    }

    /// 由梯度算出增量 delta 并执行 θ ← θ − delta；没有梯度时什么也不做
    ///
    /// `f` 拿到参数名和梯度的借用，梯度无需复制。
    pub fn update_with<F>(&mut self, f: F) -> Result<(), NnError>
    where
        F: FnOnce(&str, &Tensor) -> Result<Tensor, NnError>,
    {
        let Some(grad) = self.grad.as_ref() else {
            return Ok(());
        };
        let delta = f(&self.name, grad)?;
        self.apply_update(&delta)
    }

    /// 参数包含的标量个数
    pub fn numel(&self) -> usize {
        self.value.size()
    }

    fn check_shape(&self, other: &Tensor, action: &str) -> Result<(), NnError> {
        if self.value.is_same_shape(other) {
            Ok(())
        } else {
            Err(NnError::ShapeMismatch {
                expected: self.value.shape().to_vec(),
                got: other.shape().to_vec(),
                message: format!("参数`{}`{action}", self.name),
            })
        }
    }
}
