/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @Description  : 优化器基础trait和辅助结构
 */

use std::collections::HashMap;

use enum_dispatch::enum_dispatch;

use super::{Adagrad, Adam, Adamax, RMSProp, SGD};
use crate::nn::{NnError, Parameter};
use crate::tensor::Tensor;

/// 优化器核心 trait
///
/// `PyTorch` 风格训练循环：
/// ```ignore
/// let logits = model.forward(&x)?;
/// let out = criterion.forward(&logits, &y)?;
/// optimizer.zero_grad(&mut model.parameters_mut());
/// model.backward(&out.grad)?;
/// optimizer.step(&mut model.parameters_mut())?; // ← 只更新参数，不做 forward/backward
/// ```
#[enum_dispatch]
pub trait Optimizer {
    /// 参数更新（使用已计算的梯度）。没有梯度的参数会被跳过。
    fn step(&mut self, params: &mut [&mut Parameter]) -> Result<(), NnError>;

    /// 清零所有参数的梯度
    fn zero_grad(&self, params: &mut [&mut Parameter]) {
        for param in params.iter_mut() {
            param.zero_grad();
        }
    }

    /// 获取学习率
    fn learning_rate(&self) -> f32;

    /// 设置学习率
    fn set_learning_rate(&mut self, lr: f32);

    /// 重置累积状态（如 Adam 的动量与时间步）
    fn reset(&mut self);

    /// 优化器名称（日志与结果文件用）
    fn name(&self) -> &'static str;
}

/// 五种优化器的静态分发包装，由 [`super::OptimizerKind::build`] 创建
#[enum_dispatch(Optimizer)]
pub enum AnyOptimizer {
    SGD,
    Adam,
    Adamax,
    RMSProp,
    Adagrad,
}

/// 优化器状态管理（内部实现，不对外暴露）
#[derive(Debug, Clone)]
pub(crate) struct OptimizerState {
    /// 学习率
    learning_rate: f32,
    /// 时间步（已执行的 step 次数）
    t: usize,
}

impl OptimizerState {
    pub(crate) const fn new(learning_rate: f32) -> Self {
        Self {
            learning_rate,
            t: 0,
        }
    }

    pub(crate) const fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub(crate) const fn set_learning_rate(&mut self, lr: f32) {
        self.learning_rate = lr;
    }

    /// 时间步加一并返回新值（从 1 开始）
    pub(crate) const fn advance(&mut self) -> usize {
        self.t += 1;
        self.t
    }

    pub(crate) const fn timestep(&self) -> usize {
        self.t
    }

    pub(crate) const fn reset(&mut self) {
        self.t = 0;
    }
}

/// 在修改任何状态之前，检查每个带梯度的参数在各状态表中的已有条目形状是否与梯度一致
///
/// 同名参数的状态形状与梯度不一致时报错（说明参数列表与之前的 step 不是同一组），
/// 此时优化器状态、时间步和参数都保持原样。
pub(crate) fn check_states(
    states: &[&HashMap<String, Tensor>],
    params: &[&mut Parameter],
) -> Result<(), NnError> {
    for param in params {
        let Some(grad) = param.grad() else {
            continue;
        };
        for state in states.iter().filter_map(|s| s.get(param.name())) {
            if state.shape() != grad.shape() {
                return Err(state_mismatch(param.name(), state.shape(), grad.shape()));
            }
        }
    }
    Ok(())
}

/// 取出（必要时以全零初始化）某个参数对应的状态张量
pub(crate) fn state_entry<'a>(
    states: &'a mut HashMap<String, Tensor>,
    name: &str,
    shape: &[usize],
) -> Result<&'a mut Tensor, NnError> {
    let state = states
        .entry(name.to_string())
        .or_insert_with(|| Tensor::zeros(shape));
    if state.shape() != shape {
        return Err(state_mismatch(name, state.shape(), shape));
    }
    Ok(state)
}

fn state_mismatch(name: &str, expected: &[usize], got: &[usize]) -> NnError {
    NnError::ShapeMismatch {
        expected: expected.to_vec(),
        got: got.to_vec(),
        message: format!("参数`{name}`的优化器状态"),
    }
}
