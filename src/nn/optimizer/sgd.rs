/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @Description  : 梯度下降优化器实现
 */

use std::collections::HashMap;

use super::base::{Optimizer, OptimizerState, check_states, state_entry};
use crate::nn::{NnError, Parameter};
use crate::tensor::Tensor;

/// SGD (随机梯度下降) 优化器
///
/// - 无动量：θ = θ - α * ∇θ
/// - 带动量 μ：buf = μ * buf + ∇θ，θ = θ - α * buf
pub struct SGD {
    state: OptimizerState,
    momentum: f32,
    /// 动量缓冲（按参数名索引）
    buffers: HashMap<String, Tensor>,
}

impl SGD {
    /// 创建新的SGD优化器（无动量）
    pub fn new(learning_rate: f32) -> Self {
        Self::with_momentum(learning_rate, 0.0)
    }

    /// 创建带动量的SGD优化器
    pub fn with_momentum(learning_rate: f32, momentum: f32) -> Self {
        Self {
            state: OptimizerState::new(learning_rate),
            momentum,
            buffers: HashMap::new(),
        }
    }

    pub fn momentum(&self) -> f32 {
        self.momentum
    }
}

impl Optimizer for SGD {
    fn step(&mut self, params: &mut [&mut Parameter]) -> Result<(), NnError> {
        check_states(&[&self.buffers], params)?;
        self.state.advance();
        let lr = self.state.learning_rate();

        for param in params.iter_mut() {
            param.update_with(|name, gradient| {
                if self.momentum > 0.0 {
                    let buf = state_entry(&mut self.buffers, name, gradient.shape())?;
                    *buf *= self.momentum;
                    *buf += gradient;
                    Ok(&*buf * lr)
                } else {
                    Ok(gradient * lr)
                }
            })?;
        }
        Ok(())
    }

    fn learning_rate(&self) -> f32 {
        self.state.learning_rate()
    }

    fn set_learning_rate(&mut self, lr: f32) {
        self.state.set_learning_rate(lr);
    }

    fn reset(&mut self) {
        self.state.reset();
        self.buffers.clear();
    }

    fn name(&self) -> &'static str {
        "SGD"
    }
}
