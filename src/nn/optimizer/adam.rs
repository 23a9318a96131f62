/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:30:00
 * @Description  : Adam优化器实现
 */

use std::collections::HashMap;

use super::base::{Optimizer, OptimizerState, check_states, state_entry};
use crate::nn::{NnError, Parameter};
use crate::tensor::Tensor;

/// Adam优化器（Adaptive Moment Estimation）
///
/// - m = β1 * m + (1 - β1) * g
/// - v = β2 * v + (1 - β2) * g²
/// - θ = θ - α * `m_hat` / (√`v_hat` + ε)
pub struct Adam {
    state: OptimizerState,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    /// 一阶矩估计
    m: HashMap<String, Tensor>,
    /// 二阶矩估计
    v: HashMap<String, Tensor>,
}

impl Adam {
    /// 创建新的Adam优化器
    pub fn new(learning_rate: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self {
            state: OptimizerState::new(learning_rate),
            beta1,
            beta2,
            epsilon,
            m: HashMap::new(),
            v: HashMap::new(),
        }
    }

    /// 使用默认参数（β1=0.9, β2=0.999, ε=1e-8）创建Adam优化器
    pub fn new_default(learning_rate: f32) -> Self {
        Self::new(learning_rate, 0.9, 0.999, 1e-8)
    }

    /// 获取指定参数的一阶矩（调试、可视化用）
    pub fn get_momentum(&self, param_name: &str) -> Option<&Tensor> {
        self.m.get(param_name)
    }

    /// 获取指定参数的二阶矩
    pub fn get_velocity(&self, param_name: &str) -> Option<&Tensor> {
        self.v.get(param_name)
    }

    /// 获取当前时间步
    pub const fn timestep(&self) -> usize {
        self.state.timestep()
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &mut [&mut Parameter]) -> Result<(), NnError> {
        check_states(&[&self.m, &self.v], params)?;
        let t = self.state.advance() as i32;
        let lr = self.state.learning_rate();

        for param in params.iter_mut() {
            param.update_with(|name, gradient| {
                // 预计算缩放后的梯度项
                let scaled_gradient = gradient * (1.0 - self.beta1);
                let gradient_squared = gradient * gradient;
                let scaled_gradient_squared = &gradient_squared * (1.0 - self.beta2);

                // 原地更新一阶矩估计: m = β1 * m + (1 - β1) * g
                let m = state_entry(&mut self.m, name, gradient.shape())?;
                *m *= self.beta1;
                *m += &scaled_gradient;
                let m_hat = &*m / (1.0 - self.beta1.powi(t));

                // 原地更新二阶矩估计: v = β2 * v + (1 - β2) * g²
                let v = state_entry(&mut self.v, name, gradient.shape())?;
                *v *= self.beta2;
                *v += &scaled_gradient_squared;
                let v_hat = &*v / (1.0 - self.beta2.powi(t));

                // 参数更新: θ = θ - α * m_hat / (√v_hat + ε)
                let denominator = v_hat.sqrt() + self.epsilon;
                Ok(&m_hat / &denominator * lr)
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
        self.m.clear();
        self.v.clear();
        self.state.reset();
    }

    fn name(&self) -> &'static str {
        "Adam"
    }
}
