use std::collections::HashMap;

use super::base::{Optimizer, OptimizerState, check_states, state_entry};
use crate::nn::{NnError, Parameter};
use crate::tensor::Tensor;

/// Adamax优化器：Adam 的无穷范数变体
///
/// - m = β1 * m + (1 - β1) * g
/// - u = max(β2 * u, |g| + ε)
/// - θ = θ - (α / (1 - β1^t)) * m / u
///
/// u 以 ε 为下界，故分母恒为正。
pub struct Adamax {
    state: OptimizerState,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    /// 一阶矩估计
    m: HashMap<String, Tensor>,
    /// 指数加权的无穷范数
    u: HashMap<String, Tensor>,
}

impl Adamax {
    pub fn new(learning_rate: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self {
            state: OptimizerState::new(learning_rate),
            beta1,
            beta2,
            epsilon,
            m: HashMap::new(),
            u: HashMap::new(),
        }
    }

    /// 默认参数：β1=0.9, β2=0.999, ε=1e-8
    pub fn new_default(learning_rate: f32) -> Self {
        Self::new(learning_rate, 0.9, 0.999, 1e-8)
    }

    pub fn get_infinity_norm(&self, param_name: &str) -> Option<&Tensor> {
        self.u.get(param_name)
    }
}

impl Optimizer for Adamax {
    fn step(&mut self, params: &mut [&mut Parameter]) -> Result<(), NnError> {
        check_states(&[&self.m, &self.u], params)?;
        let t = self.state.advance() as i32;
        let step_size = self.state.learning_rate() / (1.0 - self.beta1.powi(t));

        for param in params.iter_mut() {
            param.update_with(|name, gradient| {
                let m = state_entry(&mut self.m, name, gradient.shape())?;
                *m *= self.beta1;
                *m += gradient * (1.0 - self.beta1);

                let u = state_entry(&mut self.u, name, gradient.shape())?;
                let abs_gradient = gradient.abs() + self.epsilon;
                *u = (&*u * self.beta2).maximum(&abs_gradient);

                Ok(&*m / &*u * step_size)
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
        self.u.clear();
        self.state.reset();
    }

    fn name(&self) -> &'static str {
        "Adamax"
    }
}
