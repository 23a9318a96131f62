use std::collections::HashMap;

use super::base::{Optimizer, OptimizerState, check_states, state_entry};
use crate::nn::{NnError, Parameter};
use crate::tensor::Tensor;

/// RMSProp优化器
///
/// - v = α * v + (1 - α) * g²
/// - θ = θ - lr * g / (√v + ε)
pub struct RMSProp {
    state: OptimizerState,
    /// 平滑系数
    alpha: f32,
    epsilon: f32,
    /// 梯度平方的滑动平均
    v: HashMap<String, Tensor>,
}

impl RMSProp {
    pub fn new(learning_rate: f32, alpha: f32, epsilon: f32) -> Self {
        Self {
            state: OptimizerState::new(learning_rate),
            alpha,
            epsilon,
            v: HashMap::new(),
        }
    }

    /// 默认参数：α=0.99, ε=1e-8
    pub fn new_default(learning_rate: f32) -> Self {
        Self::new(learning_rate, 0.99, 1e-8)
    }

    pub fn get_square_average(&self, param_name: &str) -> Option<&Tensor> {
        self.v.get(param_name)
    }
}

impl Optimizer for RMSProp {
    fn step(&mut self, params: &mut [&mut Parameter]) -> Result<(), NnError> {
        check_states(&[&self.v], params)?;
        self.state.advance();
        let lr = self.state.learning_rate();

        for param in params.iter_mut() {
            param.update_with(|name, gradient| {
                let v = state_entry(&mut self.v, name, gradient.shape())?;
                *v *= self.alpha;
                *v += gradient.powi(2) * (1.0 - self.alpha);

                let denominator = v.sqrt() + self.epsilon;
                Ok(gradient / &denominator * lr)
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
        self.v.clear();
        self.state.reset();
    }

    fn name(&self) -> &'static str {
        "RMSProp"
    }
}
