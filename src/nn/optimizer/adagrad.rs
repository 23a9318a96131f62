use std::collections::HashMap;

use super::base::{Optimizer, OptimizerState, check_states, state_entry};
use crate::nn::{NnError, Parameter};
use crate::tensor::Tensor;

/// Adagrad优化器：按参数累积全部历史梯度平方，学习率随之单调衰减
///
/// - s = s + g²
/// - θ = θ - lr * g / (√s + ε)
pub struct Adagrad {
    state: OptimizerState,
    epsilon: f32,
    /// 梯度平方累积和
    sum_squares: HashMap<String, Tensor>,
}

impl Adagrad {
    pub fn new(learning_rate: f32, epsilon: f32) -> Self {
        Self {
            state: OptimizerState::new(learning_rate),
            epsilon,
            sum_squares: HashMap::new(),
        }
    }

    /// 默认参数：ε=1e-10
    pub fn new_default(learning_rate: f32) -> Self {
        Self::new(learning_rate, 1e-10)
    }

    pub fn get_sum_squares(&self, param_name: &str) -> Option<&Tensor> {
        self.sum_squares.get(param_name)
    }
}

impl Optimizer for Adagrad {
    fn step(&mut self, params: &mut [&mut Parameter]) -> Result<(), NnError> {
        check_states(&[&self.sum_squares], params)?;
        self.state.advance();
        let lr = self.state.learning_rate();

        for param in params.iter_mut() {
            param.update_with(|name, gradient| {
                let s = state_entry(&mut self.sum_squares, name, gradient.shape())?;
                *s += gradient.powi(2);

                let denominator = s.sqrt() + self.epsilon;
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
        self.sum_squares.clear();
        self.state.reset();
    }

    fn name(&self) -> &'static str {
        "Adagrad"
    }
}
