/*
 * @Author       : 老董
 * @Date         : 2024-01-31 20:23:53
 * @LastEditors  : 老董
 * @LastEditTime : 2026-01-18
 * @Description  : 负责神经网络（neural network）的构建：参数、层、模型、损失与优化器
 */

mod criterion;
mod error;
mod init;
pub mod layer;
mod model;
mod module;
pub mod optimizer;
mod parameter;

pub use criterion::{CrossEntropyLoss, LossOutput, stable_softmax};
pub use error::NnError;
pub use init::Init;
pub use layer::{Linear, Relu};
pub use model::{FeedForwardNet, HIDDEN_FEATURES, INPUT_FEATURES, NUM_CLASSES};
pub use module::Module;
pub use optimizer::{AnyOptimizer, Optimizer, OptimizerKind};
pub use parameter::Parameter;

#[cfg(test)]
mod tests;
