/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @LastEditors  : 老董
 * @LastEditTime : 2026-01-17
 * @Description  : 优化器模块，实现 PyTorch 风格的梯度优化算法
 */

mod adagrad;
mod adam;
mod adamax;
mod base;
mod kind;
mod rmsprop;
mod sgd;

pub use adagrad::Adagrad;
pub use adam::Adam;
pub use adamax::Adamax;
pub use base::{AnyOptimizer, Optimizer};
pub use kind::OptimizerKind;
pub use rmsprop::RMSProp;
pub use sgd::SGD;
