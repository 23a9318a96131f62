//! # Only Optim
//!
//! `only_optim`用纯rust手写了五种基于梯度的优化器（SGD、Adam、Adamax、RMSProp、Adagrad），
//! 并在 MNIST 上用一个固定结构的前馈网络（784 -> 128 -> 128 -> 10）对比它们的损失曲线。
//!
//! - [`tensor`]: 基于`ndarray`的张量
//! - [`nn`]: 参数、层、网络、交叉熵损失与优化器
//! - [`data`]: MNIST 加载、`DataLoader`与数据变换
//! - [`train`]: 训练配置与训练入口
//!

pub mod data;
pub mod errors;
pub mod nn;
pub mod tensor;
pub mod train;
