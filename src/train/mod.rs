//! 训练入口
//!
//! - [`launch_training`]: 在 MNIST 上训练，并按 `log_interval` 输出进度日志
//! - [`training_losses`]: 在 MNIST 上训练，返回每一步的损失
//!
//! 两者都先按白名单解析优化器名称，不在白名单内时返回 [`TrainError::UnsupportedOptimizer`]。
//! 带 `_with` 后缀的版本接收显式的配置与数据加载器。

mod config;
mod error;
mod trainer;

#[cfg(test)]
mod tests;

use log::info;

pub use config::TrainConfig;
pub use error::TrainError;
pub use trainer::{StepReport, Trainer};

use crate::data::DataLoader;
use crate::nn::OptimizerKind;

/// 训练模型并输出形如 `Epoch [1/10], Step[100/469], Loss: 2.2950` 的进度日志
pub fn launch_training(
    optimizer: &str,
    num_epochs: usize,
    learning_rate: f32,
) -> Result<(), TrainError> {
    let config = TrainConfig::launch()
        .with_optimizer(optimizer.parse::<OptimizerKind>()?)
        .with_epochs(num_epochs)
        .with_learning_rate(learning_rate);
    config.validate()?;
    let loader = config.mnist_loader()?;
    launch_training_with(&config, &loader)
}

/// 用给定配置与数据训练，并按 `config.log_interval` 输出进度日志
pub fn launch_training_with(config: &TrainConfig, loader: &DataLoader) -> Result<(), TrainError> {
    let mut trainer = Trainer::new(config.clone())?;
    let num_epochs = config.num_epochs;
    let log_interval = config.log_interval;

    info!(
        "开始训练：优化器 {}，{num_epochs} 个 epoch，lr={}",
        config.optimizer, config.learning_rate
    );
    trainer.run_epochs(loader, |report| {
        if report.step % log_interval == 0 {
            info!(
                "Epoch [{}/{num_epochs}], Step[{}/{}], Loss: {:.4}",
                report.epoch, report.step, report.steps_per_epoch, report.loss
            );
        }
    })
}

/// 训练模型并返回每一步（每个批次）的损失，长度为 `epoch 数 × 每个 epoch 的批次数`
pub fn training_losses(
    optimizer: &str,
    num_epochs: usize,
    learning_rate: f32,
) -> Result<Vec<f32>, TrainError> {
    let config = TrainConfig::losses()
        .with_optimizer(optimizer.parse::<OptimizerKind>()?)
        .with_epochs(num_epochs)
        .with_learning_rate(learning_rate);
    config.validate()?;
    let loader = config.mnist_loader()?;
    training_losses_with(&config, &loader)
}

/// 用给定配置与数据训练，返回每一步的损失
pub fn training_losses_with(
    config: &TrainConfig,
    loader: &DataLoader,
) -> Result<Vec<f32>, TrainError> {
    let mut trainer = Trainer::new(config.clone())?;
    let mut losses = Vec::with_capacity(config.num_epochs * trainer.steps_per_epoch(loader)?);
    trainer.run_epochs(loader, |report| losses.push(report.loss))?;
    Ok(losses)
}
