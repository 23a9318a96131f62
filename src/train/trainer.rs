/*
 * @Author       : 老董
 * @Date         : 2026-01-18
 * @Description  : 训练循环：forward -> loss -> zero_grad -> backward -> step
 */

use log::{debug, warn};

use super::{TrainConfig, TrainError};
use crate::data::DataLoader;
use crate::nn::{AnyOptimizer, CrossEntropyLoss, FeedForwardNet, Module, Optimizer};
use crate::tensor::Tensor;

/// 单步训练的汇报（epoch、step 均从 1 开始计数）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub epoch: usize,
    pub step: usize,
    pub steps_per_epoch: usize,
    pub loss: f32,
}

/// 持有模型、优化器与损失函数的训练器
pub struct Trainer {
    config: TrainConfig,
    model: FeedForwardNet,
    optimizer: AnyOptimizer,
    criterion: CrossEntropyLoss,
}

impl Trainer {
    /// 校验配置，并以 `config.seed` 初始化模型、以 `config.optimizer` 构建优化器
    pub fn new(config: TrainConfig) -> Result<Self, TrainError> {
        config.validate()?;
        let model = FeedForwardNet::new(config.seed);
        let optimizer = config.optimizer.build(config.learning_rate);
        Ok(Self {
            config,
            model,
            optimizer,
            criterion: CrossEntropyLoss::new(),
        })
    }

    /// 一个批次上的一次参数更新，返回更新前的 batch 平均损失
    pub fn train_step(&mut self, images: &Tensor, labels: &Tensor) -> Result<f32, TrainError> {
        let logits = self.model.forward(images)?;
        let output = self.criterion.forward(&logits, labels)?;

        self.optimizer.zero_grad(&mut self.model.parameters_mut());
        self.model.backward(&output.grad)?;
        self.optimizer.step(&mut self.model.parameters_mut())?;

        Ok(output.loss)
    }

    /// 训练 `num_epochs` 轮，每一步把 [`StepReport`] 交给 `observer`
    pub fn run_epochs<F>(&mut self, loader: &DataLoader, mut observer: F) -> Result<(), TrainError>
    where
        F: FnMut(&StepReport),
    {
        let steps_per_epoch = self.steps_per_epoch(loader)?;
        let mut warned = false;

        for epoch in 1..=self.config.num_epochs {
            let batches = loader.iter_epoch(epoch as u64 - 1).take(steps_per_epoch);
            for (i, (images, labels)) in batches.enumerate() {
                let loss = self.train_step(&images, &labels)?;
                if !loss.is_finite() && !warned {
                    warn!(
                        "{} 在第 {epoch} 个 epoch 第 {} 步出现非有限损失 {loss}",
                        self.optimizer.name(),
                        i + 1
                    );
                    warned = true;
                }
                observer(&StepReport {
                    epoch,
                    step: i + 1,
                    steps_per_epoch,
                    loss,
                });
            }
            debug!("{} 完成 epoch {epoch}/{}", self.optimizer.name(), self.config.num_epochs);
        }
        Ok(())
    }

    /// 在给定数据上评估分类准确率（0~1）
    pub fn evaluate(&self, loader: &DataLoader) -> Result<f32, TrainError> {
        let mut correct = 0usize;
        let mut total = 0usize;
        for (images, labels) in loader.iter() {
            let predictions = self.model.predict(&images)?;
            let targets = labels.argmax_rows();
            correct += predictions
                .iter()
                .zip(&targets)
                .filter(|(p, t)| p == t)
                .count();
            total += targets.len();
        }
        if total == 0 {
            return Err(TrainError::EmptyLoader);
        }
        Ok(correct as f32 / total as f32)
    }

    /// 每个 epoch 实际训练的批次数
    pub fn steps_per_epoch(&self, loader: &DataLoader) -> Result<usize, TrainError> {
        let steps = match self.config.max_batches_per_epoch {
            Some(max) => loader.num_batches().min(max),
            None => loader.num_batches(),
        };
        if steps == 0 {
            return Err(TrainError::EmptyLoader);
        }
        Ok(steps)
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn model(&self) -> &FeedForwardNet {
        &self.model
    }

    pub fn optimizer(&self) -> &AnyOptimizer {
        &self.optimizer
    }
}
