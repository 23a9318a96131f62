/*
 * @Author       : 老董
 * @Date         : 2026-01-18
 * @Description  : 训练配置（可由 JSON 文件加载）
 */

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::TrainError;
use crate::data::{DataLoader, load_mnist_data};
use crate::nn::OptimizerKind;

/// 一次训练所需的全部超参数
///
/// JSON 中缺省的字段取 [`TrainConfig::default`] 的值，例如：
/// ```json
/// { "optimizer": "adam", "num_epochs": 2, "learning_rate": 0.001 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainConfig {
    pub optimizer: OptimizerKind,
    pub num_epochs: usize,
    pub learning_rate: f32,
    pub batch_size: usize,
    /// 每隔多少步输出一次进度日志
    pub log_interval: usize,
    /// 模型初始化与数据打乱的随机种子
    pub seed: u64,
    /// MNIST 数据目录，None 时使用缓存目录
    pub data_dir: Option<PathBuf>,
    /// 缺少数据文件时是否自动下载
    pub download: bool,
    /// 每个 epoch 最多训练多少个批次（None 表示跑完整个 epoch）
    pub max_batches_per_epoch: Option<usize>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self::launch()
    }
}

impl TrainConfig {
    /// 打印进度的训练入口的默认值：SGD，10 个 epoch，lr=1e-3
    pub fn launch() -> Self {
        Self {
            optimizer: OptimizerKind::Sgd,
            num_epochs: 10,
            learning_rate: 1e-3,
            batch_size: 128,
            log_interval: 100,
            seed: 42,
            data_dir: None,
            download: true,
            max_batches_per_epoch: None,
        }
    }

    /// 记录损失曲线的训练入口的默认值：SGD，5 个 epoch，lr=1e-5
    pub fn losses() -> Self {
        Self {
            num_epochs: 5,
            learning_rate: 1e-5,
            ..Self::launch()
        }
    }

    pub fn with_optimizer(mut self, optimizer: OptimizerKind) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn with_epochs(mut self, num_epochs: usize) -> Self {
        self.num_epochs = num_epochs;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// 从 JSON 文件读取并校验配置
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TrainError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 校验各字段取值
    pub fn validate(&self) -> Result<(), TrainError> {
        if self.num_epochs == 0 {
            return Err(TrainError::InvalidConfig("num_epochs 必须大于 0".to_string()));
        }
        if self.batch_size == 0 {
            return Err(TrainError::InvalidConfig("batch_size 必须大于 0".to_string()));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(TrainError::InvalidConfig(format!(
                "learning_rate 必须是正的有限数，得到 {}",
                self.learning_rate
            )));
        }
        if self.log_interval == 0 {
            return Err(TrainError::InvalidConfig("log_interval 必须大于 0".to_string()));
        }
        if self.max_batches_per_epoch == Some(0) {
            return Err(TrainError::InvalidConfig(
                "max_batches_per_epoch 必须大于 0".to_string(),
            ));
        }
        Ok(())
    }

    /// 按本配置加载 MNIST 训练集（打乱顺序）
    pub fn mnist_loader(&self) -> Result<DataLoader, TrainError> {
        Ok(load_mnist_data(
            self.data_dir.as_deref(),
            self.batch_size,
            self.download,
            self.seed,
        )?)
    }
}
