/*
 * @Author       : 老董
 * @Date         : 2026-01-18
 * @Description  : 训练流程的错误类型
 */

use thiserror::Error;

use crate::data::DataError;
use crate::nn::NnError;

/// 训练相关错误：包装网络与数据层的错误，并补充配置类错误
#[derive(Debug, Error)]
pub enum TrainError {
    #[error(transparent)]
    Nn(#[from] NnError),

    #[error(transparent)]
    Data(#[from] DataError),

    /// 优化器不在白名单内
    #[error("不支持的优化器`{name}`，可选：{allowed}")]
    UnsupportedOptimizer { name: String, allowed: String },

    #[error("非法配置：{0}")]
    InvalidConfig(String),

    #[error("配置解析失败：{0}")]
    Config(#[from] serde_json::Error),

    #[error("读取配置文件失败：{0}")]
    Io(#[from] std::io::Error),

    /// 数据加载器一个批次都给不出
    #[error("数据加载器为空，无法训练")]
    EmptyLoader,
}
