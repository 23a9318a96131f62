//! data 模块的错误类型：读取 IDX 文件、下载校验与组装数据集时的失败

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    /// 本地缺少数据文件且未开启下载
    #[error("找不到数据文件 {}（可开启 download 自动下载）", .0.display())]
    FileNotFound(PathBuf),

    #[error("读写数据文件失败: {0}")]
    Io(#[from] std::io::Error),

    /// IDX 文件内容与格式不符（magic number、尺寸、长度或标签取值）
    #[error("{} 不是有效的 IDX 文件: {reason}", path.display())]
    InvalidIdx { path: PathBuf, reason: String },

    #[error("下标 {index} 超出范围 [0, {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// 特征与标签的样本数（第一维）不一致，或其中一方没有样本维
    #[error("特征形状 {features:?} 与标签形状 {labels:?} 的样本数不一致")]
    SampleCountMismatch {
        features: Vec<usize>,
        labels: Vec<usize>,
    },

    #[error("下载 {url} 失败: {reason}")]
    Download { url: String, reason: String },

    #[error("MD5 校验失败: 期望 {expected}, 实际 {got}")]
    ChecksumMismatch { expected: String, got: String },
}
