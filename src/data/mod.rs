//! 数据加载模块
//!
//! 提供数据集加载、变换和批处理功能。
//!
//! # 主要组件
//!
//! - [`DataLoader`]: `PyTorch` 风格的数据批量加载器
//! - [`TensorDataset`]: 持有特征和标签的数据集
//! - [`MnistDataset`]: MNIST 手写数字数据集
//! - [`load_mnist_data`]: 一步得到 MNIST 训练集的 [`DataLoader`]
//! - [`transforms`]: 数据变换函数（归一化、one-hot、`get_label` 等）
//! - [`DataError`]: 数据加载错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use only_optim::data::{DataLoader, TensorDataset};
//!
//! let dataset = TensorDataset::new(train_x, train_y)?;
//! let loader = DataLoader::new(dataset, 128)
//!     .shuffle(true)
//!     .seed(42);
//!
//! for (x_batch, y_batch) in loader.iter() {
//!     let logits = model.forward(&x_batch)?;
//!     // ...
//! }
//! ```

mod dataloader;
pub mod datasets;
pub mod download;
pub mod error;
pub mod transforms;

#[cfg(test)]
mod tests;

// Re-exports
pub use dataloader::{DataLoader, DataLoaderIterator, TensorDataset};
pub use datasets::{MnistDataset, default_data_dir, load_mnist_data};
pub use error::DataError;
