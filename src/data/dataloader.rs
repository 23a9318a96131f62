/*
 * @Author       : 老董
 * @Date         : 2025-01-21
 * @Description  : DataLoader - PyTorch 风格的数据批量加载器
 *
 * 提供统一的数据迭代 API，支持：
 * - 自动分批 (batch_size)
 * - 随机打乱 (shuffle)
 * - 丢弃不完整批次 (drop_last)
 */

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::DataError;
use crate::tensor::Tensor;

/// TensorDataset - 持有特征和标签的数据集
///
/// # 示例
/// ```ignore
/// let dataset = TensorDataset::new(features, labels)?;
/// log::info!("样本数: {}", dataset.len());
/// ```
#[derive(Debug, Clone)]
pub struct TensorDataset {
    features: Tensor,
    labels: Tensor,
    len: usize,
}

impl TensorDataset {
    /// 创建新的 TensorDataset
    ///
    /// # 参数
    /// - `features`: 特征张量，第一维为样本数
    /// - `labels`: 标签张量，第一维为样本数（必须与 features 一致）
    pub fn new(features: Tensor, labels: Tensor) -> Result<Self, DataError> {
        let len = features.shape().first().copied().unwrap_or(0);
        let label_len = labels.shape().first().copied().unwrap_or(0);
        if features.dimension() == 0 || labels.dimension() == 0 || len != label_len {
            return Err(DataError::SampleCountMismatch {
                features: features.shape().to_vec(),
                labels: labels.shape().to_vec(),
            });
        }
        Ok(Self {
            features,
            labels,
            len,
        })
    }

    /// 获取样本数量
    pub fn len(&self) -> usize {
        self.len
    }

    /// 检查数据集是否为空
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 获取特征张量引用
    pub fn features(&self) -> &Tensor {
        &self.features
    }

    /// 获取标签张量引用
    pub fn labels(&self) -> &Tensor {
        &self.labels
    }
}

/// DataLoader - PyTorch 风格的数据批量加载器
///
/// 开启 `shuffle` 且设置了种子时，第 k 个 epoch 的顺序只由 `seed + k` 决定，
/// 与该 loader 之前被遍历过几次无关；[`DataLoader::iter_epoch`] 显式给出 epoch 序号。
///
/// # 示例
/// ```ignore
/// let loader = DataLoader::new(dataset, 128)
///     .shuffle(true)
///     .drop_last(true);
///
/// for (x_batch, y_batch) in loader.iter() {
///     // ...
/// }
/// ```
pub struct DataLoader {
    dataset: TensorDataset,
    batch_size: usize,
    shuffle: bool,
    drop_last: bool,
    seed: Option<u64>,
}

impl DataLoader {
    /// 创建新的 DataLoader
    ///
    /// # Panics
    /// `batch_size` 为 0 时
    pub fn new(dataset: TensorDataset, batch_size: usize) -> Self {
        assert!(batch_size > 0, "DataLoader: batch_size 必须大于 0");
        Self {
            dataset,
            batch_size,
            shuffle: false,
            drop_last: false,
            seed: None,
        }
    }

    /// 设置是否打乱数据
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// 设置是否丢弃最后一个不完整的批次
    pub fn drop_last(mut self, drop_last: bool) -> Self {
        self.drop_last = drop_last;
        self
    }

    /// 设置随机种子（用于 shuffle）
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 获取批次数量
    pub fn num_batches(&self) -> usize {
        let n = self.dataset.len();
        if self.drop_last {
            n / self.batch_size
        } else {
            n.div_ceil(self.batch_size)
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// 获取数据集大小
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    /// 检查是否为空
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn dataset(&self) -> &TensorDataset {
        &self.dataset
    }

    /// 创建迭代器，等价于 `iter_epoch(0)`
    pub fn iter(&self) -> DataLoaderIterator<'_> {
        self.iter_epoch(0)
    }

    /// 创建第 `epoch` 个 epoch（从 0 起）的迭代器
    ///
    /// 有种子时用 `seed + epoch` 打乱，同一 epoch 序号总是得到同一顺序；
    /// 无种子时每次调用都用线程随机数打乱。
    pub fn iter_epoch(&self, epoch: u64) -> DataLoaderIterator<'_> {
        let mut indices: Vec<usize> = (0..self.dataset.len()).collect();

        if self.shuffle {
            match self.seed {
                Some(seed) => {
                    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(epoch));
                    indices.shuffle(&mut rng);
                }
                None => indices.shuffle(&mut rand::thread_rng()),
            }
        }

        DataLoaderIterator {
            loader: self,
            indices,
            current_batch: 0,
        }
    }
}

/// DataLoader 迭代器
pub struct DataLoaderIterator<'a> {
    loader: &'a DataLoader,
    indices: Vec<usize>,
    current_batch: usize,
}

impl Iterator for DataLoaderIterator<'_> {
    type Item = (Tensor, Tensor);

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.indices.len();
        let batch_size = self.loader.batch_size;
        let start = self.current_batch * batch_size;

        // 检查是否还有数据
        if start >= n {
            return None;
        }

        let end = (start + batch_size).min(n);

        // 如果 drop_last 且批次不完整，则跳过
        if self.loader.drop_last && end - start < batch_size {
            return None;
        }

        self.current_batch += 1;

        let batch_indices = &self.indices[start..end];
        let dataset = &self.loader.dataset;
        Some((
            dataset.features.select_rows(batch_indices),
            dataset.labels.select_rows(batch_indices),
        ))
    }
}
