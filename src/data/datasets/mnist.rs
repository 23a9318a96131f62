//! MNIST 手写数字数据集
//!
//! 支持：
//! - IDX 二进制格式解析（支持 .gz 压缩）
//! - 像素归一化 (0-255 → 0-1)
//! - 标签 one-hot 编码
//! - 可选自动下载（带 MD5 校验）

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use log::{debug, info};

use crate::data::dataloader::{DataLoader, TensorDataset};
use crate::data::download::download_file;
use crate::data::error::DataError;
use crate::data::transforms::{normalize_pixels, one_hot};
use crate::tensor::Tensor;

/// MNIST 下载地址（使用 AWS S3 镜像，原官网 yann.lecun.com 不稳定）
const MNIST_BASE_URL: &str = "https://ossci-datasets.s3.amazonaws.com/mnist/";

/// MNIST 文件及其 .gz 压缩包的 MD5
const MNIST_FILES: [(&str, &str); 4] = [
    ("train-images-idx3-ubyte", "f68b3c2dcbeaaa9fbdd348bbdeb94873"),
    ("train-labels-idx1-ubyte", "d53e105ee54ea40749a09fcbcd1e9432"),
    ("t10k-images-idx3-ubyte", "9fb629c4189551a2d022fa330f9573f3"),
    ("t10k-labels-idx1-ubyte", "ec29112dd5afa0611ce80d1b7f02629c"),
];

const IMAGES_MAGIC: u32 = 2051;
const LABELS_MAGIC: u32 = 2049;
const IMAGE_SIDE: usize = 28;
const IMAGE_PIXELS: usize = IMAGE_SIDE * IMAGE_SIDE;
const NUM_CLASSES: usize = 10;

/// MNIST 手写数字数据集
///
/// 包含 60,000 个训练样本和 10,000 个测试样本。
/// 每个样本是 28x28 的灰度图像，标签为 0-9。
#[derive(Debug, Clone)]
pub struct MnistDataset {
    /// 图像数据 [N, 1, 28, 28] 或 flatten 后 [N, 784]
    images: Tensor,
    /// 标签数据 [N, 10] (one-hot)
    labels: Tensor,
    /// 样本数量
    len: usize,
    /// 是否已展平
    is_flattened: bool,
}

impl MnistDataset {
    /// 完整加载 API
    ///
    /// # 参数
    /// - `root`: 数据目录，None 则使用默认 (~/.cache/only_optim/datasets/mnist)
    /// - `train`: true=训练集(60000), false=测试集(10000)
    /// - `download`: true=自动下载缺失文件
    ///
    /// # 返回
    /// 加载后的 MnistDataset，图像形状为 [N, 1, 28, 28]
    pub fn load(root: Option<&Path>, train: bool, download: bool) -> Result<Self, DataError> {
        let data_dir = root
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_data_dir().join("mnist"));

        let (images_file, labels_file) = if train {
            (MNIST_FILES[0], MNIST_FILES[1])
        } else {
            (MNIST_FILES[2], MNIST_FILES[3])
        };

        let images_path = ensure_file(&data_dir, images_file, download)?;
        let labels_path = ensure_file(&data_dir, labels_file, download)?;

        let images_raw = parse_idx_images(&images_path)?;
        let labels_raw = parse_idx_labels(&labels_path)?;

        let len = labels_raw.size();
        if images_raw.shape()[0] != len {
            return Err(idx_error(
                &labels_path,
                format!("标签数 {len} 与图像数 {} 不一致", images_raw.shape()[0]),
            ));
        }
        debug!("已解析 MNIST {}集：{len} 个样本", if train { "训练" } else { "测试" });

        // 归一化像素值 [0, 255] -> [0, 1]，并重塑为 [N, 1, 28, 28] (NCHW 格式)
        let images = normalize_pixels(&images_raw).reshape(&[len, 1, IMAGE_SIDE, IMAGE_SIDE]);
        let labels = one_hot(&labels_raw, NUM_CLASSES);

        Ok(Self {
            images,
            labels,
            len,
            is_flattened: false,
        })
    }

    /// 便捷 API：加载训练集（默认路径，自动下载）
    pub fn train() -> Result<Self, DataError> {
        Self::load(None, true, true)
    }

    /// 便捷 API：加载测试集（默认路径，自动下载）
    pub fn test() -> Result<Self, DataError> {
        Self::load(None, false, true)
    }

    /// 将图像展平为 [N, 784]（用于 MLP）
    pub fn flatten(mut self) -> Self {
        if !self.is_flattened {
            self.images = self.images.reshape(&[self.len, IMAGE_PIXELS]);
            self.is_flattened = true;
        }
        self
    }

    /// 返回数据集中的样本数量
    pub fn len(&self) -> usize {
        self.len
    }

    /// 数据集是否为空
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 获取第 index 个样本
    ///
    /// # 返回
    /// (image, label) 元组
    /// - image: [1, 28, 28] 或 [784]（若已 flatten）
    /// - label: [10] (one-hot)
    pub fn get(&self, index: usize) -> Result<(Tensor, Tensor), DataError> {
        if index >= self.len {
            return Err(DataError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }

        let image = self.images.select_rows(&[index]);
        let image = if self.is_flattened {
            image.flatten()
        } else {
            image.reshape(&[1, IMAGE_SIDE, IMAGE_SIDE])
        };
        let label = self.labels.select_rows(&[index]).flatten();

        Ok((image, label))
    }

    /// 输入的形状（不含 batch 维度）
    pub fn input_shape(&self) -> Vec<usize> {
        if self.is_flattened {
            vec![IMAGE_PIXELS]
        } else {
            vec![1, IMAGE_SIDE, IMAGE_SIDE]
        }
    }

    /// 获取所有图像（用于批量处理）
    pub fn images(&self) -> &Tensor {
        &self.images
    }

    /// 获取所有标签（用于批量处理）
    pub fn labels(&self) -> &Tensor {
        &self.labels
    }

    /// 转为通用的 [`TensorDataset`]，交给 [`DataLoader`] 分批
    pub fn into_dataset(self) -> Result<TensorDataset, DataError> {
        TensorDataset::new(self.images, self.labels)
    }
}

/// 加载 MNIST 训练集并包装为打乱顺序的 [`DataLoader`]
///
/// 图像为 [batch, 1, 28, 28]、像素值在 [0, 1]，标签为 one-hot。
pub fn load_mnist_data(
    root: Option<&Path>,
    batch_size: usize,
    download: bool,
    seed: u64,
) -> Result<DataLoader, DataError> {
    let dataset = MnistDataset::load(root, true, download)?.into_dataset()?;
    Ok(DataLoader::new(dataset, batch_size).shuffle(true).seed(seed))
}

/// 获取默认数据目录
pub fn default_data_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("only_optim")
        .join("datasets")
}

/// 确保文件存在，必要时下载
fn ensure_file(
    data_dir: &Path,
    (base_name, md5): (&str, &str),
    download: bool,
) -> Result<PathBuf, DataError> {
    // 优先检查解压后的文件
    let uncompressed_path = data_dir.join(base_name);
    if uncompressed_path.exists() {
        return Ok(uncompressed_path);
    }

    let gz_path = data_dir.join(format!("{base_name}.gz"));
    if gz_path.exists() {
        return Ok(gz_path);
    }

    if !download {
        return Err(DataError::FileNotFound(uncompressed_path));
    }

    std::fs::create_dir_all(data_dir)?;
    let url = format!("{MNIST_BASE_URL}{base_name}.gz");
    download_file(&url, &gz_path, Some(md5))?;
    info!("MNIST 文件已缓存到 {}", gz_path.display());
    Ok(gz_path)
}

/// 打开 IDX 文件；扩展名为 .gz 时透明解压
fn open_idx(path: &Path) -> Result<Box<dyn Read>, DataError> {
    let file = File::open(path).map_err(|_| DataError::FileNotFound(path.to_path_buf()))?;
    let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}

fn idx_error(path: &Path, reason: impl Into<String>) -> DataError {
    DataError::InvalidIdx {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// 读取并校验大端序头部，返回 magic number 之后的各个字段
fn read_header<const N: usize>(
    reader: &mut dyn Read,
    path: &Path,
    expected_magic: u32,
) -> Result<[usize; N], DataError> {
    let read_u32 = |reader: &mut dyn Read| -> Result<u32, DataError> {
        let mut bytes = [0u8; 4];
        reader
            .read_exact(&mut bytes)
            .map_err(|e| idx_error(path, format!("读取头部失败: {e}")))?;
        Ok(u32::from_be_bytes(bytes))
    };

    let magic = read_u32(reader)?;
    if magic != expected_magic {
        return Err(idx_error(
            path,
            format!("无效的 magic number: {magic} (期望 {expected_magic})"),
        ));
    }

    let mut fields = [0usize; N];
    for field in &mut fields {
        *field = read_u32(reader)? as usize;
    }
    Ok(fields)
}

/// 读取头部声明的 `count` 个、每个 `item_size` 字节的数据体
///
/// 头部不可信：只按实际读到的字节分配内存，长度不符即报错。
fn read_body(
    reader: &mut dyn Read,
    path: &Path,
    count: usize,
    item_size: usize,
) -> Result<Vec<u8>, DataError> {
    let expected = count
        .checked_mul(item_size)
        .ok_or_else(|| idx_error(path, format!("头部声明的样本数 {count} 过大")))?;

    let mut body = Vec::new();
    (&mut *reader)
        .take(expected as u64)
        .read_to_end(&mut body)
        .map_err(|e| idx_error(path, format!("读取数据失败: {e}")))?;

    if body.len() != expected {
        return Err(idx_error(
            path,
            format!(
                "头部声明 {count} 个样本（{expected} 字节），实际只有 {} 字节",
                body.len()
            ),
        ));
    }
    Ok(body)
}

/// 解析 IDX 图像文件
///
/// IDX 格式：
/// - [0-3] magic number (0x00000803 = 2051)
/// - [4-7] number of images
/// - [8-11] number of rows
/// - [12-15] number of columns
/// - [16+] pixel data (unsigned byte)
fn parse_idx_images(path: &Path) -> Result<Tensor, DataError> {
    let mut reader = open_idx(path)?;
    let [num_images, num_rows, num_cols] = read_header::<3>(reader.as_mut(), path, IMAGES_MAGIC)?;

    if num_rows != IMAGE_SIDE || num_cols != IMAGE_SIDE {
        return Err(idx_error(
            path,
            format!("无效的图像尺寸: {num_rows}x{num_cols} (期望 28x28)"),
        ));
    }

    let pixels = read_body(reader.as_mut(), path, num_images, IMAGE_PIXELS)?;
    let data: Vec<f32> = pixels.into_iter().map(f32::from).collect();
    Ok(Tensor::new(&data, &[num_images, IMAGE_PIXELS]))
}

/// 解析 IDX 标签文件
///
/// IDX 格式：
/// - [0-3] magic number (0x00000801 = 2049)
/// - [4-7] number of labels
/// - [8+] label data (unsigned byte, 0-9)
fn parse_idx_labels(path: &Path) -> Result<Tensor, DataError> {
    let mut reader = open_idx(path)?;
    let [num_labels] = read_header::<1>(reader.as_mut(), path, LABELS_MAGIC)?;

    let labels = read_body(reader.as_mut(), path, num_labels, 1)?;
    if let Some(&bad) = labels.iter().find(|&&l| usize::from(l) >= NUM_CLASSES) {
        return Err(idx_error(path, format!("标签值 {bad} 超出 0-9")));
    }

    let data: Vec<f32> = labels.into_iter().map(f32::from).collect();
    Ok(Tensor::new(&data, &[num_labels]))
}
