//! 数据变换函数
//!
//! 提供常用的数据预处理操作，如归一化、one-hot 编码等。

use super::DataError;
use crate::tensor::Tensor;

/// MNIST 类别数
const NUM_DIGITS: usize = 10;

/// 将 0-255 像素值归一化到 0-1
pub fn normalize_pixels(tensor: &Tensor) -> Tensor {
    tensor / 255.0
}

/// 单个数字标签的 one-hot 向量
///
/// 返回形状 [10] 的张量，仅第 `x` 位为 1。
///
/// # 示例
/// ```ignore
/// let label = get_label(3)?;
/// // 结果: [0,0,0,1,0,0,0,0,0,0]
/// ```
pub fn get_label(x: usize) -> Result<Tensor, DataError> {
    if x >= NUM_DIGITS {
        return Err(DataError::IndexOutOfBounds {
            index: x,
            len: NUM_DIGITS,
        });
    }
    let mut label = Tensor::zeros(&[NUM_DIGITS]);
    label[[x]] = 1.0;
    Ok(label)
}

/// 将类别索引转换为 one-hot 编码
///
/// # 参数
/// - `labels`: 类别索引 Tensor，形状 [N] 或 [N, 1]，值为 0..num_classes
/// - `num_classes`: 类别总数
///
/// # 返回
/// one-hot 编码 Tensor，形状 [N, num_classes]；超出范围的索引对应全零行
///
/// # 示例
/// ```ignore
/// let labels = Tensor::new(&[0.0, 2.0, 1.0], &[3]);
/// let one_hot = one_hot(&labels, 3);
/// // 结果: [[1,0,0], [0,0,1], [0,1,0]]
/// ```
pub fn one_hot(labels: &Tensor, num_classes: usize) -> Tensor {
    let flat = labels.flatten();
    let n = flat.size();

    let mut data = vec![0.0; n * num_classes];
    for (i, &value) in flat.iter().enumerate() {
        let class_idx = value as usize;
        if value >= 0.0 && class_idx < num_classes {
            data[i * num_classes + class_idx] = 1.0;
        }
    }

    Tensor::new(&data, &[n, num_classes])
}

/// 展平图像
///
/// - 形状 [N, C, H, W] → 输出 [N, C*H*W]
/// - 形状 [N, H, W] → 输出 [N, H*W]
/// - 其余形状整体展平
pub fn flatten_images(tensor: &Tensor) -> Tensor {
    let shape = tensor.shape();
    match shape.len() {
        3 | 4 => {
            let n = shape[0];
            let flat_size: usize = shape[1..].iter().product();
            tensor.reshape(&[n, flat_size])
        }
        _ => tensor.flatten(),
    }
}
