//! train 模块单元测试

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::data::{DataLoader, TensorDataset};
use crate::tensor::Tensor;


/// 仿 MNIST 的可分数据：类别 c 的样本在第 c 段（78 个像素）上取值接近 1，其余接近 0
pub(super) fn synthetic_digits(per_class: usize, seed: u64) -> TensorDataset {
    let n = per_class * 10;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut images = Tensor::uniform_with_rng(0.0, 0.1, &[n, 784], &mut rng);
    let mut labels = Tensor::zeros(&[n, 10]);
    for i in 0..n {
        let class = i % 10;
        for pixel in class * 78..(class + 1) * 78 {
            images[[i, pixel]] += 0.9;
        }
        labels[[i, class]] = 1.0;
    }
    TensorDataset::new(images, labels).unwrap()
}

pub(super) fn synthetic_loader(per_class: usize, batch_size: usize) -> DataLoader {
    DataLoader::new(synthetic_digits(per_class, 0), batch_size)
        .shuffle(true)
        .seed(1)
}
