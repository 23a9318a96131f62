use ndarray::Ix2;

use crate::errors::TensorError;
use crate::tensor::Tensor;

impl Tensor {
    /// 实现矩阵乘法。只接受2阶张量，否则会触发panic。
    /// 需要保证前一个张量的列数（col）等于后一个张量的行数（row），否则也会触发panic。
    pub fn mat_mul(&self, other: &Tensor) -> Tensor {
        let shape_ok = self.dimension() == 2
            && other.dimension() == 2
            && self.shape()[1] == other.shape()[0];
        assert!(
            shape_ok,
            "{}",
            TensorError::MatMulShape {
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );
        // 将动态维度数组转换为常量维度数组
        let self_data = self
            .data
            .view()
            .into_dimensionality::<Ix2>()
            .unwrap_or_else(|_| unreachable!("已校验为2阶"));
        let other_data = other
            .data
            .view()
            .into_dimensionality::<Ix2>()
            .unwrap_or_else(|_| unreachable!("已校验为2阶"));
        Tensor::from_array(self_data.dot(&other_data).into_dyn())
    }
}
