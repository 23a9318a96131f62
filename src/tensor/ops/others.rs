use ndarray::{Axis, IxDyn, Zip};
use std::cmp::PartialEq;

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use crate::tensor::shape::broadcast_shape;

impl From<f32> for Tensor {
    /// 实现 From<f32> trait 用于将`f32`类型转换为形状为`[1]`的张量
    fn from(scalar: f32) -> Self {
        Tensor::new(&[scalar], &[1])
    }
}

impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

/// 两个张量逐元素运算：
/// 1. 形状严格一致：逐元素；
/// 2. 其中一个为标量（而另一个不是）：标量作用到另一方的每个元素上，结果形状同另一方；
/// 3. 其余情况按 NumPy 规则广播，无法广播则panic。
pub(in crate::tensor) fn elementwise(
    tensor_1: &Tensor,
    tensor_2: &Tensor,
    operator: Operator,
    f: impl Fn(f32, f32) -> f32,
) -> Tensor {
    if tensor_1.is_same_shape(tensor_2) {
        return Tensor::from_array(
            Zip::from(&tensor_1.data)
                .and(&tensor_2.data)
                .map_collect(|&a, &b| f(a, b)),
        );
    }
    if let (false, Some(scalar)) = (tensor_1.is_scalar(), tensor_2.number()) {
        return Tensor::from_array(tensor_1.data.mapv(|a| f(a, scalar)));
    }
    if let (Some(scalar), false) = (tensor_1.number(), tensor_2.is_scalar()) {
        return Tensor::from_array(tensor_2.data.mapv(|b| f(scalar, b)));
    }

    let operator_error = |operator| TensorError::OperatorError {
        operator,
        tensor1_shape: tensor_1.shape().to_vec(),
        tensor2_shape: tensor_2.shape().to_vec(),
    };
    let Some(shape) = broadcast_shape(tensor_1.shape(), tensor_2.shape()) else {
        panic!("{}", operator_error(operator));
    };
    let (Some(view_1), Some(view_2)) = (
        tensor_1.data.broadcast(IxDyn(&shape)),
        tensor_2.data.broadcast(IxDyn(&shape)),
    ) else {
        panic!("{}", operator_error(operator));
    };
    Tensor::from_array(Zip::from(&view_1).and(&view_2).map_collect(|&a, &b| f(a, b)))
}

// 逐元素数学函数
impl Tensor {
    /// 对每个元素施加`f`，返回新张量
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Tensor {
        Tensor::from_array(self.data.mapv(f))
    }

    pub fn sqrt(&self) -> Tensor {
        self.map(f32::sqrt)
    }

    pub fn abs(&self) -> Tensor {
        self.map(f32::abs)
    }

    pub fn exp(&self) -> Tensor {
        self.map(f32::exp)
    }

    pub fn powi(&self, n: i32) -> Tensor {
        self.map(|x| x.powi(n))
    }

    /// 两个张量逐元素取较大值（Adamax 的无穷范数累积用）
    pub fn maximum(&self, other: &Tensor) -> Tensor {
        elementwise(self, other, Operator::Maximum, f32::max)
    }
}

// 归约
impl Tensor {
    /// 所有元素之和
    pub fn sum(&self) -> f32 {
        self.data.sum()
    }

    /// 所有元素的平均值；空张量返回 0
    pub fn mean(&self) -> f32 {
        if self.size() == 0 {
            0.
        } else {
            self.sum() / self.size() as f32
        }
    }

    /// 二阶张量按行求和（沿第0维），结果形状为[1, n]，常用于偏置梯度。
    pub fn sum_axis0(&self) -> Tensor {
        assert!(self.dimension() == 2, "sum_axis0只支持2阶张量，得到 {:?}", self.shape());
        let summed = self.data.sum_axis(Axis(0));
        Tensor::from_array(summed.insert_axis(Axis(0)))
    }

    pub fn min_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::INFINITY, f32::min)
    }

    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// 二阶张量每一行最大值所在的列索引（并列时取靠前者）
    pub fn argmax_rows(&self) -> Vec<usize> {
        assert!(self.dimension() == 2, "argmax_rows只支持2阶张量，得到 {:?}", self.shape());
        self.data
            .axis_iter(Axis(0))
            .map(|row| {
                row.iter()
                    .enumerate()
                    .fold((0, f32::NEG_INFINITY), |(best_i, best_v), (i, &v)| {
                        if v > best_v { (i, v) } else { (best_i, best_v) }
                    })
                    .0
            })
            .collect()
    }
}
