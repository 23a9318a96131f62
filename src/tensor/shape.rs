use ndarray::{Axis, IxDyn};

use super::Tensor;
use crate::errors::TensorError;

impl Tensor {
    /// 改变形状（元素总数必须保持不变，否则会panic）
    pub fn reshape(&self, shape: &[usize]) -> Self {
        let total_elements: usize = self.data.len();
        let new_total_elements: usize = shape.iter().product();
        assert!(
            total_elements == new_total_elements,
            "{}",
            TensorError::IncompatibleShape
        );
        let data = self
            .data
            .as_standard_layout()
            .into_owned()
            .into_shape(IxDyn(shape))
            .unwrap_or_else(|_| unreachable!("标准布局且元素总数一致"));
        Self { data }
    }

    /// 原地改变形状
    pub fn reshape_mut(&mut self, shape: &[usize]) {
        *self = self.reshape(shape);
    }

    /// 展平为一阶张量
    pub fn flatten(&self) -> Self {
        self.reshape(&[self.size()])
    }

    /// 二阶张量的转置。只接受2阶张量，否则会panic。
    pub fn transpose(&self) -> Self {
        assert!(self.dimension() == 2, "转置只支持2阶张量，得到 {:?}", self.shape());
        Self::from_array(self.data.t().to_owned())
    }

    /// 沿第0维按给定的行索引挑选出新张量（行顺序与`indices`一致）
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        assert!(self.dimension() >= 1, "{}", TensorError::IncompatibleShape);
        Self::from_array(self.data.select(Axis(0), indices))
    }

    /// 判断两个张量能否按 NumPy 规则广播
    pub fn can_broadcast_with(&self, other: &Self) -> bool {
        broadcast_shape(self.shape(), other.shape()).is_some()
    }
}

/// 计算两个形状按 NumPy 规则广播后的形状；不兼容时返回 None
///
/// - 从右向左对齐维度
/// - 每个维度必须相等，或其中一个为 1
/// - 维度数不同时，较短的形状前面补 1
pub(in crate::tensor) fn broadcast_shape(a: &[usize], b: &[usize]) -> Option<Vec<usize>> {
    let rank = a.len().max(b.len());
    let mut shape = vec![0; rank];
    for i in 0..rank {
        let da = if i < rank - a.len() { 1 } else { a[i - (rank - a.len())] };
        let db = if i < rank - b.len() { 1 } else { b[i - (rank - b.len())] };
        shape[i] = match (da, db) {
            (x, y) if x == y => x,
            (1, y) => y,
            (x, 1) => x,
            _ => return None,
        };
    }
    Some(shape)
}
