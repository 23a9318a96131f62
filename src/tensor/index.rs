use std::ops::{Index, IndexMut};

use super::Tensor;

// 形如`tensor[[i, j]]`的逐元素读写，索引越界时panic（同ndarray）
impl<const N: usize> Index<[usize; N]> for Tensor {
    type Output = f32;

    fn index(&self, index: [usize; N]) -> &f32 {
        &self.data[&index[..]]
    }
}

impl<const N: usize> IndexMut<[usize; N]> for Tensor {
    fn index_mut(&mut self, index: [usize; N]) -> &mut f32 {
        &mut self.data[&index[..]]
    }
}
