/*
 * @Description  : 复合赋值运算（+=、-=、*=、/=）。右操作数须能广播到左操作数的形状，
 *                 左操作数的形状始终保持不变。优化器的状态累积（动量、二阶矩等）都走这里，避免反复分配。
 */

use ndarray::Zip;

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

impl_assign_op!(AddAssign, add_assign, Operator::AddAssign, |a: f32, b: f32| a + b);
impl_assign_op!(SubAssign, sub_assign, Operator::SubAssign, |a: f32, b: f32| a - b);
impl_assign_op!(MulAssign, mul_assign, Operator::MulAssign, |a: f32, b: f32| a * b);
impl_assign_op!(DivAssign, div_assign, Operator::DivAssign, |a: f32, b: f32| {
    assert!(b != 0., "{}", TensorError::DivByZero);
    a / b
});

impl Tensor {
    fn zip_assign(&mut self, other: &Tensor, operator: Operator, f: impl Fn(f32, f32) -> f32) {
        if let (false, Some(scalar)) = (self.is_scalar(), other.number()) {
            self.data.mapv_inplace(|x| f(x, scalar));
            return;
        }
        let target_dim = self.data.raw_dim();
        match other.data.broadcast(target_dim) {
            Some(view) => Zip::from(&mut self.data)
                .and(&view)
                .for_each(|x, &y| *x = f(*x, y)),
            None => panic!(
                "{}",
                TensorError::OperatorError {
                    operator,
                    tensor1_shape: self.shape().to_vec(),
                    tensor2_shape: other.shape().to_vec(),
                }
            ),
        }
    }
}
