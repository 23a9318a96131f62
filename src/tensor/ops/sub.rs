use super::others::elementwise;
use crate::errors::Operator;
use crate::tensor::Tensor;

impl_binary_op!(Sub, sub, Operator::Sub, |a: f32, b: f32| a - b);

impl std::ops::Neg for Tensor {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        Tensor::from_array(self.data.mapv(|x| -x))
    }
}

impl std::ops::Neg for &Tensor {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        Tensor::from_array(self.data.mapv(|x| -x))
    }
}
