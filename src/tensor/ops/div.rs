use super::others::elementwise;
use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

impl_binary_op!(Div, div, Operator::Div, |a: f32, b: f32| {
    assert!(b != 0., "{}", TensorError::DivByZero);
    a / b
});
