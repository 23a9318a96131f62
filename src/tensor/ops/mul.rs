/*
 * @Author       : 老董
 * @Date         : 2023-08-17 17:24:24
 * @Description  : 张量的乘法，实现了张量与标量的乘法以及两个张量“逐元素”相乘的运算，并返回一个新的张量。
 *                 注意：这里的乘法概念与线性代数中的矩阵乘法不同，在这里其更类似于哈达玛积（Hadamard product）与数乘的结合；
 *                 矩阵乘法见`mat_mul`。
 */

use super::others::elementwise;
use crate::errors::Operator;
use crate::tensor::Tensor;

impl_binary_op!(Mul, mul, Operator::Mul, |a: f32, b: f32| a * b);
