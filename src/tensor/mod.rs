/*
 * @Author       : 老董
 * @Date         : 2023-08-17 17:24:24
 * @Description  : 张量（Tensor）：对`ndarray`动态维数组的轻量封装，
 *                 提供网络前向/反向与优化器更新所需的全部数值运算。
 */

use ndarray::{Array, IxDyn};
use rand::Rng;
use rand::distributions::{Distribution, Uniform};

use crate::errors::TensorError;

/// 为一个二元运算符生成“（不）带引用的张量 与（不）带引用的张量/f32”的全部组合实现。
/// `$f`为逐元素运算的闭包，广播规则见[`ops::others::elementwise`]。
macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $operator:expr, $f:expr) => {
        /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓（不）带引用的张量 与（不）带引用的张量↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
        impl std::ops::$trait for Tensor {
            type Output = Tensor;

            fn $method(self, other: Tensor) -> Tensor {
                elementwise(&self, &other, $operator, $f)
            }
        }
        impl<'a> std::ops::$trait<&'a Tensor> for Tensor {
            type Output = Tensor;

            fn $method(self, other: &'a Tensor) -> Tensor {
                elementwise(&self, other, $operator, $f)
            }
        }
        impl std::ops::$trait<Tensor> for &Tensor {
            type Output = Tensor;

            fn $method(self, other: Tensor) -> Tensor {
                elementwise(self, &other, $operator, $f)
            }
        }
        impl<'b> std::ops::$trait<&'b Tensor> for &Tensor {
            type Output = Tensor;

            fn $method(self, other: &'b Tensor) -> Tensor {
                elementwise(self, other, $operator, $f)
            }
        }
        /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑（不）带引用的张量 与（不）带引用的张量↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

        /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓（不）带引用的张量 与 f32↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
        impl std::ops::$trait<f32> for Tensor {
            type Output = Tensor;

            fn $method(self, scalar: f32) -> Tensor {
                let f = $f;
                Tensor::from_array(self.data.mapv(|x| f(x, scalar)))
            }
        }
        impl std::ops::$trait<f32> for &Tensor {
            type Output = Tensor;

            fn $method(self, scalar: f32) -> Tensor {
                let f = $f;
                Tensor::from_array(self.data.mapv(|x| f(x, scalar)))
            }
        }
        impl std::ops::$trait<Tensor> for f32 {
            type Output = Tensor;

            fn $method(self, tensor: Tensor) -> Tensor {
                let f = $f;
                Tensor::from_array(tensor.data.mapv(|x| f(self, x)))
            }
        }
        impl<'a> std::ops::$trait<&'a Tensor> for f32 {
            type Output = Tensor;

            fn $method(self, tensor: &'a Tensor) -> Tensor {
                let f = $f;
                Tensor::from_array(tensor.data.mapv(|x| f(self, x)))
            }
        }
        /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑（不）带引用的张量 与 f32↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
    };
}

/// 为一个复合赋值运算符（`+=`等）生成右操作数为张量、张量引用和 f32 的实现
macro_rules! impl_assign_op {
    ($trait:ident, $method:ident, $operator:expr, $f:expr) => {
        impl std::ops::$trait for Tensor {
            fn $method(&mut self, other: Tensor) {
                self.zip_assign(&other, $operator, $f);
            }
        }
        impl<'a> std::ops::$trait<&'a Tensor> for Tensor {
            fn $method(&mut self, other: &'a Tensor) {
                self.zip_assign(other, $operator, $f);
            }
        }
        impl std::ops::$trait<f32> for Tensor {
            fn $method(&mut self, scalar: f32) {
                let f = $f;
                self.data.mapv_inplace(|x| f(x, scalar));
            }
        }
    };
}

mod index;
mod ops {
    pub mod add;
    pub mod assign;
    pub mod div;
    pub mod mat_mul;
    pub mod mul;
    pub mod others;
    pub mod sub;
}
mod print;
mod property;
mod shape;

#[cfg(test)]
mod tests;

/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 注：只要通过Tensor初始化的都是张量（即使标量也是张量）；
/// 而通常意义上的数字（类型为usize、i32、f64等）就只是纯数（number），在这里不被认为是张量。
#[derive(Debug, Clone)]
pub struct Tensor {
    data: Array<f32, IxDyn>,
}

impl Tensor {
    /// 创建一个张量，若为标量，`shape`可以是[]、[1]、[1,1]、[1,1,1]...
    /// 若为向量，`shape`可以是[n]、[1,n]、[n,1]；
    /// 若为矩阵，`shape`可以是[n,m]；
    /// 若为更高维度的数组，`shape`可以是[c,n,m,...]；
    /// 注：`data`的长度必须和`shape`中所有元素的乘积相等，否则会panic。
    pub fn new(data: &[f32], shape: &[usize]) -> Self {
        let expected: usize = shape.iter().product();
        assert!(
            data.len() == expected,
            "{}",
            TensorError::DataShapeMismatch {
                data_len: data.len(),
                shape: shape.to_vec(),
            }
        );
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec())
            .unwrap_or_else(|_| unreachable!("长度已校验"));
        Self { data }
    }

    /// 全零张量
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: Array::zeros(IxDyn(shape)),
        }
    }

    /// 全一张量
    pub fn ones(shape: &[usize]) -> Self {
        Self {
            data: Array::ones(IxDyn(shape)),
        }
    }

    /// 所有元素均为`value`的张量
    pub fn full(value: f32, shape: &[usize]) -> Self {
        Self {
            data: Array::from_elem(IxDyn(shape), value),
        }
    }

    /// 创建一个随机张量，其值在[min, max]的闭区间内均匀分布。
    /// `min`须小于等于`max`，否则会panic。
    pub fn uniform_with_rng<R: Rng + ?Sized>(
        min: f32,
        max: f32,
        shape: &[usize],
        rng: &mut R,
    ) -> Self {
        assert!(min <= max, "{}", TensorError::InvalidRange { min, max });
        let dist = Uniform::new_inclusive(min, max);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| dist.sample(rng))
            .collect::<Vec<_>>();
        Self::new(&data, shape)
    }

    /// 创建一个服从正态分布的随机张量（Box-Muller 变换）。
    pub fn normal_with_rng<R: Rng + ?Sized>(
        mean: f32,
        std_dev: f32,
        shape: &[usize],
        rng: &mut R,
    ) -> Self {
        let data_len = shape.iter().product::<usize>();
        let mut data = Vec::with_capacity(data_len);
        // u1 取不到 0，避免 ln(0)
        let open_unit = Uniform::new(f32::EPSILON, 1.0);

        while data.len() < data_len {
            let u1 = open_unit.sample(rng);
            let u2 = open_unit.sample(rng);
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * std::f32::consts::PI * u2;
            let z0 = mean + std_dev * r * theta.cos();
            let z1 = mean + std_dev * r * theta.sin();

            if z0.is_finite() {
                data.push(z0);
            }
            if data.len() < data_len && z1.is_finite() {
                data.push(z1);
            }
        }

        Self::new(&data, shape)
    }
}

// 私有方法
impl Tensor {
    /// 由已有数组构造（供`ops`内部使用）
    pub(in crate::tensor) fn from_array(data: Array<f32, IxDyn>) -> Self {
        Self {
            data: data.as_standard_layout().into_owned(),
        }
    }
}
