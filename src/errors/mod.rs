use thiserror::Error;
mod ops;
pub use self::ops::*;

/// 张量层面的错误。张量运算符（`+`、`*`、`mat_mul` 等）遇到形状问题时以此为 panic 信息，
/// 上层（`nn`、`data`）则各自返回带 `Result` 的错误类型。
#[derive(Error, Debug, PartialEq)]
pub enum TensorError {
    // 随机初始化的取值区间
    #[error("均匀分布的下界{min}须不大于上界{max}")]
    InvalidRange { min: f32, max: f32 },
    // 张量二元运算
    #[error(
        "形状不一致，故无法{operator}：第一个张量的形状为{tensor1_shape:?}，第二个张量的形状为{tensor2_shape:?}"
    )]
    OperatorError {
        operator: Operator,
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },

    #[error("张量数据长度{data_len}与形状{shape:?}不符")]
    DataShapeMismatch { data_len: usize, shape: Vec<usize> },
    #[error("张量形状不兼容")]
    IncompatibleShape,
    #[error("矩阵乘法要求两个二阶张量，且前者列数等于后者行数：{tensor1_shape:?} @ {tensor2_shape:?}")]
    MatMulShape {
        tensor1_shape: Vec<usize>,
        tensor2_shape: Vec<usize>,
    },
    #[error("除数为零")]
    DivByZero,
}
