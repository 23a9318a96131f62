/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @Description  : nn 模块的错误类型
 */

use thiserror::Error;

/// 网络前向/反向与参数更新过程中的错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NnError {
    #[error("形状不匹配：期望 {expected:?}，实际 {got:?}（{message}）")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        message: String,
    },

    /// 反向传播前未执行前向传播（缺少缓存的输入）
    #[error("层`{0}`在反向传播前没有执行前向传播")]
    MissingForward(String),

    #[error("非法操作：{0}")]
    InvalidOperation(String),
}
