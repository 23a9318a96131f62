/*
 * @Author       : 老董
 * @Date         : 2025-12-20
 * @Description  : 优化器模块单元测试
 *
 * 测试按功能分组：
 * - sgd/adam/adamax/rmsprop/adagrad: 各优化器的更新公式
 * - kind: 优化器白名单
 * - trait_tests: Optimizer trait 通用行为测试（含在可分问题上降低损失）
 */

use crate::nn::Parameter;
use crate::tensor::Tensor;

mod adagrad;
mod adam;
mod adamax;
mod kind;
mod rmsprop;
mod sgd;
mod trait_tests;

/// 单元素参数 w，梯度为 g
///
/// 与 PyTorch 对照脚本使用相同的设置：w=2, g=3
pub(super) fn scalar_param(w: f32, g: f32) -> Parameter {
    let mut param = Parameter::new("w", Tensor::new(&[w], &[1, 1]));
    param.accumulate_grad(Tensor::new(&[g], &[1, 1])).unwrap();
    param
}

pub(super) fn value_of(param: &Parameter) -> f32 {
    param.value()[[0, 0]]
}
