/*
 * @Author       : 老董
 * @Date         : 2026-01-09
 * @Description  : Module trait 定义
 */

use super::Parameter;

/// 模块 trait
///
/// # 设计原则
/// - `forward()` **不是** trait 方法（签名各异）
/// - `new()` **不是** trait 方法（参数各异）
/// - `parameters()`/`parameters_mut()` 签名一致，放入 trait，供优化器与统计使用
pub trait Module {
    /// 获取所有可训练参数
    fn parameters(&self) -> Vec<&Parameter>;

    /// 获取所有可训练参数的可变引用（优化器更新用）
    fn parameters_mut(&mut self) -> Vec<&mut Parameter>;

    /// 获取参数数量（按参数张量计）
    fn num_params(&self) -> usize {
        self.parameters().len()
    }

    /// 获取标量参数总数
    fn num_elements(&self) -> usize {
        self.parameters().iter().map(|p| p.numel()).sum()
    }

    /// 清零所有参数的梯度
    fn zero_grad(&mut self) {
        for param in self.parameters_mut() {
            param.zero_grad();
        }
    }
}
