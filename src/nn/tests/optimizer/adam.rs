/*
 * @Author       : 老董
 * @Date         : 2025-12-20
 * @Description  : Adam 优化器测试
 */

use approx::assert_abs_diff_eq;

use super::{scalar_param, value_of};
use crate::nn::optimizer::{Adam, Optimizer};

#[test]
fn test_adam_creation() {
    // 测试自定义参数
    let adam = Adam::new(0.001, 0.9, 0.999, 1e-8);
    assert_eq!(adam.learning_rate(), 0.001);

    // 测试默认参数
    let adam_default = Adam::new_default(0.001);
    assert_eq!(adam_default.learning_rate(), 0.001);
    assert_eq!(adam_default.timestep(), 0);
}

#[test]
fn test_adam_learning_rate_modification() {
    let mut adam = Adam::new_default(0.001);
    adam.set_learning_rate(0.0001);
    assert_eq!(adam.learning_rate(), 0.0001);
}

#[test]
fn test_adam_update() {
    // 测试Adam更新公式
    // 初始值: w=2, 梯度 g=3
    // Adam更新 (beta1=0.9, beta2=0.999, eps=1e-8, lr=0.1):
    //   m_1 = 0.1 * 3 = 0.3
    //   v_1 = 0.001 * 9 = 0.009
    //   m_hat = 0.3 / (1-0.9) = 3.0
    //   v_hat = 0.009 / (1-0.999) = 9.0
    //   update = 0.1 * 3.0 / (sqrt(9.0) + 1e-8) ≈ 0.1
    //   w_new = 2.0 - 0.1 ≈ 1.9
    // PyTorch验证: w_new = 1.899999976158142
    let mut adam = Adam::new_default(0.1);
    let mut w = scalar_param(2.0, 3.0);
    adam.step(&mut [&mut w]).unwrap();

    assert_abs_diff_eq!(value_of(&w), 1.9, epsilon = 1e-5);
    assert_eq!(adam.timestep(), 1);
    assert_abs_diff_eq!(adam.get_momentum("w").unwrap()[[0, 0]], 0.3, epsilon = 1e-6);
    assert_abs_diff_eq!(adam.get_velocity("w").unwrap()[[0, 0]], 0.009, epsilon = 1e-6);
}

#[test]
fn test_adam_second_step_with_constant_gradient() {
    // 梯度恒定时偏差修正后 m_hat = g、v_hat = g²，每步都恰好移动 lr
    let mut adam = Adam::new_default(0.1);
    let mut w = scalar_param(2.0, 3.0);
    adam.step(&mut [&mut w]).unwrap();
    adam.step(&mut [&mut w]).unwrap();
    assert_abs_diff_eq!(value_of(&w), 1.8, epsilon = 1e-4);
    assert_eq!(adam.timestep(), 2);
}

#[test]
fn test_adam_reset() {
    let mut adam = Adam::new_default(0.1);
    let mut w = scalar_param(2.0, 3.0);
    adam.step(&mut [&mut w]).unwrap();

    adam.reset();
    assert_eq!(adam.timestep(), 0);
    assert!(adam.get_momentum("w").is_none());
    assert!(adam.get_velocity("w").is_none());
}
