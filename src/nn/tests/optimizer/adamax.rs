use approx::assert_abs_diff_eq;

use super::{scalar_param, value_of};
use crate::nn::optimizer::{Adamax, Optimizer};
use crate::nn::Parameter;
use crate::tensor::Tensor;

#[test]
fn test_adamax_update() {
    // m = 0.1 * 3 = 0.3
    // u = max(0, |3| + 1e-8) = 3
    // w_new = 2 - (0.1 / (1 - 0.9)) * 0.3 / 3 = 1.9
    let mut adamax = Adamax::new_default(0.1);
    let mut w = scalar_param(2.0, 3.0);
    adamax.step(&mut [&mut w]).unwrap();

    assert_abs_diff_eq!(value_of(&w), 1.9, epsilon = 1e-5);
    assert_abs_diff_eq!(adamax.get_infinity_norm("w").unwrap()[[0, 0]], 3.0, epsilon = 1e-6);
    assert_eq!(adamax.name(), "Adamax");
}

#[test]
fn test_adamax_infinity_norm_decays_then_tracks_max() {
    let mut adamax = Adamax::new_default(0.01);
    let mut w = Parameter::new("w", Tensor::new(&[0.0, 0.0], &[1, 2]));

    w.accumulate_grad(Tensor::new(&[4.0, -1.0], &[1, 2])).unwrap();
    adamax.step(&mut [&mut w]).unwrap();

    w.zero_grad();
    w.accumulate_grad(Tensor::new(&[1.0, -2.0], &[1, 2])).unwrap();
    adamax.step(&mut [&mut w]).unwrap();

    // 第一维：max(0.999 * 4, 1) = 3.996；第二维：max(0.999 * 1, 2) = 2
    let u = adamax.get_infinity_norm("w").unwrap();
    assert_abs_diff_eq!(u[[0, 0]], 3.996, epsilon = 1e-5);
    assert_abs_diff_eq!(u[[0, 1]], 2.0, epsilon = 1e-5);
}

#[test]
fn test_adamax_zero_gradient_keeps_parameter() {
    // u 以 ε 为下界，零梯度时不会除以零
    let mut adamax = Adamax::new_default(0.1);
    let mut w = scalar_param(2.0, 0.0);
    adamax.step(&mut [&mut w]).unwrap();
    assert_abs_diff_eq!(value_of(&w), 2.0, epsilon = 1e-6);
    assert!(!w.value().has_non_finite());
}
