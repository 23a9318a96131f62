use approx::assert_abs_diff_eq;

use super::{scalar_param, value_of};
use crate::nn::optimizer::{Optimizer, SGD};

#[test]
fn test_sgd_creation() {
    let sgd = SGD::new(0.01);
    assert_eq!(sgd.learning_rate(), 0.01);
    assert_eq!(sgd.momentum(), 0.0);
    assert_eq!(sgd.name(), "SGD");
}

#[test]
fn test_sgd_update() {
    // w_new = w - lr * g = 2 - 0.1 * 3 = 1.7
    let mut sgd = SGD::new(0.1);
    let mut w = scalar_param(2.0, 3.0);
    sgd.step(&mut [&mut w]).unwrap();
    assert_abs_diff_eq!(value_of(&w), 1.7, epsilon = 1e-6);
}

#[test]
fn test_sgd_momentum_update() {
    // step1: buf = 3,               w = 2 - 0.1 * 3 = 1.7
    // step2: buf = 0.9 * 3 + 3 = 5.7, w = 1.7 - 0.57 = 1.13
    let mut sgd = SGD::with_momentum(0.1, 0.9);
    let mut w = scalar_param(2.0, 3.0);
    sgd.step(&mut [&mut w]).unwrap();
    assert_abs_diff_eq!(value_of(&w), 1.7, epsilon = 1e-6);
    sgd.step(&mut [&mut w]).unwrap();
    assert_abs_diff_eq!(value_of(&w), 1.13, epsilon = 1e-5);

    // reset 后动量清零，再走一步与首步相同
    sgd.reset();
    sgd.step(&mut [&mut w]).unwrap();
    assert_abs_diff_eq!(value_of(&w), 0.83, epsilon = 1e-5);
}
