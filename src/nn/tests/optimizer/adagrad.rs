use approx::assert_abs_diff_eq;

use super::{scalar_param, value_of};
use crate::nn::optimizer::{Adagrad, Optimizer};

#[test]
fn test_adagrad_update() {
    // s = 9, w_new = 2 - 0.1 * 3 / 3 = 1.9
    let mut adagrad = Adagrad::new_default(0.1);
    let mut w = scalar_param(2.0, 3.0);
    adagrad.step(&mut [&mut w]).unwrap();
    assert_abs_diff_eq!(value_of(&w), 1.9, epsilon = 1e-6);

    // s = 18, w_new = 1.9 - 0.1 * 3 / √18
    adagrad.step(&mut [&mut w]).unwrap();
    assert_abs_diff_eq!(value_of(&w), 1.829_289_3, epsilon = 1e-5);
    assert_abs_diff_eq!(adagrad.get_sum_squares("w").unwrap()[[0, 0]], 18.0, epsilon = 1e-5);
}

#[test]
fn test_adagrad_reset_clears_accumulator() {
    let mut adagrad = Adagrad::new(0.1, 1e-10);
    let mut w = scalar_param(2.0, 3.0);
    adagrad.step(&mut [&mut w]).unwrap();
    adagrad.reset();
    assert!(adagrad.get_sum_squares("w").is_none());
}
