use approx::assert_abs_diff_eq;

use super::{scalar_param, value_of};
use crate::nn::optimizer::{Optimizer, RMSProp};

#[test]
fn test_rmsprop_update() {
    // v = 0.01 * 9 = 0.09, √v = 0.3
    // w_new = 2 - 0.1 * 3 / (0.3 + 1e-8) = 1.0
    let mut rmsprop = RMSProp::new_default(0.1);
    let mut w = scalar_param(2.0, 3.0);
    rmsprop.step(&mut [&mut w]).unwrap();

    assert_abs_diff_eq!(value_of(&w), 1.0, epsilon = 1e-5);
    assert_abs_diff_eq!(
        rmsprop.get_square_average("w").unwrap()[[0, 0]],
        0.09,
        epsilon = 1e-6
    );
}

#[test]
fn test_rmsprop_second_step() {
    // v2 = 0.99 * 0.09 + 0.01 * 9 = 0.1791
    // w = 1.0 - 0.1 * 3 / √0.1791
    let mut rmsprop = RMSProp::new(0.1, 0.99, 1e-8);
    let mut w = scalar_param(2.0, 3.0);
    rmsprop.step(&mut [&mut w]).unwrap();
    rmsprop.step(&mut [&mut w]).unwrap();

    let expected = 1.0 - 0.1 * 3.0 / 0.1791f32.sqrt();
    assert_abs_diff_eq!(value_of(&w), expected, epsilon = 1e-5);
}
