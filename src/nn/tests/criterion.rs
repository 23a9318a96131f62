//! CrossEntropyLoss 单元测试
//!
//! 预期值与 `torch.nn.CrossEntropyLoss()` 一致。

use approx::assert_abs_diff_eq;

use crate::nn::{CrossEntropyLoss, NnError, stable_softmax};
use crate::tensor::Tensor;

#[test]
fn test_cross_entropy_known_values() {
    let criterion = CrossEntropyLoss::new();
    let logits = Tensor::new(&[1.0, 2.0, 3.0], &[1, 3]);
    let target = Tensor::new(&[0.0, 0.0, 1.0], &[1, 3]);

    let out = criterion.forward(&logits, &target).unwrap();
    // PyTorch: F.cross_entropy(tensor([[1.,2.,3.]]), tensor([2])) = 0.4076
    assert_abs_diff_eq!(out.loss, 0.407_606, epsilon = 1e-5);
    assert_abs_diff_eq!(out.grad[[0, 0]], 0.090_030_57, epsilon = 1e-6);
    assert_abs_diff_eq!(out.grad[[0, 1]], 0.244_728_47, epsilon = 1e-6);
    assert_abs_diff_eq!(out.grad[[0, 2]], 0.665_240_96 - 1.0, epsilon = 1e-6);
}

#[test]
fn test_cross_entropy_grad_is_averaged_over_batch() {
    let criterion = CrossEntropyLoss::new();
    #[rustfmt::skip]
    let logits = Tensor::new(&[
        0.5, -1.0, 2.0,
        3.0, 0.0, -2.0,
    ], &[2, 3]);
    #[rustfmt::skip]
    let target = Tensor::new(&[
        0.0, 1.0, 0.0,
        1.0, 0.0, 0.0,
    ], &[2, 3]);

    let out = criterion.forward(&logits, &target).unwrap();
    let expected = (stable_softmax(&logits) - &target) / 2.0;
    for b in 0..2 {
        for c in 0..3 {
            assert_abs_diff_eq!(out.grad[[b, c]], expected[[b, c]], epsilon = 1e-6);
        }
    }
    // 每行梯度之和为 0
    assert_abs_diff_eq!(out.grad.sum(), 0.0, epsilon = 1e-6);
}

#[test]
fn test_cross_entropy_large_logits_stay_finite() {
    let criterion = CrossEntropyLoss::new();
    let logits = Tensor::new(&[1000.0, 0.0, -1000.0], &[1, 3]);
    let target = Tensor::new(&[0.0, 1.0, 0.0], &[1, 3]);
    let out = criterion.forward(&logits, &target).unwrap();
    assert!(out.loss.is_finite());
    assert_abs_diff_eq!(out.loss, 1000.0, epsilon = 1e-2);
    assert!(!out.grad.has_non_finite());
}

#[test]
fn test_cross_entropy_shape_mismatch() {
    let criterion = CrossEntropyLoss::new();
    let err = criterion
        .forward(&Tensor::zeros(&[2, 10]), &Tensor::zeros(&[2, 9]))
        .unwrap_err();
    assert!(matches!(err, NnError::ShapeMismatch { .. }));

    let err = criterion
        .forward(&Tensor::zeros(&[0, 10]), &Tensor::zeros(&[0, 10]))
        .unwrap_err();
    assert!(matches!(err, NnError::InvalidOperation(_)));
}

#[test]
fn test_stable_softmax_rows_sum_to_one() {
    let logits = Tensor::new(&[1.0, 2.0, 3.0, -5.0, 0.0, 5.0], &[2, 3]);
    let softmax = stable_softmax(&logits);
    for b in 0..2 {
        let row_sum: f32 = (0..3).map(|c| softmax[[b, c]]).sum();
        assert_abs_diff_eq!(row_sum, 1.0, epsilon = 1e-6);
    }
}
