/*
 * @Author       : 老董
 * @Date         : 2025-12-20
 * @Description  : Optimizer trait 通用行为测试
 */

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::scalar_param;
use crate::nn::optimizer::{Adam, Optimizer, OptimizerKind, SGD};
use crate::nn::{CrossEntropyLoss, Init, Linear, Module, NnError, Parameter};
use crate::tensor::Tensor;

#[test]
fn test_parameters_without_gradient_are_skipped() {
    for kind in OptimizerKind::ALL {
        let mut optimizer = kind.build(0.1);
        let mut frozen = Parameter::new("frozen", Tensor::new(&[5.0], &[1, 1]));
        let mut w = scalar_param(2.0, 3.0);
        optimizer.step(&mut [&mut frozen, &mut w]).unwrap();

        assert_eq!(frozen.value()[[0, 0]], 5.0, "{kind}");
        assert!(w.value()[[0, 0]] < 2.0, "{kind}");
    }
}

#[test]
fn test_zero_grad_clears_all_gradients() {
    let sgd = SGD::new(0.1);
    let mut a = scalar_param(1.0, 1.0);
    let mut b = scalar_param(1.0, 2.0);
    sgd.zero_grad(&mut [&mut a, &mut b]);
    assert!(a.grad().is_none());
    assert!(b.grad().is_none());
}

#[test]
fn test_state_shape_mismatch_is_reported() {
    let mut adam = Adam::new_default(0.1);
    let mut w = scalar_param(2.0, 3.0);
    adam.step(&mut [&mut w]).unwrap();

    // 同名但形状不同的参数
    let mut other = Parameter::new("w", Tensor::zeros(&[1, 2]));
    other.accumulate_grad(Tensor::ones(&[1, 2])).unwrap();
    let err = adam.step(&mut [&mut other]).unwrap_err();
    assert_eq!(
        err,
        NnError::ShapeMismatch {
            expected: vec![1, 1],
            got: vec![1, 2],
            message: "参数`w`的优化器状态".to_string(),
        }
    );
}

#[test]
fn test_failed_step_leaves_state_untouched() {
    let mut adam = Adam::new_default(0.1);
    let mut w = scalar_param(2.0, 3.0);
    adam.step(&mut [&mut w]).unwrap();
    let momentum = adam.get_momentum("w").unwrap().clone();
    let velocity = adam.get_velocity("w").unwrap().clone();

    // 同一次 step 中，排在前面的合法参数也不应被更新
    let mut a = Parameter::new("a", Tensor::new(&[1.0], &[1, 1]));
    a.accumulate_grad(Tensor::new(&[1.0], &[1, 1])).unwrap();
    let mut other = Parameter::new("w", Tensor::zeros(&[1, 2]));
    other.accumulate_grad(Tensor::ones(&[1, 2])).unwrap();
    assert!(adam.step(&mut [&mut a, &mut other]).is_err());

    assert_eq!(adam.get_momentum("w").unwrap(), &momentum);
    assert_eq!(adam.get_velocity("w").unwrap(), &velocity);
    assert!(adam.get_momentum("a").is_none());
    assert_eq!(adam.timestep(), 1);
    assert_eq!(a.value()[[0, 0]], 1.0);
    assert_eq!(other.value(), &Tensor::zeros(&[1, 2]));

    // 其余带状态的优化器同样先校验再修改
    for kind in OptimizerKind::ALL {
        let mut optimizer = match kind {
            OptimizerKind::Sgd => SGD::with_momentum(0.1, 0.9).into(),
            _ => kind.build(0.1),
        };
        let mut w = scalar_param(2.0, 3.0);
        optimizer.step(&mut [&mut w]).unwrap();
        let after_first = w.value().clone();

        let mut a = Parameter::new("a", Tensor::new(&[1.0], &[1, 1]));
        a.accumulate_grad(Tensor::new(&[1.0], &[1, 1])).unwrap();
        let mut other = Parameter::new("w", Tensor::zeros(&[1, 2]));
        other.accumulate_grad(Tensor::ones(&[1, 2])).unwrap();
        assert!(optimizer.step(&mut [&mut a, &mut other]).is_err(), "{kind}");
        assert_eq!(a.value()[[0, 0]], 1.0, "{kind}");

        // 状态未被破坏：原参数还能继续更新
        optimizer.step(&mut [&mut w]).unwrap();
        assert!(w.value()[[0, 0]] < after_first[[0, 0]], "{kind}");
    }
}

/// 线性可分的小问题：类别 0 的样本集中在前两维，类别 1 集中在后两维
fn separable_problem() -> (Tensor, Tensor) {
    #[rustfmt::skip]
    let x = Tensor::new(&[
        1.0, 0.8, 0.0, 0.1,
        0.9, 1.0, 0.1, 0.0,
        0.8, 0.9, 0.2, 0.1,
        1.0, 1.0, 0.0, 0.0,
        0.0, 0.1, 1.0, 0.9,
        0.1, 0.0, 0.8, 1.0,
        0.2, 0.1, 0.9, 0.8,
        0.0, 0.0, 1.0, 1.0,
    ], &[8, 4]);
    #[rustfmt::skip]
    let y = Tensor::new(&[
        1.0, 0.0,
        1.0, 0.0,
        1.0, 0.0,
        1.0, 0.0,
        0.0, 1.0,
        0.0, 1.0,
        0.0, 1.0,
        0.0, 1.0,
    ], &[8, 2]);
    (x, y)
}

#[test]
fn test_every_optimizer_reduces_loss() {
    let (x, y) = separable_problem();
    let criterion = CrossEntropyLoss::new();
    let learning_rates = [0.5, 0.01, 0.02, 0.01, 0.1];

    for (kind, lr) in OptimizerKind::ALL.into_iter().zip(learning_rates) {
        let mut rng = StdRng::seed_from_u64(0);
        let mut fc = Linear::with_init(4, 2, "fc", &Init::Zeros, &Init::Zeros, &mut rng);
        let mut optimizer = kind.build(lr);

        let mut losses = Vec::new();
        for _ in 0..50 {
            let logits = fc.forward(&x).unwrap();
            let out = criterion.forward(&logits, &y).unwrap();
            losses.push(out.loss);

            optimizer.zero_grad(&mut fc.parameters_mut());
            fc.backward(&out.grad).unwrap();
            optimizer.step(&mut fc.parameters_mut()).unwrap();
        }

        let first = losses[0];
        let last = losses[losses.len() - 1];
        // 全零初始化时初始损失为 ln2
        assert!((first - std::f32::consts::LN_2).abs() < 1e-5, "{kind}");
        assert!(last < first * 0.9, "{kind}: {first} -> {last}");
    }
}
