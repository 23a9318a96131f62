use approx::assert_abs_diff_eq;

use crate::tensor::Tensor;

#[test]
fn test_elementwise_math() {
    let tensor = Tensor::new(&[-4., 1., 9.], &[3]);
    assert_eq!(tensor.abs(), Tensor::new(&[4., 1., 9.], &[3]));
    assert_eq!(tensor.abs().sqrt(), Tensor::new(&[2., 1., 3.], &[3]));
    assert_eq!(tensor.powi(2), Tensor::new(&[16., 1., 81.], &[3]));
    assert_abs_diff_eq!(Tensor::new(&[0.], &[1]).exp()[[0]], 1.0);
}

#[test]
fn test_maximum() {
    let a = Tensor::new(&[1., 5., -2.], &[3]);
    let b = Tensor::new(&[3., 2., -1.], &[3]);
    assert_eq!(a.maximum(&b), Tensor::new(&[3., 5., -1.], &[3]));
}

#[test]
fn test_reductions() {
    let tensor = Tensor::new(&[1., 2., 3., 4., 5., 6.], &[2, 3]);
    assert_abs_diff_eq!(tensor.sum(), 21.);
    assert_abs_diff_eq!(tensor.mean(), 3.5);
    assert_eq!(tensor.sum_axis0(), Tensor::new(&[5., 7., 9.], &[1, 3]));
    assert_eq!(tensor.min_value(), 1.);
    assert_eq!(tensor.max_value(), 6.);
}

#[test]
fn test_argmax_rows() {
    let tensor = Tensor::new(&[0.1, 0.7, 0.2, 0.9, 0.05, 0.05, 0.3, 0.3, 0.1], &[3, 3]);
    assert_eq!(tensor.argmax_rows(), vec![1, 0, 0]);
}

#[test]
fn test_display() {
    let tensor = Tensor::new(&[1., 2., 3., 4.], &[2, 2]);
    let text = format!("{tensor}");
    assert_eq!(
        text,
        "[[  1.0000,   2.0000],\n [  3.0000,   4.0000]]\n形状: [2, 2]\n"
    );
}

#[test]
fn test_display_truncates_long_batches() {
    let data: Vec<f32> = (0..20).map(|x| x as f32).collect();
    let text = format!("{}", Tensor::new(&data, &[10, 2]));
    let lines: Vec<&str> = text.lines().collect();

    // 首尾各 3 行，中间一行省略提示，最后一行为形状
    assert_eq!(lines.len(), 8);
    assert!(lines[0].starts_with("[[  0.0000,   1.0000]"));
    assert!(lines[3].contains("省略 4 行"));
    assert!(lines[4].contains(" 14.0000,  15.0000"));
    assert!(lines[6].ends_with(" 18.0000,  19.0000]]"));
    assert_eq!(lines[7], "形状: [10, 2]");
}

#[test]
fn test_display_vector_and_high_rank() {
    let text = format!("{}", Tensor::new(&[0.5, -1.0], &[2]));
    assert!(text.starts_with("[  0.5000,  -1.0000]"));

    let text = format!("{}", Tensor::zeros(&[2, 1, 2]));
    assert!(text.contains("阶数大于二"));
    assert!(text.contains("[2, 1, 2]"));
}
