/*
 * @Author       : 老董
 * @Date         : 2026-01-17
 * @Description  : 用于检验各优化器的固定结构前馈网络：784 -> 128 (ReLU) -> 128 (ReLU) -> 10
 */

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::layer::{Linear, Relu};
use super::{Module, NnError, Parameter};
use crate::tensor::Tensor;

/// 输入特征数（28x28 灰度图展平）
pub const INPUT_FEATURES: usize = 28 * 28;
/// 隐藏层宽度
pub const HIDDEN_FEATURES: usize = 128;
/// 类别数（数字 0-9）
pub const NUM_CLASSES: usize = 10;

/// 三层全连接网络
///
/// # 使用示例
/// ```ignore
/// let mut model = FeedForwardNet::new(42);
/// let logits = model.forward(&images)?;          // [batch, 10]
/// let out = criterion.forward(&logits, &labels)?;
/// model.zero_grad();
/// model.backward(&out.grad)?;
/// optimizer.step(&mut model.parameters_mut())?;
/// ```
pub struct FeedForwardNet {
    fc1: Linear,
    relu1: Relu,
    fc2: Linear,
    relu2: Relu,
    fc3: Linear,
}

impl FeedForwardNet {
    /// 以固定种子初始化全部参数
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            fc1: Linear::new(INPUT_FEATURES, HIDDEN_FEATURES, "fc1", &mut rng),
            relu1: Relu::new(),
            fc2: Linear::new(HIDDEN_FEATURES, HIDDEN_FEATURES, "fc2", &mut rng),
            relu2: Relu::new(),
            fc3: Linear::new(HIDDEN_FEATURES, NUM_CLASSES, "fc3", &mut rng),
        }
    }

    /// 前向传播（训练用，缓存各层中间结果）
    ///
    /// 任何元素总数为 784 整数倍的输入都会先被视为 `[-1, 784]`，
    /// 因此 `[batch, 784]` 与 `[batch, 1, 28, 28]` 均可直接传入。输出为 `[batch, 10]` 的 logits。
    pub fn forward(&mut self, x: &Tensor) -> Result<Tensor, NnError> {
        let x = flatten_input(x)?;
        let h = self.fc1.forward(&x)?;
        let h = self.relu1.forward(&h);
        let h = self.fc2.forward(&h)?;
        let h = self.relu2.forward(&h);
        self.fc3.forward(&h)
    }

    /// 前向传播（推理用，不修改任何缓存）
    pub fn infer(&self, x: &Tensor) -> Result<Tensor, NnError> {
        let x = flatten_input(x)?;
        let h = Relu::infer(&self.fc1.infer(&x)?);
        let h = Relu::infer(&self.fc2.infer(&h)?);
        self.fc3.infer(&h)
    }

    /// 反向传播：由 logits 的梯度出发，累加全部参数的梯度；返回对（展平后）输入的梯度
    pub fn backward(&mut self, grad_logits: &Tensor) -> Result<Tensor, NnError> {
        let g = self.fc3.backward(grad_logits)?;
        let g = self.relu2.backward(&g)?;
        let g = self.fc2.backward(&g)?;
        let g = self.relu1.backward(&g)?;
        self.fc1.backward(&g)
    }

    /// 每个样本的预测类别
    pub fn predict(&self, x: &Tensor) -> Result<Vec<usize>, NnError> {
        Ok(self.infer(x)?.argmax_rows())
    }
}

impl Default for FeedForwardNet {
    fn default() -> Self {
        Self::new(42)
    }
}

impl Module for FeedForwardNet {
    fn parameters(&self) -> Vec<&Parameter> {
        [
            self.fc1.parameters(),
            self.fc2.parameters(),
            self.fc3.parameters(),
        ]
        .concat()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        let mut params = self.fc1.parameters_mut();
        params.extend(self.fc2.parameters_mut());
        params.extend(self.fc3.parameters_mut());
        params
    }
}

/// 等价于 `x.view(-1, 784)`
fn flatten_input(x: &Tensor) -> Result<Tensor, NnError> {
    let size = x.size();
    if size == 0 || size % INPUT_FEATURES != 0 {
        return Err(NnError::ShapeMismatch {
            expected: vec![size.div_ceil(INPUT_FEATURES).max(1), INPUT_FEATURES],
            got: x.shape().to_vec(),
            message: format!("输入元素总数须为{INPUT_FEATURES}的正整数倍"),
        });
    }
    Ok(x.reshape(&[size / INPUT_FEATURES, INPUT_FEATURES]))
}
