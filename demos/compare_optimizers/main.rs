//! # 优化器对比示例
//!
//! 用同一份初始化（相同种子）的前馈网络，依次以 SGD、Adam、Adamax、RMSProp、Adagrad
//! 在 MNIST 上训练，记录每一步的损失并在测试集上评估准确率。
//!
//! ## 运行
//! ```bash
//! RUST_LOG=info cargo run --release --example compare_optimizers [config.json]
//! ```
//!
//! 结果写入 `loss_curves/`：
//! - `losses_<optimizer>.npy`：每个优化器的损失曲线
//! - `losses.json`：全部损失曲线与测试准确率汇总
//!
//! ## 数据集
//! 首次运行会自动下载 MNIST 数据集到 `~/.cache/only_optim/datasets/mnist/`

use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;
use std::time::Instant;

use log::{debug, info};
use ndarray::Array1;
use serde::Serialize;

use only_optim::data::{DataLoader, MnistDataset};
use only_optim::nn::OptimizerKind;
use only_optim::train::{TrainConfig, Trainer};

const OUTPUT_DIR: &str = "loss_curves";

#[derive(Serialize)]
struct OptimizerSummary {
    learning_rate: f32,
    final_loss: f32,
    test_accuracy: f32,
    seconds: f32,
    losses: Vec<f32>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let base = match std::env::args().nth(1) {
        Some(path) => TrainConfig::from_json_file(path)?,
        None => TrainConfig::losses().with_learning_rate(1e-3).with_epochs(1),
    };
    info!("配置: {base:?}");

    let train_loader = base.mnist_loader()?;
    let test_set = MnistDataset::load(base.data_dir.as_deref(), false, base.download)?;
    let test_loader = DataLoader::new(test_set.into_dataset()?, 1000);
    info!(
        "训练集 {} 样本（每个 epoch {} 个 batch），测试集 {} 样本",
        train_loader.len(),
        train_loader.num_batches(),
        test_loader.len()
    );

    let out_dir = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(out_dir)?;

    let mut summary = BTreeMap::new();
    for kind in OptimizerKind::ALL {
        let config = base.clone().with_optimizer(kind);
        let mut trainer = Trainer::new(config.clone())?;

        let start = Instant::now();
        let mut losses = Vec::new();
        trainer.run_epochs(&train_loader, |report| {
            if report.step % config.log_interval == 0 {
                info!(
                    "[{kind}] Epoch [{}/{}], Step[{}/{}], Loss: {:.4}",
                    report.epoch, config.num_epochs, report.step, report.steps_per_epoch, report.loss
                );
            }
            losses.push(report.loss);
        })?;
        let seconds = start.elapsed().as_secs_f32();
        let test_accuracy = trainer.evaluate(&test_loader)?;
        if let Some((images, _)) = test_loader.iter().next() {
            debug!("[{kind}] 测试集首批 logits:\n{}", trainer.model().infer(&images)?);
        }
        let final_loss = losses.last().copied().unwrap_or(f32::NAN);
        info!(
            "[{kind}] 完成：最终损失 {final_loss:.4}，测试准确率 {:.2}%，用时 {seconds:.1}s",
            test_accuracy * 100.0
        );

        let npy_path = out_dir.join(format!("losses_{kind}.npy"));
        ndarray_npy::write_npy(&npy_path, &Array1::from(losses.clone()))?;

        summary.insert(
            kind.to_string(),
            OptimizerSummary {
                learning_rate: config.learning_rate,
                final_loss,
                test_accuracy,
                seconds,
                losses,
            },
        );
    }

    let json_path = out_dir.join("losses.json");
    std::fs::write(&json_path, serde_json::to_string_pretty(&summary)?)?;
    info!("结果已写入 {}", out_dir.display());
    Ok(())
}
