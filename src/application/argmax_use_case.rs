// ============================================================
// Layer 2 — ArgmaxUseCase
// ============================================================
// Small sanity exercise for the training stack: a single linear
// layer learns which coordinate of a random vector is largest.
//
//   x = [0.12, 0.87, 0.40, 0.05, 0.66]  →  label 1
//
// Training data is generated once from a seeded StdRng; every
// epoch is scored on freshly generated vectors.

use anyhow::Result;
use burn::tensor::backend::AutodiffBackend;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{EpochMetrics, MetricsLogger},
};
use crate::ml::trainer::{train_argmax, TrainBackend};

pub const ARGMAX_METRICS_FILE: &str = "argmax_metrics.csv";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgmaxConfig {
    pub output_dir:    String,
    pub epochs:        usize,
    pub batch_size:    usize,
    pub train_samples: usize,
    /// Fresh vectors scored after each epoch
    pub eval_samples:  usize,
    pub input_size:    usize,
    pub output_size:   usize,
    pub lr:            f64,
    pub seed:          u64,
}

impl Default for ArgmaxConfig {
    fn default() -> Self {
        Self {
            output_dir:    "output".to_string(),
            epochs:        20,
            batch_size:    20,
            train_samples: 5000,
            eval_samples:  100,
            input_size:    5,
            output_size:   5,
            lr:            0.001,
            seed:          42,
        }
    }
}

pub struct ArgmaxUseCase {
    config: ArgmaxConfig,
}

impl ArgmaxUseCase {
    pub fn new(config: ArgmaxConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<Vec<EpochMetrics>> {
        self.execute_on::<TrainBackend>(Default::default())
    }

    pub fn execute_on<B: AutodiffBackend>(&self, device: B::Device) -> Result<Vec<EpochMetrics>> {
        let cfg = &self.config;
        tracing::info!(
            "Argmax exercise: {} samples of size {}, {} epochs",
            cfg.train_samples, cfg.input_size, cfg.epochs
        );

        B::seed(cfg.seed);
        let mut rng      = StdRng::seed_from_u64(cfg.seed);
        let ckpt_manager = CheckpointManager::new(&cfg.output_dir);
        let metrics      = MetricsLogger::new(&cfg.output_dir, ARGMAX_METRICS_FILE)?;

        train_argmax::<B, _>(cfg, &mut rng, &ckpt_manager, &metrics, device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};

    type TestAutodiff = Autodiff<NdArray>;

    fn small(dir: &std::path::Path) -> ArgmaxConfig {
        ArgmaxConfig {
            output_dir:    dir.display().to_string(),
            epochs:        3,
            train_samples: 200,
            eval_samples:  50,
            lr:            0.05,
            ..ArgmaxConfig::default()
        }
    }

    #[test]
    fn one_metrics_row_per_epoch() {
        let dir = tempfile::tempdir().unwrap();

        let history = ArgmaxUseCase::new(small(dir.path()))
            .execute_on::<TestAutodiff>(Default::default())
            .unwrap();

        assert_eq!(history.len(), 3);
        assert!(history.iter().all(|m| (0.0..=1.0).contains(&m.test_acc)));
        assert!(history.iter().all(|m| m.test_loss.is_finite()));

        let csv = std::fs::read_to_string(dir.path().join(ARGMAX_METRICS_FILE)).unwrap();
        assert_eq!(csv.lines().count(), 4);
        assert!(dir.path().join("argmax_model.mpk.gz").exists());
    }

    #[test]
    fn defaults_match_the_exercise() {
        let cfg = ArgmaxConfig::default();
        assert_eq!((cfg.train_samples, cfg.batch_size, cfg.epochs), (5000, 20, 20));
        assert_eq!((cfg.input_size, cfg.output_size, cfg.eval_samples), (5, 5, 100));
    }
}
