// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::{bail, Result};
use burn::{prelude::*, tensor::activation::softmax};

use crate::infra::checkpoint::{CheckpointManager, MODEL_NAME};
use crate::ml::model::RnnClassifier;

pub type InferBackend = burn::backend::Wgpu;

/// Runs a trained RNN classifier over already encoded rows.
pub struct Inferencer<B: Backend = InferBackend> {
    model:  RnnClassifier<B>,
    device: B::Device,
}

impl<B: Backend> Inferencer<B> {
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager, device: B::Device) -> Result<Self> {
        let model_cfg = ckpt_manager.load_model_config()?;
        let model: RnnClassifier<B> = model_cfg.init(&device);
        let model = ckpt_manager.load_model::<B, _>(model, MODEL_NAME, &device)?;
        tracing::info!(
            "Model loaded from '{}' ({} classes)",
            ckpt_manager.dir().display(),
            model_cfg.num_classes
        );
        Ok(Self { model, device })
    }

    #[cfg(test)]
    pub fn from_model(model: RnnClassifier<B>, device: B::Device) -> Self {
        Self { model, device }
    }

    /// Predict `(class, probability)` for every row.
    ///
    /// All rows must share the same width; callers pad with
    /// `pad_left` beforehand.
    pub fn predict(&self, rows: &[Vec<u32>]) -> Result<Vec<(usize, f32)>> {
        let Some(width) = rows.first().map(Vec::len) else {
            return Ok(Vec::new());
        };
        if width == 0 {
            bail!("Cannot classify an empty sequence");
        }
        if rows.iter().any(|r| r.len() != width) {
            bail!("All rows must have the same width ({width})");
        }

        let flat: Vec<i32> = rows.iter().flatten().map(|&id| id as i32).collect();
        let ids = Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([rows.len(), width]);

        let probs = softmax(self.model.forward(ids), 1);
        let num_classes = probs.dims()[1];
        let probs: Vec<f32> = probs
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Cannot read model output: {e:?}"))?;

        probs.chunks(num_classes).map(best_class).collect()
    }
}

/// Index and value of the largest probability in one output row.
///
/// NaN or infinite outputs are an error rather than a silent class 0.
fn best_class(row: &[f32]) -> Result<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &p) in row.iter().enumerate() {
        if !p.is_finite() {
            bail!("Model produced a non-finite probability ({p}) for class {i}");
        }
        if best.map_or(true, |(_, b)| p > b) {
            best = Some((i, p));
        }
    }
    best.ok_or_else(|| anyhow::anyhow!("Model produced no class scores"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::RnnClassifierConfig;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn inferencer() -> Inferencer<TestBackend> {
        let device = Default::default();
        let model = RnnClassifierConfig::new(6, 2, 4, 3).init::<TestBackend>(&device);
        Inferencer::from_model(model, device)
    }

    #[test]
    fn one_prediction_per_row_with_valid_probability() {
        let out = inferencer().predict(&[vec![0, 1, 2], vec![3, 4, 5]]).unwrap();
        assert_eq!(out.len(), 2);
        for (class, p) in out {
            assert!(class < 3);
            assert!(p > 0.0 && p <= 1.0);
        }
    }

    #[test]
    fn best_class_picks_the_first_maximum() {
        assert_eq!(best_class(&[0.2, 0.4, 0.4]).unwrap(), (1, 0.4));
    }

    #[test]
    fn non_finite_output_is_an_error() {
        assert!(best_class(&[0.3, f32::NAN, 0.7]).is_err());
        assert!(best_class(&[f32::INFINITY, 0.0]).is_err());
        assert!(best_class(&[]).is_err());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(inferencer().predict(&[vec![1, 2], vec![1]]).is_err());
    }

    #[test]
    fn no_rows_no_predictions() {
        assert!(inferencer().predict(&[]).unwrap().is_empty());
    }
}
