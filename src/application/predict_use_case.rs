// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Classifies raw texts with a trained output directory:
//
//   Step 1: Load vocabulary, label map and weights   (Layer 6)
//   Step 2: Strip whitespace from each text
//   Step 3: Encode characters, unknown ones → "unk"  (Layer 3)
//   Step 4: Right-align every row to the longest     (Layer 4)
//   Step 5: Forward pass + softmax                   (Layer 5)
//
// Reference: Rust Book §8 (Strings)

use anyhow::{bail, Result};
use burn::prelude::Backend;

use crate::data::encoder::pad_left;
use crate::domain::{
    prediction::Prediction,
    sample::LabelCategoryMap,
    traits::TextClassifier,
    vocabulary::Vocabulary,
};
use crate::infra::{checkpoint::CheckpointManager, vocab_store::VocabStore};
use crate::ml::inferencer::{InferBackend, Inferencer};

pub struct PredictUseCase<B: Backend = InferBackend> {
    vocabulary: Vocabulary,
    labels:     LabelCategoryMap,
    inferencer: Inferencer<B>,
}

impl PredictUseCase {
    /// Load everything from `output_dir` onto the default GPU device.
    pub fn new(output_dir: &str) -> Result<Self> {
        Self::load(output_dir, Default::default())
    }
}

impl<B: Backend> PredictUseCase<B> {
    pub fn load(output_dir: &str, device: B::Device) -> Result<Self> {
        let ckpt_manager = CheckpointManager::new(output_dir);
        let vocabulary   = VocabStore::new(output_dir).load()?;
        let labels       = ckpt_manager.load_labels()?;
        let inferencer   = Inferencer::from_checkpoint(&ckpt_manager, device)?;

        tracing::info!(
            "Loaded classifier: {} symbols, {} named labels",
            vocabulary.len(),
            labels.len()
        );
        Ok(Self { vocabulary, labels, inferencer })
    }

    /// Character ids of each text without whitespace, all the same width.
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<u32>>> {
        let mut rows = Vec::with_capacity(texts.len());
        for (i, text) in texts.iter().enumerate() {
            let ids: Vec<u32> = text
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| self.vocabulary.encode_char(c))
                .collect();
            if ids.is_empty() {
                bail!("Text #{} is empty after removing whitespace", i + 1);
            }
            rows.push(ids);
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Ok(rows.iter().map(|ids| pad_left(ids, width)).collect())
    }
}

impl<B: Backend> TextClassifier for PredictUseCase<B> {
    fn classify(&self, texts: &[String]) -> Result<Vec<Prediction>> {
        let rows = self.encode(texts)?;
        let outputs = self.inferencer.predict(&rows)?;

        Ok(texts
            .iter()
            .zip(outputs)
            .map(|(text, (class, probability))| {
                let label = class as i64;
                Prediction {
                    text: text.clone(),
                    label,
                    category: self.labels.get(&label).cloned(),
                    probability,
                }
            })
            .collect())
    }
}
