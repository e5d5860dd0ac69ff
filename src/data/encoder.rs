// ============================================================
// Layer 4 — Dataset Encoder
// ============================================================
// Turns parsed samples into the integer matrix the sequence
// model consumes.
//
//   samples ──► Vocabulary::build   (sorted distinct characters)
//           ──► width = longest text in characters
//           ──► one row per sample, right-aligned:
//
//   width 4, text "好"      →  [0, 0, 0, idx(好)]
//   width 4, text "你好世界" →  [idx(你), idx(好), idx(世), idx(界)]
//
// Padding goes on the LEFT so every sequence ends at the last
// time step; the classifier reads the hidden state there.
//
// Reference: ndarray documentation (Array2)

use anyhow::{Context, Result};
use ndarray::Array2;
use std::path::Path;

use crate::data::loader::{CorpusLoader, ValidationMode};
use crate::domain::sample::{label_categories, Corpus, LabelCategoryMap, Sample};
use crate::domain::traits::CorpusSource;
use crate::domain::vocabulary::{Vocabulary, PAD_INDEX};

/// Everything the training loop needs from a corpus.
#[derive(Debug, Clone)]
pub struct EncodedDataset {
    /// Shape: [sample count, longest text length]
    pub matrix:           Array2<u32>,
    /// One label per matrix row
    pub labels:           Vec<i64>,
    pub vocabulary:       Vocabulary,
    pub label_categories: LabelCategoryMap,
    /// Invalid lines skipped while loading
    pub dropped:          usize,
}

impl EncodedDataset {
    pub fn rows(&self) -> usize {
        self.matrix.nrows()
    }

    /// Padded sequence length (the longest text in the corpus).
    pub fn width(&self) -> usize {
        self.matrix.ncols()
    }

    /// Token ids of one row, padding included.
    pub fn row(&self, index: usize) -> Vec<u32> {
        self.matrix.row(index).to_vec()
    }
}

/// Load and encode a corpus file in one call.
pub fn encode_corpus_file(path: impl AsRef<Path>, mode: ValidationMode) -> Result<EncodedDataset> {
    let corpus = CorpusLoader::new(path.as_ref(), mode).load()?;
    encode_corpus(&corpus)
}

/// Encode an already loaded corpus, keeping its dropped-line count.
pub fn encode_corpus(corpus: &Corpus) -> Result<EncodedDataset> {
    let mut encoded = encode_samples(&corpus.samples)?;
    encoded.dropped = corpus.dropped;
    Ok(encoded)
}

/// Build the vocabulary and the right-aligned matrix for `samples`.
///
/// An empty slice gives a 0 × 0 matrix and a vocabulary holding only
/// the reserved entries; callers decide whether that is an error.
pub fn encode_samples(samples: &[Sample]) -> Result<EncodedDataset> {
    let vocabulary = Vocabulary::build(samples.iter().map(|s| s.text.as_str()))?;
    let width = samples.iter().map(Sample::text_len).max().unwrap_or(0);

    let mut flat = Vec::with_capacity(samples.len() * width);
    for sample in samples {
        let ids = vocabulary.encode_text(&sample.text);
        flat.extend(pad_left(&ids, width));
    }

    let matrix = Array2::from_shape_vec((samples.len(), width), flat)
        .context("Encoded rows do not form a rectangular matrix")?;

    tracing::debug!(
        "Encoded {} samples into a {}x{} matrix (vocabulary size {})",
        samples.len(),
        matrix.nrows(),
        matrix.ncols(),
        vocabulary.len()
    );

    Ok(EncodedDataset {
        matrix,
        labels: samples.iter().map(|s| s.label).collect(),
        vocabulary,
        label_categories: label_categories(samples),
        dropped: 0,
    })
}

/// Right-align `ids` in a row of `width`, filling the front with the pad index.
///
/// A sequence longer than `width` keeps its last `width` ids.
pub fn pad_left(ids: &[u32], width: usize) -> Vec<u32> {
    if ids.len() >= width {
        return ids[ids.len() - width..].to_vec();
    }
    let mut row = vec![PAD_INDEX; width - ids.len()];
    row.extend_from_slice(ids);
    row
}
