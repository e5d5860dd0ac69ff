use anyhow::{bail, Context, Result};
use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::encoder::EncodedDataset;

/// One encoded, right-aligned text with its class index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextItem {
    pub token_ids: Vec<u32>,
    pub label:     i32,
}

/// One random feature vector and the index of its largest coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorItem {
    pub features: Vec<f32>,
    pub label:    usize,
}

/// Largest output layer the classifier will be built with.
pub const MAX_CLASSES: usize = 1 << 16;

/// Number of output classes needed so every label is a valid class index.
pub fn class_count(labels: &[i64]) -> Result<usize> {
    if let Some(&label) = labels.iter().find(|&&label| label < 0) {
        bail!("label {label} cannot be used as a class index");
    }
    let Some(&max) = labels.iter().max() else {
        bail!("corpus has no samples, so the classifier would have zero classes");
    };

    let max = i32::try_from(max)
        .with_context(|| format!("label {max} does not fit in a class index"))?;
    let classes = max as usize + 1;
    if classes > MAX_CLASSES {
        bail!("label {max} would need {classes} output classes (limit {MAX_CLASSES})");
    }
    Ok(classes)
}

/// Split the encoded matrix into per-row training items.
pub fn text_items(encoded: &EncodedDataset) -> Result<Vec<TextItem>> {
    class_count(&encoded.labels)?;
    encoded
        .labels
        .iter()
        .enumerate()
        .map(|(row, &label)| {
            Ok(TextItem {
                token_ids: encoded.row(row),
                label:     i32::try_from(label)
                    .with_context(|| format!("label {label} does not fit in a class index"))?,
            })
        })
        .collect()
}

pub struct TextDataset {
    items: Vec<TextItem>,
}

impl TextDataset {
    pub fn new(items: Vec<TextItem>) -> Self { Self { items } }
}

impl Dataset<TextItem> for TextDataset {
    fn get(&self, index: usize) -> Option<TextItem> {
        self.items.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

pub struct VectorDataset {
    items: Vec<VectorItem>,
}

impl VectorDataset {
    pub fn new(items: Vec<VectorItem>) -> Self { Self { items } }
}

impl Dataset<VectorItem> for VectorDataset {
    fn get(&self, index: usize) -> Option<VectorItem> {
        self.items.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
