// ============================================================
// Layer 4 — Batchers
// ============================================================
// Implement Burn's Batcher trait so the DataLoader can stack
// individual items into tensors on the target device.
//
//   TextBatcher:   N TextItems of width S  → token_ids [N, S]
//                                           labels    [N]
//   VectorBatcher: N VectorItems of dim D  → features  [N, D]
//                                           labels    [N]
//
// Every TextItem of one corpus already has the same width
// (right-aligned padding in the encoder), so a batch is a
// plain flatten + reshape.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::{TextItem, VectorItem};

// ─── TextBatch ────────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct TextBatch<B: Backend> {
    /// Shape: [batch_size, seq_len]
    pub token_ids: Tensor<B, 2, Int>,
    /// Shape: [batch_size]
    pub labels:    Tensor<B, 1, Int>,
}

#[derive(Clone, Debug)]
pub struct TextBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> TextBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<TextItem, TextBatch<B>> for TextBatcher<B> {
    fn batch(&self, items: Vec<TextItem>) -> TextBatch<B> {
        let batch_size = items.len();
        let seq_len    = items.first().map_or(0, |item| item.token_ids.len());

        let ids_flat: Vec<i32> = items
            .iter()
            .flat_map(|item| item.token_ids.iter().map(|&id| id as i32))
            .collect();

        let labels: Vec<i32> = items.iter().map(|item| item.label).collect();

        let token_ids = Tensor::<B, 1, Int>::from_ints(ids_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);
        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        TextBatch { token_ids, labels }
    }
}

// ─── VectorBatch ──────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct VectorBatch<B: Backend> {
    /// Shape: [batch_size, input_size]
    pub features: Tensor<B, 2>,
    /// Shape: [batch_size]
    pub labels:   Tensor<B, 1, Int>,
}

#[derive(Clone, Debug)]
pub struct VectorBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> VectorBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<VectorItem, VectorBatch<B>> for VectorBatcher<B> {
    fn batch(&self, items: Vec<VectorItem>) -> VectorBatch<B> {
        let batch_size = items.len();
        let input_size = items.first().map_or(0, |item| item.features.len());

        let features_flat: Vec<f32> = items
            .iter()
            .flat_map(|item| item.features.iter().copied())
            .collect();
        let labels: Vec<i32> = items.iter().map(|item| item.label as i32).collect();

        let features = Tensor::<B, 1>::from_floats(features_flat.as_slice(), &self.device)
            .reshape([batch_size, input_size]);
        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        VectorBatch { features, labels }
    }
}
