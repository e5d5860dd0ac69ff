// ============================================================
// Layer 4 — Synthetic Argmax Samples
// ============================================================
// Generates the data for the argmax exercise: each sample is a
// vector of uniform random values in [0, 1), and its label is
// the position of the largest value.
//
//   [0.12, 0.87, 0.45, 0.03, 0.66]  →  label 1
//
// Reference: rand crate documentation (Rng::gen)

use rand::Rng;

use crate::data::dataset::VectorItem;

/// Index of the largest value. Ties resolve to the first occurrence.
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// One random vector of `input_size` values and its argmax label.
pub fn build_sample<R: Rng + ?Sized>(rng: &mut R, input_size: usize) -> VectorItem {
    let features: Vec<f32> = (0..input_size).map(|_| rng.gen::<f32>()).collect();
    let label = argmax(&features);
    VectorItem { features, label }
}

/// `count` independent random samples.
pub fn build_dataset<R: Rng + ?Sized>(rng: &mut R, count: usize, input_size: usize) -> Vec<VectorItem> {
    (0..count).map(|_| build_sample(rng, input_size)).collect()
}
