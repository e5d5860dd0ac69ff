// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// Every network, training loop and forward pass lives here.
// The data layer only hands over plain token ids and labels.
//
//   model.rs      — RnnClassifier (embedding → LSTM → linear)
//                   and LinearClassifier (linear → sigmoid)
//
//   trainer.rs    — Adam training loops with per-epoch
//                   evaluation, metrics and final checkpoint
//
//   inferencer.rs — loads a checkpoint and turns encoded rows
//                   into (class, probability) pairs
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Hochreiter & Schmidhuber (1997) Long Short-Term Memory

/// Network architectures
pub mod model;

/// Training loops for both networks
pub mod trainer;

/// Checkpoint-backed prediction
pub mod inferencer;
