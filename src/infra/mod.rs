// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence used by the training and inference
// workflows:
//
//   checkpoint.rs  — model weights (Burn CompactRecorder) plus
//                    the JSON side files needed to rebuild and
//                    interpret the model: model config, run
//                    config, label → category map
//
//   vocab_store.rs — the character vocabulary as vocab.json,
//                    written after training and read back for
//                    inference
//
//   metrics.rs     — per-epoch loss / accuracy appended to a CSV
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model weights and JSON side files
pub mod checkpoint;

/// Vocabulary persistence
pub mod vocab_store;

/// Training metrics CSV logger
pub mod metrics;
