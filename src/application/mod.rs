// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// one user-facing goal per use case.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No argument parsing or printing here (that's Layer 1)
//   - File formats belong to Layers 4 and 6
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Corpus → trained RNN checkpoint
pub mod train_use_case;

// Checkpoint + raw texts → predictions
pub mod predict_use_case;

// Linear argmax exercise on random vectors
pub mod argmax_use_case;

// Corpus → encoded matrix summary (+ vocabulary file)
pub mod encode_use_case;
