// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits that define what the system
// works with: samples, vocabularies, predictions.
//
// Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O
//   - Only plain structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Labelled samples, the corpus, and the label → category map
pub mod sample;

// Character → index mapping with reserved "pad" / "unk"
pub mod vocabulary;

// Classifier output for one text
pub mod prediction;

// Core abstractions (traits) that other layers implement
pub mod traits;
