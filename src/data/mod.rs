// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from a raw corpus file to tensor batches.
//
//   corpus .txt
//       │
//       ▼
//   CorpusLoader      → parses "<label> <category> <tokens>..." lines
//       │
//       ▼
//   encoder           → vocabulary + right-aligned integer matrix
//       │
//       ▼
//   splitter          → seeded train / test split
//       │
//       ▼
//   TextDataset       → implements Burn's Dataset trait
//       │
//       ▼
//   TextBatcher       → stacks items into tensor batches
//
// The argmax exercise skips the first two steps: `synthetic`
// generates VectorItems directly.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Streams a corpus file into samples, strict or lenient
pub mod loader;

/// Builds the vocabulary and the padded token matrix
pub mod encoder;

/// Implements Burn's Dataset trait for text and vector items
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits data into train/test sets
pub mod splitter;

/// Random vectors labelled by their largest coordinate
pub mod synthetic;
