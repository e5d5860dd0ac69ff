// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits instead
// of the concrete loader and classifier:
//
//   CorpusSource   → CorpusLoader (text file on disk)
//   TextClassifier → PredictUseCase (trained RNN checkpoint)
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::prediction::Prediction;
use crate::domain::sample::Corpus;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Anything that can produce the labelled samples of a corpus.
pub trait CorpusSource {
    /// Read every sample. Invalid lines are either counted in
    /// `Corpus::dropped` or reported as an error, depending on
    /// the source's validation mode.
    fn load(&self) -> Result<Corpus>;
}

// ─── TextClassifier ───────────────────────────────────────────────────────────
/// Anything that can assign a label to raw text.
pub trait TextClassifier {
    /// Classify each text; the output is in input order.
    fn classify(&self, texts: &[String]) -> Result<Vec<Prediction>>;
}
