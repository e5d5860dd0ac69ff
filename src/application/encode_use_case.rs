// ============================================================
// Layer 2 — EncodeUseCase
// ============================================================
// Runs only the dataset encoder: corpus file in, matrix summary
// out, optionally writing the vocabulary JSON for later runs.

use anyhow::Result;

use crate::data::{
    encoder::{encode_corpus_file, EncodedDataset},
    loader::ValidationMode,
};
use crate::infra::vocab_store::VocabStore;

pub struct EncodeUseCase {
    corpus_path: String,
    mode:        ValidationMode,
    vocab_out:   Option<String>,
}

impl EncodeUseCase {
    pub fn new(corpus_path: String, mode: ValidationMode, vocab_out: Option<String>) -> Self {
        Self { corpus_path, mode, vocab_out }
    }

    pub fn execute(&self) -> Result<EncodedDataset> {
        let encoded = encode_corpus_file(&self.corpus_path, self.mode)?;

        tracing::info!(
            "Encoded '{}': {} rows × {} columns, {} symbols, {} dropped lines",
            self.corpus_path,
            encoded.rows(),
            encoded.width(),
            encoded.vocabulary.len(),
            encoded.dropped
        );

        if let Some(path) = &self.vocab_out {
            VocabStore::at(path).save(&encoded.vocabulary)?;
        }

        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn writes_vocabulary_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let corpus = dir.path().join("c.txt");
        fs::write(&corpus, "0 a 你 好\n1 b 今天\nx\n").unwrap();
        let vocab = dir.path().join("v.json");

        let encoded = EncodeUseCase::new(
            corpus.display().to_string(),
            ValidationMode::Lenient,
            Some(vocab.display().to_string()),
        )
        .execute()
        .unwrap();

        assert_eq!(encoded.rows(), 2);
        assert_eq!(encoded.width(), 2);
        assert_eq!(encoded.dropped, 1);
        assert_eq!(VocabStore::at(&vocab).load().unwrap(), encoded.vocabulary);
    }

    #[test]
    fn missing_corpus_is_an_error() {
        let uc = EncodeUseCase::new("/no/such/corpus.txt".into(), ValidationMode::Lenient, None);
        assert!(uc.execute().is_err());
    }
}
