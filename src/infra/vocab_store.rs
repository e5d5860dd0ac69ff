// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Persists the character vocabulary as `vocab.json` so the
// same symbol → index mapping is used for training and for
// inference.
//
// File format: one JSON object, entries in index order,
// 2-space indentation, non-ASCII characters written as-is:
//
//   {
//     "pad": 0,
//     "今": 1,
//     "天": 2,
//     "unk": 3
//   }
//
// Loading validates the layout ("pad" first at 0, "unk" last,
// dense indices) before handing back a Vocabulary.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::vocabulary::Vocabulary;

pub const VOCAB_FILE: &str = "vocab.json";

pub struct VocabStore {
    path: PathBuf,
}

impl VocabStore {
    /// Store `vocab.json` inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { path: dir.as_ref().join(VOCAB_FILE) }
    }

    /// Store at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, vocab: &Vocabulary) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(vocab.as_map())
            .context("Cannot serialize vocabulary")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Cannot write vocabulary to '{}'", self.path.display()))?;

        tracing::info!(
            "Vocabulary ({} entries) saved to '{}'",
            vocab.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn load(&self) -> Result<Vocabulary> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read vocabulary '{}'", self.path.display()))?;
        let entries: IndexMap<String, u32> = serde_json::from_str(&json)
            .with_context(|| format!("Cannot parse vocabulary '{}'", self.path.display()))?;
        Vocabulary::from_index_map(entries)
            .with_context(|| format!("Invalid vocabulary '{}'", self.path.display()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_ordered_indented_unescaped_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = VocabStore::new(dir.path());
        let vocab = Vocabulary::build(["天今"]).unwrap();

        store.save(&vocab).unwrap();
        let json = fs::read_to_string(store.path()).unwrap();

        assert_eq!(json, "{\n  \"pad\": 0,\n  \"今\": 1,\n  \"天\": 2,\n  \"unk\": 3\n}");
    }

    #[test]
    fn load_returns_the_saved_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let store = VocabStore::at(dir.path().join("sub").join("chars.json"));
        let vocab = Vocabulary::build(["篮球", "比赛"]).unwrap();

        store.save(&vocab).unwrap();
        assert_eq!(store.load().unwrap(), vocab);
    }

    #[test]
    fn load_rejects_a_malformed_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = VocabStore::new(dir.path());
        fs::write(store.path(), r#"{"a": 0, "pad": 1, "unk": 2}"#).unwrap();
        assert!(store.load().is_err());
    }
}
