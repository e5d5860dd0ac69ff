// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Reads a labelled text corpus from disk, one sample per line:
//
//   <integer label> <category name> <token> <token> ...
//
// The file is streamed once through a BufReader; nothing but the
// parsed samples is kept in memory. The file handle is dropped
// when `load` returns, on success and on error alike.
//
// Invalid lines (two or fewer tokens, or a non-integer label)
// are handled according to the ValidationMode:
//   Lenient → skipped and counted in Corpus::dropped
//   Strict  → the load fails, naming the line number
// Blank lines are ignored in both modes.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading a File)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use crate::domain::sample::{Corpus, Sample};
use crate::domain::traits::CorpusSource;

/// How to treat lines that are not valid samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Fail on the first invalid line
    Strict,
    /// Skip invalid lines and count them
    #[default]
    Lenient,
}

/// Loads a corpus from a UTF-8 text file.
pub struct CorpusLoader {
    path: PathBuf,
    mode: ValidationMode,
}

impl CorpusLoader {
    pub fn new(path: impl Into<PathBuf>, mode: ValidationMode) -> Self {
        Self { path: path.into(), mode }
    }
}

impl CorpusSource for CorpusLoader {
    fn load(&self) -> Result<Corpus> {
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open corpus '{}'", self.path.display()))?;

        let corpus = read_corpus(BufReader::new(file), self.mode)
            .with_context(|| format!("Cannot load corpus '{}'", self.path.display()))?;

        if corpus.is_empty() {
            tracing::warn!("Corpus '{}' contains no valid samples", self.path.display());
        } else if corpus.dropped > 0 {
            tracing::info!(
                "Loaded {} samples from '{}' ({} invalid lines skipped)",
                corpus.len(),
                self.path.display(),
                corpus.dropped
            );
        } else {
            tracing::info!("Loaded {} samples from '{}'", corpus.len(), self.path.display());
        }

        Ok(corpus)
    }
}

/// Parse every line of `reader` into samples.
pub fn read_corpus<R: BufRead>(reader: R, mode: ValidationMode) -> Result<Corpus> {
    let mut corpus = Corpus::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Cannot read line {line_no}"))?;

        match Sample::parse_line(&line) {
            Ok(Some(sample)) => corpus.samples.push(sample),
            Ok(None) => {}
            Err(reason) => match mode {
                ValidationMode::Strict => bail!("line {line_no}: {reason}"),
                ValidationMode::Lenient => {
                    tracing::debug!("Skipping line {}: {}", line_no, reason);
                    corpus.dropped += 1;
                }
            },
        }
    }

    Ok(corpus)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const MIXED: &str = "3 finance 今天 股市\n\
                         lonely\n\
                         \n\
                         7 sports 篮球 比赛\n\
                         x broken label here\n\
                         9 tech\n";

    #[test]
    fn lenient_mode_skips_and_counts() {
        let corpus = read_corpus(Cursor::new(MIXED), ValidationMode::Lenient).unwrap();
        assert_eq!(corpus.len(), 2);
        // "lonely", "x broken ...", "9 tech"; the blank line is not counted
        assert_eq!(corpus.dropped, 3);
        assert_eq!(corpus.samples[0].text, "今天股市");
        assert_eq!(corpus.samples[1].label, 7);
    }

    #[test]
    fn strict_mode_reports_first_bad_line() {
        let err = read_corpus(Cursor::new(MIXED), ValidationMode::Strict).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 2"), "unexpected message: {msg}");
    }

    #[test]
    fn strict_mode_accepts_clean_corpus_with_blank_lines() {
        let text = "1 a 好\n\n2 b 你好 世界\n";
        let corpus = read_corpus(Cursor::new(text), ValidationMode::Strict).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.dropped, 0);
    }

    #[test]
    fn empty_input_is_an_empty_corpus() {
        let corpus = read_corpus(Cursor::new(""), ValidationMode::Strict).unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1 news 天气 很好").unwrap();
        writeln!(file, "2").unwrap();
        let corpus = CorpusLoader::new(file.path(), ValidationMode::Lenient)
            .load()
            .unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.dropped, 1);
    }

    #[test]
    fn file_with_only_invalid_lines_loads_as_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\nbad\n").unwrap();
        let corpus = CorpusLoader::new(file.path(), ValidationMode::Lenient)
            .load()
            .unwrap();
        assert!(corpus.is_empty());
        assert_eq!(corpus.dropped, 1);
    }

    #[test]
    fn missing_file_is_an_error() {
        let loader = CorpusLoader::new("/nonexistent/corpus.txt", ValidationMode::Lenient);
        assert!(loader.load().is_err());
    }
}
