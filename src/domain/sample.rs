// ============================================================
// Layer 3 — Sample Domain Types
// ============================================================
// One labelled line of the corpus, and the corpus itself.
//
// Line format (whitespace separated):
//   <integer label> <category name> <token> <token> ...
//
// The tokens after the category are concatenated with the
// whitespace between them removed, so
//   "3 finance 今天 股市"  →  label 3, "finance", text "今天股市"
//
// Reference: Rust Book §5 (Structs), §6 (Enums)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Integer label → first category name seen for it.
pub type LabelCategoryMap = BTreeMap<i64, String>;

/// A single labelled text sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub label:    i64,
    pub category: String,
    /// Text with all whitespace removed
    pub text:     String,
}

/// Why a non-blank line could not become a sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRejection {
    /// The line split into this many tokens; at least 3 are needed
    TooFewTokens(usize),
    /// The first token is not an integer
    InvalidLabel(String),
}

impl fmt::Display for LineRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewTokens(n) => {
                write!(f, "expected at least 3 whitespace-separated tokens, found {n}")
            }
            Self::InvalidLabel(token) => write!(f, "label {token:?} is not an integer"),
        }
    }
}

impl Sample {
    pub fn new(label: i64, category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label,
            category: category.into(),
            text:     text.into(),
        }
    }

    /// Parse one corpus line.
    ///
    /// Returns `Ok(None)` for a blank line, `Err` for a line that has
    /// content but is not a valid sample.
    pub fn parse_line(line: &str) -> Result<Option<Self>, LineRejection> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(None);
        }
        if tokens.len() <= 2 {
            return Err(LineRejection::TooFewTokens(tokens.len()));
        }

        let label = tokens[0]
            .parse::<i64>()
            .map_err(|_| LineRejection::InvalidLabel(tokens[0].to_string()))?;

        Ok(Some(Self::new(label, tokens[1], tokens[2..].concat())))
    }

    /// Length of the text in characters (not bytes).
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Build the label → category map. The first category seen for a label wins.
pub fn label_categories(samples: &[Sample]) -> LabelCategoryMap {
    let mut map = LabelCategoryMap::new();
    for sample in samples {
        map.entry(sample.label)
            .or_insert_with(|| sample.category.clone());
    }
    map
}

/// All samples discovered in one corpus, plus the lines that were skipped.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub samples: Vec<Sample>,
    /// Non-blank lines that were not valid samples (lenient mode only)
    pub dropped: usize,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_label_category_and_joined_text() {
        let sample = Sample::parse_line("3 finance 今天 股市").unwrap().unwrap();
        assert_eq!(sample, Sample::new(3, "finance", "今天股市"));
        assert_eq!(sample.text_len(), 4);
    }

    #[test]
    fn tabs_and_repeated_spaces_are_separators() {
        let sample = Sample::parse_line("  -2\tsports   a  b\tc \r").unwrap().unwrap();
        assert_eq!(sample.label, -2);
        assert_eq!(sample.category, "sports");
        assert_eq!(sample.text, "abc");
    }

    #[test]
    fn blank_line_is_not_a_sample() {
        assert_eq!(Sample::parse_line("   \t"), Ok(None));
        assert_eq!(Sample::parse_line(""), Ok(None));
    }

    #[test]
    fn two_tokens_are_rejected() {
        assert_eq!(
            Sample::parse_line("1 finance"),
            Err(LineRejection::TooFewTokens(2))
        );
    }

    #[test]
    fn non_integer_label_is_rejected() {
        assert_eq!(
            Sample::parse_line("x finance text"),
            Err(LineRejection::InvalidLabel("x".to_string()))
        );
    }

    #[test]
    fn first_category_wins() {
        let samples = vec![
            Sample::new(1, "news", "a"),
            Sample::new(2, "sport", "b"),
            Sample::new(1, "other", "c"),
        ];
        let map = label_categories(&samples);
        assert_eq!(map.len(), 2);
        assert_eq!(map[&1], "news");
        assert_eq!(map[&2], "sport");
    }
}
