// ============================================================
// Layer 3 — Vocabulary Domain Type
// ============================================================
// Maps every symbol the model can see to a dense integer index
// used for embedding lookup.
//
// Index layout:
//   "pad"                              → 0
//   distinct corpus characters, sorted → 1 ..= n
//   "unk"                              → n + 1 (always last)
//
// Lookups never fail: a character that was not present when the
// vocabulary was built maps to the "unk" index.
//
// Reference: Rust Book §8 (Hash Maps), indexmap documentation

use anyhow::{bail, Result};
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Reserved symbol for left padding. Always index 0.
pub const PAD_TOKEN: &str = "pad";

/// Reserved symbol for characters outside the vocabulary. Always the last index.
pub const UNK_TOKEN: &str = "unk";

pub const PAD_INDEX: u32 = 0;

/// Ordered symbol → index mapping.
///
/// Insertion order equals index order, so iterating the inner map (or
/// serialising it) lists `"pad"` first and `"unk"` last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    entries: IndexMap<String, u32>,
}

impl Vocabulary {
    /// Build the vocabulary of a corpus from its sample texts.
    ///
    /// Characters are collected into a `BTreeSet`, so the assignment
    /// order is code-point order and independent of sample order.
    pub fn build<'a, I>(texts: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let chars: BTreeSet<char> = texts.into_iter().flat_map(str::chars).collect();
        Self::from_symbols(chars.into_iter().map(String::from))
    }

    /// Build a vocabulary from symbols already in index order.
    ///
    /// Fails if a symbol repeats or equals one of the reserved tokens.
    pub fn from_symbols<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut entries = IndexMap::new();
        entries.insert(PAD_TOKEN.to_string(), PAD_INDEX);

        for symbol in symbols {
            if symbol == PAD_TOKEN || symbol == UNK_TOKEN {
                bail!("symbol {symbol:?} collides with a reserved vocabulary entry");
            }
            if entries.contains_key(&symbol) {
                bail!("duplicate vocabulary symbol {symbol:?}");
            }
            let index = entries.len() as u32;
            entries.insert(symbol, index);
        }

        let unk = entries.len() as u32;
        entries.insert(UNK_TOKEN.to_string(), unk);

        Ok(Self { entries })
    }

    /// Rebuild a vocabulary from a mapping read back from disk.
    ///
    /// The mapping must list `"pad"` first at 0, `"unk"` last, and every
    /// entry's index must equal its position.
    pub fn from_index_map(entries: IndexMap<String, u32>) -> Result<Self> {
        if entries.len() < 2 {
            bail!("vocabulary needs at least the \"{PAD_TOKEN}\" and \"{UNK_TOKEN}\" entries");
        }
        match entries.get_index(0) {
            Some((symbol, &PAD_INDEX)) if symbol == PAD_TOKEN => {}
            _ => bail!("vocabulary must start with \"{PAD_TOKEN}\" at index {PAD_INDEX}"),
        }
        let last = entries.len() - 1;
        match entries.get_index(last) {
            Some((symbol, _)) if symbol == UNK_TOKEN => {}
            _ => bail!("vocabulary must end with \"{UNK_TOKEN}\""),
        }
        for (position, (symbol, &index)) in entries.iter().enumerate() {
            if index as usize != position {
                bail!("symbol {symbol:?} has index {index}, expected {position}");
            }
        }
        Ok(Self { entries })
    }

    /// Total number of entries, reserved ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no character has been assigned an index
    /// (only the reserved entries are present).
    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 2
    }

    pub fn unk_index(&self) -> u32 {
        (self.entries.len() - 1) as u32
    }

    /// Exact lookup, reserved tokens included.
    pub fn index_of(&self, symbol: &str) -> Option<u32> {
        self.entries.get(symbol).copied()
    }

    /// Index of a character, falling back to `"unk"`.
    pub fn encode_char(&self, c: char) -> u32 {
        let mut buf = [0u8; 4];
        self.index_of(c.encode_utf8(&mut buf))
            .unwrap_or_else(|| self.unk_index())
    }

    /// Encode every character of `text` (no padding).
    pub fn encode_text(&self, text: &str) -> Vec<u32> {
        text.chars().map(|c| self.encode_char(c)).collect()
    }

    /// Symbol stored at `index`, if any.
    #[cfg(test)]
    pub fn symbol(&self, index: u32) -> Option<&str> {
        self.entries
            .get_index(index as usize)
            .map(|(symbol, _)| symbol.as_str())
    }

    /// The ordered mapping, for serialisation.
    pub fn as_map(&self) -> &IndexMap<String, u32> {
        &self.entries
    }
}
