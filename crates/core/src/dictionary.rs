use crate::error::{FixPhraseError, Result};
use crate::types::REQUIRED_WORDS;
use std::collections::{BTreeSet, HashMap};

/// Ordered word list plus a case-insensitive reverse index.
///
/// Built once at startup and only read afterwards, so a single instance can be
/// shared by reference across threads.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Vec<String>,
    index: HashMap<String, usize>,
}

impl Dictionary {
    /// Build a dictionary from an ordered word list.
    ///
    /// Lists longer than [`REQUIRED_WORDS`] are accepted. When a word occurs more
    /// than once the reverse index keeps its last position.
    pub fn build<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(FixPhraseError::EmptyWordlist);
        }
        if words.len() < REQUIRED_WORDS {
            return Err(FixPhraseError::InsufficientWordlist {
                got: words.len(),
                need: REQUIRED_WORDS,
            });
        }

        let mut index = HashMap::with_capacity(words.len());
        for (position, word) in words.iter().enumerate() {
            index.insert(word.to_lowercase(), position);
        }

        Ok(Self { words, index })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word stored at `index`, with its original spelling
    pub fn word_at(&self, index: usize) -> Result<&str> {
        self.words
            .get(index)
            .map(String::as_str)
            .ok_or(FixPhraseError::IndexOutOfRange {
                index,
                size: self.words.len(),
            })
    }

    /// Absolute index of `word`, ignoring case
    pub fn index_of(&self, word: &str) -> Option<usize> {
        match self.index.get(word) {
            Some(index) => Some(*index),
            None => self.index.get(&word.to_lowercase()).copied(),
        }
    }

    /// Lowercased words that occur at more than one position.
    ///
    /// Such words encode from their earlier positions but decode to the later
    /// one, so a shipped list should report none.
    pub fn duplicates(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        for word in &self.words {
            let lower = word.to_lowercase();
            if !seen.insert(lower.clone()) {
                duplicates.insert(lower);
            }
        }
        duplicates.into_iter().collect()
    }
}
