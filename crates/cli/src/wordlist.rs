use anyhow::{Context as AnyhowContext, Result};
use fixphrase_core::Dictionary;
use std::fs;
use std::path::Path;

/// Read a JSON array of words
pub fn load_wordlist(path: &Path) -> Result<Vec<String>> {
    let raw = fs::read(path).with_context(|| format!("read wordlist {}", path.display()))?;
    let words: Vec<String> = serde_json::from_slice(&raw)
        .with_context(|| format!("decode wordlist {}", path.display()))?;
    if words.is_empty() {
        anyhow::bail!("wordlist empty: {}", path.display());
    }
    Ok(words)
}

/// Load a word list and build the dictionary from it
pub fn load_dictionary(path: &Path) -> Result<Dictionary> {
    let words = load_wordlist(path)?;
    let dictionary = Dictionary::build(words)
        .with_context(|| format!("build dictionary from {}", path.display()))?;

    let duplicates = dictionary.duplicates();
    if !duplicates.is_empty() {
        log::warn!(
            "wordlist has {} duplicate word(s); they will not round-trip: {}",
            duplicates.len(),
            duplicates.join(", ")
        );
    }
    log::debug!("loaded {} words from {}", dictionary.len(), path.display());
    Ok(dictionary)
}
