//! The counting service.

use keyed_trie::{KeyedTrie, TrieError};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::words::words;

/// A count lookup request: one `word` maps to one trie lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordQuery {
    /// Word to look up; matched case-insensitively.
    pub word: String,
}

/// Answer to a [`WordQuery`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    /// The word as it was asked for.
    pub word: String,
    /// Occurrences seen, 0 if never seen.
    pub count: u32,
}

/// Case-insensitive word counts.
///
/// The trie itself is single-writer. This wrapper supplies the exclusion: one
/// writer while ingesting, any number of readers once queries start.
#[derive(Default)]
pub struct WordCounter {
    trie: RwLock<KeyedTrie<u32>>,
}

impl WordCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one occurrence of `word` and returns its new count.
    ///
    /// Fails only for the empty word.
    pub fn record(&self, word: &str) -> Result<u32, TrieError> {
        let key = word.to_lowercase();
        let mut trie = self.trie.write();
        Self::bump(&mut trie, &key)
    }

    /// Splits `text` into words and counts each, in order. Returns the number
    /// of words counted.
    pub fn ingest_text(&self, text: &str) -> usize {
        let mut trie = self.trie.write();
        let mut counted = 0;
        for word in words(text) {
            match Self::bump(&mut trie, &word.to_lowercase()) {
                Ok(_) => counted += 1,
                Err(err) => debug!(word, %err, "word skipped"),
            }
        }
        counted
    }

    fn bump(trie: &mut KeyedTrie<u32>, key: &str) -> Result<u32, TrieError> {
        trie.compute_or_insert(key, 1, |n| n.saturating_add(1))
            .copied()
    }

    /// Occurrences of `word`, ignoring case. Unknown words count 0.
    pub fn count(&self, word: &str) -> u32 {
        self.trie
            .read()
            .find(&word.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    /// Answers a single query.
    pub fn query(&self, query: &WordQuery) -> WordCount {
        let count = self.count(&query.word);
        debug!(word = %query.word, count, "query");
        WordCount {
            word: query.word.clone(),
            count,
        }
    }

    /// Number of distinct words seen.
    pub fn unique_words(&self) -> usize {
        self.trie.read().len()
    }
}
