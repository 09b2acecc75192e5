// Word frequency: occurrence counts with first-seen ordering.
//
// The table remembers the order in which each word was first counted so that
// `top_n` can break count ties by that order (a stable sort over insertion
// order). Keys never map to zero: a word only enters the table when counted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A word and how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

/// Mapping from token to count, iterable in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: Vec<KeywordCount>,
    positions: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `word`.
    pub fn add(&mut self, word: &str) {
        match self.positions.get(word) {
            Some(&pos) => self.entries[pos].count += 1,
            None => {
                self.positions.insert(word.to_string(), self.entries.len());
                self.entries.push(KeywordCount {
                    word: word.to_string(),
                    count: 1,
                });
            }
        }
    }

    /// Count for `word`, zero if it was never seen.
    pub fn get(&self, word: &str) -> usize {
        self.positions
            .get(word)
            .map(|&pos| self.entries[pos].count)
            .unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &KeywordCount> {
        self.entries.iter()
    }

    /// The `n` most frequent words, highest count first.
    ///
    /// Equal counts keep first-seen order. Returns fewer than `n` entries when
    /// the table is smaller.
    pub fn top_n(&self, n: usize) -> Vec<KeywordCount> {
        let mut ranked = self.entries.clone();
        // sort_by is stable, so ties stay in insertion order
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }
}

impl<S: AsRef<str>> FromIterator<S> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for word in iter {
            table.add(word.as_ref());
        }
        table
    }
}
