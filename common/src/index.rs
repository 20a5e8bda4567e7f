use std::collections::HashMap;

use crate::{Counters, DocId};

/// Word to per-document occurrence counts.
///
/// The index owns every [`Counters`] it holds. Words are stored as given;
/// normalization happens before insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    words: HashMap<String, Counters>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, word: &str) -> Option<&Counters> {
        self.words.get(word)
    }

    /// Record one more occurrence of `word` in `doc_id`.
    pub fn add_occurrence(&mut self, word: &str, doc_id: DocId) {
        match self.words.get_mut(word) {
            Some(counters) => {
                counters.increment(doc_id);
            }
            None => {
                let mut counters = Counters::new();
                counters.increment(doc_id);
                self.words.insert(word.to_string(), counters);
            }
        }
    }

    /// Insert `counters` under `word`, handing back whatever was there.
    pub fn insert(&mut self, word: String, counters: Counters) -> Option<Counters> {
        self.words.insert(word, counters)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// Words and their counters, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Counters)> + '_ {
        self.words.iter().map(|(word, counters)| (word.as_str(), counters))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
