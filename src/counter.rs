//! Word frequency table

use ahash::RandomState;
use hashbrown::HashMap;

/// Mapping from word to occurrence count.
///
/// Lookup order is unspecified; use [`WordFrequencyTable::sorted`] wherever
/// output order matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequencyTable {
    counts: HashMap<String, u64, RandomState>,
}

impl WordFrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Increment the count of `word` by one
    #[inline]
    pub fn add(&mut self, word: &str) {
        if let Some(count) = self.counts.get_mut(word) {
            *count += 1;
        } else {
            self.counts.insert(word.to_string(), 1);
        }
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, &c)| (w.as_str(), c))
    }

    /// Entries sorted lexicographically by word
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordFrequencyTable {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut table = Self::new();
        for word in iter {
            table.add(word.as_ref());
        }
        table
    }
}

impl<S: AsRef<str>> Extend<S> for WordFrequencyTable {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.add(word.as_ref());
        }
    }
}

/// Reduce a word list into a frequency table
pub fn count_words<S: AsRef<str>>(words: &[S]) -> WordFrequencyTable {
    let mut table = WordFrequencyTable::with_capacity(words.len() / 4);
    table.extend(words);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words() {
        let table = count_words(&["amet", "etiam", "purus", "nequ"]);

        assert_eq!(table.len(), 4);
        assert_eq!(table.get("amet"), Some(1));
        assert_eq!(table.get("etiam"), Some(1));
        assert_eq!(table.get("neque"), None);
    }

    #[test]
    fn test_repeated_words() {
        let table = count_words(&["sit", "etiam", "sit", "sit", ""]);

        assert_eq!(table.get("sit"), Some(3));
        assert_eq!(table.get(""), Some(1));
    }

    #[test]
    fn test_total_equals_input_length() {
        let words: Vec<String> = "a b a c b a d e f a"
            .split(' ')
            .map(String::from)
            .collect();
        let table = count_words(&words);

        assert_eq!(table.total(), words.len() as u64);
    }

    #[test]
    fn test_order_independent() {
        let forward = count_words(&["x", "y", "x", "z"]);
        let reversed = count_words(&["z", "x", "y", "x"]);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_sorted() {
        let table = count_words(&["purus", "amet", "etiam", "amet"]);
        assert_eq!(table.sorted(), vec![("amet", 2), ("etiam", 1), ("purus", 1)]);
    }

    #[test]
    fn test_empty_input() {
        let table = count_words::<String>(&[]);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }
}
