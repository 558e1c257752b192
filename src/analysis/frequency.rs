//! Word frequency distributions.
//!
//! A [`FrequencyTable`] counts tokens while remembering the order in which
//! each word first appeared. Ranking sorts by count descending and falls back
//! to that first-appearance order, so equal counts always come out in the
//! same, documented order.

use std::cmp::Reverse;
use std::collections::HashMap;

use super::stopwords::StopwordSet;
use super::tokenizer::{content_tokens, tokenize};
use crate::types::WordCount;

/// Word counts in first-appearance order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    index: HashMap<String, usize>,
    entries: Vec<WordCount>,
    total: usize,
}

impl FrequencyTable {
    /// Count every token yielded by `tokens`.
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut table = Self::default();
        for token in tokens {
            table.add(token);
        }
        table
    }

    /// Count the raw tokens of `text`, without stopword filtering.
    pub fn from_text(text: &str) -> Self {
        Self::from_tokens(tokenize(text))
    }

    /// Count the tokens of `text` that are not stopwords.
    pub fn from_content(text: &str, stopwords: &StopwordSet) -> Self {
        Self::from_tokens(content_tokens(text, stopwords))
    }

    fn add(&mut self, token: String) {
        self.total += 1;
        if let Some(&idx) = self.index.get(&token) {
            self.entries[idx].count += 1;
        } else {
            self.index.insert(token.clone(), self.entries.len());
            self.entries.push(WordCount::new(token, 1));
        }
    }

    /// Occurrences of `word`, 0 when it never appeared.
    pub fn count(&self, word: &str) -> usize {
        self.index.get(word).map_or(0, |&idx| self.entries[idx].count)
    }

    /// Number of distinct words.
    pub const fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Number of counted tokens.
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Whether nothing was counted.
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` most frequent words, ties in first-appearance order.
    pub fn most_common(&self, n: usize) -> Vec<WordCount> {
        let mut ranked = self.entries.clone();
        // stable sort, entries are already in first-appearance order
        ranked.sort_by_key(|w| Reverse(w.count));
        ranked.truncate(n);
        ranked
    }
}

/// The `n` most frequent non-stopword words of `text`.
///
/// Returns an empty list when `n` is zero or every token is a stopword.
pub fn top_words(text: &str, stopwords: &StopwordSet, n: usize) -> Vec<WordCount> {
    if n == 0 {
        return Vec::new();
    }
    FrequencyTable::from_content(text, stopwords).most_common(n)
}

/// Raw counts of the requested `words` in `text`, in the caller's order.
///
/// No stopword filtering is applied. Each requested word is looked up
/// independently and case-insensitively, so duplicates repeat the same count
/// and unknown words count zero.
pub fn count_specific_words<S: AsRef<str>>(text: &str, words: &[S]) -> Vec<WordCount> {
    let table = FrequencyTable::from_text(text);
    counts_from_table(&table, words)
}

pub(crate) fn counts_from_table<S: AsRef<str>>(table: &FrequencyTable, words: &[S]) -> Vec<WordCount> {
    words
        .iter()
        .map(|w| {
            let word = w.as_ref();
            WordCount::new(word, table.count(&word.to_lowercase()))
        })
        .collect()
}

/// Parse a comma-separated word list typed by the user.
///
/// Entries are trimmed and lowercased; empty entries are skipped.
pub fn parse_word_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn pairs(counts: &[WordCount]) -> Vec<(&str, usize)> {
        counts.iter().map(|c| (c.word.as_str(), c.count)).collect()
    }

    #[test]
    fn test_top_words_first_appearance_tie_break() {
        let stopwords = StopwordSet::from_words(["the", "on"]);
        let top = top_words("the cat sat on the mat the cat ran", &stopwords, 2);
        assert_eq!(pairs(&top), vec![("cat", 2), ("sat", 1)]);
    }

    #[test]
    fn test_top_words_full_ranking() {
        let stopwords = StopwordSet::from_words(["the", "on"]);
        let top = top_words("the cat sat on the mat the cat ran", &stopwords, 10);
        assert_eq!(pairs(&top), vec![("cat", 2), ("sat", 1), ("mat", 1), ("ran", 1)]);
    }

    #[test]
    fn test_top_words_bounds_and_ordering() {
        let stopwords = StopwordSet::from_words(["a"]);
        let text = "a b b c c c d d d d e";
        for n in 1..8 {
            let top = top_words(text, &stopwords, n);
            assert!(top.len() <= n);
            assert!(top.len() <= 5);
            assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
        }
    }

    #[test]
    fn test_top_words_empty_cases() {
        let stopwords = StopwordSet::from_words(["la"]);
        assert!(top_words("", &stopwords, 3).is_empty());
        assert!(top_words("la la la", &stopwords, 3).is_empty());
        assert!(top_words("words here", &stopwords, 0).is_empty());
    }

    #[test]
    fn test_count_specific_words_preserves_request_order() {
        let counts = count_specific_words("love and life death comes", &["love", "death", "joy"]);
        assert_eq!(pairs(&counts), vec![("love", 1), ("death", 1), ("joy", 0)]);
    }

    #[test]
    fn test_count_specific_words_ignores_stopwords_setting() {
        let counts = count_specific_words("the the end", &["the"]);
        assert_eq!(pairs(&counts), vec![("the", 2)]);
    }

    #[test]
    fn test_count_specific_words_case_insensitive_lookup() {
        let counts = count_specific_words("love LOVE", &["Love"]);
        assert_eq!(pairs(&counts), vec![("Love", 2)]);
    }

    #[test]
    fn test_count_specific_words_duplicates_and_idempotence() {
        let words = ["love", "love", "joy"];
        let first = count_specific_words("Love, love me do", &words);
        let second = count_specific_words("Love, love me do", &words);
        assert_eq!(first, second);
        assert_eq!(pairs(&first), vec![("love", 2), ("love", 2), ("joy", 0)]);
    }

    #[test]
    fn test_parse_word_list_skips_empty_entries() {
        assert_eq!(parse_word_list(" Love, ,DEATH,,life , "), vec!["love", "death", "life"]);
        assert!(parse_word_list(" , ,").is_empty());
    }

    #[test]
    fn test_frequency_table_totals() {
        let table = FrequencyTable::from_text("one two two three three three");
        assert_eq!(table.total(), 6);
        assert_eq!(table.distinct(), 3);
        assert_eq!(table.count("three"), 3);
        assert_eq!(table.count("four"), 0);
    }
}
