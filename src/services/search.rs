//! Track search strategies.
//!
//! Keyword search scans every record's lyrics linearly; there is no index.
//! Track-title search ranks titles with fuzzy matching for quick navigation.

use std::cmp::Reverse;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::constants::search::MIN_FUZZY_SCORE;
use crate::types::{LyricRecord, SearchHit};

/// Trait for track search strategies.
pub trait SearchStrategy: Send + Sync {
    /// Find records matching a query string.
    ///
    /// # Arguments
    /// * `query` - The search query as typed by the user
    /// * `records` - The dataset rows to search
    /// * `limit` - Maximum number of results to return
    ///
    /// # Returns
    /// Matching records, in the order defined by the strategy.
    fn find_matches<'a>(
        &self,
        query: &str,
        records: &'a [LyricRecord],
        limit: usize,
    ) -> Vec<&'a LyricRecord>;

    /// Get the name of this search strategy (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// Case-insensitive substring match against lyrics.
///
/// The query is taken literally. Records without lyrics never match; an
/// empty query matches every record that has lyrics.
#[derive(Debug, Default, Clone, Copy)]
pub struct LyricsSearch;

impl SearchStrategy for LyricsSearch {
    fn find_matches<'a>(
        &self,
        query: &str,
        records: &'a [LyricRecord],
        limit: usize,
    ) -> Vec<&'a LyricRecord> {
        let query_lower = query.to_lowercase();

        records
            .iter()
            .filter(|r| {
                r.lyrics
                    .as_deref()
                    .is_some_and(|l| l.to_lowercase().contains(&query_lower))
            })
            .take(limit)
            .collect()
    }

    fn name(&self) -> &'static str {
        "LyricsSearch"
    }
}

/// Fuzzy match against track titles, best score first.
pub struct FuzzyTrackSearch {
    /// Minimum score threshold.
    pub min_score: i64,
}

impl Default for FuzzyTrackSearch {
    fn default() -> Self {
        Self { min_score: MIN_FUZZY_SCORE }
    }
}

impl SearchStrategy for FuzzyTrackSearch {
    fn find_matches<'a>(
        &self,
        query: &str,
        records: &'a [LyricRecord],
        limit: usize,
    ) -> Vec<&'a LyricRecord> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let matcher = SkimMatcherV2::default().ignore_case();

        let mut scored: Vec<_> = records
            .iter()
            .filter_map(|record| {
                let score = matcher.fuzzy_match(&record.track, query)?;
                (score >= self.min_score).then_some((record, score))
            })
            .collect();

        // stable: equal scores keep dataset order
        scored.sort_by_key(|&(_, score)| Reverse(score));
        scored.into_iter().take(limit).map(|(r, _)| r).collect()
    }

    fn name(&self) -> &'static str {
        "FuzzyTrackSearch"
    }
}

/// Every track whose lyrics contain `query`, case-insensitively, in dataset order.
pub fn search(records: &[LyricRecord], query: &str) -> Vec<SearchHit> {
    let hits: Vec<SearchHit> = LyricsSearch
        .find_matches(query, records, usize::MAX)
        .into_iter()
        .map(|r| SearchHit::new(&r.album, &r.track))
        .collect();
    tracing::debug!("Search for {query:?} matched {} tracks", hits.len());
    hits
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn records() -> Vec<LyricRecord> {
        vec![
            LyricRecord::new("A", "Midnight Train", "Love and LIFE"),
            LyricRecord::without_lyrics("A", "Intro"),
            LyricRecord::new("A", "Daylight", "death comes"),
            LyricRecord::new("B", "Midnight City", "love love love"),
        ]
    }

    #[test]
    fn test_search_case_insensitive_in_row_order() {
        let hits = search(&records(), "LOVE");
        assert_eq!(hits, vec![SearchHit::new("A", "Midnight Train"), SearchHit::new("B", "Midnight City")]);
    }

    #[test]
    fn test_search_substring_inside_words() {
        let hits = search(&records(), "eat");
        assert_eq!(hits, vec![SearchHit::new("A", "Daylight")]);
    }

    #[test]
    fn test_search_empty_query_matches_all_present_lyrics() {
        let hits = search(&records(), "");
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|h| h.track != "Intro"));
    }

    #[test]
    fn test_search_no_match() {
        assert!(search(&records(), "xyz_no_such_token").is_empty());
    }

    #[test]
    fn test_search_query_is_literal() {
        let recs = vec![LyricRecord::new("A", "T", "a.c"), LyricRecord::new("A", "U", "abc")];
        assert_eq!(search(&recs, "a.c"), vec![SearchHit::new("A", "T")]);
    }

    #[test]
    fn test_lyrics_search_limit() {
        let recs = records();
        assert_eq!(LyricsSearch.find_matches("love", &recs, 1).len(), 1);
    }

    #[test]
    fn test_fuzzy_track_search() {
        let recs = records();
        let results = FuzzyTrackSearch::default().find_matches("midnight", &recs, 10);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.track.starts_with("Midnight")));
        assert!(FuzzyTrackSearch::default().find_matches("   ", &recs, 10).is_empty());
    }
}
