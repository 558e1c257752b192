//! Dashboard queries over a loaded dataset.
//!
//! [`Explorer`] owns the immutable dataset, the stopword set and the
//! sentiment scorer, and answers one request per user interaction. Every view
//! it returns is computed fresh from the dataset; nothing is cached or
//! mutated between calls.

use serde::Serialize;

use crate::analysis::{
    aggregate_by_album, album_summaries, heatmap_matrix, parse_word_list, top_words, HeatmapMatrix, LanguageStopwords,
    LexiconScorer, PolarityScorer, StopwordSet,
};
use crate::config::Config;
use crate::constants::analysis::{DEFAULT_THEME_COUNT, DEFAULT_TOP_WORDS, WORD_CLOUD_SIZE};
use crate::constants::search::MAX_JUMP_RESULTS;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::services::search::{search, FuzzyTrackSearch, SearchStrategy};
use crate::types::{AlbumSummary, SearchHit, WordCount};

/// Album tab contents for one album/track selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumView {
    /// Selected album.
    pub album: String,
    /// Selected track.
    pub track: String,
    /// Most frequent non-stopword words of the whole album.
    pub top_words: Vec<WordCount>,
    /// Weighted words for the album word cloud.
    pub word_cloud: Vec<WordCount>,
    /// Full lyrics of the selected track, empty when absent.
    pub lyrics: String,
}

/// Keyword search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchView {
    /// The query as entered.
    pub query: String,
    /// Matching tracks in dataset order.
    pub hits: Vec<SearchHit>,
}

impl SearchView {
    /// Summary line shown above the result table.
    pub fn headline(&self) -> String {
        format!("Found {} tracks containing '{}'", self.hits.len(), self.query)
    }
}

/// Word-count table across albums for a user word list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCountView {
    /// Normalized words, in the order entered.
    pub words: Vec<String>,
    /// Album x word count matrix.
    pub matrix: HeatmapMatrix,
}

/// Request-per-interaction facade over the analysis engine.
pub struct Explorer {
    dataset: Dataset,
    stopwords: StopwordSet,
    scorer: Box<dyn PolarityScorer>,
    top_n: usize,
    theme_count: usize,
}

impl Explorer {
    /// Create an explorer from explicit parts.
    pub const fn new(dataset: Dataset, stopwords: StopwordSet, scorer: Box<dyn PolarityScorer>) -> Self {
        Self {
            dataset,
            stopwords,
            scorer,
            top_n: DEFAULT_TOP_WORDS,
            theme_count: DEFAULT_THEME_COUNT,
        }
    }

    /// Load the dataset, stopwords and lexicon named by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let dataset = Dataset::load(&config.dataset_path)?;
        let source = LanguageStopwords::new(&config.stopword_language)?;
        let stopwords = StopwordSet::new(&source, &config.custom_stopwords);
        let scorer: Box<dyn PolarityScorer> = match &config.sentiment_lexicon {
            Some(path) => Box::new(LexiconScorer::from_path(path)?),
            None => Box::new(LexiconScorer::default()),
        };
        tracing::info!(
            "Explorer ready: {} stopwords ({}), scorer {}",
            stopwords.len(),
            source.code(),
            scorer.name()
        );

        Ok(Self::new(dataset, stopwords, scorer).with_limits(config.top_words, config.theme_count))
    }

    /// Override the frequent-words and theme counts.
    #[must_use]
    pub fn with_limits(mut self, top_n: usize, theme_count: usize) -> Self {
        self.top_n = top_n;
        self.theme_count = theme_count;
        self
    }

    /// The loaded dataset.
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The stopword set used for frequency views.
    pub const fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    /// Album tab view for an album/track pair.
    pub fn album_view(&self, album: &str, track: &str) -> Result<AlbumView> {
        let album_text = self.dataset.album_text(album)?;
        let record = self.dataset.track(album, track)?;

        Ok(AlbumView {
            album: album.to_string(),
            track: track.to_string(),
            top_words: top_words(&album_text, &self.stopwords, self.top_n),
            word_cloud: top_words(&album_text, &self.stopwords, WORD_CLOUD_SIZE),
            lyrics: record.lyrics_or_empty().to_string(),
        })
    }

    /// Tracks whose lyrics contain `query`.
    pub fn search(&self, query: &str) -> SearchView {
        SearchView {
            query: query.to_string(),
            hits: search(self.dataset.records(), query),
        }
    }

    /// Count a comma-separated word list in every album.
    pub fn word_counts(&self, input: &str) -> WordCountView {
        let words = parse_word_list(input);
        let albums = aggregate_by_album(self.dataset.records());
        let matrix = heatmap_matrix(&albums, &words);
        WordCountView { words, matrix }
    }

    /// Sentiment and themes of every album, in dataset order.
    pub fn timeline(&self) -> Vec<AlbumSummary> {
        album_summaries(
            self.dataset.records(),
            &self.stopwords,
            self.scorer.as_ref(),
            self.theme_count,
        )
    }

    /// Tracks whose titles fuzzily match `query`, best first.
    pub fn jump_to_track(&self, query: &str) -> Vec<SearchHit> {
        FuzzyTrackSearch::default()
            .find_matches(query, self.dataset.records(), MAX_JUMP_RESULTS)
            .into_iter()
            .map(|r| SearchHit::new(&r.album, &r.track))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::LyricRecord;

    fn explorer() -> Explorer {
        let dataset = Dataset::from_records(vec![
            LyricRecord::new("A", "T1", "love and life"),
            LyricRecord::new("A", "T2", "death comes"),
            LyricRecord::without_lyrics("A", "Interlude"),
            LyricRecord::new("B", "T3", "love love love"),
        ]);
        Explorer::new(dataset, StopwordSet::from_words(["and"]), Box::new(LexiconScorer::default()))
    }

    #[test]
    fn test_album_view() {
        let view = explorer().album_view("A", "T2").unwrap();
        assert_eq!(view.lyrics, "death comes");
        assert_eq!(view.top_words[0], WordCount::new("love", 1));
        assert_eq!(view.top_words.len(), 4);
        assert_eq!(view.word_cloud, view.top_words);
    }

    #[test]
    fn test_album_view_is_repeatable() {
        let ex = explorer();
        let first = ex.album_view("A", "T1").unwrap();
        assert_eq!(first, ex.album_view("A", "T1").unwrap());
        assert_ne!(first, ex.album_view("A", "T2").unwrap());
    }

    #[test]
    fn test_album_view_track_without_lyrics() {
        let view = explorer().album_view("A", "Interlude").unwrap();
        assert!(view.lyrics.is_empty());
    }

    #[test]
    fn test_album_view_unknown_selection() {
        let ex = explorer();
        assert!(ex.album_view("Z", "T1").unwrap_err().is_not_found());
        assert!(ex.album_view("B", "T1").unwrap_err().is_not_found());
    }

    #[test]
    fn test_top_words_limit_applies() {
        let view = explorer().with_limits(2, 1).album_view("A", "T1").unwrap();
        assert_eq!(view.top_words.len(), 2);
    }

    #[test]
    fn test_search_view_headline() {
        let view = explorer().search("love");
        assert_eq!(view.hits.len(), 2);
        assert_eq!(view.headline(), "Found 2 tracks containing 'love'");
    }

    #[test]
    fn test_word_counts_view() {
        let view = explorer().word_counts("Love, death,, joy");
        assert_eq!(view.words, vec!["love", "death", "joy"]);
        assert_eq!(view.matrix.rows, vec!["A", "B"]);
        assert_eq!(view.matrix.cells, vec![vec![1, 1, 0], vec![3, 0, 0]]);
    }

    #[test]
    fn test_timeline_is_stable() {
        let ex = explorer().with_limits(15, 2);
        let first = ex.timeline();
        assert_eq!(first, ex.timeline());
        assert_eq!(first.iter().map(|s| s.order_index).collect::<Vec<_>>(), vec![1, 2]);
        assert!(first.iter().all(|s| s.top_themes.len() <= 2));
    }

    #[test]
    fn test_jump_to_track() {
        let hits = explorer().jump_to_track("inter");
        assert_eq!(hits, vec![SearchHit::new("A", "Interlude")]);
    }
}
