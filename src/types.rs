//! Core data types shared by the dataset, the analysis engine and the UI.
//!
//! Every type here is a plain value: once built it is never mutated, and
//! views are recomputed per request rather than updated in place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the lyrics dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricRecord {
    /// Album the track belongs to.
    pub album: String,
    /// Track title.
    pub track: String,
    /// Lyric text; absent when the source row had no value.
    #[serde(default)]
    pub lyrics: Option<String>,
}

impl LyricRecord {
    /// Create a record with lyrics present.
    pub fn new(album: impl Into<String>, track: impl Into<String>, lyrics: impl Into<String>) -> Self {
        Self {
            album: album.into(),
            track: track.into(),
            lyrics: Some(lyrics.into()),
        }
    }

    /// Create a record whose lyrics field is absent.
    pub fn without_lyrics(album: impl Into<String>, track: impl Into<String>) -> Self {
        Self {
            album: album.into(),
            track: track.into(),
            lyrics: None,
        }
    }

    /// Lyric text, with an absent field read as the empty string.
    pub fn lyrics_or_empty(&self) -> &str {
        self.lyrics.as_deref().unwrap_or("")
    }
}

/// A word with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    /// The normalized word.
    pub word: String,
    /// Number of occurrences; never negative.
    pub count: usize,
}

impl WordCount {
    /// Create a new word/count pair.
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self { word: word.into(), count }
    }
}

impl fmt::Display for WordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.word, self.count)
    }
}

/// A track whose lyrics matched a search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Album of the matching track.
    pub album: String,
    /// Title of the matching track.
    pub track: String,
}

impl SearchHit {
    /// Create a new hit.
    pub fn new(album: impl Into<String>, track: impl Into<String>) -> Self {
        Self {
            album: album.into(),
            track: track.into(),
        }
    }
}

/// Per-album sentiment and theme summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlbumSummary {
    /// Album name.
    pub album: String,
    /// 1-based position of the album's first appearance in the dataset.
    pub order_index: usize,
    /// Polarity of the album's concatenated lyrics, in `[-1.0, 1.0]`.
    pub sentiment_polarity: f64,
    /// Most frequent non-stopword words, at most three by default.
    pub top_themes: Vec<String>,
}

impl AlbumSummary {
    /// Themes joined for display.
    pub fn themes_label(&self) -> String {
        self.top_themes.join(", ")
    }
}
