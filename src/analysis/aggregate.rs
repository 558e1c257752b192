//! Cross-album aggregation.
//!
//! Albums are always listed in the order they first appear in the dataset,
//! never alphabetically, so the 1-based position of an album is stable for a
//! given dataset snapshot.

use std::collections::HashMap;

use serde::Serialize;

use super::frequency::{counts_from_table, FrequencyTable};
use super::sentiment::{score, top_themes, PolarityScorer};
use super::stopwords::StopwordSet;
use crate::constants::analysis::ALBUM_TEXT_SEPARATOR;
use crate::types::{AlbumSummary, LyricRecord};

/// An album with all of its lyrics joined into one span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumText {
    /// Album name.
    pub album: String,
    /// Present lyrics of the album's rows, joined with a single space.
    pub text: String,
}

/// Group `records` by album in first-occurrence order and join their lyrics.
///
/// Absent lyrics contribute nothing. Every distinct album appears exactly once.
pub fn aggregate_by_album(records: &[LyricRecord]) -> Vec<AlbumText> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut parts: Vec<(&str, Vec<&str>)> = Vec::new();

    for record in records {
        let idx = *positions.entry(record.album.as_str()).or_insert_with(|| {
            parts.push((record.album.as_str(), Vec::new()));
            parts.len() - 1
        });
        if let Some(lyrics) = record.lyrics.as_deref() {
            parts[idx].1.push(lyrics);
        }
    }

    parts
        .into_iter()
        .map(|(album, texts)| AlbumText {
            album: album.to_string(),
            text: texts.join(ALBUM_TEXT_SEPARATOR),
        })
        .collect()
}

/// Numeric word-count table: one row per album, one column per word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapMatrix {
    /// Row labels (albums, aggregator order).
    pub rows: Vec<String>,
    /// Column labels (requested words, caller order).
    pub columns: Vec<String>,
    /// `cells[row][column]` is the raw count of the word in the album.
    pub cells: Vec<Vec<usize>>,
}

impl HeatmapMatrix {
    /// Largest cell value, 0 for an empty matrix.
    pub fn max(&self) -> usize {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Count for one album/word pair.
    pub fn get(&self, row: usize, column: usize) -> Option<usize> {
        self.cells.get(row)?.get(column).copied()
    }

    /// Whether there is nothing to render.
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }
}

/// Count `words` in every album text.
pub fn heatmap_matrix<S: AsRef<str>>(albums: &[AlbumText], words: &[S]) -> HeatmapMatrix {
    let cells = albums
        .iter()
        .map(|a| {
            let table = FrequencyTable::from_text(&a.text);
            counts_from_table(&table, words).into_iter().map(|wc| wc.count).collect()
        })
        .collect();

    HeatmapMatrix {
        rows: albums.iter().map(|a| a.album.clone()).collect(),
        columns: words.iter().map(|w| w.as_ref().to_string()).collect(),
        cells,
    }
}

/// Sentiment and theme summary of every album, in dataset order.
pub fn album_summaries(
    records: &[LyricRecord],
    stopwords: &StopwordSet,
    scorer: &dyn PolarityScorer,
    theme_count: usize,
) -> Vec<AlbumSummary> {
    aggregate_by_album(records)
        .into_iter()
        .enumerate()
        .map(|(i, album)| AlbumSummary {
            order_index: i + 1,
            sentiment_polarity: score(scorer, &album.text),
            top_themes: top_themes(&album.text, stopwords, theme_count),
            album: album.album,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::analysis::sentiment::LexiconScorer;

    fn sample() -> Vec<LyricRecord> {
        vec![
            LyricRecord::new("A", "T1", "love and life"),
            LyricRecord::new("A", "T2", "death comes"),
            LyricRecord::new("B", "T3", "love love love"),
        ]
    }

    #[test]
    fn test_aggregate_first_occurrence_order() {
        let records = vec![
            LyricRecord::new("Zeta", "1", "z"),
            LyricRecord::new("Alpha", "2", "a"),
            LyricRecord::new("Zeta", "3", "zz"),
        ];
        let albums = aggregate_by_album(&records);
        let names: Vec<&str> = albums.iter().map(|a| a.album.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        assert_eq!(albums[0].text, "z zz");
    }

    #[test]
    fn test_aggregate_skips_absent_lyrics() {
        let records = vec![
            LyricRecord::without_lyrics("A", "intro"),
            LyricRecord::new("A", "T1", "first"),
            LyricRecord::without_lyrics("A", "interlude"),
            LyricRecord::new("A", "T2", "second"),
            LyricRecord::without_lyrics("B", "silence"),
        ];
        let albums = aggregate_by_album(&records);
        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0].text, "first second");
        assert_eq!(albums[1].text, "");
    }

    #[test]
    fn test_duplicate_album_track_rows_are_all_kept() {
        let records = vec![
            LyricRecord::new("A", "Reprise", "first take"),
            LyricRecord::new("B", "Other", "elsewhere"),
            LyricRecord::new("A", "Reprise", "second take"),
        ];
        let albums = aggregate_by_album(&records);
        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0].text, "first take second take");

        let hits = crate::services::search::search(&records, "take");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|h| h.album == "A" && h.track == "Reprise"));

        let matrix = heatmap_matrix(&albums, &["take"]);
        assert_eq!(matrix.cells, vec![vec![2], vec![0]]);
    }

    #[test]
    fn test_aggregate_length_matches_parts() {
        let records = sample();
        for album in aggregate_by_album(&records) {
            let rows: Vec<&LyricRecord> = records.iter().filter(|r| r.album == album.album).collect();
            let lyric_len: usize = rows.iter().map(|r| r.lyrics_or_empty().len()).sum();
            let present = rows.iter().filter(|r| r.lyrics.is_some()).count();
            assert_eq!(album.text.len(), lyric_len + present.saturating_sub(1));
        }
    }

    #[test]
    fn test_heatmap_counts() {
        let albums = aggregate_by_album(&sample());
        let matrix = heatmap_matrix(&albums, &["love", "death", "joy"]);
        assert_eq!(matrix.rows, vec!["A", "B"]);
        assert_eq!(matrix.columns, vec!["love", "death", "joy"]);
        assert_eq!(matrix.cells, vec![vec![1, 1, 0], vec![3, 0, 0]]);
        assert_eq!(matrix.max(), 3);
        assert_eq!(matrix.get(1, 0), Some(3));
        assert_eq!(matrix.get(2, 0), None);
    }

    #[test]
    fn test_heatmap_without_words() {
        let albums = aggregate_by_album(&sample());
        let matrix = heatmap_matrix::<&str>(&albums, &[]);
        assert!(matrix.is_empty());
        assert_eq!(matrix.max(), 0);
    }

    #[test]
    fn test_album_summaries_order_and_themes() {
        let stopwords = StopwordSet::from_words(["and"]);
        let summaries = album_summaries(&sample(), &stopwords, &LexiconScorer::default(), 3);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].album, "A");
        assert_eq!(summaries[0].order_index, 1);
        assert_eq!(summaries[0].top_themes, vec!["love", "life", "death"]);
        assert_eq!(summaries[1].order_index, 2);
        assert_eq!(summaries[1].themes_label(), "love");
        assert!(summaries[1].sentiment_polarity > 0.0);
        for s in &summaries {
            assert!((-1.0..=1.0).contains(&s.sentiment_polarity));
        }
    }
}
