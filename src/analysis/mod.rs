//! Text analysis engine.
//!
//! Pure functions over lyric text: tokenization, stopword filtering, word
//! frequency, cross-album aggregation and sentiment/theme scoring. Nothing in
//! here holds state between calls.

pub mod aggregate;
pub mod frequency;
pub mod sentiment;
pub mod stopwords;
pub mod tokenizer;

pub use aggregate::{aggregate_by_album, album_summaries, heatmap_matrix, AlbumText, HeatmapMatrix};
pub use frequency::{count_specific_words, parse_word_list, top_words, FrequencyTable};
pub use sentiment::{score, top_themes, LexiconScorer, PolarityScorer};
pub use stopwords::{LanguageStopwords, StopwordSet, StopwordSource};
pub use tokenizer::{filter_stopwords, tokenize, TokenStream};
