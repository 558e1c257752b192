//! Sentiment polarity and theme extraction.
//!
//! Polarity comes from a [`PolarityScorer`]. The built-in [`LexiconScorer`]
//! averages the polarity of every lexicon word found in the text: an
//! intensifier right before a word scales it, a negator flips it and halves
//! its strength. The result is always clamped to `[-1.0, 1.0]` and text
//! without lexicon hits scores `0.0`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use serde::Deserialize;

use super::frequency::top_words;
use super::stopwords::StopwordSet;
use super::tokenizer::tokenize;
use crate::constants::sentiment::NEGATION_FACTOR;
use crate::error::{Error, Result};

/// Lexicon bundled with the crate.
#[allow(clippy::expect_used)]
static BUILTIN: LazyLock<LexiconScorer> = LazyLock::new(|| {
    let raw = include_str!("../../data/sentiment_lexicon.json");
    LexiconScorer::from_json(raw).expect("valid bundled sentiment lexicon")
});

/// Scores the sentiment of a span of text.
pub trait PolarityScorer: Send + Sync {
    /// Polarity in `[-1.0, 1.0]`; empty or neutral text scores `0.0`.
    fn polarity(&self, text: &str) -> f64;

    /// Get the name of this scorer (for logging).
    fn name(&self) -> &'static str;
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    polarity: HashMap<String, f64>,
    #[serde(default)]
    intensifiers: HashMap<String, f64>,
}

/// Lexicon-based polarity scorer.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    polarity: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl LexiconScorer {
    /// Parse a lexicon from JSON: `{"polarity": {word: f64}, "intensifiers": {word: f64}}`.
    pub fn from_json(raw: &str) -> Result<Self> {
        let file: LexiconFile = serde_json::from_str(raw)?;
        if let Some((word, value)) = file.polarity.iter().find(|(_, v)| !(-1.0..=1.0).contains(*v)) {
            return Err(Error::parse(
                format!("polarity for '{word}' is {value}, expected a value in [-1, 1]"),
                None::<std::path::PathBuf>,
            ));
        }
        Ok(Self {
            polarity: lowercase_keys(file.polarity),
            intensifiers: lowercase_keys(file.intensifiers),
        })
    }

    /// Load a lexicon file from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let scorer = Self::from_json(&raw).map_err(|e| match e {
            Error::Parse { message, .. } => Error::parse(message, path.to_path_buf()),
            other => other,
        })?;
        tracing::info!("Loaded {} lexicon words from {}", scorer.len(), path.display());
        Ok(scorer)
    }

    /// Number of words carrying a polarity.
    pub fn len(&self) -> usize {
        self.polarity.len()
    }

    /// Whether the lexicon has no polarity words.
    pub fn is_empty(&self) -> bool {
        self.polarity.is_empty()
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let tokens: Vec<String> = tokenize(text).collect();
        let mut sum = 0.0;
        let mut hits = 0_u32;

        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.polarity.get(token) else {
                continue;
            };

            let mut value = base;
            let mut before = i;
            if let Some(&factor) = before
                .checked_sub(1)
                .and_then(|j| self.intensifiers.get(&tokens[j]))
            {
                value *= factor;
                before -= 1;
            }
            if is_negated(&tokens[..before]) {
                value *= NEGATION_FACTOR;
            }

            sum += value;
            hits += 1;
        }

        if hits == 0 {
            return 0.0;
        }
        (sum / f64::from(hits)).clamp(-1.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "LexiconScorer"
    }
}

fn lowercase_keys(map: HashMap<String, f64>) -> HashMap<String, f64> {
    map.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect()
}

/// Whether the tokens right before a lexicon hit negate it.
///
/// Contractions arrive split by the tokenizer (`don't` is `don`, `t`), so
/// a trailing `t` is checked against the contraction stem before it.
fn is_negated(preceding: &[String]) -> bool {
    match preceding {
        [.., stem, t] if t == "t" => is_contraction_stem(stem),
        [.., last] => is_negator(last),
        [] => false,
    }
}

fn is_negator(token: &str) -> bool {
    matches!(
        token,
        "not" | "no" | "never" | "nothing" | "nobody" | "nowhere" | "neither" | "nor" | "without" | "cannot"
    )
}

fn is_contraction_stem(token: &str) -> bool {
    matches!(
        token,
        "don" | "doesn" | "didn" | "isn" | "wasn" | "aren" | "weren" | "won" | "can" | "couldn"
            | "wouldn" | "shouldn" | "haven" | "hasn" | "hadn" | "ain" | "mustn"
    )
}

/// Pass an aggregated span of text through `scorer`.
pub fn score(scorer: &dyn PolarityScorer, text: &str) -> f64 {
    scorer.polarity(text)
}

/// The `n` most frequent non-stopword words of `text`, used as themes.
pub fn top_themes(text: &str, stopwords: &StopwordSet, n: usize) -> Vec<String> {
    top_words(text, stopwords, n).into_iter().map(|wc| wc.word).collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn scorer() -> LexiconScorer {
        LexiconScorer::from_json(
            r#"{
                "polarity": {"good": 0.7, "bad": -0.7, "love": 0.5, "Death": -0.5},
                "intensifiers": {"very": 1.3}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_and_neutral_text_score_zero() {
        let s = scorer();
        assert!(s.polarity("").abs() < f64::EPSILON);
        assert!(s.polarity("the road goes on").abs() < f64::EPSILON);
    }

    #[test]
    fn test_average_of_hits() {
        let s = scorer();
        assert!((s.polarity("good and bad") - 0.0).abs() < 1e-9);
        assert!((s.polarity("love, love, death") - 0.5 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_keys_are_lowercased() {
        assert!(scorer().polarity("DEATH") < 0.0);
    }

    #[test]
    fn test_negation_flips_and_halves() {
        let s = scorer();
        assert!((s.polarity("not good") - (-0.35)).abs() < 1e-9);
        assert!((s.polarity("that ain't good") - (-0.35)).abs() < 1e-9);
    }

    #[test]
    fn test_intensifier_scales_and_clamps() {
        let s = scorer();
        assert!((s.polarity("very good") - 0.91).abs() < 1e-9);
        assert!((s.polarity("not very good") - (-0.455)).abs() < 1e-9);
        let strong = LexiconScorer::from_json(r#"{"polarity": {"best": 1.0}, "intensifiers": {"most": 1.5}}"#).unwrap();
        assert!((strong.polarity("the most best") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_polarity_always_in_range() {
        let s = LexiconScorer::default();
        for text in ["", "love love love", "hate war death pain", "so very extremely happy", "not not not bad"] {
            let p = s.polarity(text);
            assert!((-1.0..=1.0).contains(&p), "{text:?} -> {p}");
        }
    }

    #[test]
    fn test_builtin_lexicon_loads() {
        let s = LexiconScorer::default();
        assert!(!s.is_empty());
        assert!(s.polarity("a beautiful happy day") > 0.0);
        assert!(s.polarity("cold dark misery") < 0.0);
    }

    #[test]
    fn test_out_of_range_lexicon_rejected() {
        let err = LexiconScorer::from_json(r#"{"polarity": {"ecstatic": 3.0}}"#).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_from_path_reports_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, "not json").unwrap();
        match LexiconScorer::from_path(&path).unwrap_err() {
            Error::Parse { file, .. } => assert_eq!(file, Some(path)),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_top_themes_returns_words_only() {
        let stopwords = StopwordSet::from_words(["the", "and"]);
        let themes = top_themes("fire and rain and fire and the sun", &stopwords, 3);
        assert_eq!(themes, vec!["fire", "rain", "sun"]);
    }
}
