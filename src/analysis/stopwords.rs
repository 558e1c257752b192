//! Stopword configuration.
//!
//! The base list comes from a [`StopwordSource`] (by default the NLTK list
//! shipped by the `stop-words` crate for a language, which holds function
//! words only) and is unioned with a small set of custom
//! additions, mostly contraction fragments such as `s` and `ll` that the
//! tokenizer leaves behind when it splits `it's` or `we'll`.

use std::collections::HashSet;

use stop_words::{get, LANGUAGE};

use crate::constants::analysis::CUSTOM_STOPWORDS;
use crate::error::{Error, Result};

/// Provider of a base stopword list.
///
/// Implementations can be swapped to analyze lyrics in another language or
/// with a hand-curated list.
pub trait StopwordSource: Send + Sync {
    /// The base words, in any case. They are lowercased on insertion.
    fn words(&self) -> Vec<String>;

    /// Get the name of this source (for logging).
    fn name(&self) -> &'static str;
}

/// Stopwords shipped by the `stop-words` crate for one language.
#[derive(Debug, Clone, Copy)]
pub struct LanguageStopwords {
    code: &'static str,
}

impl LanguageStopwords {
    /// Resolve a language code or English name (`en`, `german`, ...).
    pub fn new(language: &str) -> Result<Self> {
        let code = match language.trim().to_lowercase().as_str() {
            "en" | "english" => "en",
            "de" | "german" => "de",
            "fr" | "french" => "fr",
            "es" | "spanish" => "es",
            "it" | "italian" => "it",
            "pt" | "portuguese" => "pt",
            "nl" | "dutch" => "nl",
            "ru" | "russian" => "ru",
            "sv" | "swedish" => "sv",
            other => {
                return Err(Error::config(
                    format!("unsupported stopword language '{other}'"),
                    "Set LYRICS_STOPWORD_LANGUAGE to a code such as en, de, fr, es, it",
                ));
            }
        };
        Ok(Self { code })
    }

    /// English stopwords.
    pub const fn english() -> Self {
        Self { code: "en" }
    }

    /// Normalized language code.
    pub const fn code(&self) -> &'static str {
        self.code
    }

    fn language(self) -> LANGUAGE {
        match self.code {
            "de" => LANGUAGE::German,
            "fr" => LANGUAGE::French,
            "es" => LANGUAGE::Spanish,
            "it" => LANGUAGE::Italian,
            "pt" => LANGUAGE::Portuguese,
            "nl" => LANGUAGE::Dutch,
            "ru" => LANGUAGE::Russian,
            "sv" => LANGUAGE::Swedish,
            _ => LANGUAGE::English,
        }
    }
}

impl StopwordSource for LanguageStopwords {
    fn words(&self) -> Vec<String> {
        get(self.language())
    }

    fn name(&self) -> &'static str {
        "LanguageStopwords"
    }
}

/// Read-only set of words excluded from frequency analysis.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Build the set from a base source unioned with `custom_additions`.
    pub fn new<S, I>(source: &S, custom_additions: I) -> Self
    where
        S: StopwordSource + ?Sized,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut set = Self::from_words(source.words());
        set.extend(custom_additions);
        tracing::debug!("Built stopword set from {} with {} words", source.name(), set.len());
        set
    }

    /// English base list plus the built-in contraction fragments.
    pub fn english_default() -> Self {
        Self::new(&LanguageStopwords::english(), CUSTOM_STOPWORDS)
    }

    /// Build a set from an explicit word list, with no base source.
    pub fn from_words<I>(words: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut set = Self::default();
        set.extend(words);
        set
    }

    fn extend<I>(&mut self, words: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
    }

    /// Check if a (lowercase) token is a stopword.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Number of stopwords in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    struct FixedSource;

    impl StopwordSource for FixedSource {
        fn words(&self) -> Vec<String> {
            vec!["The".to_string(), "and".to_string()]
        }

        fn name(&self) -> &'static str {
            "FixedSource"
        }
    }

    #[test]
    fn test_union_with_custom_additions() {
        let set = StopwordSet::new(&FixedSource, ["ll", " Re "]);
        assert!(set.contains("the"));
        assert!(set.contains("and"));
        assert!(set.contains("ll"));
        assert!(set.contains("re"));
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_empty_additions_are_ignored() {
        let set = StopwordSet::from_words(["", "  ", "oh"]);
        assert_eq!(set.len(), 1);
        assert!(set.contains("oh"));
    }

    #[test]
    fn test_english_default_contains_common_words_and_fragments() {
        let set = StopwordSet::english_default();
        assert!(set.contains("the"));
        assert!(set.contains("and"));
        for fragment in CUSTOM_STOPWORDS {
            assert!(set.contains(fragment));
        }
    }

    #[test]
    fn test_english_default_keeps_content_words() {
        let set = StopwordSet::english_default();
        for word in ["good", "home", "world", "need", "man", "away", "little", "new", "old", "right", "love"] {
            assert!(!set.contains(word), "{word} should not be a stopword");
        }
        assert!(set.len() < 250);
    }

    #[test]
    fn test_unknown_language_is_config_error() {
        let err = LanguageStopwords::new("klingon").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert_eq!(LanguageStopwords::new(" DE ").unwrap().code(), "de");
    }
}
