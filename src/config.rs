//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::analysis::{
    CUSTOM_STOPWORDS, DEFAULT_STOPWORD_LANGUAGE, DEFAULT_THEME_COUNT, DEFAULT_TOP_WORDS, DEFAULT_WORD_LIST,
};
use crate::constants::dataset::{APP_DIR_NAME, DEFAULT_FILE_NAME, LOG_FILE_NAME};
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Path of the lyrics dataset (CSV or JSON)
    pub dataset_path: PathBuf,
    /// Language of the base stopword list
    pub stopword_language: String,
    /// Words unioned into the base stopword list
    pub custom_stopwords: Vec<String>,
    /// Rows in the album frequent-words table
    pub top_words: usize,
    /// Theme words per album on the timeline
    pub theme_count: usize,
    /// Word list counted across albums at startup
    pub default_words: String,
    /// Optional JSON lexicon replacing the bundled sentiment lexicon
    pub sentiment_lexicon: Option<PathBuf>,
    /// Where the dashboard writes its log
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            dataset_path: PathBuf::from(DEFAULT_FILE_NAME),
            stopword_language: DEFAULT_STOPWORD_LANGUAGE.to_string(),
            custom_stopwords: CUSTOM_STOPWORDS.iter().map(ToString::to_string).collect(),
            top_words: DEFAULT_TOP_WORDS,
            theme_count: DEFAULT_THEME_COUNT,
            default_words: DEFAULT_WORD_LIST.to_string(),
            sentiment_lexicon: None,
            log_file: data_dir().map(|d| d.join(LOG_FILE_NAME)),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::from_lookup(|key| env::var(key).ok())?;

        // Dataset: env var override, or ./lyrics.csv, or the app data dir
        let use_fallback = env::var("LYRICS_DATASET").is_err() && !config.dataset_path.exists();
        if let Some(path) = data_dir()
            .map(|d| d.join(DEFAULT_FILE_NAME))
            .filter(|p| use_fallback && p.is_file())
        {
            config.dataset_path = path;
        }

        Ok(config)
    }

    /// Build a configuration from a key lookup, starting from the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("LYRICS_DATASET") {
            config.dataset_path = expand_path(&path);
        }

        if let Some(lang) = lookup("LYRICS_STOPWORD_LANGUAGE") {
            config.stopword_language = lang.trim().to_lowercase();
        }

        if let Some(extra) = lookup("LYRICS_EXTRA_STOPWORDS") {
            config.custom_stopwords.extend(
                extra
                    .split(',')
                    .map(|w| w.trim().to_lowercase())
                    .filter(|w| !w.is_empty()),
            );
        }

        if let Some(value) = lookup("LYRICS_TOP_WORDS") {
            config.top_words = parse_count("LYRICS_TOP_WORDS", &value)?;
        }

        if let Some(value) = lookup("LYRICS_THEME_COUNT") {
            config.theme_count = parse_count("LYRICS_THEME_COUNT", &value)?;
        }

        if let Some(words) = lookup("LYRICS_DEFAULT_WORDS") {
            config.default_words = words;
        }

        config.sentiment_lexicon = lookup("LYRICS_SENTIMENT_LEXICON").map(|p| expand_path(&p));

        if let Some(path) = lookup("LYRICS_LOG_FILE") {
            config.log_file = Some(expand_path(&path));
        }

        Ok(config)
    }
}

/// Application data directory, e.g. `~/.local/share/lyrics-explorer`.
fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_DIR_NAME))
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path.trim()).to_string())
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::config(
            format!("{key} must be a positive integer, got '{value}'"),
            "Unset it to use the default or set a value such as 10",
        )),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("lyrics.csv"));
        assert_eq!(config.top_words, 15);
        assert_eq!(config.theme_count, 3);
        assert_eq!(config.default_words, "love,death,life");
        assert_eq!(config.custom_stopwords, vec!["s", "t", "re", "ll"]);
        assert!(config.sentiment_lexicon.is_none());
        assert_eq!(config.app_name(), "lyrics-explorer");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("LYRICS_DATASET", "/data/songs.json"),
            ("LYRICS_STOPWORD_LANGUAGE", " DE "),
            ("LYRICS_EXTRA_STOPWORDS", "Oh, yeah,,"),
            ("LYRICS_TOP_WORDS", "20"),
            ("LYRICS_SENTIMENT_LEXICON", "/data/lexicon.json"),
        ]))
        .unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("/data/songs.json"));
        assert_eq!(config.stopword_language, "de");
        assert!(config.custom_stopwords.ends_with(&["oh".to_string(), "yeah".to_string()]));
        assert_eq!(config.top_words, 20);
        assert_eq!(config.sentiment_lexicon, Some(PathBuf::from("/data/lexicon.json")));
    }

    #[test]
    fn test_invalid_count_rejected() {
        for bad in ["0", "-3", "many"] {
            let err = Config::from_lookup(lookup(&[("LYRICS_THEME_COUNT", bad)])).unwrap_err();
            assert!(matches!(err, Error::Config { .. }), "{bad} should be rejected");
        }
    }
}
