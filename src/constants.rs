//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Text analysis constants.
pub mod analysis {
    /// Number of rows in the album frequent-words table.
    pub const DEFAULT_TOP_WORDS: usize = 15;

    /// Number of theme words shown per album on the timeline.
    pub const DEFAULT_THEME_COUNT: usize = 3;

    /// Number of weighted words in the album word cloud.
    pub const WORD_CLOUD_SIZE: usize = 40;

    /// Contraction fragments left behind by splitting on apostrophes.
    pub const CUSTOM_STOPWORDS: &[&str] = &["s", "t", "re", "ll"];

    /// Word list counted across albums until the user enters their own.
    pub const DEFAULT_WORD_LIST: &str = "love,death,life";

    /// Stopword language used when none is configured.
    pub const DEFAULT_STOPWORD_LANGUAGE: &str = "en";

    /// Separator placed between lyric texts when an album is concatenated.
    pub const ALBUM_TEXT_SEPARATOR: &str = " ";
}

/// Sentiment scoring constants.
pub mod sentiment {
    /// Multiplier applied to a lexicon hit preceded by a negator.
    pub const NEGATION_FACTOR: f64 = -0.5;
}

/// Search constants.
pub mod search {
    /// Maximum number of fuzzy track matches offered by the jump prompt.
    pub const MAX_JUMP_RESULTS: usize = 10;

    /// Minimum fuzzy score (skim scale) for a track title to be offered.
    pub const MIN_FUZZY_SCORE: i64 = 30;
}

/// Dataset defaults.
pub mod dataset {
    /// File name looked up in the working directory when no dataset is configured.
    pub const DEFAULT_FILE_NAME: &str = "lyrics.csv";

    /// Application directory name under the platform data dir.
    pub const APP_DIR_NAME: &str = "lyrics-explorer";

    /// Log file name under the application data dir.
    pub const LOG_FILE_NAME: &str = "lyrics-explorer.log";
}

/// UI layout constants.
pub mod ui {
    /// Width of the album/track navigation column, in percent.
    pub const NAV_PANE_PERCENT: u16 = 30;

    /// Event poll interval in milliseconds.
    pub const POLL_INTERVAL_MS: u64 = 50;
}
