//! Word tokenization and stopword filtering.
//!
//! Text is lowercased and split into maximal runs of alphanumeric characters
//! and `_`, with Unicode semantics. Everything else is a separator and never
//! appears in a token, including combining marks, joiners and connector
//! punctuation other than `_`.

use std::sync::LazyLock;

use regex::Regex;

use super::stopwords::StopwordSet;

/// Regex matching one word token.
#[allow(clippy::expect_used)]
static RE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Alphabetic}\p{N}_]+").expect("valid regex: RE_WORD")
});

/// Lazily produced sequence of lowercase word tokens.
///
/// Owns the lowercased text and walks it with the word regex, so tokens are
/// only materialized as they are pulled.
#[derive(Debug, Clone)]
pub struct TokenStream {
    text: String,
    pos: usize,
}

impl Iterator for TokenStream {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let m = RE_WORD.find_at(&self.text, self.pos)?;
        self.pos = m.end();
        Some(m.as_str().to_string())
    }
}

/// Split `text` into lowercase word tokens.
pub fn tokenize(text: &str) -> TokenStream {
    TokenStream {
        text: text.to_lowercase(),
        pos: 0,
    }
}

/// Drop every token contained in `stopwords`, keeping order and duplicates.
pub fn filter_stopwords<'a, I>(tokens: I, stopwords: &'a StopwordSet) -> impl Iterator<Item = String> + 'a
where
    I: IntoIterator<Item = String>,
    I::IntoIter: 'a,
{
    tokens.into_iter().filter(move |t| !stopwords.contains(t))
}

/// Tokenize and filter in one step.
pub fn content_tokens<'a>(text: &str, stopwords: &'a StopwordSet) -> impl Iterator<Item = String> + 'a {
    filter_stopwords(tokenize(text), stopwords)
}
