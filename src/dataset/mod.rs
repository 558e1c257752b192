//! Lyrics dataset loading and lookup.
//!
//! The dataset is read once into an immutable [`Dataset`] handle. CSV files
//! need `album`, `track` and `lyrics` header columns; JSON files hold an array
//! of objects with the same fields. Row order is preserved, and an empty or
//! missing lyrics value becomes an absent field rather than an error.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::analysis::aggregate::aggregate_by_album;
use crate::error::{Error, Result};
use crate::types::LyricRecord;

const REQUIRED_COLUMNS: [&str; 3] = ["album", "track", "lyrics"];

/// Raw CSV row before empty lyrics are normalized.
#[derive(Debug, Deserialize)]
struct CsvRow {
    album: String,
    track: String,
    #[serde(default)]
    lyrics: Option<String>,
}

impl From<CsvRow> for LyricRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            album: row.album,
            track: row.track,
            lyrics: normalize_lyrics(row.lyrics),
        }
    }
}

/// Only a truly empty cell is absent; whitespace-only lyrics stay present.
fn normalize_lyrics(lyrics: Option<String>) -> Option<String> {
    lyrics.filter(|l| !l.is_empty())
}

/// Supported dataset file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// JSON array of records.
    Json,
}

impl DatasetFormat {
    /// Pick the format from a file extension; anything but `.json` is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Immutable, ordered collection of lyric records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<LyricRecord>,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Wrap records that are already in memory.
    pub const fn from_records(records: Vec<LyricRecord>) -> Self {
        Self { records, source: None }
    }

    /// Load a dataset file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let format = DatasetFormat::from_path(path);
        let file = fs_err::File::open(path).map_err(|e| Error::io(e, path.to_path_buf()))?;
        let records = match format {
            DatasetFormat::Csv => parse_csv(file),
            DatasetFormat::Json => parse_json(file),
        }
        .map_err(|e| match e {
            Error::Parse { message, .. } => Error::parse(message, path.to_path_buf()),
            other => other,
        })?;

        let dataset = Self {
            records,
            source: Some(path.to_path_buf()),
        };
        tracing::info!(
            "Loaded {} tracks across {} albums from {}",
            dataset.len(),
            dataset.albums().len(),
            path.display()
        );
        Ok(dataset)
    }

    /// All records in dataset order.
    pub fn records(&self) -> &[LyricRecord] {
        &self.records
    }

    /// File the dataset was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Number of records.
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct album names in first-occurrence order.
    pub fn albums(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.album.as_str())
            .filter(|album| seen.insert(*album))
            .collect()
    }

    /// Distinct track titles of `album`, in dataset order.
    pub fn tracks(&self, album: &str) -> Result<Vec<&str>> {
        let mut seen = HashSet::new();
        let tracks: Vec<&str> = self
            .records
            .iter()
            .filter(|r| r.album == album)
            .map(|r| r.track.as_str())
            .filter(|track| seen.insert(*track))
            .collect();
        if tracks.is_empty() {
            return Err(Error::not_found("Album", album));
        }
        Ok(tracks)
    }

    /// The first record for an album/track pair.
    pub fn track(&self, album: &str, track: &str) -> Result<&LyricRecord> {
        self.records
            .iter()
            .find(|r| r.album == album && r.track == track)
            .ok_or_else(|| Error::not_found("Track", format!("{album} / {track}")))
    }

    /// All lyrics of `album` joined into one span.
    pub fn album_text(&self, album: &str) -> Result<String> {
        aggregate_by_album(&self.records)
            .into_iter()
            .find(|a| a.album == album)
            .map(|a| a.text)
            .ok_or_else(|| Error::not_found("Album", album))
    }
}

fn parse_csv<R: std::io::Read>(reader: R) -> Result<Vec<LyricRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h.trim() == *col))
        .collect();
    if !missing.is_empty() {
        return Err(Error::parse(
            format!("missing required column(s): {}", missing.join(", ")),
            None::<PathBuf>,
        ));
    }

    let mut records = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        records.push(row?.into());
    }
    Ok(records)
}

fn parse_json<R: std::io::Read>(reader: R) -> Result<Vec<LyricRecord>> {
    let rows: Vec<LyricRecord> = serde_json::from_reader(reader)?;
    Ok(rows
        .into_iter()
        .map(|r| LyricRecord {
            lyrics: normalize_lyrics(r.lyrics),
            ..r
        })
        .collect())
}
