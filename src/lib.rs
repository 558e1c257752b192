//! `Lyrics Explorer` - analysis and terminal dashboard for song lyrics.
//!
//! This crate loads a tabular lyrics dataset (album, track, lyrics) and
//! provides word frequencies, cross-album word counts, keyword search and a
//! per-album sentiment timeline, plus a ratatui dashboard over them.

// Re-export public modules for use in integration tests and as a library
pub mod analysis;
pub mod app;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod services;
pub mod types;
pub mod ui;
