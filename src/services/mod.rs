//! Service modules for dashboard functionality.
//!
//! This module contains the query facade used by the terminal UI and the
//! report binary, and the track search strategies it relies on.

pub mod explorer;
pub mod search;

pub use explorer::{AlbumView, Explorer, SearchView, WordCountView};
