//! Print the dashboard's analyses for a dataset without the terminal UI.
//!
//! Usage: cargo run --bin lyrics_report [-- DATASET] [--json] [--search QUERY] [--words LIST]

use anyhow::{Context, Result};
use serde::Serialize;

use lyrics_explorer::analysis::top_words;
use lyrics_explorer::config::Config;
use lyrics_explorer::logging::init_stderr_logging;
use lyrics_explorer::services::{Explorer, SearchView, WordCountView};
use lyrics_explorer::types::{AlbumSummary, WordCount};

#[derive(Debug, Serialize)]
struct AlbumWords {
    album: String,
    top_words: Vec<WordCount>,
}

#[derive(Debug, Serialize)]
struct Report {
    dataset: String,
    tracks: usize,
    timeline: Vec<AlbumSummary>,
    albums: Vec<AlbumWords>,
    search: Option<SearchView>,
    word_counts: WordCountView,
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn positional_dataset(args: &[String]) -> Option<String> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        match arg.as_str() {
            "--search" | "--words" => skip_next = true,
            "--json" => {}
            other => return Some(other.to_string()),
        }
    }
    None
}

fn build_report(config: &Config, search: Option<&str>, words: &str) -> Result<Report> {
    let explorer = Explorer::from_config(config)
        .with_context(|| format!("Failed to load {}", config.dataset_path.display()))?;
    let dataset = explorer.dataset();

    let albums = dataset
        .albums()
        .into_iter()
        .map(|album| {
            let text = dataset.album_text(album)?;
            Ok(AlbumWords {
                album: album.to_string(),
                top_words: top_words(&text, explorer.stopwords(), config.top_words),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Report {
        dataset: config.dataset_path.display().to_string(),
        tracks: dataset.len(),
        timeline: explorer.timeline(),
        albums,
        search: search.map(|q| explorer.search(q)),
        word_counts: explorer.word_counts(words),
    })
}

fn print_text(report: &Report) {
    println!("=== {} ({} tracks) ===", report.dataset, report.tracks);

    println!("\n=== Sentiment timeline ===");
    for s in &report.timeline {
        println!(
            "  {:>2}. {:<30} {:+.3}  [{}]",
            s.order_index,
            s.album,
            s.sentiment_polarity,
            s.themes_label()
        );
    }

    println!("\n=== Top words ===");
    for album in &report.albums {
        let words: Vec<String> = album.top_words.iter().map(ToString::to_string).collect();
        println!("  {}: {}", album.album, words.join(", "));
    }

    if let Some(search) = &report.search {
        println!("\n=== {} ===", search.headline());
        for hit in &search.hits {
            println!("  {} / {}", hit.album, hit.track);
        }
    }

    let matrix = &report.word_counts.matrix;
    println!("\n=== Word counts ===");
    print!("  {:<30}", "Album");
    for word in &matrix.columns {
        print!(" {word:>8}");
    }
    println!();
    for (album, counts) in matrix.rows.iter().zip(&matrix.cells) {
        print!("  {album:<30}");
        for count in counts {
            print!(" {count:>8}");
        }
        println!();
    }
}

fn main() -> Result<()> {
    init_stderr_logging()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = Config::load()?;
    if let Some(path) = positional_dataset(&args) {
        config.dataset_path = path.into();
    }
    let words = flag_value(&args, "--words").unwrap_or_else(|| config.default_words.clone());
    let search = flag_value(&args, "--search");

    let report = build_report(&config, search.as_deref(), &words)?;

    if args.iter().any(|a| a == "--json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }

    Ok(())
}
