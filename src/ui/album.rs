use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use crate::constants::ui::NAV_PANE_PERCENT;
use crate::types::WordCount;
use crate::ui::create_titled_block;

/// Album tab: album/track lists on the left, word cloud, frequent words and
/// lyrics on the right.
pub fn draw_album(f: &mut Frame, app: &mut App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(NAV_PANE_PERCENT),
            Constraint::Percentage(100 - NAV_PANE_PERCENT),
        ])
        .split(area);

    draw_navigation(f, app, columns[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(columns[1]);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);

    let Some(view) = &app.album_view else {
        let message = if app.explorer.is_some() {
            "Select an album and a track"
        } else {
            "No dataset loaded. Set LYRICS_DATASET and run :reload"
        };
        f.render_widget(
            Paragraph::new(message)
                .style(Style::default().fg(Color::Gray))
                .block(create_titled_block("Album", false)),
            columns[1],
        );
        return;
    };

    draw_word_cloud(f, &view.word_cloud, &format!("Word Cloud: {}", view.album), top[0]);
    draw_frequent_words(f, &view.top_words, top[1]);

    let lyrics = if view.lyrics.is_empty() {
        Paragraph::new(Span::styled("No lyrics for this track", Style::default().fg(Color::Gray)))
    } else {
        Paragraph::new(view.lyrics.as_str())
    };
    f.render_widget(
        lyrics
            .block(create_titled_block(&format!("Lyrics: {}", view.track), false))
            .wrap(Wrap { trim: false })
            .scroll((app.lyrics_scroll, 0)),
        rows[1],
    );
}

fn draw_navigation(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let albums_focused = app.focus == Focus::Albums;
    let album_items: Vec<ListItem> = app.albums.iter().map(|a| ListItem::new(a.as_str())).collect();
    let album_list = List::new(album_items)
        .block(create_titled_block("Albums", albums_focused))
        .highlight_style(Style::default().bg(Color::Rgb(80, 80, 120)).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    f.render_stateful_widget(album_list, chunks[0], &mut app.album_list_state);

    let track_items: Vec<ListItem> = app.tracks.iter().map(|t| ListItem::new(t.as_str())).collect();
    let track_list = List::new(track_items)
        .block(create_titled_block("Tracks", !albums_focused))
        .highlight_style(Style::default().bg(Color::Rgb(80, 80, 120)).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    f.render_stateful_widget(track_list, chunks[1], &mut app.track_list_state);
}

/// Weight a word by its share of the largest count, as a style.
#[allow(clippy::cast_precision_loss)]
fn cloud_style(count: usize, max: usize) -> Style {
    let ratio = if max == 0 { 0.0 } else { count as f64 / max as f64 };
    match ratio {
        r if r > 0.75 => Style::default().fg(Color::LightYellow).add_modifier(Modifier::BOLD),
        r if r > 0.5 => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        r if r > 0.25 => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::DarkGray),
    }
}

fn draw_word_cloud(f: &mut Frame, words: &[WordCount], title: &str, area: Rect) {
    let max = words.first().map_or(0, |w| w.count);

    // Alphabetical placement so the heaviest words are spread out
    let mut placed: Vec<&WordCount> = words.iter().collect();
    placed.sort_by(|a, b| a.word.cmp(&b.word));

    let spans: Vec<Span> = placed
        .into_iter()
        .flat_map(|w| {
            let text = if max > 0 && w.count * 2 > max {
                w.word.to_uppercase()
            } else {
                w.word.clone()
            };
            [Span::styled(text, cloud_style(w.count, max)), Span::raw("  ")]
        })
        .collect();

    let cloud = if spans.is_empty() {
        Paragraph::new(Span::styled("No words", Style::default().fg(Color::Gray)))
    } else {
        Paragraph::new(Line::from(spans))
    };
    f.render_widget(cloud.block(create_titled_block(title, false)).wrap(Wrap { trim: true }), area);
}

fn draw_frequent_words(f: &mut Frame, words: &[WordCount], area: Rect) {
    let rows: Vec<Row> = words
        .iter()
        .map(|w| Row::new(vec![Cell::from(w.word.as_str()), Cell::from(w.count.to_string())]))
        .collect();

    let title = format!("Top {} Words", words.len());
    let table = Table::new(rows, [Constraint::Min(10), Constraint::Length(7)])
        .header(
            Row::new(vec!["Word", "Count"])
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .block(create_titled_block(&title, false));

    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_style_buckets() {
        assert_eq!(cloud_style(10, 10).fg, Some(Color::LightYellow));
        assert_eq!(cloud_style(6, 10).fg, Some(Color::Yellow));
        assert_eq!(cloud_style(3, 10).fg, Some(Color::Cyan));
        assert_eq!(cloud_style(1, 10).fg, Some(Color::DarkGray));
        assert_eq!(cloud_style(0, 0).fg, Some(Color::DarkGray));
    }
}
