use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Cell, Chart, Dataset as ChartDataset, GraphType, Paragraph, Row, Table},
    Frame,
};

use crate::analysis::HeatmapMatrix;
use crate::app::App;
use crate::types::AlbumSummary;
use crate::ui::create_titled_block;

/// Advanced tab: keyword search and word counts on the left, sentiment
/// timeline on the right.
pub fn draw_advanced(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(columns[1]);

    draw_search(f, app, left[0]);
    match &app.word_count_view {
        Some(view) => draw_heatmap(f, &view.matrix, left[1]),
        None => draw_placeholder(f, "Word Counts", "Press w to count words across albums", left[1]),
    }
    draw_timeline(f, &app.timeline, right[0]);
    draw_summary_table(f, &app.timeline, right[1]);
}

fn draw_placeholder(f: &mut Frame, title: &str, message: &str, area: Rect) {
    f.render_widget(
        Paragraph::new(message)
            .style(Style::default().fg(Color::Gray))
            .block(create_titled_block(title, false)),
        area,
    );
}

fn draw_search(f: &mut Frame, app: &App, area: Rect) {
    let Some(view) = &app.search_view else {
        draw_placeholder(f, "Search", "Press / to search the lyrics for a keyword", area);
        return;
    };

    let rows: Vec<Row> = view
        .hits
        .iter()
        .map(|hit| Row::new(vec![Cell::from(hit.album.as_str()), Cell::from(hit.track.as_str())]))
        .collect();

    let title = view.headline();
    let table = Table::new(rows, [Constraint::Percentage(45), Constraint::Percentage(55)])
        .header(
            Row::new(vec!["Album", "Track"])
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        )
        .block(create_titled_block(&title, false));

    f.render_widget(table, area);
}

/// Background for a heatmap cell, from dark blue (0) to red (max).
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn heat_color(value: usize, max: usize) -> Color {
    if max == 0 {
        return Color::Rgb(20, 20, 60);
    }
    let t = (value as f64 / max as f64).clamp(0.0, 1.0);
    let lerp = |from: u8, to: u8| (f64::from(to) - f64::from(from)).mul_add(t, f64::from(from)).round() as u8;
    Color::Rgb(lerp(20, 220), lerp(20, 60), lerp(60, 40))
}

fn draw_heatmap(f: &mut Frame, matrix: &HeatmapMatrix, area: Rect) {
    if matrix.is_empty() {
        draw_placeholder(f, "Word Counts", "No albums or words to count", area);
        return;
    }

    let max = matrix.max();
    let header = Row::new(
        std::iter::once(Cell::from("Album")).chain(matrix.columns.iter().map(|w| Cell::from(w.as_str()))),
    )
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = matrix
        .rows
        .iter()
        .zip(&matrix.cells)
        .map(|(album, counts)| {
            let cells = std::iter::once(Cell::from(album.as_str())).chain(counts.iter().map(|&count| {
                Cell::from(format!("{count:>5}"))
                    .style(Style::default().fg(Color::White).bg(heat_color(count, max)))
            }));
            Row::new(cells)
        })
        .collect();

    let widths = std::iter::once(Constraint::Min(12)).chain(matrix.columns.iter().map(|_| Constraint::Length(8)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(create_titled_block("Word Counts by Album", false));

    f.render_widget(table, area);
}

/// Scatter points `(order_index, polarity)`.
#[allow(clippy::cast_precision_loss)]
fn timeline_points(timeline: &[AlbumSummary]) -> Vec<(f64, f64)> {
    timeline
        .iter()
        .map(|s| (s.order_index as f64, s.sentiment_polarity))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn draw_timeline(f: &mut Frame, timeline: &[AlbumSummary], area: Rect) {
    if timeline.is_empty() {
        draw_placeholder(f, "Sentiment Timeline", "No albums loaded", area);
        return;
    }

    let points = timeline_points(timeline);
    let datasets = vec![ChartDataset::default()
        .name("polarity")
        .marker(symbols::Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(Color::Cyan))
        .data(&points)];

    let last = timeline.len() as f64 + 1.0;
    let chart = Chart::new(datasets)
        .block(create_titled_block("Sentiment Timeline", false))
        .x_axis(
            Axis::default()
                .title("Album order")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, last])
                .labels(vec![Span::raw("0"), Span::raw(format!("{}", timeline.len() + 1))]),
        )
        .y_axis(
            Axis::default()
                .title("Polarity")
                .style(Style::default().fg(Color::Gray))
                .bounds([-1.0, 1.0])
                .labels(vec![Span::raw("-1"), Span::raw("0"), Span::raw("1")]),
        );

    f.render_widget(chart, area);
}

fn polarity_style(polarity: f64) -> Style {
    if polarity > 0.0 {
        Style::default().fg(Color::Green)
    } else if polarity < 0.0 {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn draw_summary_table(f: &mut Frame, timeline: &[AlbumSummary], area: Rect) {
    let rows: Vec<Row> = timeline
        .iter()
        .map(|s| {
            Row::new(vec![
                Cell::from(s.order_index.to_string()),
                Cell::from(s.album.as_str()),
                Cell::from(Line::from(Span::styled(
                    format!("{:+.2}", s.sentiment_polarity),
                    polarity_style(s.sentiment_polarity),
                ))),
                Cell::from(s.themes_label()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(35),
            Constraint::Length(8),
            Constraint::Min(10),
        ],
    )
    .header(
        Row::new(vec!["#", "Album", "Mood", "Themes"])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    )
    .block(create_titled_block("Album Themes", false));

    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heat_color_endpoints() {
        assert_eq!(heat_color(0, 10), Color::Rgb(20, 20, 60));
        assert_eq!(heat_color(10, 10), Color::Rgb(220, 60, 40));
        assert_eq!(heat_color(3, 0), Color::Rgb(20, 20, 60));
    }

    #[test]
    fn test_timeline_points_follow_order_index() {
        let timeline = vec![
            AlbumSummary {
                album: "A".to_string(),
                order_index: 1,
                sentiment_polarity: 0.5,
                top_themes: vec![],
            },
            AlbumSummary {
                album: "B".to_string(),
                order_index: 2,
                sentiment_polarity: -0.25,
                top_themes: vec![],
            },
        ];
        assert_eq!(timeline_points(&timeline), vec![(1.0, 0.5), (2.0, -0.25)]);
    }
}
