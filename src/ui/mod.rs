//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the dashboard's
//! terminal-based user interface using ratatui.

mod advanced;
mod album;

pub use advanced::draw_advanced;
pub use album::draw_album;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use unicode_width::UnicodeWidthStr;

use crate::app::{App, AppMode, InputMode};

/// Render the full application UI to the terminal frame.
#[allow(clippy::cast_possible_truncation)]
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(1),
            Constraint::Length(3), // Command/status bar at bottom
        ])
        .split(f.size());

    match app.mode {
        AppMode::Splash => {
            let body = Rect {
                height: chunks[0].height + chunks[1].height,
                ..chunks[0]
            };
            draw_splash(f, app, body);
        }
        AppMode::Album => {
            draw_tabs(f, app, chunks[0]);
            draw_album(f, app, chunks[1]);
        }
        AppMode::Advanced => {
            draw_tabs(f, app, chunks[0]);
            draw_advanced(f, app, chunks[1]);
        }
    }

    // Draw status/info modal (blocking)
    if let Some(status) = &app.status_message {
        draw_status_message(f, status);
        return;
    }
    // Draw error message if present (blocking)
    if let Some(error) = &app.error_message {
        draw_error_message(f, error);
        return;
    }

    if app.show_help {
        draw_help_modal(f, app);
    }

    if app.input_mode == InputMode::Jump {
        draw_jump_picker(f, app);
    }

    if app.mode == AppMode::Splash {
        let msg = "Press any key to continue...";

        if chunks[2].width >= msg.len() as u16 && chunks[2].height >= 3 {
            let width = msg.len() as u16;
            let x = (chunks[2].width.saturating_sub(width)) / 2;
            let text_area = Rect {
                x: chunks[2].left() + x,
                y: chunks[2].top() + 1,
                width,
                height: 1,
            };

            let style = Style::default().fg(Color::Yellow);
            f.render_widget(Paragraph::new(msg).style(style), text_area);
        }
    } else {
        draw_command_bar(f, app, chunks[2]);
    }
}

fn draw_tabs(f: &mut Frame, app: &App, area: Rect) {
    let modes = [AppMode::Album, AppMode::Advanced];
    let titles: Vec<Line> = modes.iter().map(|m| Line::from(m.title())).collect();
    let selected = modes.iter().position(|m| *m == app.mode).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(app.config.app_name().to_string()))
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .divider(" | ");

    f.render_widget(tabs, area);
}

#[allow(clippy::cast_possible_truncation)]
fn draw_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let (title, border_color) = match app.input_mode {
        InputMode::Normal => ("Commands/Status", Color::Yellow),
        InputMode::Command => ("Command", Color::Yellow),
        InputMode::Search => ("Search Lyrics", Color::Cyan),
        InputMode::Words => ("Words to Count", Color::Cyan),
        InputMode::Jump => ("Jump to Track", Color::Cyan),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(title, Style::default().fg(border_color)));

    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    if app.input_mode == InputMode::Normal {
        let help_text = match app.mode {
            AppMode::Splash => vec![],
            AppMode::Album => create_help_text(&[
                ("Tab", "Advanced"),
                ("h/l", "Focus"),
                ("PgUp/PgDn", "Scroll"),
                ("y", "Copy lyrics"),
                ("f", "Jump"),
                ("?", "Help"),
                (":q", "Quit"),
            ]),
            AppMode::Advanced => create_help_text(&[
                ("Tab", "Album"),
                ("/", "Search"),
                ("w", "Words"),
                (":reload", "Reload"),
                ("?", "Help"),
                (":q", "Quit"),
            ]),
        };

        let status_bar = Paragraph::new(Line::from(help_text)).style(Style::default().fg(Color::Gray));
        f.render_widget(status_bar, inner_area);
    } else {
        let prompt = app.input_mode.prompt();
        let input = Paragraph::new(format!(" {prompt}{}", app.input_buffer))
            .style(Style::default().fg(border_color));
        f.render_widget(input, inner_area);

        let cursor = 1 + prompt.width() + app.input_buffer.width();
        f.set_cursor(
            inner_area.left() + (cursor as u16).min(inner_area.width.saturating_sub(1)),
            inner_area.top(),
        );
    }
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")];

    for (i, (key, description)) in commands.iter().enumerate() {
        text.push(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)));
        text.push(Span::raw(format!(": {description}")));

        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let (title_style, border_style) = if is_focused {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Yellow),
        )
    } else {
        (Style::default(), Style::default())
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Centered rect of at most `width` x `height` inside the frame.
fn centered_rect(size: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(size.width.saturating_sub(4));
    let height = height.min(size.height.saturating_sub(4));
    Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_splash(f: &mut Frame, app: &App, area: Rect) {
    let logo = [
        r"  _               _            ",
        r" | |   _  _ _ _ _(_)__ ___     ",
        r" | |__| || | '_| | / _(_-<     ",
        r" |____|\_, |_| |_|_\__/__/     ",
        r"       |__/                    ",
        r"                               ",
        r"   Word clouds, themes, moods  ",
        r"                               ",
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightBlue))
        .title(Span::styled(
            "Lyrics Explorer",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));

    f.render_widget(block, area);

    let logo_height = logo.len() as u16;
    let logo_width = logo[0].len() as u16;

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    let vertical_pad = (inner_area.height.saturating_sub(logo_height)) / 2;
    let horizontal_pad = (inner_area.width.saturating_sub(logo_width)) / 2;

    for (i, line) in logo.iter().enumerate() {
        let y = inner_area.top() + vertical_pad + i as u16;
        if y >= inner_area.bottom() {
            break;
        }

        let text_area = Rect {
            x: inner_area.left() + horizontal_pad,
            y,
            width: (line.len() as u16).min(inner_area.width),
            height: 1,
        };

        let style = if i < 5 {
            Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };

        f.render_widget(Paragraph::new(*line).style(style), text_area);
    }

    let version_text = format!("v{}", app.config.app_version());

    if area.width > (version_text.len() + 2) as u16 && area.height >= 2 {
        let version_area = Rect {
            x: area.right() - version_text.len() as u16 - 2,
            y: area.bottom() - 2,
            width: version_text.len() as u16,
            height: 1,
        };

        f.render_widget(
            Paragraph::new(version_text).style(Style::default().fg(Color::Gray)),
            version_area,
        );
    }
}

fn draw_error_message(f: &mut Frame, message: &str) {
    let area = centered_rect(f.size(), 50, 7);

    let block = Block::default()
        .title(Span::styled("Error", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[0]);

    let hint = Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(hint, inner_area[1]);
}

#[allow(clippy::cast_possible_truncation)]
fn draw_status_message(f: &mut Frame, message: &str) {
    let size = f.size();

    // max 80% of screen, min 50
    let max_width = (size.width as usize * 80) / 100;
    let width = message.width().saturating_add(6).min(max_width).max(50) as u16;

    let inner_width = (width.saturating_sub(4) as usize).max(1);
    let msg_lines = message.width().div_ceil(inner_width);
    let area = centered_rect(size, width, msg_lines as u16 + 4);

    let block = Block::default()
        .title(Span::styled("Info", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(area);

    f.render_widget(text, inner_area[0]);

    let hint = Paragraph::new("Press Esc to dismiss")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(hint, inner_area[1]);
}

fn draw_help_modal(f: &mut Frame, app: &App) {
    let area = centered_rect(f.size(), 60, 26);

    let block = Block::default()
        .title(Span::styled(
            " Help - Keybindings ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    let help_text: Vec<Line> = build_help_content(app.mode)
        .iter()
        .map(|(key, desc, is_header)| {
            if *is_header {
                Line::from(Span::styled(*key, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)))
            } else {
                Line::from(vec![
                    Span::styled(format!("{key:>14}"), Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(*desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    f.render_widget(Paragraph::new(help_text).wrap(Wrap { trim: true }), inner_area);
}

fn build_help_content(mode: AppMode) -> Vec<(&'static str, &'static str, bool)> {
    let mut lines = vec![
        ("── Global ──", "", true),
        ("F1 / ?", "Show this help", false),
        ("Tab", "Switch tab", false),
        (":", "Enter command mode", false),
        (":q / :quit", "Quit application", false),
        (":reload", "Reload the dataset", false),
        (":search <q>", "Search lyrics", false),
        (":words <list>", "Count words across albums", false),
        ("Esc", "Cancel input / dismiss modal", false),
        ("", "", false),
    ];

    match mode {
        AppMode::Album => lines.extend([
            ("── Album ──", "", true),
            ("↑/↓ or j/k", "Navigate list", false),
            ("←/→ or h/l", "Switch between albums and tracks", false),
            ("PgUp/PgDn", "Scroll lyrics", false),
            ("y", "Copy lyrics to clipboard", false),
            ("f", "Jump to a track by title", false),
        ]),
        AppMode::Advanced => lines.extend([
            ("── Advanced ──", "", true),
            ("/", "Search lyrics for a keyword", false),
            ("w", "Edit the counted word list", false),
            ("f", "Jump to a track by title", false),
        ]),
        AppMode::Splash => lines.extend([("── Splash ──", "", true), ("Any key", "Continue to app", false)]),
    }

    lines.push(("", "", false));
    lines.push(("Press Esc, F1 or ? to close", "", true));

    lines
}

#[allow(clippy::cast_possible_truncation)]
fn draw_jump_picker(f: &mut Frame, app: &mut App) {
    let height = app.jump_results.len().max(1) as u16 + 2;
    let area = centered_rect(f.size(), 60, height);

    let items: Vec<ListItem> = if app.jump_results.is_empty() {
        vec![ListItem::new(Span::styled("No matching tracks", Style::default().fg(Color::Gray)))]
    } else {
        app.jump_results
            .iter()
            .map(|hit| {
                ListItem::new(Line::from(vec![
                    Span::styled(hit.track.clone(), Style::default().fg(Color::White)),
                    Span::styled(format!("  ({})", hit.album), Style::default().fg(Color::Gray)),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(
                    " Jump to Track ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        )
        .highlight_style(Style::default().bg(Color::Rgb(80, 80, 120)).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut app.jump_list_state);
}
