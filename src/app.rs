//! Dashboard state and keyboard handling.
//!
//! The app holds the current selection and the views computed for it. Any
//! selection change or confirmed input recomputes the affected view through
//! the [`Explorer`]; nothing is recomputed behind the user's back.

use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

use crate::config::Config;
use crate::services::{AlbumView, Explorer, SearchView, WordCountView};
use crate::types::{AlbumSummary, SearchHit};

/// Top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Initial splash screen.
    Splash,
    /// Album word cloud, frequent words and lyrics.
    Album,
    /// Keyword search, word counts and the sentiment timeline.
    Advanced,
}

impl AppMode {
    /// Tab title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Splash => "Welcome",
            Self::Album => "Album Analysis",
            Self::Advanced => "Advanced Analysis",
        }
    }
}

/// Which navigation list has focus on the album tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Album list.
    Albums,
    /// Track list of the selected album.
    Tracks,
}

/// What the command bar is currently editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// No text input; keys navigate.
    Normal,
    /// `:` command.
    Command,
    /// Keyword to search in the lyrics.
    Search,
    /// Comma-separated word list to count.
    Words,
    /// Fuzzy track-title jump.
    Jump,
}

impl InputMode {
    /// Prompt prefix shown in the command bar.
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Command => ":",
            Self::Search => "/",
            Self::Words => "words> ",
            Self::Jump => "jump> ",
        }
    }
}

/// Dashboard state.
pub struct App {
    /// Current screen.
    pub mode: AppMode,
    /// Loaded configuration.
    pub config: Config,
    /// Query facade, absent until the dataset loads successfully.
    pub explorer: Option<Explorer>,
    /// Album names in dataset order.
    pub albums: Vec<String>,
    /// Track titles of the selected album.
    pub tracks: Vec<String>,
    /// Album list selection.
    pub album_list_state: ListState,
    /// Track list selection.
    pub track_list_state: ListState,
    /// Focused list on the album tab.
    pub focus: Focus,
    /// View for the selected album/track.
    pub album_view: Option<AlbumView>,
    /// Last keyword search.
    pub search_view: Option<SearchView>,
    /// Last word-count request.
    pub word_count_view: Option<WordCountView>,
    /// Per-album sentiment timeline.
    pub timeline: Vec<AlbumSummary>,
    /// Vertical scroll of the lyrics pane.
    pub lyrics_scroll: u16,
    /// What the command bar is editing.
    pub input_mode: InputMode,
    /// Text typed into the command bar.
    pub input_buffer: String,
    /// Candidates for the jump prompt.
    pub jump_results: Vec<SearchHit>,
    /// Highlighted jump candidate.
    pub jump_list_state: ListState,
    /// Blocking error modal.
    pub error_message: Option<String>,
    /// Blocking info modal.
    pub status_message: Option<String>,
    /// Whether the help modal is shown.
    pub show_help: bool,
    /// Whether the dataset load was attempted.
    pub initialized: bool,
    should_quit: bool,
}

impl App {
    /// Create the app; the dataset is loaded when the splash screen is dismissed.
    pub fn new(config: Config) -> Self {
        Self {
            mode: AppMode::Splash,
            config,
            explorer: None,
            albums: Vec::new(),
            tracks: Vec::new(),
            album_list_state: ListState::default(),
            track_list_state: ListState::default(),
            focus: Focus::Albums,
            album_view: None,
            search_view: None,
            word_count_view: None,
            timeline: Vec::new(),
            lyrics_scroll: 0,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            jump_results: Vec::new(),
            jump_list_state: ListState::default(),
            error_message: None,
            status_message: None,
            show_help: false,
            initialized: false,
            should_quit: false,
        }
    }

    /// Create the app around an explorer that is already loaded.
    pub fn with_explorer(config: Config, explorer: Explorer) -> Self {
        let mut app = Self::new(config);
        app.install_explorer(explorer);
        app.initialized = true;
        app.mode = AppMode::Album;
        app
    }

    /// Whether the main loop should exit.
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Request exit.
    pub const fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Currently selected album, if any.
    pub fn selected_album(&self) -> Option<&str> {
        self.album_list_state
            .selected()
            .and_then(|i| self.albums.get(i))
            .map(String::as_str)
    }

    /// Currently selected track, if any.
    pub fn selected_track(&self) -> Option<&str> {
        self.track_list_state
            .selected()
            .and_then(|i| self.tracks.get(i))
            .map(String::as_str)
    }

    fn load_data(&mut self) {
        self.initialized = true;
        match Explorer::from_config(&self.config) {
            Ok(explorer) => self.install_explorer(explorer),
            Err(e) => {
                tracing::warn!("Failed to load dataset: {e}");
                self.explorer = None;
                self.albums.clear();
                self.tracks.clear();
                self.album_view = None;
                self.timeline.clear();
                self.error_message = Some(format!("Failed to load dataset: {e}"));
            }
        }
    }

    fn install_explorer(&mut self, explorer: Explorer) {
        self.albums = explorer.dataset().albums().into_iter().map(String::from).collect();
        self.timeline = explorer.timeline();
        self.word_count_view = Some(explorer.word_counts(&self.config.default_words));
        self.search_view = None;
        self.explorer = Some(explorer);
        self.focus = Focus::Albums;
        self.album_list_state.select((!self.albums.is_empty()).then_some(0));
        self.on_album_changed();
    }

    /// Reload the dataset from disk.
    pub fn reload(&mut self) {
        self.load_data();
        if self.explorer.is_some() {
            self.status_message = Some(format!("Reloaded {} albums", self.albums.len()));
        }
    }

    fn on_album_changed(&mut self) {
        self.tracks = match (&self.explorer, self.selected_album()) {
            (Some(explorer), Some(album)) => explorer
                .dataset()
                .tracks(album)
                .map(|t| t.into_iter().map(String::from).collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        self.track_list_state.select((!self.tracks.is_empty()).then_some(0));
        self.on_track_changed();
    }

    fn on_track_changed(&mut self) {
        self.lyrics_scroll = 0;
        let result = match (&self.explorer, self.selected_album(), self.selected_track()) {
            (Some(explorer), Some(album), Some(track)) => Some(explorer.album_view(album, track)),
            _ => None,
        };
        match result {
            Some(Ok(view)) => self.album_view = Some(view),
            Some(Err(e)) => {
                self.album_view = None;
                self.error_message = Some(e.to_string());
            }
            None => self.album_view = None,
        }
    }

    /// Select an album/track pair by name.
    pub fn select(&mut self, album: &str, track: &str) {
        let Some(album_idx) = self.albums.iter().position(|a| a == album) else {
            self.error_message = Some(format!("Album not found: {album}"));
            return;
        };
        self.album_list_state.select(Some(album_idx));
        self.on_album_changed();
        if let Some(track_idx) = self.tracks.iter().position(|t| t == track) {
            self.track_list_state.select(Some(track_idx));
            self.on_track_changed();
        }
        self.focus = Focus::Tracks;
    }

    /// Run a keyword search and show the advanced tab.
    pub fn run_search(&mut self, query: &str) {
        if let Some(explorer) = &self.explorer {
            self.search_view = Some(explorer.search(query.trim()));
            self.mode = AppMode::Advanced;
        }
    }

    /// Count a word list across albums and show the advanced tab.
    pub fn run_word_counts(&mut self, input: &str) {
        if let Some(explorer) = &self.explorer {
            let view = explorer.word_counts(input);
            if view.words.is_empty() {
                self.status_message = Some("Enter at least one word, separated by commas".to_string());
                return;
            }
            self.word_count_view = Some(view);
            self.mode = AppMode::Advanced;
        }
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Same order as the modals are drawn: status, then error, then help
        if self.status_message.is_some() {
            if key.code == KeyCode::Esc {
                self.status_message = None;
            }
            return;
        }
        if self.error_message.is_some() {
            if key.code == KeyCode::Esc {
                self.error_message = None;
            }
            return;
        }
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        if self.input_mode != InputMode::Normal {
            self.handle_input_key(key);
            return;
        }

        if self.mode == AppMode::Splash {
            self.handle_splash_input();
            return;
        }

        match key.code {
            KeyCode::F(1) | KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char(':') => self.begin_input(InputMode::Command),
            KeyCode::Char('/') => self.begin_input(InputMode::Search),
            KeyCode::Char('w') => self.begin_input(InputMode::Words),
            KeyCode::Char('f') => self.begin_input(InputMode::Jump),
            KeyCode::Tab | KeyCode::BackTab => {
                self.mode = match self.mode {
                    AppMode::Album => AppMode::Advanced,
                    _ => AppMode::Album,
                };
            }
            _ if self.mode == AppMode::Album => self.handle_album_input(key),
            _ => {}
        }
    }

    fn handle_splash_input(&mut self) {
        if !self.initialized {
            self.load_data();
        }
        self.mode = AppMode::Album;
    }

    fn begin_input(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.input_buffer.clear();
        if mode == InputMode::Words {
            self.input_buffer = self
                .word_count_view
                .as_ref()
                .map(|view| view.words.join(","))
                .unwrap_or_default();
        }
        if mode == InputMode::Jump {
            self.jump_results.clear();
            self.jump_list_state.select(None);
        }
    }

    fn end_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.jump_results.clear();
        self.jump_list_state.select(None);
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.end_input(),
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.input_buffer);
                let mode = self.input_mode;
                let jump_choice = self
                    .jump_list_state
                    .selected()
                    .and_then(|i| self.jump_results.get(i))
                    .cloned();
                self.end_input();
                match mode {
                    InputMode::Command => self.execute_command(&input),
                    InputMode::Search => self.run_search(&input),
                    InputMode::Words => self.run_word_counts(&input),
                    InputMode::Jump => {
                        if let Some(hit) = jump_choice {
                            self.mode = AppMode::Album;
                            self.select(&hit.album, &hit.track);
                        }
                    }
                    InputMode::Normal => {}
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                self.update_jump_results();
            }
            KeyCode::Up if self.input_mode == InputMode::Jump => {
                if let Some(selected) = self.jump_list_state.selected() {
                    self.jump_list_state.select(Some(selected.saturating_sub(1)));
                }
            }
            KeyCode::Down if self.input_mode == InputMode::Jump => {
                let len = self.jump_results.len();
                if let Some(selected) = self.jump_list_state.selected().filter(|s| s + 1 < len) {
                    self.jump_list_state.select(Some(selected + 1));
                }
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
                self.update_jump_results();
            }
            _ => {}
        }
    }

    fn update_jump_results(&mut self) {
        if self.input_mode != InputMode::Jump {
            return;
        }
        self.jump_results = self
            .explorer
            .as_ref()
            .map(|e| e.jump_to_track(&self.input_buffer))
            .unwrap_or_default();
        self.jump_list_state
            .select((!self.jump_results.is_empty()).then_some(0));
    }

    /// Execute a `:` command.
    pub fn execute_command(&mut self, command: &str) {
        let command = command.trim();
        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(n, a)| (n, a.trim()));

        match name {
            "q" | "quit" => self.quit(),
            "h" | "help" => self.show_help = true,
            "reload" | "refresh" => self.reload(),
            "album" => self.mode = AppMode::Album,
            "advanced" => self.mode = AppMode::Advanced,
            "search" | "s" => self.run_search(arg),
            "words" | "w" => self.run_word_counts(arg),
            "yank" | "y" => self.copy_lyrics(),
            "" => {}
            other => self.error_message = Some(format!("Unknown command: {other}")),
        }
    }

    fn handle_album_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Esc => self.focus = Focus::Albums,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Enter => {
                if !self.tracks.is_empty() {
                    self.focus = Focus::Tracks;
                }
            }
            KeyCode::PageDown => self.lyrics_scroll = self.lyrics_scroll.saturating_add(10),
            KeyCode::PageUp => self.lyrics_scroll = self.lyrics_scroll.saturating_sub(10),
            KeyCode::Char('y') => self.copy_lyrics(),
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let (state, len) = match self.focus {
            Focus::Albums => (&mut self.album_list_state, self.albums.len()),
            Focus::Tracks => (&mut self.track_list_state, self.tracks.len()),
        };
        if len == 0 {
            return;
        }
        let current = state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        if next == current && state.selected().is_some() {
            return;
        }
        state.select(Some(next));
        match self.focus {
            Focus::Albums => self.on_album_changed(),
            Focus::Tracks => self.on_track_changed(),
        }
    }

    fn copy_lyrics(&mut self) {
        let Some(view) = &self.album_view else {
            return;
        };
        if view.lyrics.is_empty() {
            self.status_message = Some(format!("'{}' has no lyrics to copy", view.track));
            return;
        }
        match Clipboard::new().and_then(|mut cb| cb.set_text(view.lyrics.clone())) {
            Ok(()) => self.status_message = Some(format!("Copied lyrics of '{}'", view.track)),
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {e}");
                self.error_message = Some(format!("Clipboard unavailable: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::analysis::{LexiconScorer, StopwordSet};
    use crate::dataset::Dataset;
    use crate::types::LyricRecord;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn app() -> App {
        let dataset = Dataset::from_records(vec![
            LyricRecord::new("First Light", "Morning", "love and life in the morning"),
            LyricRecord::new("First Light", "Noon", "death comes at noon"),
            LyricRecord::new("Last Call", "Midnight", "love love love"),
        ]);
        let explorer = Explorer::new(dataset, StopwordSet::from_words(["and", "the", "in", "at"]), Box::new(LexiconScorer::default()));
        App::with_explorer(Config::default(), explorer)
    }

    #[test]
    fn test_initial_selection() {
        let app = app();
        assert_eq!(app.mode, AppMode::Album);
        assert_eq!(app.selected_album(), Some("First Light"));
        assert_eq!(app.selected_track(), Some("Morning"));
        assert_eq!(app.album_view.as_ref().unwrap().lyrics, "love and life in the morning");
        assert_eq!(app.timeline.len(), 2);
        assert_eq!(app.word_count_view.as_ref().unwrap().words, vec!["love", "death", "life"]);
    }

    #[test]
    fn test_navigation_updates_views() {
        let mut app = app();
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_album(), Some("Last Call"));
        assert_eq!(app.tracks, vec!["Midnight"]);
        assert_eq!(app.album_view.as_ref().unwrap().track, "Midnight");

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_album(), Some("Last Call"));

        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.focus, Focus::Tracks);
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.selected_track(), Some("Noon"));
        assert_eq!(app.album_view.as_ref().unwrap().lyrics, "death comes at noon");
    }

    #[test]
    fn test_search_prompt() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Search);
        type_text(&mut app, "LOVE");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.mode, AppMode::Advanced);
        let view = app.search_view.as_ref().unwrap();
        assert_eq!(view.hits.len(), 2);
    }

    #[test]
    fn test_word_list_command() {
        let mut app = app();
        app.execute_command("words noon, ,midnight");
        let view = app.word_count_view.as_ref().unwrap();
        assert_eq!(view.words, vec!["noon", "midnight"]);
        assert_eq!(view.matrix.cells, vec![vec![1, 0], vec![0, 0]]);
    }

    #[test]
    fn test_empty_word_list_keeps_previous_view() {
        let mut app = app();
        app.run_word_counts(" , ");
        assert!(app.status_message.is_some());
        assert_eq!(app.word_count_view.as_ref().unwrap().words.len(), 3);
    }

    #[test]
    fn test_jump_to_track() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('f')));
        type_text(&mut app, "midn");
        assert_eq!(app.jump_results, vec![SearchHit::new("Last Call", "Midnight")]);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.selected_album(), Some("Last Call"));
        assert_eq!(app.selected_track(), Some("Midnight"));
        assert_eq!(app.focus, Focus::Tracks);
    }

    #[test]
    fn test_unknown_command_shows_error_and_esc_dismisses() {
        let mut app = app();
        app.execute_command("dance");
        assert!(app.error_message.as_ref().unwrap().contains("dance"));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_album(), Some("First Light"));
        app.handle_key(key(KeyCode::Esc));
        assert!(app.error_message.is_none());
    }

    #[test]
    fn test_esc_dismisses_the_visible_modal_first() {
        let mut app = app();
        app.error_message = Some("broken".to_string());
        app.status_message = Some("copied".to_string());
        app.handle_key(key(KeyCode::Esc));
        assert!(app.status_message.is_none());
        assert_eq!(app.error_message.as_deref(), Some("broken"));
        app.handle_key(key(KeyCode::Esc));
        assert!(app.error_message.is_none());

        // help sits under the error modal
        app.show_help = true;
        app.error_message = Some("broken".to_string());
        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.show_help);
        app.handle_key(key(KeyCode::Esc));
        assert!(app.error_message.is_none());
        assert!(app.show_help);
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn test_tab_and_quit() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.mode, AppMode::Advanced);
        app.handle_key(key(KeyCode::Char(':')));
        type_text(&mut app, "q");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.should_quit());
    }

    #[test]
    fn test_load_failure_is_reported_not_fatal() {
        let mut config = Config::default();
        config.dataset_path = "/tmp/nonexistent_lyrics_explorer_app.csv".into();
        let mut app = App::new(config);
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.mode, AppMode::Album);
        assert!(app.explorer.is_none());
        assert!(app.error_message.as_ref().unwrap().contains("Failed to load dataset"));
    }
}
