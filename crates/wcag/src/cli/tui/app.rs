//! Application state for the TUI

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;
use wcag_core::store::{default_export_name_today, export_progress};
use wcag_core::{
    ChecklistSession, CriterionId, Effect, Key, Level, Modifiers, Preferences, PreferencesStore,
    ProgressStore, Theme,
};

use crate::cli::error::HelpfulError;
use crate::cli::progress::import_into;

/// Where key presses go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFocus {
    /// Typing edits the term; navigation keys walk the matches
    Search,
    /// Keys act on the selected criterion
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Export,
    Import,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            PromptKind::Export => " Export progress to ",
            PromptKind::Import => " Import progress from ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrompt {
    pub kind: PromptKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

pub struct App {
    pub running: bool,
    pub session: ChecklistSession,
    pub focus: InputFocus,
    pub search_input: String,
    /// Criterion row the list cursor (and keyboard focus) is on
    pub selected: Option<CriterionId>,
    pub search_message: String,
    pub theme: Theme,
    pub show_help: bool,
    pub prompt: Option<PathPrompt>,
    pub status: Option<StatusMessage>,
    progress_store: ProgressStore,
    preferences_store: PreferencesStore,
}

impl App {
    pub fn new(
        session: ChecklistSession,
        progress_store: ProgressStore,
        preferences_store: PreferencesStore,
        theme: Theme,
    ) -> Self {
        let selected = session.visible_criteria().next().map(|(_, c)| c.id.clone());
        Self {
            running: true,
            session,
            focus: InputFocus::Search,
            search_input: String::new(),
            selected,
            search_message: String::new(),
            theme,
            show_help: false,
            prompt: None,
            status: None,
            progress_store,
            preferences_store,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }
        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1) | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }
        match self.focus {
            InputFocus::Search => self.handle_search_key(key),
            InputFocus::List => self.handle_list_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Esc => {
                if self.search_input.is_empty() {
                    self.focus = InputFocus::List;
                } else {
                    self.search_input.clear();
                    self.term_changed();
                }
            }
            KeyCode::Tab => self.focus = InputFocus::List,
            KeyCode::F(1) => self.show_help = true,
            KeyCode::Backspace => {
                if self.search_input.pop().is_some() {
                    self.term_changed();
                }
            }
            KeyCode::Char(c) if plain => {
                self.search_input.push(c);
                self.term_changed();
            }
            code => {
                let effects = self
                    .session
                    .on_search_key(core_key(code), core_modifiers(key.modifiers));
                self.apply_effects(effects);
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('/') | KeyCode::Tab => self.focus = InputFocus::Search,
            KeyCode::Char('?') | KeyCode::F(1) => self.show_help = true,
            KeyCode::Esc => self.status = None,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-(self.session.page_size() as isize)),
            KeyCode::PageDown => self.move_selection(self.session.page_size() as isize),
            KeyCode::Home => self.move_selection(isize::MIN),
            KeyCode::End => self.move_selection(isize::MAX),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(id) = self.selected.clone() {
                    let effects = self.session.toggle_checked(&id);
                    self.apply_effects(effects);
                }
            }
            KeyCode::Char('1') => self.toggle_filter(Level::A),
            KeyCode::Char('2') => self.toggle_filter(Level::AA),
            KeyCode::Char('3') => self.toggle_filter(Level::AAA),
            KeyCode::Char('a') => {
                let effects = self.session.check_all_visible();
                self.apply_effects(effects);
                self.set_status("Checked all visible criteria", false);
            }
            KeyCode::Char('u') => {
                let effects = self.session.uncheck_all();
                self.apply_effects(effects);
                self.set_status("Unchecked all criteria", false);
            }
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Char('e') => {
                self.prompt = Some(PathPrompt {
                    kind: PromptKind::Export,
                    value: default_export_name_today(),
                });
            }
            KeyCode::Char('i') => {
                self.prompt = Some(PathPrompt {
                    kind: PromptKind::Import,
                    value: String::new(),
                });
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Backspace => {
                prompt.value.pop();
            }
            KeyCode::Char(c) => prompt.value.push(c),
            KeyCode::Enter => {
                let kind = prompt.kind;
                let path = PathBuf::from(prompt.value.trim());
                self.prompt = None;
                if path.as_os_str().is_empty() {
                    return;
                }
                match kind {
                    PromptKind::Export => self.export_to(path),
                    PromptKind::Import => self.import_from(path),
                }
            }
            _ => {}
        }
    }

    fn term_changed(&mut self) {
        let effects = self.session.on_search_term_changed(&self.search_input);
        self.apply_effects(effects);
    }

    fn toggle_filter(&mut self, level: Level) {
        let effects = self.session.on_filter_toggled(level);
        self.apply_effects(effects);
    }

    /// Move the list cursor over visible criteria, clamped at both ends.
    fn move_selection(&mut self, delta: isize) {
        let ids: Vec<CriterionId> = self
            .session
            .visible_criteria()
            .map(|(_, c)| c.id.clone())
            .collect();
        if ids.is_empty() {
            return;
        }
        let current = self
            .selected
            .as_ref()
            .and_then(|selected| ids.iter().position(|id| id == selected));
        let target = match current {
            Some(idx) => (idx as isize).saturating_add(delta).clamp(0, ids.len() as isize - 1) as usize,
            None if delta < 0 => ids.len() - 1,
            None => 0,
        };
        self.selected = Some(ids[target].clone());
    }

    pub fn apply_effects(&mut self, effects: Vec<Effect>) {
        let mut checks_changed = false;
        for effect in effects {
            match effect {
                Effect::SearchInfo(info) => self.search_message = info.message(),
                Effect::ScrollIntoView(id) | Effect::Focus(id) => self.selected = Some(id),
                Effect::CurrentChanged { previous, current } => {
                    tracing::debug!(?previous, ?current, "Current match changed");
                }
                Effect::CheckedChanged { .. } => checks_changed = true,
                Effect::ProgressChanged(progress) => {
                    tracing::debug!(progress = %progress.label(), "Progress changed");
                }
            }
        }
        if checks_changed {
            self.save_progress();
        }
    }

    fn save_progress(&mut self) {
        if let Err(err) = self.progress_store.save(&self.session.progress_map()) {
            tracing::warn!(error = %err, "Failed to save progress");
            self.set_status(format!("Could not save progress: {}", err), true);
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        match self.preferences_store.save(&Preferences { theme: self.theme }) {
            Ok(()) => self.set_status(format!("Theme: {}", self.theme), false),
            Err(err) => self.set_status(format!("Could not save theme: {}", err), true),
        }
    }

    fn export_to(&mut self, path: PathBuf) {
        match export_progress(&path, &self.session.progress_map()) {
            Ok(()) => self.set_status(format!("Exported progress to {}", path.display()), false),
            Err(err) => self.set_status(format!("Export failed: {}", err), true),
        }
    }

    fn import_from(&mut self, path: PathBuf) {
        match import_into(&mut self.session, &path) {
            Ok(outcome) => {
                let applied = outcome.applied;
                let skipped = outcome.skipped.len();
                self.apply_effects(outcome.effects);
                // Unchanged entries emit no check effect; persist the import anyway
                self.save_progress();
                let message = if skipped == 0 {
                    format!("Imported progress, {} changed", applied)
                } else {
                    format!("Imported progress, {} changed, skipped {} unknown", applied, skipped)
                };
                self.set_status(message, false);
            }
            Err(err) => {
                let message = err
                    .downcast_ref::<HelpfulError>()
                    .map(|helpful| helpful.message.clone())
                    .unwrap_or_else(|| format!("{:#}", err));
                self.set_status(message, true);
            }
        }
    }

    fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        let text = text.into();
        if is_error {
            tracing::warn!(status = %text, "TUI error");
        } else {
            tracing::info!(status = %text, "TUI status");
        }
        self.status = Some(StatusMessage { text, is_error });
    }
}

fn core_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Enter => Key::Enter,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

fn core_modifiers(modifiers: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: modifiers.contains(KeyModifiers::SHIFT),
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wcag_core::ChecklistDocument;

    fn test_app(dir: &TempDir) -> App {
        let session = ChecklistSession::new(ChecklistDocument::builtin().unwrap());
        App::new(
            session,
            ProgressStore::in_dir(dir.path()),
            PreferencesStore::in_dir(dir.path()),
            Theme::Light,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_updates_search_info() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        type_text(&mut app, "contrast");
        assert_eq!(app.search_message, "Found: 3 results");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.search_message, "");
        assert!(app.search_input.is_empty());
    }

    #[test]
    fn test_enter_walks_matches_and_selects_row() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        type_text(&mut app, "contrast");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.selected, Some(CriterionId::new("sc-1-4-3")));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.selected, Some(CriterionId::new("sc-1-4-6")));
        assert_eq!(app.focus, InputFocus::Search);
    }

    #[test]
    fn test_modified_enter_walks_back_and_accepts() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        type_text(&mut app, "contrast");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        assert_eq!(app.selected, Some(CriterionId::new("sc-1-4-11")));

        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL));
        assert_eq!(app.session.progress().checked, 1);
        assert_eq!(app.selected, Some(CriterionId::new("sc-1-4-11")));
    }

    #[test]
    fn test_ctrl_t_toggles_and_saves() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        type_text(&mut app, "contrast");
        press(&mut app, KeyCode::Down);
        app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
        assert_eq!(app.search_input, "contrast");

        let saved = ProgressStore::in_dir(dir.path()).load().unwrap().unwrap();
        assert_eq!(saved.get("sc-1-4-3"), Some(&true));
    }

    #[test]
    fn test_list_keys_toggle_filters_and_checks() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, InputFocus::List);

        press(&mut app, KeyCode::Char('3'));
        assert!(!app.session.filters().is_enabled(Level::AAA));
        assert_eq!(app.session.visible_criteria().count(), 50);

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.session.progress().checked, 1);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, Some(CriterionId::new("sc-1-2-1")));
    }

    #[test]
    fn test_theme_toggle_persists() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme, Theme::Dark);
        let saved = PreferencesStore::in_dir(dir.path()).load().unwrap();
        assert_eq!(saved.theme, Theme::Dark);
    }

    #[test]
    fn test_malformed_import_sets_error_status() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[[").unwrap();
        let mut app = test_app(&dir);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, path.to_str().unwrap());
        press(&mut app, KeyCode::Enter);
        let status = app.status.clone().unwrap();
        assert!(status.is_error);
        assert!(status.text.starts_with("Could not import progress"));
        assert!(app.prompt.is_none());
    }

    #[test]
    fn test_export_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let mut app = test_app(&dir);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('e'));
        app.prompt.as_mut().unwrap().value = path.to_string_lossy().to_string();
        press(&mut app, KeyCode::Enter);
        assert!(path.exists());
        assert!(!app.status.unwrap().is_error);
    }

    #[test]
    fn test_ctrl_c_quits_from_search() {
        let dir = TempDir::new().unwrap();
        let mut app = test_app(&dir);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }
}
