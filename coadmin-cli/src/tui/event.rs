//! Event handling for the TUI

use std::time::Duration;

use coadmin_core::EditorError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, EditorFocus, Mode};

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling a key event; the run loop performs the backend calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    Continue,
    Quit,
    /// Reload the company list
    Refresh,
    /// Submit the open dialog
    Submit,
    /// Delete the selected company (already confirmed)
    Delete,
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return HandleResult::Quit;
    }

    match app.mode() {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Editor => handle_editor_mode(app, key),
        Mode::ConfirmDelete => handle_confirm_delete(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Char('q') => HandleResult::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            app.shell.select_next();
            HandleResult::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.shell.select_prev();
            HandleResult::Continue
        }
        KeyCode::Char('a') => {
            app.open_add();
            HandleResult::Continue
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            app.open_edit();
            HandleResult::Continue
        }
        KeyCode::Char('d') => {
            app.request_delete();
            HandleResult::Continue
        }
        KeyCode::Char('r') => HandleResult::Refresh,
        _ => HandleResult::Continue,
    }
}

fn handle_confirm_delete(app: &mut App, key: KeyEvent) -> HandleResult {
    app.cancel_delete();
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => HandleResult::Delete,
        _ => HandleResult::Continue,
    }
}

fn handle_editor_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') => HandleResult::Submit,
            _ => HandleResult::Continue,
        };
    }

    let result = match key.code {
        KeyCode::Esc if app.picker_open() => app.toggle_picker(),
        KeyCode::Esc => {
            app.cancel_dialog();
            Ok(())
        }
        KeyCode::Tab | KeyCode::BackTab => app.switch_focus(),
        _ => match app.focus {
            EditorFocus::Name => match key.code {
                KeyCode::Enter => return HandleResult::Submit,
                KeyCode::Backspace => app.backspace(),
                KeyCode::Char(c) => app.type_char(c),
                _ => Ok(()),
            },
            EditorFocus::Picker => handle_picker(app, key),
        },
    };

    if let Err(e) = result {
        app.shell.set_status(e.to_string());
    }
    HandleResult::Continue
}

fn handle_picker(app: &mut App, key: KeyEvent) -> Result<(), EditorError> {
    if !app.picker_open() {
        return match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => app.toggle_picker(),
            _ => Ok(()),
        };
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.picker_next();
            Ok(())
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.picker_prev();
            Ok(())
        }
        KeyCode::Char(' ') => app.toggle_highlighted(),
        KeyCode::Enter => app.toggle_picker(),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coadmin_core::validation::validate;
    use coadmin_core::{Company, Field, Integration, Shell, ValidationError};

    fn press(app: &mut App, code: KeyCode) -> HandleResult {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(app: &mut App, c: char) -> HandleResult {
        handle_key(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn app() -> App {
        App::new(Shell::default())
    }

    #[test]
    fn test_add_dialog_flow() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('a')), HandleResult::Continue);
        assert_eq!(app.mode(), Mode::Editor);

        for c in "Acme".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        // 'q' is text while the name field has focus
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Backspace);

        assert_eq!(app.shell.editor().draft().unwrap().name(), "Acme");
        assert_eq!(ctrl(&mut app, 's'), HandleResult::Submit);
        assert_eq!(press(&mut app, KeyCode::Enter), HandleResult::Submit);
    }

    #[test]
    fn test_picker_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, EditorFocus::Picker);

        press(&mut app, KeyCode::Char(' '));
        assert!(app.picker_open());

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.shell.editor().draft().unwrap().is_selected("Jira"));

        // Esc closes the picker before it cancels the dialog
        press(&mut app, KeyCode::Esc);
        assert!(!app.picker_open());
        assert_eq!(app.mode(), Mode::Editor);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode(), Mode::Normal);
    }

    #[test]
    fn test_entries_outside_catalog_can_be_removed() {
        let mut app = app();
        app.shell.editor_mut().open(Company {
            id: Some(1),
            name: "Acme".to_string(),
            integrations: vec![
                Integration::new("Slack", "slack.png"),
                Integration::new("", "x.png"),
            ],
        });

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        // Up from the first row wraps to the last: the unnamed entry
        press(&mut app, KeyCode::Char('k'));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char(' '));

        let draft = app.shell.editor().draft().unwrap();
        assert!(draft.integrations().is_empty());
        assert!(validate(draft.company()).is_empty());
        assert_eq!(ctrl(&mut app, 's'), HandleResult::Submit);
    }

    #[test]
    fn test_tab_blurs_name() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Tab);

        let draft = app.shell.editor().draft().unwrap();
        assert_eq!(draft.visible_error(Field::Name), Some(ValidationError::NameRequired));
    }

    #[test]
    fn test_normal_mode_keys() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('q')), HandleResult::Quit);
        assert_eq!(press(&mut app, KeyCode::Char('r')), HandleResult::Refresh);
        assert_eq!(ctrl(&mut app, 'c'), HandleResult::Quit);
    }

    #[test]
    fn test_delete_without_rows_is_ignored() {
        let mut app = app();
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.mode(), Mode::Normal);
    }

    #[test]
    fn test_confirm_delete_answers() {
        let mut app = app();
        app.confirm_delete = true;
        assert_eq!(press(&mut app, KeyCode::Char('n')), HandleResult::Continue);
        assert_eq!(app.mode(), Mode::Normal);

        app.confirm_delete = true;
        assert_eq!(press(&mut app, KeyCode::Char('y')), HandleResult::Delete);
        assert_eq!(app.mode(), Mode::Normal);
    }
}
