//! Application state for the TUI

use coadmin_core::{EditorError, Field, Shell, StaticCatalog};

/// Which overlay, if any, owns the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Browsing the company table
    Normal,
    /// Add/edit dialog open
    Editor,
    /// Waiting for y/n on a delete
    ConfirmDelete,
}

/// Focused control inside the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorFocus {
    #[default]
    Name,
    Picker,
}

pub struct App {
    pub shell: Shell<StaticCatalog>,
    pub focus: EditorFocus,
    /// Highlighted row in the open picker
    pub picker_cursor: usize,
    pub confirm_delete: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(shell: Shell<StaticCatalog>) -> Self {
        Self {
            shell,
            focus: EditorFocus::default(),
            picker_cursor: 0,
            confirm_delete: false,
            should_quit: false,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.shell.editor().is_open() {
            Mode::Editor
        } else if self.confirm_delete {
            Mode::ConfirmDelete
        } else {
            Mode::Normal
        }
    }

    pub fn open_add(&mut self) {
        self.shell.clear_status();
        self.shell.begin_add();
        self.reset_dialog();
    }

    pub fn open_edit(&mut self) {
        self.shell.clear_status();
        if self.shell.begin_edit() {
            self.reset_dialog();
        } else {
            self.shell.set_status("No company selected");
        }
    }

    pub fn cancel_dialog(&mut self) {
        self.shell.cancel_editor();
        self.reset_dialog();
    }

    pub fn request_delete(&mut self) {
        if self.shell.selected().is_some() {
            self.confirm_delete = true;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = false;
    }

    pub fn type_char(&mut self, c: char) -> Result<(), EditorError> {
        let mut name = self.draft_name();
        name.push(c);
        self.shell.editor_mut().set_name(name)
    }

    pub fn backspace(&mut self) -> Result<(), EditorError> {
        let mut name = self.draft_name();
        name.pop();
        self.shell.editor_mut().set_name(name)
    }

    /// Move focus to the other control, blurring the one being left
    pub fn switch_focus(&mut self) -> Result<(), EditorError> {
        match self.focus {
            EditorFocus::Name => {
                self.shell.editor_mut().blur(Field::Name)?;
                self.focus = EditorFocus::Picker;
            }
            EditorFocus::Picker => {
                if self.picker_open() {
                    self.shell.editor_mut().toggle_picker()?;
                }
                self.shell.editor_mut().blur(Field::Integrations)?;
                self.focus = EditorFocus::Name;
            }
        }
        Ok(())
    }

    pub fn picker_open(&self) -> bool {
        self.shell
            .editor()
            .draft()
            .is_some_and(|draft| draft.picker_open())
    }

    pub fn toggle_picker(&mut self) -> Result<(), EditorError> {
        self.shell.editor_mut().toggle_picker()?;
        Ok(())
    }

    pub fn picker_next(&mut self) {
        let len = self.picker_len();
        if len > 0 {
            self.picker_cursor = (self.picker_cursor + 1) % len;
        }
    }

    pub fn picker_prev(&mut self) {
        let len = self.picker_len();
        if len > 0 {
            self.picker_cursor = self.picker_cursor.checked_sub(1).unwrap_or(len - 1);
        }
    }

    /// Select or deselect the highlighted picker row.
    ///
    /// Rows past the catalog hold the draft's own entries, so deselecting
    /// one removes it and the cursor is pulled back into range.
    pub fn toggle_highlighted(&mut self) -> Result<(), EditorError> {
        let entry = self
            .shell
            .editor()
            .picker_entries()
            .get(self.picker_cursor)
            .cloned();
        if let Some(entry) = entry {
            self.shell.editor_mut().toggle_integration(&entry)?;
        }
        self.picker_cursor = self.picker_cursor.min(self.picker_len().saturating_sub(1));
        Ok(())
    }

    fn draft_name(&self) -> String {
        self.shell
            .editor()
            .draft()
            .map(|draft| draft.name().to_string())
            .unwrap_or_default()
    }

    fn picker_len(&self) -> usize {
        self.shell.editor().picker_entries().len()
    }

    fn reset_dialog(&mut self) {
        self.focus = EditorFocus::Name;
        self.picker_cursor = 0;
    }
}
