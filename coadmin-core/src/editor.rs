//! Record editor for a single company.
//!
//! The editor is either closed or holds one [`Draft`]. Every `open` builds a
//! fresh draft from the record passed in, so nothing carries over between an
//! add and a following edit. All operations are synchronous; persistence is
//! left to the save callback handed to [`RecordEditor::submit`].
//!
//! ```text
//! Closed --open--> Open(draft) --submit ok--> Closed (save called once)
//!                      |   ^
//!                      +---+ submit failed: errors shown, save not called
//! ```

use std::collections::BTreeSet;

use tracing::debug;

use crate::catalog::{Catalog, StaticCatalog};
use crate::error::EditorError;
use crate::model::{Company, Integration};
use crate::validation::{self, Field, ValidationError, ValidationErrors};

/// Outcome of [`RecordEditor::toggle_integration`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Selected,
    Deselected,
}

/// Working copy of a company plus its form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    company: Company,
    errors: ValidationErrors,
    touched: BTreeSet<Field>,
    picker_open: bool,
}

impl Draft {
    fn new(company: Company) -> Self {
        Self {
            company,
            errors: ValidationErrors::default(),
            touched: BTreeSet::new(),
            picker_open: false,
        }
    }

    pub fn company(&self) -> &Company {
        &self.company
    }

    pub fn name(&self) -> &str {
        &self.company.name
    }

    pub fn integrations(&self) -> &[Integration] {
        &self.company.integrations
    }

    /// Latest validation results, including fields not yet touched
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Error to display for `field`: only once the field has been touched
    pub fn visible_error(&self, field: Field) -> Option<ValidationError> {
        if self.is_touched(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    pub fn picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.company.has_integration(name)
    }

    /// Editing an existing record rather than adding one
    pub fn is_editing(&self) -> bool {
        self.company.is_persisted()
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Company"
        } else {
            "Add Company"
        }
    }

    /// Text shown on the closed picker button
    pub fn picker_label(&self) -> String {
        if self.company.integrations.is_empty() {
            "Select Integrations".to_string()
        } else {
            self.company.integration_names().join(", ")
        }
    }

    fn revalidate(&mut self) {
        self.errors = validation::validate(&self.company);
    }

    /// Re-run validation after a change, once the user has seen any field
    fn revalidate_if_touched(&mut self) {
        if !self.touched.is_empty() {
            self.revalidate();
        }
    }
}

/// Editor for one company at a time
#[derive(Debug)]
pub struct RecordEditor<C = StaticCatalog> {
    catalog: C,
    draft: Option<Draft>,
}

impl Default for RecordEditor<StaticCatalog> {
    fn default() -> Self {
        Self::new(StaticCatalog::builtin())
    }
}

impl<C: Catalog> RecordEditor<C> {
    /// Create a closed editor drawing selections from `catalog`
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            draft: None,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    /// Start editing `initial`, replacing any previous draft
    pub fn open(&mut self, initial: Company) {
        debug!(id = ?initial.id, name = %initial.name, "opening editor");
        self.draft = Some(Draft::new(initial));
    }

    /// Discard the draft
    pub fn close(&mut self) {
        if self.draft.take().is_some() {
            debug!("editor closed");
        }
    }

    pub fn set_name(&mut self, value: impl Into<String>) -> Result<(), EditorError> {
        let draft = self.draft_mut()?;
        draft.company.name = value.into();
        draft.revalidate_if_touched();
        Ok(())
    }

    /// Mark `field` touched and validate, as when focus leaves it
    pub fn blur(&mut self, field: Field) -> Result<(), EditorError> {
        let draft = self.draft_mut()?;
        draft.touched.insert(field);
        draft.revalidate();
        Ok(())
    }

    /// Deselect `integration` by name if selected, otherwise select it.
    ///
    /// Selection appends the catalog's entry and fails for names the catalog
    /// does not offer. Deselection always succeeds.
    pub fn toggle_integration(&mut self, integration: &Integration) -> Result<Toggled, EditorError> {
        let draft = self.draft.as_mut().ok_or(EditorError::Closed)?;

        let toggled = if draft.company.has_integration(&integration.name) {
            draft
                .company
                .integrations
                .retain(|i| i.name != integration.name);
            Toggled::Deselected
        } else {
            let entry = self
                .catalog
                .find(&integration.name)
                .ok_or_else(|| EditorError::UnknownIntegration(integration.name.clone()))?;
            draft.company.integrations.push(entry.clone());
            Toggled::Selected
        };

        draft.revalidate_if_touched();
        debug!(integration = %integration.name, ?toggled, "integration toggled");
        Ok(toggled)
    }

    /// Rows for the integrations picker: the catalog, then draft entries the
    /// catalog does not offer so they can still be deselected
    pub fn picker_entries(&self) -> Vec<Integration> {
        let mut entries = self.catalog.list_available().to_vec();
        if let Some(draft) = &self.draft {
            for integration in &draft.company.integrations {
                if !entries.iter().any(|e| e.name == integration.name) {
                    entries.push(integration.clone());
                }
            }
        }
        entries
    }

    /// Open or close the integrations picker; returns the new state
    pub fn toggle_picker(&mut self) -> Result<bool, EditorError> {
        let draft = self.draft_mut()?;
        draft.picker_open = !draft.picker_open;
        Ok(draft.picker_open)
    }

    /// Validate the draft and hand it to `save`.
    ///
    /// On success `save` is called exactly once, the editor closes and the
    /// saved company is returned. On failure every field is marked touched,
    /// the editor stays open and `save` is not called.
    pub fn submit<F>(&mut self, save: F) -> Result<Company, EditorError>
    where
        F: FnOnce(Company),
    {
        let draft = self.draft_mut()?;
        draft.revalidate();

        if !draft.errors.is_empty() {
            draft.touched.extend(Field::ALL);
            debug!(errors = %draft.errors, "submit rejected");
            return Err(EditorError::Invalid(draft.errors.clone()));
        }

        let mut company = draft.company.clone();
        company.name = company.name.trim().to_string();
        // Records loaded with repeated names are saved with the first of each
        let mut seen = BTreeSet::new();
        company.integrations.retain(|i| seen.insert(i.name.clone()));

        self.draft = None;
        debug!(id = ?company.id, name = %company.name, "submit accepted");
        save(company.clone());
        Ok(company)
    }

    fn draft_mut(&mut self) -> Result<&mut Draft, EditorError> {
        self.draft.as_mut().ok_or(EditorError::Closed)
    }
}
