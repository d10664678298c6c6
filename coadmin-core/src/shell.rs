//! List/detail shell: the loaded company list plus the editor used to add
//! and edit rows. All persistence goes through a [`CompanyApi`].

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, StaticCatalog};
use crate::client::CompanyApi;
use crate::editor::RecordEditor;
use crate::error::{ApiError, ShellError};
use crate::model::Company;

/// Company list state shared by the TUI and CLI
#[derive(Debug)]
pub struct Shell<C = StaticCatalog> {
    companies: Vec<Company>,
    selected: usize,
    editor: RecordEditor<C>,
    status: Option<String>,
}

impl Default for Shell<StaticCatalog> {
    fn default() -> Self {
        Self::new(RecordEditor::default())
    }
}

impl<C: Catalog> Shell<C> {
    pub fn new(editor: RecordEditor<C>) -> Self {
        Self {
            companies: Vec::new(),
            selected: 0,
            editor,
            status: None,
        }
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&Company> {
        self.companies.get(self.selected)
    }

    pub fn editor(&self) -> &RecordEditor<C> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut RecordEditor<C> {
        &mut self.editor
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn select_next(&mut self) {
        if !self.companies.is_empty() {
            self.selected = (self.selected + 1) % self.companies.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.companies.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.companies.len() - 1);
        }
    }

    /// Select the row with this id; false when it is not listed
    pub fn select_id(&mut self, id: u64) -> bool {
        match self.companies.iter().position(|c| c.id == Some(id)) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    /// Reload the list from the backend, keeping the selection in range
    pub async fn refresh(&mut self, api: &dyn CompanyApi) -> Result<(), ApiError> {
        match api.list().await {
            Ok(companies) => {
                info!(count = companies.len(), "companies loaded");
                self.companies = companies;
                if self.selected >= self.companies.len() {
                    self.selected = self.companies.len().saturating_sub(1);
                }
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load companies");
                self.set_status(format!("Failed to load companies: {}", e));
                Err(e)
            }
        }
    }

    /// Open the editor on an empty draft
    pub fn begin_add(&mut self) {
        self.editor.open(Company::draft());
    }

    /// Open the editor on the selected company; false when nothing is selected
    pub fn begin_edit(&mut self) -> bool {
        match self.companies.get(self.selected) {
            Some(company) => {
                self.editor.open(company.clone());
                true
            }
            None => false,
        }
    }

    pub fn cancel_editor(&mut self) {
        self.editor.close();
    }

    /// Submit the editor and persist the result.
    ///
    /// Validation errors leave the editor open with messages. A backend
    /// failure reopens the editor on the submitted values and records the
    /// error as the status message.
    ///
    /// The editor's save callback only logs; the request is made with the
    /// company `submit` returns so its outcome can be awaited here.
    pub async fn submit_editor(&mut self, api: &dyn CompanyApi) -> Result<Company, ShellError> {
        let company = self.editor.submit(|company| {
            info!(id = ?company.id, name = %company.name, "saving company");
        })?;

        let saved = match company.saved_id() {
            Some(_) => api.update(&company).await,
            None => api.create(&company).await,
        };

        match saved {
            Ok(echoed) => {
                let company = echoed.unwrap_or(company);
                self.set_status(format!("Saved {}", company.name));
                // A failed reload leaves its own status message
                if self.refresh(api).await.is_ok() {
                    self.select_company(&company);
                }
                Ok(company)
            }
            Err(e) => {
                warn!(error = %e, "failed to save company");
                self.set_status(format!("Save failed: {}", e));
                self.editor.open(company);
                Err(e.into())
            }
        }
    }

    /// Delete the selected company. Unsaved rows (no id, or id 0) are skipped.
    pub async fn delete_selected(&mut self, api: &dyn CompanyApi) -> Result<Option<u64>, ShellError> {
        let Some(company) = self.selected() else {
            return Ok(None);
        };
        let Some(id) = company.saved_id() else {
            return Ok(None);
        };
        let name = company.name.clone();

        if let Err(e) = api.delete(id).await {
            warn!(id, error = %e, "failed to delete company");
            self.set_status(format!("Delete failed: {}", e));
            return Err(e.into());
        }

        info!(id, name = %name, "company deleted");
        self.set_status(format!("Deleted {}", name));
        if let Err(e) = self.refresh(api).await {
            debug!(error = %e, "reload after delete failed");
        }
        Ok(Some(id))
    }

    /// Move the selection to `company` (by id, then by name) if listed
    fn select_company(&mut self, company: &Company) {
        let position = match company.id {
            Some(id) => self.companies.iter().position(|c| c.id == Some(id)),
            None => self.companies.iter().rposition(|c| c.name == company.name),
        };
        if let Some(index) = position {
            self.selected = index;
        }
    }
}
