//! Company and integration records as exchanged with the REST backend.

use serde::{Deserialize, Serialize};

/// A selectable third-party service, identified by name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Integration {
    #[serde(rename = "integrationName", default)]
    pub name: String,

    /// Logo URL
    #[serde(rename = "integrationLogo", default)]
    pub logo_ref: String,
}

impl Integration {
    pub fn new(name: impl Into<String>, logo_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logo_ref: logo_ref.into(),
        }
    }

    /// Both name and logo are populated
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.logo_ref.is_empty()
    }
}

/// The managed record: a company and the integrations it uses
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Company {
    /// Assigned by the backend once saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(rename = "companyName")]
    pub name: String,

    /// Unique by integration name, kept in selection order
    #[serde(default)]
    pub integrations: Vec<Integration>,
}

impl Company {
    /// Empty draft used by "add"
    pub fn draft() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            integrations: Vec::new(),
        }
    }

    /// Backend id if this record has been saved. Id 0 is never assigned by
    /// the backend and counts as unsaved.
    pub fn saved_id(&self) -> Option<u64> {
        self.id.filter(|&id| id != 0)
    }

    /// Whether the backend has assigned an id yet
    pub fn is_persisted(&self) -> bool {
        self.saved_id().is_some()
    }

    pub fn has_integration(&self, name: &str) -> bool {
        self.integrations.iter().any(|i| i.name == name)
    }

    pub fn integration_names(&self) -> Vec<&str> {
        self.integrations.iter().map(|i| i.name.as_str()).collect()
    }
}
