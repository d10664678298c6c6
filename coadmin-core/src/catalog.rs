//! The fixed set of integrations a company can be linked to.

use std::collections::HashSet;

use crate::error::CatalogError;
use crate::model::Integration;

const LOGO_BASE: &str = "https://s3.us-west-2.amazonaws.com/cdn.saasconsole.com/static/img/integrations";

/// Built-in catalog entries: (name, logo file)
const BUILTIN: &[(&str, &str)] = &[
    ("Google Cloud", "google-cloud.png"),
    ("Bitbucket", "bitbucket.png"),
    ("Jira", "jira.png"),
    ("Trello", "trello.png"),
    ("Oracle", "oracle-logo.png"),
    ("Microsoft", "microsoft-office.png"),
];

/// Read-only provider of available integrations
pub trait Catalog {
    /// All integrations, in display order
    fn list_available(&self) -> &[Integration];

    fn find(&self, name: &str) -> Option<&Integration> {
        self.list_available().iter().find(|i| i.name == name)
    }

    fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

/// Catalog fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCatalog {
    entries: Vec<Integration>,
}

impl StaticCatalog {
    /// Build from explicit entries; names must be unique and entries complete
    pub fn new(entries: Vec<Integration>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            if !entry.is_complete() {
                return Err(CatalogError::Incomplete { index });
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(CatalogError::Duplicate {
                    name: entry.name.clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// The six integrations shipped with the app
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(name, file)| Integration::new(*name, format!("{}/{}", LOGO_BASE, file)))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog for StaticCatalog {
    fn list_available(&self) -> &[Integration] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order_and_logos() {
        let catalog = StaticCatalog::builtin();
        let names: Vec<_> = catalog
            .list_available()
            .iter()
            .map(|i| i.name.as_str())
            .collect();

        assert_eq!(
            names,
            vec!["Google Cloud", "Bitbucket", "Jira", "Trello", "Oracle", "Microsoft"]
        );
        assert_eq!(
            catalog.find("Oracle").unwrap().logo_ref,
            "https://s3.us-west-2.amazonaws.com/cdn.saasconsole.com/static/img/integrations/oracle-logo.png"
        );
    }

    #[test]
    fn test_find_is_exact_match() {
        let catalog = StaticCatalog::builtin();
        assert!(catalog.contains("Jira"));
        assert!(!catalog.contains("jira"));
        assert!(catalog.find("Slack").is_none());
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = StaticCatalog::new(vec![
            Integration::new("Jira", "a.png"),
            Integration::new("Jira", "b.png"),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            CatalogError::Duplicate {
                name: "Jira".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_incomplete_entries() {
        let err = StaticCatalog::new(vec![
            Integration::new("Jira", "a.png"),
            Integration::new("Slack", ""),
        ])
        .unwrap_err();

        assert_eq!(err, CatalogError::Incomplete { index: 1 });
    }

    #[test]
    fn test_empty_catalog_is_allowed() {
        let catalog = StaticCatalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
    }
}
