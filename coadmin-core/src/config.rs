use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::StaticCatalog;
use crate::error::ConfigError;
use crate::model::Integration;

/// Backend used when neither flag, env nor config file name one
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Environment override for the API base URL
pub const BASE_URL_ENV: &str = "COADMIN_API_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration loaded from ~/.coadmin/config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub api: ApiConfig,

    /// Replaces the built-in integration catalog when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Vec<CatalogEntry>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// `[[catalog]]` table in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub logo: String,
}

impl AdminConfig {
    /// Load from the default path; a missing file yields defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Surface catalog problems at load time rather than on first use
        config.catalog()?;

        Ok(config)
    }

    /// Config file path: ~/.coadmin/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".coadmin/config.toml")
    }

    /// Directory holding config and logs
    pub fn data_dir() -> PathBuf {
        Self::config_path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Base URL with precedence: explicit > COADMIN_API_URL > config file
    pub fn base_url(&self, explicit: Option<&str>) -> String {
        let url = explicit
            .map(str::to_string)
            .or_else(|| env::var(BASE_URL_ENV).ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| self.api.base_url.clone());
        url.trim_end_matches('/').to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Catalog from `[[catalog]]` entries, or the built-in one
    pub fn catalog(&self) -> Result<StaticCatalog, ConfigError> {
        match &self.catalog {
            Some(entries) => {
                let entries = entries
                    .iter()
                    .map(|e| Integration::new(e.name.clone(), e.logo.clone()))
                    .collect();
                Ok(StaticCatalog::new(entries)?)
            }
            None => Ok(StaticCatalog::builtin()),
        }
    }

    /// Starter file written by `coadmin config init`
    pub fn template() -> &'static str {
        concat!(
            "# coadmin configuration\n",
            "\n",
            "[api]\n",
            "base_url = \"http://localhost:5000\"\n",
            "timeout_secs = 10\n",
            "\n",
            "# Uncomment to replace the built-in integration catalog\n",
            "# [[catalog]]\n",
            "# name = \"Jira\"\n",
            "# logo = \"https://example.com/jira.png\"\n",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::error::CatalogError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AdminConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, AdminConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_api_table() {
        let file = write_config("[api]\nbase_url = \"http://backend:8080/\"\n");
        let config = AdminConfig::load_from(file.path()).unwrap();

        assert_eq!(config.api.base_url, "http://backend:8080/");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.base_url(Some("http://flag:1/")), "http://flag:1");
    }

    // Only test in this crate that reads or writes COADMIN_API_URL
    #[test]
    fn test_env_url_beats_config_file() {
        let file = write_config("[api]\nbase_url = \"http://file:1\"\n");
        let config = AdminConfig::load_from(file.path()).unwrap();

        env::set_var(BASE_URL_ENV, "http://env:9/");
        let from_env = config.base_url(None);
        let from_flag = config.base_url(Some("http://flag:2"));
        env::set_var(BASE_URL_ENV, "");
        let empty_env = config.base_url(None);
        env::remove_var(BASE_URL_ENV);

        assert_eq!(from_env, "http://env:9");
        assert_eq!(from_flag, "http://flag:2");
        assert_eq!(empty_env, "http://file:1");
    }

    #[test]
    fn test_catalog_override() {
        let file = write_config(
            "[[catalog]]\nname = \"Slack\"\nlogo = \"slack.png\"\n\n[[catalog]]\nname = \"Jira\"\nlogo = \"jira.png\"\n",
        );
        let config = AdminConfig::load_from(file.path()).unwrap();
        let catalog = config.catalog().unwrap();

        let names: Vec<_> = catalog.list_available().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Slack", "Jira"]);
    }

    #[test]
    fn test_duplicate_catalog_entry_fails_load() {
        let file = write_config(
            "[[catalog]]\nname = \"Jira\"\nlogo = \"a.png\"\n\n[[catalog]]\nname = \"Jira\"\nlogo = \"b.png\"\n",
        );
        let err = AdminConfig::load_from(file.path()).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Catalog(CatalogError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_invalid_toml() {
        let file = write_config("[api\nbase_url = ");
        let err = AdminConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_template_parses() {
        let config: AdminConfig = toml::from_str(AdminConfig::template()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert!(config.catalog.is_none());
    }
}
