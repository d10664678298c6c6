//! Core library for coadmin: company records, the integration catalog,
//! the record editor and the list/detail shell that persists through the
//! companies REST API.

pub mod catalog;
pub mod client;
pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod shell;
pub mod validation;

pub use catalog::{Catalog, StaticCatalog};
pub use client::{CompanyApi, HttpCompanyApi};
pub use config::AdminConfig;
pub use editor::{Draft, RecordEditor, Toggled};
pub use error::{ApiError, CatalogError, ConfigError, EditorError, ShellError};
pub use model::{Company, Integration};
pub use shell::Shell;
pub use validation::{Field, ValidationError, ValidationErrors};
