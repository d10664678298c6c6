//! Command implementations for the coadmin CLI

pub mod catalog;
pub mod companies;

use clap::ValueEnum;

// Re-export dispatcher functions and args for flat access from main.rs
pub use catalog::{run_catalog, CatalogArgs};
pub use companies::{run_add, run_delete, run_edit, run_list, AddArgs, DeleteArgs, EditArgs, ListArgs};

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
    /// Quiet mode - one key per line
    Quiet,
}

impl OutputFormat {
    /// Apply the `--json` shorthand
    pub fn resolve(self, json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            self
        }
    }
}

/// Tree prefixes for item `index` of `len`: (first line, continuation)
pub(crate) fn tree_prefix(index: usize, len: usize) -> (&'static str, &'static str) {
    if index + 1 == len {
        ("└─", "   ")
    } else {
        ("├─", "│  ")
    }
}
