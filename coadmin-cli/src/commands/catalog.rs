use anyhow::{Context, Result};
use clap::Parser;
use coadmin_core::{AdminConfig, Catalog};

use super::{tree_prefix, OutputFormat};

#[derive(Parser, Debug)]
pub struct CatalogArgs {
    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Human)]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

pub fn run_catalog(config: &AdminConfig, args: CatalogArgs) -> Result<()> {
    let catalog = config.catalog().context("Invalid integration catalog")?;
    let entries = catalog.list_available();

    match args.output.resolve(args.json) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(entries)?);
        }
        OutputFormat::Quiet => {
            for entry in entries {
                println!("{}", entry.name);
            }
        }
        OutputFormat::Human => {
            println!("┌─ Integrations ({})", entries.len());
            println!("│");
            for (i, entry) in entries.iter().enumerate() {
                let (prefix, cont) = tree_prefix(i, entries.len());
                println!("{} {}", prefix, entry.name);
                println!("{}logo: {}", cont, entry.logo_ref);
            }
        }
    }

    Ok(())
}
