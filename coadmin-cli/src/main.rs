//! coadmin - company administration for the /companies REST backend
//!
//! Provides:
//! - An interactive terminal shell (default command) with the company list
//!   and an add/edit dialog
//! - Scriptable `list`, `add`, `edit` and `delete` commands
//! - The integration catalog (`catalog`) and config file helpers (`config`)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coadmin_core::AdminConfig;

mod commands;
mod config;
mod tracing_setup;
mod tui;

use commands::{AddArgs, CatalogArgs, DeleteArgs, EditArgs, ListArgs};
use config::ConfigArgs;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "coadmin",
    author,
    version,
    about = "Manage companies and their integrations",
    long_about = "Browse, add, edit and delete companies stored behind a /companies REST API. \
                  Runs an interactive terminal UI when no command is given."
)]
struct Cli {
    /// API base URL (overrides the config file)
    #[arg(long, env = "COADMIN_API_URL", global = true)]
    api_url: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive company list and editor (default)
    Tui,
    /// List companies
    List(ListArgs),
    /// Add a company
    Add(AddArgs),
    /// Edit a company by id
    Edit(EditArgs),
    /// Delete a company by id
    Delete(DeleteArgs),
    /// Show the integrations that can be attached to a company
    Catalog(CatalogArgs),
    /// Manage the config file (~/.coadmin/config.toml)
    Config(ConfigArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let api_url = cli.api_url.as_deref();

    match cli.command.unwrap_or(Commands::Tui) {
        // Config commands must work even when the file does not parse
        Commands::Config(args) => {
            tracing_setup::init(&TracingConfig {
                debug: cli.debug,
                ..Default::default()
            })?;
            config::run_config(args)?;
        }
        Commands::Tui => {
            let admin_config = setup(cli.debug, true)?;
            tui::run(&admin_config, api_url).await?;
        }
        Commands::List(args) => {
            let admin_config = setup(cli.debug, false)?;
            commands::run_list(&admin_config, api_url, args).await?;
        }
        Commands::Add(args) => {
            let admin_config = setup(cli.debug, false)?;
            commands::run_add(&admin_config, api_url, args).await?;
        }
        Commands::Edit(args) => {
            let admin_config = setup(cli.debug, false)?;
            commands::run_edit(&admin_config, api_url, args).await?;
        }
        Commands::Delete(args) => {
            let admin_config = setup(cli.debug, false)?;
            commands::run_delete(&admin_config, api_url, args).await?;
        }
        Commands::Catalog(args) => {
            let admin_config = setup(cli.debug, false)?;
            commands::run_catalog(&admin_config, args)?;
        }
    }
    Ok(())
}

/// Load the config file and start tracing. The TUI owns the terminal, so its
/// logs go to ~/.coadmin/coadmin.log instead of stderr.
fn setup(debug: bool, tui: bool) -> Result<AdminConfig> {
    let admin_config = AdminConfig::load().context("Failed to load config")?;
    let log_file = tui.then(|| AdminConfig::data_dir().join("coadmin.log"));
    tracing_setup::init(&TracingConfig {
        debug,
        level: admin_config.log_level.clone(),
        log_file,
    })?;
    Ok(admin_config)
}
