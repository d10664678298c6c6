use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use coadmin_core::AdminConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a starter config file
    Init(InitArgs),
    /// Print the effective config as TOML
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Path => run_path(),
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = AdminConfig::config_path();

    if config_path.exists() && !args.force {
        return Err(anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }

    std::fs::write(&config_path, AdminConfig::template())
        .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

    println!("✓ Created config at: {:?}", config_path);
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {:?}", config_path);
    println!("  2. Point [api] base_url at your backend");
    println!("  3. Run: coadmin config show");

    Ok(())
}

fn run_show() -> Result<()> {
    let config = AdminConfig::load().context("Failed to load config")?;

    let toml_str =
        toml::to_string_pretty(&config).context("Failed to serialize config to TOML")?;

    println!("{}", toml_str);

    Ok(())
}

fn run_path() -> Result<()> {
    let config_path = AdminConfig::config_path();
    println!("{}", config_path.display());

    if !config_path.exists() {
        eprintln!("(not created yet, run: coadmin config init)");
    }

    Ok(())
}
