//! Scriptable company commands.
//!
//! `add` and `edit` drive the same [`Shell`] and record editor as the TUI, so
//! a CLI write is validated exactly like a dialog submit.

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use coadmin_core::{
    AdminConfig, Catalog, Company, CompanyApi, HttpCompanyApi, RecordEditor, Shell, StaticCatalog,
};
use tracing::info;

use super::{tree_prefix, OutputFormat};

// ============================================================================
// Args
// ============================================================================

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Human)]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Company name
    #[arg(long)]
    pub name: String,

    /// Integration to attach (repeatable, must be in the catalog)
    #[arg(long = "integration", short = 'i')]
    pub integrations: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Company id
    pub id: u64,

    /// New company name
    #[arg(long)]
    pub name: Option<String>,

    /// Integration to select or deselect (repeatable)
    #[arg(long = "toggle", short = 't')]
    pub toggles: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Company id
    pub id: u64,
}

// ============================================================================
// Commands
// ============================================================================

pub async fn run_list(config: &AdminConfig, api_url: Option<&str>, args: ListArgs) -> Result<()> {
    let api = build_api(config, api_url)?;
    let companies = api.list().await.context("Failed to load companies")?;

    match args.output.resolve(args.json) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&companies)?);
        }
        OutputFormat::Quiet => {
            for company in &companies {
                if let Some(id) = company.id {
                    println!("{}", id);
                }
            }
        }
        OutputFormat::Human => {
            println!("┌─ Companies ({})", companies.len());
            println!("│");

            if companies.is_empty() {
                println!("│  (no companies)");
            }
            for (i, company) in companies.iter().enumerate() {
                let (prefix, cont) = tree_prefix(i, companies.len());
                println!("{} {}", prefix, describe(company));
                println!("{}integrations: {}", cont, integrations_label(company));
            }
        }
    }

    Ok(())
}

pub async fn run_add(config: &AdminConfig, api_url: Option<&str>, args: AddArgs) -> Result<()> {
    let api = build_api(config, api_url)?;
    let mut shell = build_shell(config)?;

    shell.begin_add();
    shell.editor_mut().set_name(args.name)?;
    for name in &args.integrations {
        let already = shell
            .editor()
            .draft()
            .is_some_and(|draft| draft.is_selected(name));
        if !already {
            toggle(&mut shell, name)?;
        }
    }

    let saved = shell.submit_editor(&api).await?;
    info!(id = ?saved.id, "company added");
    println!("✓ Added {}", describe(&saved));

    Ok(())
}

pub async fn run_edit(config: &AdminConfig, api_url: Option<&str>, args: EditArgs) -> Result<()> {
    let api = build_api(config, api_url)?;
    let mut shell = build_shell(config)?;

    shell
        .refresh(&api)
        .await
        .context("Failed to load companies")?;
    if !shell.select_id(args.id) {
        bail!("No company with id {}", args.id);
    }
    shell.begin_edit();

    if let Some(name) = args.name {
        shell.editor_mut().set_name(name)?;
    }
    for name in &args.toggles {
        toggle(&mut shell, name)?;
    }

    let saved = shell.submit_editor(&api).await?;
    println!("✓ Updated {}", describe(&saved));
    println!("   integrations: {}", integrations_label(&saved));

    Ok(())
}

pub async fn run_delete(config: &AdminConfig, api_url: Option<&str>, args: DeleteArgs) -> Result<()> {
    let api = build_api(config, api_url)?;

    api.delete(args.id)
        .await
        .with_context(|| format!("Failed to delete company {}", args.id))?;

    println!("✓ Deleted company {}", args.id);
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn build_api(config: &AdminConfig, api_url: Option<&str>) -> Result<HttpCompanyApi> {
    let base_url = config.base_url(api_url);
    HttpCompanyApi::new(base_url.as_str(), config.timeout())
        .with_context(|| format!("Failed to create client for {}", base_url))
}

fn build_shell(config: &AdminConfig) -> Result<Shell> {
    let catalog = config.catalog().context("Invalid integration catalog")?;
    Ok(Shell::new(RecordEditor::new(catalog)))
}

/// Toggle `name`, preferring the entry already on the draft so legacy
/// integrations can still be deselected
fn toggle(shell: &mut Shell<StaticCatalog>, name: &str) -> Result<()> {
    let integration = shell
        .editor()
        .draft()
        .and_then(|draft| draft.integrations().iter().find(|i| i.name == name))
        .or_else(|| shell.editor().catalog().find(name))
        .cloned()
        .ok_or_else(|| {
            let available: Vec<&str> = shell
                .editor()
                .catalog()
                .list_available()
                .iter()
                .map(|i| i.name.as_str())
                .collect();
            anyhow!(
                "Unknown integration '{}'. Available: {}",
                name,
                available.join(", ")
            )
        })?;

    shell.editor_mut().toggle_integration(&integration)?;
    Ok(())
}

fn describe(company: &Company) -> String {
    match company.id {
        Some(id) => format!("#{} {}", id, company.name),
        None => company.name.clone(),
    }
}

fn integrations_label(company: &Company) -> String {
    if company.integrations.is_empty() {
        "None".to_string()
    } else {
        company.integration_names().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coadmin_core::Integration;

    #[test]
    fn test_integrations_label() {
        let mut company = Company::named("Acme");
        assert_eq!(integrations_label(&company), "None");

        company.integrations.push(Integration::new("Jira", "jira.png"));
        company.integrations.push(Integration::new("Trello", "trello.png"));
        assert_eq!(integrations_label(&company), "Jira, Trello");
    }

    #[test]
    fn test_describe_includes_id() {
        let company = Company {
            id: Some(4),
            ..Company::named("Acme")
        };
        assert_eq!(describe(&company), "#4 Acme");
        assert_eq!(describe(&Company::named("Draft")), "Draft");
    }

    #[test]
    fn test_toggle_unknown_lists_catalog() {
        let mut shell: Shell = Shell::default();
        shell.begin_add();

        let err = toggle(&mut shell, "Slack").unwrap_err().to_string();
        assert!(err.contains("Unknown integration 'Slack'"));
        assert!(err.contains("Jira"));
    }

    #[test]
    fn test_toggle_deselects_legacy_entry() {
        let mut shell: Shell = Shell::default();
        shell.editor_mut().open(Company {
            id: Some(1),
            name: "Acme".to_string(),
            integrations: vec![Integration::new("Legacy", "legacy.png")],
        });

        toggle(&mut shell, "Legacy").unwrap();
        assert!(shell.editor().draft().unwrap().integrations().is_empty());
    }
}
