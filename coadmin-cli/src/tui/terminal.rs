//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use coadmin_core::{AdminConfig, EditorError, HttpCompanyApi, RecordEditor, Shell, ShellError};
use crossterm::{
    event::{Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info, warn};

use super::app::{App, EditorFocus};
use super::event::{handle_key, poll_event, HandleResult};
use super::ui;

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the TUI against the configured backend
pub async fn run(config: &AdminConfig, api_url: Option<&str>) -> Result<()> {
    let base_url = config.base_url(api_url);
    let api = HttpCompanyApi::new(base_url.as_str(), config.timeout())
        .with_context(|| format!("Failed to create client for {}", base_url))?;
    let catalog = config.catalog().context("Invalid integration catalog")?;

    let mut app = App::new(Shell::new(RecordEditor::new(catalog)));
    info!(base_url = %base_url, "starting tui");

    // A failed first load still opens the UI with the error in the status line
    if let Err(e) = app.shell.refresh(&api).await {
        debug!(error = %e, "initial load failed");
    }

    let mut terminal = init_terminal()?;
    let result = run_loop(&mut terminal, &mut app, &api).await;

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    api: &HttpCompanyApi,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events (with 100ms timeout for responsive UI)
        let Some(Event::Key(key)) = poll_event(Duration::from_millis(100))? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match handle_key(app, key) {
            HandleResult::Continue => {}
            HandleResult::Quit => app.should_quit = true,
            HandleResult::Refresh => {
                app.shell.clear_status();
                if app.shell.refresh(api).await.is_ok() {
                    app.shell.set_status("Refreshed");
                }
            }
            HandleResult::Submit => submit(app, api).await,
            HandleResult::Delete => match app.shell.delete_selected(api).await {
                Ok(Some(_)) | Err(_) => {}
                Ok(None) => app.shell.set_status("Unsaved rows cannot be deleted"),
            },
        }
    }

    Ok(())
}

async fn submit(app: &mut App, api: &HttpCompanyApi) {
    match app.shell.submit_editor(api).await {
        Ok(_) => app.focus = EditorFocus::Name,
        Err(ShellError::Editor(EditorError::Invalid(errors))) => {
            app.shell.set_status(format!("Cannot save: {}", errors));
        }
        // Status already holds the backend error
        Err(e) => warn!(error = %e, "submit failed"),
    }
}
