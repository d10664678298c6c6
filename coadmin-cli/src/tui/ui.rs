//! UI rendering using ratatui

use coadmin_core::{Company, Draft, Field};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use super::app::{App, EditorFocus, Mode};

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for selected items
const HIGHLIGHT: Color = Color::Yellow;
/// Success color
const SUCCESS: Color = Color::Green;
/// Validation messages
const ERROR: Color = Color::Red;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);
/// Sidebar background (slate)
const SIDEBAR_BG: Color = Color::Rgb(15, 23, 42);

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Sidebar (left) + main area
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(20), Constraint::Min(30)])
        .split(area);

    render_sidebar(frame, columns[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Top bar
            Constraint::Min(5),    // Companies
            Constraint::Length(1), // Status bar
        ])
        .split(columns[1]);

    render_topbar(frame, rows[0]);
    render_companies(frame, app, rows[1]);
    render_status_bar(frame, app, rows[2]);

    match app.mode() {
        Mode::Editor => {
            if let Some(draft) = app.shell.editor().draft() {
                render_editor(frame, app, draft);
            }
        }
        Mode::ConfirmDelete => render_confirm_delete(frame, app),
        Mode::Normal => {}
    }
}

fn render_sidebar(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(SECONDARY))
        .style(Style::default().bg(SIDEBAR_BG));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " ▣ Companies",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_topbar(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(SECONDARY));

    let title = Line::from(Span::styled(
        " Mini App",
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ));

    frame.render_widget(Paragraph::new(title).block(block), area);
}

fn render_companies(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)])
        .split(area);

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    frame.render_widget(
        Paragraph::new(Span::styled(
            " Companies",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        header[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("+ Add Company", Style::default().fg(ACCENT)),
            Span::styled(" (a) ", Style::default().fg(DIM)),
        ]))
        .alignment(Alignment::Right),
        header[1],
    );

    let companies = app.shell.companies();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SECONDARY));

    if companies.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "(no companies) press a to add one",
            Style::default().fg(DIM),
        ))
        .block(block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let rows: Vec<Row> = companies.iter().map(company_row).collect();
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(45),
            Constraint::Percentage(20),
        ],
    )
    .header(
        Row::new(vec!["Name", "Integrations", "Actions"])
            .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
            .bottom_margin(1),
    )
    .block(block)
    .row_highlight_style(Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD))
    .highlight_symbol("▸ ");

    let mut state = TableState::default().with_selected(Some(app.shell.selected_index()));
    frame.render_stateful_widget(table, chunks[1], &mut state);
}

fn company_row(company: &Company) -> Row<'_> {
    let integrations = if company.integrations.is_empty() {
        Cell::from(Span::styled("None", Style::default().fg(SECONDARY)))
    } else {
        Cell::from(company.integration_names().join(", "))
    };

    Row::new(vec![
        Cell::from(company.name.as_str()),
        integrations,
        Cell::from(Span::styled("e:Edit  d:Delete", Style::default().fg(DIM))),
    ])
}

/// Centered add/edit dialog
fn render_editor(frame: &mut Frame, app: &App, draft: &Draft) {
    let entries = app.shell.editor().picker_entries();
    let mut lines: Vec<Line> = Vec::new();

    // Name input
    let name_focused = app.focus == EditorFocus::Name;
    lines.push(Line::from(""));
    lines.push(label_line("Company Name", name_focused));
    let cursor = if name_focused { "▌" } else { "" };
    let input_style = match draft.visible_error(Field::Name) {
        Some(_) => Style::default().fg(ERROR),
        None => Style::default().fg(Color::White),
    };
    lines.push(Line::from(vec![
        Span::styled(" > ", Style::default().fg(DIM)),
        Span::styled(format!("{}{}", draft.name(), cursor), input_style),
    ]));
    lines.push(error_line(draft, Field::Name));

    // Integrations picker
    let picker_focused = app.focus == EditorFocus::Picker;
    lines.push(label_line("Integrations", picker_focused));
    let arrow = if draft.picker_open() { "▴" } else { "▾" };
    let button_style = if picker_focused {
        Style::default().fg(Color::Black).bg(ACCENT)
    } else {
        Style::default().fg(Color::White)
    };
    lines.push(Line::from(vec![
        Span::raw(" "),
        Span::styled(format!("[ {} {} ]", draft.picker_label(), arrow), button_style),
    ]));

    if draft.picker_open() {
        for (i, entry) in entries.iter().enumerate() {
            let check = if draft.is_selected(&entry.name) { "[x]" } else { "[ ]" };
            let name = if entry.name.is_empty() { "(unnamed)" } else { entry.name.as_str() };
            let style = if i == app.picker_cursor {
                Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if i == app.picker_cursor { "▸" } else { " " };
            lines.push(Line::from(Span::styled(
                format!("  {} {} {}", marker, check, name),
                style,
            )));
        }
    }
    lines.push(error_line(draft, Field::Integrations));

    // Buttons
    lines.push(Line::from(vec![
        Span::styled(" Esc ", Style::default().fg(DIM)),
        Span::raw("Cancel   "),
        Span::styled("Ctrl-S ", Style::default().fg(DIM)),
        Span::styled("Save", Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD)),
    ]));

    let area = frame.area();
    let width = 56.min(area.width.saturating_sub(4));
    let height = (lines.len() as u16 + 2).min(area.height);
    let popup_area = centered_rect(width, height, area);

    let block = Block::default()
        .title(format!(" {} ", draft.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn label_line(label: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(SECONDARY)
    };
    Line::from(Span::styled(format!(" {}", label), style))
}

/// Inline message for a touched field, blank otherwise
fn error_line(draft: &Draft, field: Field) -> Line<'static> {
    match draft.visible_error(field) {
        Some(err) => Line::from(Span::styled(format!("   {}", err), Style::default().fg(ERROR))),
        None => Line::from(""),
    }
}

fn render_confirm_delete(frame: &mut Frame, app: &App) {
    let name = app
        .shell
        .selected()
        .map(|c| c.name.as_str())
        .unwrap_or_default();

    let area = frame.area();
    let popup_area = centered_rect(44.min(area.width.saturating_sub(4)), 5, area);

    let lines = vec![
        Line::from(format!(" Delete {}?", name)),
        Line::from(Span::styled(" y: delete   any other key: keep", Style::default().fg(DIM))),
    ];
    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ERROR));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (mode_indicator, help_text) = match app.mode() {
        Mode::Normal => (
            Span::styled(" LIST ", Style::default().bg(ACCENT).fg(Color::Black)),
            "j/k:nav  a:add  e:edit  d:delete  r:refresh  q:quit",
        ),
        Mode::Editor => (
            Span::styled(" EDIT ", Style::default().bg(SUCCESS).fg(Color::Black)),
            "Tab:focus  Space:pick  Ctrl-S:save  Esc:cancel",
        ),
        Mode::ConfirmDelete => (
            Span::styled(" DELETE ", Style::default().bg(ERROR).fg(Color::Black)),
            "y:confirm",
        ),
    };

    let line = Line::from(vec![
        mode_indicator,
        Span::raw(" "),
        Span::styled(help_text, Style::default().fg(DIM)),
        Span::raw(" "),
        Span::styled(app.shell.status().unwrap_or_default(), Style::default().fg(HIGHLIGHT)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
