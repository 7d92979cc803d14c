use crate::application::{Alert, AlertKind, App, AppMode};
use crate::domain::{FormField, KeyValueStorage, COLUMN_HEADERS};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use unicode_width::UnicodeWidthChar;

const FORM_HEIGHT: u16 = FormField::ALL.len() as u16 + 2;

pub fn render_ui<S: KeyValueStorage>(f: &mut Frame, app: &App<S>) {
    let banner_height = |alert: &Option<Alert>| if alert.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(banner_height(&app.fatal)),
            Constraint::Length(banner_height(&app.alert)),
            Constraint::Length(FORM_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_alert(f, app.fatal.as_ref(), chunks[1]);
    render_alert(f, app.alert.as_ref(), chunks[2]);
    render_form(f, app, chunks[3]);
    render_album_table(f, app, chunks[4]);
    render_status_bar(f, app, chunks[5]);

    if app.mode == AppMode::Help {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header<S>(f: &mut Frame, app: &App<S>, area: Rect) {
    let header = Paragraph::new(format!(
        "albumlist - My Album List | {} album(s)",
        app.rows.len()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_alert(f: &mut Frame, alert: Option<&Alert>, area: Rect) {
    let Some(alert) = alert else {
        return;
    };

    let color = match alert.kind {
        AlertKind::Success => Color::Green,
        AlertKind::Danger => Color::Red,
        AlertKind::Fatal => Color::LightRed,
    };
    let title = match alert.kind {
        AlertKind::Fatal => "Error",
        _ => "Notice",
    };

    let widget = Paragraph::new(alert.message.as_str())
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(widget, area);
}

fn render_form<S>(f: &mut Frame, app: &App<S>, area: Rect) {
    let editing = app.mode == AppMode::Form;
    let label_width = FormField::ALL
        .iter()
        .map(|field| field.label().len())
        .max()
        .unwrap_or(0)
        + 2;

    let lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|&field| {
            let focused = editing && field == app.focused_field;
            let label_style = if focused {
                Style::default().fg(Color::Black).bg(Color::LightBlue)
            } else {
                Style::default().fg(Color::Yellow)
            };
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}", format!("{}:", field.label()), width = label_width),
                    label_style,
                ),
                Span::raw(app.form.field(field).to_string()),
            ])
        })
        .collect();

    let border_style = if editing {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Add Album"),
    );
    f.render_widget(form, area);

    if editing {
        let row = FormField::ALL
            .iter()
            .position(|&field| field == app.focused_field)
            .unwrap_or(0) as u16;
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(cursor_column(
                label_width,
                app.form.field(app.focused_field),
                app.cursor_position,
            ));
        let y = area.y.saturating_add(1).saturating_add(row);
        if x < area.right() && y < area.bottom() {
            f.set_cursor_position(Position { x, y });
        }
    }
}

/// Display column of the cursor inside a form line, past the label.
fn cursor_column(label_width: usize, text: &str, cursor_position: usize) -> u16 {
    let before_cursor: usize = text
        .chars()
        .take(cursor_position)
        .map(|c| c.width().unwrap_or(0))
        .sum();
    u16::try_from(label_width.saturating_add(before_cursor)).unwrap_or(u16::MAX)
}

fn render_album_table<S>(f: &mut Frame, app: &App<S>, area: Rect) {
    let header = Row::new(
        COLUMN_HEADERS
            .iter()
            .map(|title| Cell::from(*title).style(Style::default().fg(Color::Yellow))),
    )
    .height(1);

    let rows: Vec<Row> = app
        .rows
        .iter()
        .map(|row| Row::new(row.cells().map(Cell::from)).height(1))
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Percentage(32),
        Constraint::Percentage(28),
        Constraint::Percentage(20),
        Constraint::Min(8),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("My Albums"))
        .column_spacing(1)
        .row_highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    if app.mode == AppMode::Normal && !app.rows.is_empty() {
        state.select(Some(app.selected_row));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn render_status_bar<S>(f: &mut Frame, app: &App<S>, area: Rect) {
    let text = match app.mode {
        AppMode::Normal => {
            "a: add album | d/Del: delete selected | ↑↓/jk: select | r: reload | F1/?: help | q: quit"
        }
        AppMode::Form => "Tab/↓: next field | Shift+Tab/↑: previous field | Enter: add | Esc: close form",
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help",
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Keys"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Form => Style::default().fg(Color::Green),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "albumlist Help (Line {}/{})",
                    start_line + 1,
                    help_lines.len()
                ))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

const HELP_TEXT: &str = r#"ALBUMLIST

=== ADDING AN ALBUM ===
a / Enter       Open the form
Tab / ↓         Next field
Shift+Tab / ↑   Previous field
Enter           Add the album
Esc             Close the form (typed text is kept)

All four fields are required.
The album ID must not already be in the list.

=== THE LIST ===
↑↓ or j/k       Select a row
Home/End, g/G   First / last row
d / Delete      Delete the selected album
                Every album with the same ID is removed
r               Reload the list from disk
q               Quit

=== STORAGE ===
Albums are saved to albums.json in the data directory
(~/.albumlist unless --data-dir is given) after every change.

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll one line
Page Up/Down    Scroll 5 lines
Home            Jump to top
Esc/F1/?/q      Close this help window"#;
