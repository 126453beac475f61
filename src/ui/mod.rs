//! Terminal UI components
//!
//! Built with ratatui. One header row with the search box, two collapsible
//! boxes side by side (results on the left, detail or watched list on the
//! right), and a status bar.

pub mod detail;
pub mod results;
pub mod search;
pub mod theme;
pub mod watched;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, InputMode, Pane};

pub use theme::Theme;

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Clear with background color
    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    // Main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Boxes
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_boxes(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);

    if let Some(ref error) = app.error {
        render_error_popup(frame, area, error);
    }
}

/// Logo, search box and result count
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18), // Logo
            Constraint::Min(1),     // Search box
            Constraint::Length(22), // Result count
        ])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::raw("🍿 "),
        Span::styled(
            "POPCORN",
            Style::default().fg(Theme::STAR).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "TUI",
            Style::default().fg(Theme::SECONDARY).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(rounded_block(Theme::border()));
    frame.render_widget(logo, header_chunks[0]);

    search::render_search_box(frame, header_chunks[1], app);

    let count = Paragraph::new(Line::from(vec![
        Span::styled("Found ", Theme::text()),
        Span::styled(
            app.search.results.len().to_string(),
            Style::default().fg(Theme::TEXT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" results", Theme::text()),
    ]))
    .alignment(Alignment::Center)
    .block(rounded_block(Theme::border()));
    frame.render_widget(count, header_chunks[2]);
}

/// The two boxes; a closed box collapses to its title row
fn render_boxes(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = box_block(
        " MOVIES ",
        app.boxes.results_open,
        app.focus == Pane::Results && app.input_mode == InputMode::Normal,
    );
    let inner = left.inner(columns[0]);
    frame.render_widget(left, columns[0]);
    if app.boxes.results_open {
        results::render_results(frame, inner, app);
    }

    let title = if app.detail.is_open() {
        " DETAILS "
    } else {
        " WATCHED "
    };
    let right = box_block(
        title,
        app.boxes.watched_open,
        app.focus == Pane::Watched && app.input_mode == InputMode::Normal,
    );
    let inner = right.inner(columns[1]);
    frame.render_widget(right, columns[1]);
    if app.boxes.watched_open {
        if app.detail.is_open() {
            detail::render_detail(frame, inner, app);
        } else {
            watched::render_watched(frame, inner, app);
        }
    }
}

/// Box frame with the open/closed toggle in its title
fn box_block(title: &str, open: bool, focused: bool) -> Block<'static> {
    let toggle = if open { "[–]" } else { "[+]" };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_for(focused))
        .title(Span::styled(title.to_string(), Theme::title()))
        .title(
            Line::from(Span::styled(format!(" {} ", toggle), Theme::keybind()))
                .alignment(Alignment::Right),
        )
}

pub(crate) fn rounded_block(border: Style) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
}

/// Centered one-line notification ("Loading...", errors, empty states)
pub(crate) fn render_notice(frame: &mut Frame, area: Rect, text: String, style: Style) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
    let notice = Paragraph::new(text).style(style).alignment(Alignment::Center);
    frame.render_widget(notice, rows[1]);
}

/// Render status bar at bottom
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::TEXT).bg(Theme::PRIMARY_DARK),
        ),
        InputMode::Editing => Span::styled(
            " SEARCH ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::STAR),
        ),
    };

    let hints: &[(&str, &str)] = match (app.input_mode, app.focus, app.detail.is_open()) {
        (InputMode::Editing, _, _) => &[("↵/esc", "done"), ("ctrl+c", "quit")],
        (_, Pane::Watched, true) => &[
            ("1-0", "rate"),
            ("a", "add"),
            ("esc", "close"),
            ("tab", "switch"),
        ],
        (_, Pane::Watched, false) => &[("↑↓", "move"), ("d", "delete"), ("tab", "switch")],
        (_, Pane::Results, _) => &[
            ("↵", "new search"),
            ("space", "select"),
            ("[ ]", "toggle boxes"),
            ("q", "quit"),
        ],
    };

    let mut spans = vec![mode_indicator, Span::raw(" ")];
    for (key, desc) in hints {
        spans.push(Span::styled(format!(" {} ", key), Theme::keybind()));
        spans.push(Span::styled(format!("{} ", desc), Theme::dimmed()));
    }

    let status = Paragraph::new(Line::from(spans)).style(Theme::status_bar());
    frame.render_widget(status, area);
}

/// Render error popup overlay
fn render_error_popup(frame: &mut Frame, area: Rect, error: &str) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = 5;

    let popup_area = Rect {
        x: area.x + (area.width.saturating_sub(popup_width)) / 2,
        y: area.y + (area.height.saturating_sub(popup_height)) / 2,
        width: popup_width,
        height: popup_height.min(area.height),
    };

    frame.render_widget(Clear, popup_area);

    let error_block = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(error, Theme::error())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::error())
            .title(Span::styled(" ✗ ERROR ", Theme::error()))
            .style(Style::default().bg(Theme::BACKGROUND)),
    );

    frame.render_widget(error_block, popup_area);
}
