//! Search box
//!
//! Shows a cursor while editing, a placeholder when empty.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, InputMode};
use crate::ui::{rounded_block, Theme};

/// Render the query input
pub fn render_search_box(frame: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Editing;

    let line = if editing {
        let (before, after) = app.search.split_at_cursor();
        Line::from(vec![
            Span::styled("⌕ ", Theme::dimmed()),
            Span::styled(before.to_string(), Theme::input()),
            Span::styled("│", Theme::accent()),
            Span::styled(after.to_string(), Theme::input()),
        ])
    } else if app.search.query.is_empty() {
        Line::from(vec![
            Span::styled("⌕ ", Theme::dimmed()),
            Span::styled("Search movies...", Theme::dimmed()),
        ])
    } else {
        Line::from(vec![
            Span::styled("⌕ ", Theme::dimmed()),
            Span::styled(app.search.query.clone(), Theme::input()),
        ])
    };

    let search_box = Paragraph::new(line).style(Theme::input()).block(
        rounded_block(Theme::border_for(editing))
            .title(Span::styled(" SEARCH ", Theme::title())),
    );
    frame.render_widget(search_box, area);
}
