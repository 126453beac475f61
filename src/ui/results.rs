//! Search results box
//!
//! Exactly one of: loader, result list, "Search movies" prompt, error.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use crate::app::{App, Pane};
use crate::models::SearchResult;
use crate::ui::{render_notice, Theme};

/// What the results box shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultsView<'a> {
    Loading,
    List(&'a [SearchResult]),
    Prompt,
    Error(&'a str),
}

impl<'a> ResultsView<'a> {
    pub fn of(app: &'a App) -> Self {
        let search = &app.search;
        if search.loading.is_loading() {
            ResultsView::Loading
        } else if let Some(error) = search.loading.error() {
            ResultsView::Error(error)
        } else if search.results.is_empty() {
            ResultsView::Prompt
        } else {
            ResultsView::List(&search.results)
        }
    }
}

/// Render the results box body
pub fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    match ResultsView::of(app) {
        ResultsView::Loading => {
            render_notice(frame, area, "Loading...".to_string(), Theme::loading())
        }
        ResultsView::Prompt => {
            render_notice(frame, area, "🍿 Search movies".to_string(), Theme::meta())
        }
        ResultsView::Error(error) => {
            render_notice(frame, area, format!("❌ {}", error), Theme::error())
        }
        ResultsView::List(results) => render_list(frame, area, app, results),
    }
}

fn render_list(frame: &mut Frame, area: Rect, app: &App, results: &[SearchResult]) {
    let visible_height = area.height as usize;
    let list = &app.search.list;
    let offset = list.visible_offset(visible_height);
    let focused = app.focus == Pane::Results;

    let items: Vec<ListItem> = results
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_height)
        .map(|(i, result)| {
            let is_cursor = focused && i == list.selected;
            let is_open = app.detail.selected_id.as_deref() == Some(result.id.as_str());
            render_item(result, is_cursor, is_open)
        })
        .collect();

    frame.render_widget(List::new(items).style(Theme::text()), area);
}

/// Format: ▸ Title  🗓 Year
fn render_item(result: &SearchResult, is_cursor: bool, is_open: bool) -> ListItem<'static> {
    let marker = if is_cursor { "▸ " } else { "  " };
    let title_style = if is_cursor {
        Theme::highlighted()
    } else if is_open {
        Theme::accent()
    } else {
        Theme::text()
    };

    let mut spans = vec![
        Span::styled(marker, Theme::accent()),
        Span::styled(result.title.clone(), title_style),
    ];
    if !result.year.is_empty() {
        spans.push(Span::styled(format!("  🗓 {}", result.year), Theme::year()));
    }
    if result.poster.is_none() {
        spans.push(Span::styled("  (no poster)", Theme::dimmed()));
    }

    ListItem::new(Line::from(spans))
}
