//! Watched summary and list

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Pane};
use crate::models::{WatchedMovie, WatchedSummary};
use crate::ui::{render_notice, Theme};

/// Summary figures as displayed: count, mean IMDb rating, mean user rating,
/// mean runtime
pub fn summary_fields(summary: &WatchedSummary) -> [String; 4] {
    [
        format!("#️⃣ {} movies", summary.count),
        format!("⭐️ {:.2}", summary.avg_imdb_rating),
        format!("🌟 {:.2}", summary.avg_user_rating),
        format!("⏳ {:.0} min", summary.avg_runtime),
    ]
}

/// Render summary strip plus list
pub fn render_watched(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_summary(frame, chunks[0], app);

    if app.watched.list.is_empty() {
        render_notice(
            frame,
            chunks[1],
            "Rate a movie to add it here".to_string(),
            Theme::dimmed(),
        );
        return;
    }
    render_list(frame, chunks[1], app);
}

fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    let [count, imdb, user, runtime] = summary_fields(&app.watched.list.summary());
    let lines = vec![
        Line::from(Span::styled("MOVIES YOU WATCHED", Theme::title())),
        Line::from(vec![
            Span::raw(count),
            Span::raw("   "),
            Span::raw(imdb),
            Span::raw("   "),
            Span::raw(user),
            Span::raw("   "),
            Span::raw(runtime),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).style(Theme::summary()), area);
}

fn render_list(frame: &mut Frame, area: Rect, app: &App) {
    let visible_height = area.height as usize;
    let cursor = &app.watched.cursor;
    let offset = cursor.visible_offset(visible_height);
    let focused = app.focus == Pane::Watched;

    let items: Vec<ListItem> = app
        .watched
        .list
        .movies()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_height)
        .map(|(i, movie)| render_item(movie, focused && i == cursor.selected))
        .collect();

    frame.render_widget(List::new(items).style(Theme::text()), area);
}

/// Format: ▸ Title  ⭐️ 8.8  🌟 9  ⏳ 148 min
fn render_item(movie: &WatchedMovie, is_cursor: bool) -> ListItem<'static> {
    let marker = if is_cursor { "▸ " } else { "  " };
    let title_style = if is_cursor {
        Theme::highlighted()
    } else {
        Theme::text()
    };

    let imdb = movie
        .imdb_rating
        .map(|r| format!("{:.1}", r))
        .unwrap_or_else(|| "N/A".to_string());
    let runtime = movie
        .runtime
        .map(|r| format!("{} min", r))
        .unwrap_or_else(|| "N/A".to_string());

    ListItem::new(Line::from(vec![
        Span::styled(marker, Theme::accent()),
        Span::styled(movie.title.clone(), title_style),
        Span::styled(format!("  ⭐️ {}", imdb), Theme::meta()),
        Span::styled(format!("  🌟 {}", movie.user_rating), Theme::star_filled()),
        Span::styled(format!("  ⏳ {}", runtime), Theme::meta()),
    ]))
}
