//! Movie detail view
//!
//! Shows the selected movie's metadata, the star rating control (or the
//! rating already given), plot and credits.

use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::models::{MovieDetail, MAX_USER_RATING};
use crate::ui::{render_notice, Theme};

/// Star row for a rating: filled stars then empty ones
pub fn stars(rating: u8) -> (String, String) {
    let filled = rating.min(MAX_USER_RATING) as usize;
    let empty = MAX_USER_RATING as usize - filled;
    ("★".repeat(filled), "☆".repeat(empty))
}

/// Render the detail body for the selected movie
pub fn render_detail(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(error) = app.detail.loading.error() {
        render_notice(frame, area, format!("❌ {}", error), Theme::error());
        return;
    }

    let Some(movie) = app.detail.movie.as_ref() else {
        render_notice(frame, area, "Loading...".to_string(), Theme::loading());
        return;
    };

    let mut lines = header_lines(movie);
    lines.push(Line::from(""));
    lines.extend(rating_lines(app));
    lines.push(Line::from(""));

    if !movie.plot.is_empty() {
        lines.push(Line::from(Span::styled(
            movie.plot.clone(),
            Theme::text().add_modifier(Modifier::ITALIC),
        )));
        lines.push(Line::from(""));
    }
    if !movie.actors.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Starring ", Theme::meta()),
            Span::styled(movie.actors.clone(), Theme::text()),
        ]));
    }
    if !movie.director.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Directed by ", Theme::meta()),
            Span::styled(movie.director.clone(), Theme::text()),
        ]));
    }

    let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn header_lines(movie: &MovieDetail) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled("← ", Theme::accent()),
        Span::styled(movie.title.clone(), Theme::title()),
    ])];

    lines.push(Line::from(Span::styled(
        format!("{} • {}", movie.released, movie.runtime),
        Theme::meta(),
    )));
    if !movie.genre.is_empty() {
        lines.push(Line::from(Span::styled(movie.genre.clone(), Theme::meta())));
    }

    let rating_style = movie
        .rating_value()
        .map(Theme::rating)
        .unwrap_or_else(Theme::dimmed);
    lines.push(Line::from(vec![
        Span::raw("⭐️ "),
        Span::styled(movie.imdb_rating.clone(), rating_style),
        Span::styled(" IMDb rating", Theme::meta()),
    ]));

    if let Some(poster) = &movie.poster {
        lines.push(Line::from(Span::styled(poster.clone(), Theme::dimmed())));
    }
    lines
}

fn rating_lines(app: &App) -> Vec<Line<'static>> {
    let id = app.detail.selected_id.as_deref().unwrap_or_default();
    if let Some(rating) = app.watched.list.user_rating(id) {
        return vec![Line::from(vec![
            Span::styled("You rated this movie: ", Theme::text()),
            Span::styled(rating.to_string(), Theme::accent()),
            Span::raw(" ⭐"),
        ])];
    }

    let rating = app.detail.user_rating;
    let (filled, empty) = stars(rating);
    let label = if rating > 0 {
        rating.to_string()
    } else {
        String::new()
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(filled, Theme::star_filled()),
        Span::styled(empty, Theme::star_empty()),
        Span::styled(format!(" {}", label), Theme::accent()),
    ])];

    if rating > 0 {
        lines.push(Line::from(vec![
            Span::styled(" + Add to list ", Theme::button()),
            Span::styled("  press a", Theme::dimmed()),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "Rate with 1-9, 0 for 10",
            Theme::dimmed(),
        )));
    }
    lines
}
