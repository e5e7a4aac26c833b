//! Movie detail view
//!
//! Header with the movie's title, rating, poster URL and description, then
//! either its searchable review list or the single review picked in the feed.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::{panel, render_placeholder, Theme};
use crate::app::DetailState;
use crate::models::{format_score, Movie, Review};

/// Header rows including borders
const HEADER_HEIGHT: u16 = 7;

pub fn render(frame: &mut Frame, area: Rect, state: &mut DetailState) {
    if let Some(text) = state.placeholder() {
        render_placeholder(frame, area, panel("DETAIL", true), &text, true);
        return;
    }
    let Some(movie) = state.movie.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(3)])
        .split(area);

    render_header(frame, chunks[0], movie);

    match state.focus_review.clone() {
        Some(entry) => render_focused(frame, chunks[1], &entry.review),
        None => render_reviews(frame, chunks[1], state),
    }
}

fn render_header(frame: &mut Frame, area: Rect, movie: &Movie) {
    let mut lines = vec![Line::from(vec![
        Span::styled(movie.title.clone(), Theme::title()),
        Span::raw("  "),
        Span::styled(
            movie.rating_label(),
            Theme::rating_style(movie.rating_or_zero(), false),
        ),
    ])];
    if let Some(poster) = &movie.poster_url {
        lines.push(Line::from(vec![
            Span::styled("Poster ", Theme::dimmed()),
            Span::styled(poster.clone(), Theme::secondary()),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(movie.description.clone(), Theme::list_item()));

    let header = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(panel("MOVIE", false))
        .style(Theme::text());
    frame.render_widget(header, area);
}

fn review_lines(review: &Review, is_selected: bool) -> Vec<Line<'static>> {
    let marker = if is_selected { "▸ " } else { "  " };
    let mut lines = vec![Line::from(vec![
        Span::styled(
            marker,
            if is_selected { Theme::selected() } else { Theme::dimmed() },
        ),
        Span::styled(review.author_name.clone(), Theme::byline()),
        Span::raw("  "),
        Span::styled(
            format!("★ {}/10", format_score(review.rating)),
            Theme::rating_style(review.rating, is_selected),
        ),
        Span::styled(format!("  {}", review.date_label_in(&Local)), Theme::dimmed()),
    ])];
    lines.extend(review.comment.lines().map(|l| {
        Line::styled(
            format!("    {}", l),
            if is_selected { Theme::list_item_selected() } else { Theme::list_item() },
        )
    }));
    lines
}

/// Rows taken by [`review_lines`]
fn review_height(review: &Review) -> usize {
    1 + review.comment.lines().count()
}

fn render_reviews(frame: &mut Frame, area: Rect, state: &mut DetailState) {
    let total = state.movie.as_ref().map(|m| m.reviews.len()).unwrap_or(0);
    if total == 0 {
        render_placeholder(frame, area, panel("REVIEWS", true), "No comments yet", false);
        return;
    }
    if state.reviews.is_empty() {
        render_placeholder(frame, area, panel("REVIEWS", true), "No reviews found", false);
        return;
    }

    let heights: Vec<usize> = state.reviews.iter().map(review_height).collect();
    state
        .list
        .scroll_into_view_by(&heights, area.height.saturating_sub(2) as usize);

    let selected = state.list.selected;
    let items: Vec<ListItem> = state
        .reviews
        .iter()
        .enumerate()
        .skip(state.list.offset)
        .map(|(i, review)| ListItem::new(Text::from(review_lines(review, i == selected))))
        .collect();

    let title = format!(
        "REVIEWS ({}/{}) · {}",
        selected + 1,
        state.reviews.len(),
        state.filter.sort.label()
    );
    let list = List::new(items).block(panel(title, true)).style(Theme::text());
    frame.render_widget(list, area);
}

fn render_focused(frame: &mut Frame, area: Rect, review: &Review) {
    let mut lines = review_lines(review, false);
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("Esc", Theme::keybind()),
        Span::styled("  Back to reviews", Theme::keybind_desc()),
    ]));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel("REVIEW", true))
        .style(Theme::text());
    frame.render_widget(paragraph, area);
}
