//! Reviews feed view

use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{List, ListItem},
    Frame,
};

use super::catalog::count_label;
use super::{first_line, panel, render_placeholder, Theme};
use crate::app::{FeedState, LoadingState};
use crate::models::{format_score, FeedReview};

/// Rows per entry: heading plus comment
const ROWS_PER_ENTRY: usize = 2;

pub fn render(frame: &mut Frame, area: Rect, state: &mut FeedState, catalog_loading: &LoadingState) {
    if let Some(text) = state.placeholder(catalog_loading) {
        render_placeholder(frame, area, panel("REVIEWS", true), &text, false);
        return;
    }

    let visible = area.height.saturating_sub(2) as usize / ROWS_PER_ENTRY;
    state.list.scroll_into_view(visible);

    let selected = state.list.selected;
    let items: Vec<ListItem> = state
        .view
        .iter()
        .enumerate()
        .skip(state.list.offset)
        .take(visible)
        .map(|(i, entry)| render_item(entry, i == selected))
        .collect();

    let title = format!("REVIEWS ({}/{})", selected + 1, state.view.len());
    let block = panel(title, true).title_bottom(Line::from(Span::styled(
        format!(" {} ", count_label(state.view.len())),
        Theme::dimmed(),
    )));

    let list = List::new(items).block(block).style(Theme::text());
    frame.render_widget(list, area);
}

fn render_item(entry: &FeedReview, is_selected: bool) -> ListItem<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let review = &entry.review;

    let heading = Line::from(vec![
        Span::styled(
            marker,
            if is_selected { Theme::selected() } else { Theme::dimmed() },
        ),
        Span::styled(
            entry.movie_title.clone(),
            if is_selected { Theme::list_item_selected() } else { Theme::list_item() },
        ),
        Span::raw("  "),
        Span::styled(
            format!("★ {}/10", format_score(review.rating)),
            Theme::rating_style(review.rating, is_selected),
        ),
        Span::raw("  "),
        Span::styled(review.author_name.clone(), Theme::byline()),
        Span::styled(format!(" · {}", review.date_label_in(&Local)), Theme::dimmed()),
    ]);
    let comment = Line::from(Span::styled(
        format!("    {}", first_line(&review.comment)),
        Theme::list_item(),
    ));

    ListItem::new(Text::from(vec![heading, comment]))
}
