//! Movie grid view

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use super::{panel, render_placeholder, Theme};
use crate::app::CatalogState;
use crate::models::Movie;

/// Bottom-line count, e.g. "Showing 3 reviews"
pub fn count_label(n: usize) -> String {
    if n == 1 {
        "Showing 1 review".to_string()
    } else {
        format!("Showing {} reviews", n)
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &mut CatalogState) {
    if let Some(text) = state.placeholder() {
        render_placeholder(frame, area, panel("MOVIES", true), &text, false);
        return;
    }

    let visible_height = area.height.saturating_sub(2) as usize;
    state.list.scroll_into_view(visible_height);

    let selected = state.list.selected;
    let items: Vec<ListItem> = state
        .view
        .iter()
        .enumerate()
        .skip(state.list.offset)
        .take(visible_height)
        .map(|(i, movie)| render_item(movie, i == selected))
        .collect();

    let title = format!("MOVIES ({}/{})", selected + 1, state.view.len());
    let block = panel(title, true).title_bottom(Line::from(Span::styled(
        format!(" {} ", count_label(state.view.len())),
        Theme::dimmed(),
    )));

    let list = List::new(items).block(block).style(Theme::text());
    frame.render_widget(list, area);
}

fn render_item(movie: &Movie, is_selected: bool) -> ListItem<'static> {
    // ▸ Title  ★ 8/10  3 reviews
    let marker = if is_selected { "▸ " } else { "  " };
    let reviews = match movie.reviews.len() {
        1 => "1 review".to_string(),
        n => format!("{} reviews", n),
    };

    let line = Line::from(vec![
        Span::styled(
            marker,
            if is_selected { Theme::selected() } else { Theme::dimmed() },
        ),
        Span::styled(
            movie.title.clone(),
            if is_selected { Theme::list_item_selected() } else { Theme::list_item() },
        ),
        Span::raw("  "),
        Span::styled(
            movie.rating_label(),
            Theme::rating_style(movie.rating_or_zero(), is_selected),
        ),
        Span::raw("  "),
        Span::styled(reviews, Theme::dimmed()),
    ]);

    ListItem::new(line)
}
