//! Terminal UI components
//!
//! Built with ratatui. Each view renders one screen of [`crate::app::App`]
//! into the content area; the header and status bar live in the binary.

pub mod catalog;
pub mod detail;
pub mod feed;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

/// Rounded panel used by every view
pub fn panel(title: impl Into<String>, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Theme::border_focused()
    } else {
        Theme::border()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(Span::styled(format!(" {} ", title.into()), Theme::title()))
        .title_alignment(Alignment::Left)
}

/// Style for a placeholder message
pub fn placeholder_style(text: &str) -> Style {
    if text.starts_with("Error:") {
        Theme::error()
    } else if text.starts_with("Loading") {
        Theme::loading()
    } else {
        Theme::dimmed()
    }
}

/// Centered message in place of a list, optionally with a way back
pub fn render_placeholder(frame: &mut Frame, area: Rect, block: Block<'static>, text: &str, back_hint: bool) {
    // Push the message towards the vertical middle
    let pad = area.height.saturating_sub(4) / 2;
    let mut lines: Vec<Line> = (0..pad).map(|_| Line::raw("")).collect();
    lines.push(Line::from(Span::styled(text.to_string(), placeholder_style(text))));
    if back_hint {
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Esc", Theme::keybind()),
            Span::styled("  Back to reviews", Theme::keybind_desc()),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block)
        .style(Theme::text());
    frame.render_widget(paragraph, area);
}

/// First line of a possibly multi-line text
pub fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
