//! UI rendering tests
//!
//! Renders each view into a `TestBackend` and checks the visible text.

use ratatui::{backend::TestBackend, Terminal};
use reviewtui::api::CmsError;
use reviewtui::app::{App, DetailState, LoadingState};
use reviewtui::loader::{FetchEvent, FetchOutcome, Request};
use reviewtui::models::{FeedReview, Movie, Review, SortOrder};
use reviewtui::ui;

const WIDTH: u16 = 80;
const HEIGHT: u16 = 24;

fn terminal() -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap()
}

/// Whole screen as text, one line per row
fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn review(id: u64, author: &str, rating: f32, comment: &str) -> Review {
    Review {
        id,
        author_name: author.into(),
        rating,
        date: "2024-03-05T14:30:00.000Z".into(),
        comment: comment.into(),
    }
}

fn dune() -> Movie {
    Movie {
        id: 3,
        document_id: None,
        title: "Dune".into(),
        description: "Spice must flow.".into(),
        rating: Some(8.0),
        poster_url: Some("https://cdn.example.com/dune.jpg".into()),
        reviews: vec![
            review(11, "Ana", 9.0, "Loved the sound design"),
            review(12, "Ben", 6.5, "Slow second half"),
        ],
    }
}

fn cats() -> Movie {
    Movie {
        id: 5,
        document_id: None,
        title: "Cats".into(),
        description: String::new(),
        rating: None,
        poster_url: None,
        reviews: vec![],
    }
}

fn app_with(movies: Vec<Movie>) -> App {
    let mut app = App::new();
    app.load_catalog();
    let ticket = match app.take_requests().pop() {
        Some(Request::Fetch { ticket, .. }) => ticket,
        other => panic!("expected fetch, got {:?}", other),
    };
    app.apply(FetchEvent {
        ticket,
        outcome: FetchOutcome::Catalog(Ok(movies)),
    });
    app
}

fn render_catalog(app: &mut App) -> String {
    let mut terminal = terminal();
    terminal
        .draw(|frame| {
            let area = frame.area();
            ui::catalog::render(frame, area, &mut app.catalog)
        })
        .unwrap();
    screen(&terminal)
}

fn render_detail(detail: &mut DetailState) -> String {
    let mut terminal = terminal();
    terminal
        .draw(|frame| {
            let area = frame.area();
            ui::detail::render(frame, area, detail)
        })
        .unwrap();
    screen(&terminal)
}

// =============================================================================
// Catalog View
// =============================================================================

#[test]
fn test_catalog_loading() {
    let mut app = App::new();
    app.load_catalog();
    let text = render_catalog(&mut app);
    assert!(text.contains("Loading reviews..."));
}

#[test]
fn test_catalog_rows() {
    let mut app = app_with(vec![dune(), cats()]);
    let text = render_catalog(&mut app);
    assert!(text.contains("MOVIES (1/2)"));
    assert!(text.contains("▸ Dune"));
    assert!(text.contains("★ 8/10"));
    assert!(text.contains("2 reviews"));
    assert!(text.contains("Cats"));
    assert!(text.contains("★ --"));
    assert!(text.contains("Showing 2 reviews"));
}

#[test]
fn test_catalog_empty_and_error() {
    let mut app = app_with(vec![]);
    assert!(render_catalog(&mut app).contains("No reviews found"));

    app.catalog.loading = LoadingState::Error(CmsError::ServerError(502).to_string());
    assert!(render_catalog(&mut app).contains("Error: Server returned HTTP 502"));
}

#[test]
fn test_catalog_scrolls_to_selection() {
    let movies: Vec<Movie> = (0..40)
        .map(|i| Movie {
            id: i,
            title: format!("Movie {:02}", i),
            ..cats()
        })
        .collect();
    let mut app = app_with(movies);
    app.catalog.list.last();

    let text = render_catalog(&mut app);
    assert!(text.contains("▸ Movie 39"));
    assert!(!text.contains("Movie 00"));
}

// =============================================================================
// Feed View
// =============================================================================

#[test]
fn test_feed_rows() {
    let mut app = app_with(vec![dune(), cats()]);
    let mut terminal = terminal();
    terminal
        .draw(|frame| {
            let area = frame.area();
            ui::feed::render(frame, area, &mut app.feed, &app.catalog.loading)
        })
        .unwrap();
    let text = screen(&terminal);

    assert!(text.contains("REVIEWS (1/2)"));
    assert!(text.contains("Ana"));
    assert!(text.contains("★ 9/10"));
    assert!(text.contains("Loved the sound design"));
    assert!(text.contains("★ 6.5/10"));
    assert!(text.contains("Showing 2 reviews"));
}

// =============================================================================
// Detail View
// =============================================================================

#[test]
fn test_detail_loading_has_back_hint() {
    let mut detail = DetailState::new(3, None, SortOrder::Default);
    let text = render_detail(&mut detail);
    assert!(text.contains("Loading review details..."));
    assert!(text.contains("Esc  Back to reviews"));
}

#[test]
fn test_detail_not_found() {
    let mut detail = DetailState::new(42, None, SortOrder::Default);
    detail.loading = LoadingState::NotFound;
    let text = render_detail(&mut detail);
    assert!(text.contains("Review not found"));
    assert!(text.contains("Back to reviews"));
}

#[test]
fn test_detail_movie_and_reviews() {
    let mut detail = DetailState::new(3, None, SortOrder::Default);
    detail.set_movie(dune());
    let text = render_detail(&mut detail);

    assert!(text.contains("Dune"));
    assert!(text.contains("★ 8/10"));
    assert!(text.contains("https://cdn.example.com/dune.jpg"));
    assert!(text.contains("Spice must flow."));
    assert!(text.contains("REVIEWS (1/2)"));
    assert!(text.contains("Ana"));
    assert!(text.contains("Slow second half"));
}

#[test]
fn test_detail_without_reviews() {
    let mut detail = DetailState::new(5, None, SortOrder::Default);
    detail.set_movie(cats());
    assert!(render_detail(&mut detail).contains("No comments yet"));
}

#[test]
fn test_detail_focused_review_only() {
    let movie = dune();
    let focus = FeedReview::new(&movie, movie.reviews[1].clone());
    let mut detail = DetailState::new(3, Some(focus), SortOrder::Default);
    detail.set_movie(movie);
    let text = render_detail(&mut detail);

    assert!(text.contains("Ben"));
    assert!(text.contains("Slow second half"));
    assert!(!text.contains("Loved the sound design"));
    assert!(text.contains("Back to reviews"));
}

#[test]
fn test_detail_scrolls_past_multiline_reviews() {
    let comment = "Line one\nLine two\nLine three\nLine four\nLine five\nLine six";
    let movie = Movie {
        reviews: ["Critic A", "Critic B", "Critic C", "Critic D", "Critic E", "Critic F"]
            .iter()
            .enumerate()
            .map(|(i, author)| review(20 + i as u64, author, 7.0, comment))
            .collect(),
        ..dune()
    };
    let mut detail = DetailState::new(3, None, SortOrder::Default);
    detail.set_movie(movie);
    detail.list.last();

    let text = render_detail(&mut detail);
    assert!(text.contains("REVIEWS (6/6)"));
    assert!(text.contains("▸ Critic F"));
    assert!(!text.contains("Critic A"));
}
