//! App state and core application logic
//!
//! Manages the screen state machine, per-view search and ordering, and the
//! bookkeeping that ties background fetches back to the view that asked.
//! Nothing here performs I/O: fetches are queued as [`Request`]s for the
//! event loop and their results come back through [`App::apply`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::catalog::{filter_feed, filter_movies, filter_reviews, flatten_reviews};
use crate::loader::{FetchEvent, FetchKind, FetchOutcome, Request, Slot, Ticket};
use crate::models::{FeedReview, Movie, Review, SortOrder};

/// Rows moved by PageUp / PageDown
const PAGE_SIZE: usize = 10;

// =============================================================================
// App State Enum
// =============================================================================

/// Screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Movie grid
    #[default]
    Catalog,
    /// Reviews flattened across every movie
    Feed,
    /// One movie and its reviews
    Detail,
}

impl AppState {
    pub fn label(self) -> &'static str {
        match self {
            AppState::Catalog => "MOVIES",
            AppState::Feed => "REVIEWS",
            AppState::Detail => "DETAIL",
        }
    }
}

/// Current input mode for keyboard handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Typing into the active view's search box
    Editing,
}

// =============================================================================
// Loading State
// =============================================================================

/// Lifecycle of a remote read
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadingState {
    /// Nothing pending; data (possibly empty) is in place
    #[default]
    Idle,
    /// Waiting on the server
    Loading(Option<String>),
    /// Transport or response failure
    Error(String),
    /// The server answered but had no such record
    NotFound,
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadingState::NotFound)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Loading(Some(msg)) => Some(msg),
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Selection State (per-view)
// =============================================================================

/// Cursor and scroll position of a list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub selected: usize,
    pub offset: usize,
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }

    fn last_index(&self) -> usize {
        self.len.saturating_sub(1)
    }

    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.offset = self.offset.min(self.selected);
    }

    pub fn down(&mut self) {
        self.selected = (self.selected + 1).min(self.last_index());
    }

    pub fn page_up(&mut self, page: usize) {
        self.selected = self.selected.saturating_sub(page);
        self.offset = self.offset.min(self.selected);
    }

    pub fn page_down(&mut self, page: usize) {
        self.selected = (self.selected + page).min(self.last_index());
    }

    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    pub fn last(&mut self) {
        self.selected = self.last_index();
    }

    /// Keep the selected row inside a viewport of `height` rows
    pub fn scroll_into_view(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected + 1 - height;
        }
    }

    /// Like [`Self::scroll_into_view`] for rows of uneven height
    ///
    /// `heights[i]` is the row count of entry `i`; `rows` is the viewport.
    pub fn scroll_into_view_by(&mut self, heights: &[usize], rows: usize) {
        if self.selected < self.offset {
            self.offset = self.selected;
        }
        let span = |from: usize, to: usize| heights[from..=to].iter().sum::<usize>();
        while self.offset < self.selected
            && self.selected < heights.len()
            && span(self.offset, self.selected) > rows
        {
            self.offset += 1;
        }
    }

    /// Resize after the underlying list changed, clamping the cursor
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.selected = self.selected.min(self.last_index());
        self.offset = self.offset.min(self.selected);
    }
}

// =============================================================================
// Search Box
// =============================================================================

/// Query text and rating order of one view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    /// Cursor position in characters
    pub cursor: usize,
    pub sort: SortOrder,
}

impl FilterState {
    pub fn with_sort(sort: SortOrder) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.query
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index();
        self.query.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index();
            self.query.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index();
            self.query.remove(at);
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Query split around the cursor, for drawing the caret
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.query.split_at(self.byte_index())
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
    }
}

// =============================================================================
// View-Specific State
// =============================================================================

/// Movie grid: the loaded catalog and its derived view
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub movies: Vec<Movie>,
    pub view: Vec<Movie>,
    pub filter: FilterState,
    pub list: ListState,
    pub loading: LoadingState,
}

impl CatalogState {
    /// Recompute the visible movies from the catalog, query and order
    pub fn refresh(&mut self) {
        self.view = filter_movies(&self.movies, &self.filter.query, self.filter.sort);
        self.list.set_len(self.view.len());
    }

    pub fn selected_movie(&self) -> Option<&Movie> {
        self.view.get(self.list.selected)
    }

    /// Text shown instead of the list, if any
    pub fn placeholder(&self) -> Option<String> {
        placeholder_for(&self.loading, self.view.is_empty(), "Loading reviews...")
    }
}

/// Reviews feed: every review flattened across the catalog
#[derive(Debug, Clone, Default)]
pub struct FeedState {
    pub entries: Vec<FeedReview>,
    pub view: Vec<FeedReview>,
    pub filter: FilterState,
    pub list: ListState,
}

impl FeedState {
    pub fn refresh(&mut self) {
        self.view = filter_feed(&self.entries, &self.filter.query, self.filter.sort);
        self.list.set_len(self.view.len());
    }

    pub fn selected_entry(&self) -> Option<&FeedReview> {
        self.view.get(self.list.selected)
    }

    /// The feed is derived from the catalog, so it shares the catalog's load
    pub fn placeholder(&self, catalog_loading: &LoadingState) -> Option<String> {
        placeholder_for(catalog_loading, self.view.is_empty(), "Loading reviews...")
    }
}

/// Detail view for one movie
#[derive(Debug, Clone)]
pub struct DetailState {
    /// Movie being resolved
    pub movie_id: u64,
    /// Review chosen in the feed; when set only this review is shown
    pub focus_review: Option<FeedReview>,
    /// Resolved record, once the fetch succeeds
    pub movie: Option<Movie>,
    /// Visible nested reviews
    pub reviews: Vec<Review>,
    pub filter: FilterState,
    pub list: ListState,
    pub loading: LoadingState,
}

impl DetailState {
    pub fn new(movie_id: u64, focus_review: Option<FeedReview>, sort: SortOrder) -> Self {
        Self {
            movie_id,
            focus_review,
            movie: None,
            reviews: Vec::new(),
            filter: FilterState::with_sort(sort),
            list: ListState::new(0),
            loading: LoadingState::Loading(Some("Loading review details...".into())),
        }
    }

    /// Whether this detail shows a single review handed over by the feed
    pub fn is_focused(&self) -> bool {
        self.focus_review.is_some()
    }

    pub fn set_movie(&mut self, movie: Movie) {
        self.movie = Some(movie);
        self.loading = LoadingState::Idle;
        self.refresh();
    }

    /// Recompute the nested review list; a focused review bypasses it
    pub fn refresh(&mut self) {
        self.reviews = match (&self.movie, &self.focus_review) {
            (Some(movie), None) => {
                filter_reviews(&movie.reviews, &self.filter.query, self.filter.sort)
            }
            _ => Vec::new(),
        };
        self.list.set_len(self.reviews.len());
    }

    pub fn placeholder(&self) -> Option<String> {
        match &self.loading {
            LoadingState::Loading(msg) => Some(
                msg.clone()
                    .unwrap_or_else(|| "Loading review details...".into()),
            ),
            LoadingState::Error(msg) => Some(format!("Error: {}", msg)),
            LoadingState::NotFound => Some("Review not found".into()),
            LoadingState::Idle if self.movie.is_none() => Some("Review not found".into()),
            LoadingState::Idle => None,
        }
    }
}

fn placeholder_for(loading: &LoadingState, empty: bool, loading_text: &str) -> Option<String> {
    match loading {
        LoadingState::Loading(msg) => Some(msg.clone().unwrap_or_else(|| loading_text.into())),
        LoadingState::Error(msg) => Some(format!("Error: {}", msg)),
        _ if empty => Some("No reviews found".into()),
        _ => None,
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Current screen
    pub state: AppState,
    /// Navigation history stack
    pub nav_stack: Vec<AppState>,
    /// Whether the app is running
    pub running: bool,
    pub input_mode: InputMode,

    pub catalog: CatalogState,
    pub feed: FeedState,
    pub detail: Option<DetailState>,

    default_sort: SortOrder,
    catalog_generation: u64,
    detail_generation: u64,
    requests: Vec<Request>,
}

impl Default for App {
    fn default() -> Self {
        Self::with_default_sort(SortOrder::Default)
    }
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an app whose views start in the given rating order
    pub fn with_default_sort(sort: SortOrder) -> Self {
        Self {
            state: AppState::Catalog,
            nav_stack: Vec::new(),
            running: true,
            input_mode: InputMode::Normal,
            catalog: CatalogState {
                filter: FilterState::with_sort(sort),
                ..CatalogState::default()
            },
            feed: FeedState {
                filter: FilterState::with_sort(sort),
                ..FeedState::default()
            },
            detail: None,
            default_sort: sort,
            catalog_generation: 0,
            detail_generation: 0,
            requests: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Navigate to a new state, pushing current to stack
    pub fn navigate(&mut self, state: AppState) {
        if self.state != state {
            self.nav_stack.push(self.state);
            self.state = state;
        }
        self.input_mode = InputMode::Normal;
    }

    /// Go back one level; leaving detail discards its state
    pub fn back(&mut self) -> bool {
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            return true;
        }

        if self.state == AppState::Detail {
            self.close_detail();
        }

        match self.nav_stack.pop() {
            Some(prev) => {
                self.state = prev;
                true
            }
            None => false,
        }
    }

    /// Toggle between the movie grid and the reviews feed
    pub fn switch_list(&mut self) {
        self.state = match self.state {
            AppState::Catalog => AppState::Feed,
            AppState::Feed => AppState::Catalog,
            AppState::Detail => return,
        };
        self.input_mode = InputMode::Normal;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    // -------------------------------------------------------------------------
    // Fetch bookkeeping
    // -------------------------------------------------------------------------

    fn next_ticket(&mut self, slot: Slot) -> Ticket {
        let generation = match slot {
            Slot::Catalog => {
                self.catalog_generation += 1;
                self.catalog_generation
            }
            Slot::Detail => {
                self.detail_generation += 1;
                self.detail_generation
            }
        };
        Ticket { slot, generation }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        let current = match ticket.slot {
            Slot::Catalog => self.catalog_generation,
            Slot::Detail => self.detail_generation,
        };
        ticket.generation == current
    }

    /// Drain the fetch work queued since the last call
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }

    /// Issue the catalog read
    pub fn load_catalog(&mut self) {
        let ticket = self.next_ticket(Slot::Catalog);
        self.catalog.loading = LoadingState::Loading(Some("Loading reviews...".into()));
        self.requests.push(Request::Fetch {
            ticket,
            kind: FetchKind::Catalog,
        });
    }

    /// Open the detail view for a movie, optionally showing one chosen review
    pub fn open_movie(&mut self, movie_id: u64, focus_review: Option<FeedReview>) {
        let ticket = self.next_ticket(Slot::Detail);
        info!(movie_id, focused = focus_review.is_some(), "opening detail");
        self.detail = Some(DetailState::new(movie_id, focus_review, self.default_sort));
        self.requests.push(Request::Fetch {
            ticket,
            kind: FetchKind::Movie { id: movie_id },
        });
        self.navigate(AppState::Detail);
    }

    fn close_detail(&mut self) {
        // Invalidate whatever is still in flight for the old detail
        self.next_ticket(Slot::Detail);
        self.requests.push(Request::Cancel(Slot::Detail));
        self.detail = None;
    }

    /// Fold a completed fetch into state; stale results are dropped
    pub fn apply(&mut self, event: FetchEvent) -> bool {
        if !self.is_current(event.ticket) {
            debug!(ticket = ?event.ticket, "discarding stale fetch result");
            return false;
        }

        match (event.ticket.slot, event.outcome) {
            (Slot::Catalog, FetchOutcome::Catalog(result)) => {
                match result {
                    Ok(movies) => {
                        info!(count = movies.len(), "catalog loaded");
                        self.catalog.movies = movies;
                        self.catalog.loading = LoadingState::Idle;
                    }
                    Err(e) => {
                        self.catalog.movies.clear();
                        self.catalog.loading = LoadingState::Error(e.to_string());
                    }
                }
                self.catalog.refresh();
                self.feed.entries = flatten_reviews(&self.catalog.movies);
                self.feed.refresh();
                true
            }
            (Slot::Detail, FetchOutcome::Movie(result)) => {
                let Some(detail) = self.detail.as_mut() else {
                    return false;
                };
                match result {
                    Ok(movie) => detail.set_movie(movie),
                    Err(e) if e.is_not_found() => detail.loading = LoadingState::NotFound,
                    Err(e) => detail.loading = LoadingState::Error(e.to_string()),
                }
                true
            }
            (slot, _) => {
                debug!(?slot, "fetch outcome does not match its slot");
                false
            }
        }
    }

    // -------------------------------------------------------------------------
    // Active view helpers
    // -------------------------------------------------------------------------

    /// Search box of the current screen, if it has one
    pub fn active_filter(&self) -> Option<&FilterState> {
        match self.state {
            AppState::Catalog => Some(&self.catalog.filter),
            AppState::Feed => Some(&self.feed.filter),
            AppState::Detail => self
                .detail
                .as_ref()
                .filter(|d| !d.is_focused())
                .map(|d| &d.filter),
        }
    }

    fn active_filter_mut(&mut self) -> Option<&mut FilterState> {
        match self.state {
            AppState::Catalog => Some(&mut self.catalog.filter),
            AppState::Feed => Some(&mut self.feed.filter),
            AppState::Detail => self
                .detail
                .as_mut()
                .filter(|d| !d.is_focused())
                .map(|d| &mut d.filter),
        }
    }

    fn active_list_mut(&mut self) -> Option<&mut ListState> {
        match self.state {
            AppState::Catalog => Some(&mut self.catalog.list),
            AppState::Feed => Some(&mut self.feed.list),
            AppState::Detail => self.detail.as_mut().map(|d| &mut d.list),
        }
    }

    fn refresh_active(&mut self) {
        match self.state {
            AppState::Catalog => self.catalog.refresh(),
            AppState::Feed => self.feed.refresh(),
            AppState::Detail => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.refresh();
                }
            }
        }
    }

    /// Enter search editing on the current screen
    pub fn focus_search(&mut self) {
        if self.active_filter().is_some() {
            self.input_mode = InputMode::Editing;
        }
    }

    /// Advance the rating order of the current screen
    pub fn cycle_sort(&mut self) {
        if let Some(filter) = self.active_filter_mut() {
            filter.cycle_sort();
            self.refresh_active();
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            self.input_mode = InputMode::Normal;
            return true;
        }

        let Some(filter) = self.active_filter_mut() else {
            self.input_mode = InputMode::Normal;
            return false;
        };

        let changed = match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                filter.clear();
                true
            }
            KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                return false;
            }
            KeyCode::Char(c) => {
                filter.insert(c);
                true
            }
            KeyCode::Backspace => {
                filter.backspace();
                true
            }
            KeyCode::Delete => {
                filter.delete();
                true
            }
            KeyCode::Left => {
                filter.cursor_left();
                false
            }
            KeyCode::Right => {
                filter.cursor_right();
                false
            }
            KeyCode::Home => {
                filter.cursor_home();
                false
            }
            KeyCode::End => {
                filter.cursor_end();
                false
            }
            _ => return false,
        };

        if changed {
            self.refresh_active();
        }
        true
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.focus_search();
                return true;
            }
            KeyCode::Char('o') => {
                self.cycle_sort();
                return true;
            }
            KeyCode::Esc => return self.back(),
            KeyCode::Tab => {
                self.switch_list();
                return true;
            }
            KeyCode::Enter => return self.open_selected(),
            _ => {}
        }

        let Some(list) = self.active_list_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => list.up(),
            KeyCode::Down | KeyCode::Char('j') => list.down(),
            KeyCode::PageUp => list.page_up(PAGE_SIZE),
            KeyCode::PageDown => list.page_down(PAGE_SIZE),
            KeyCode::Home | KeyCode::Char('g') => list.first(),
            KeyCode::End | KeyCode::Char('G') => list.last(),
            _ => return false,
        }
        true
    }

    /// Open the highlighted movie or review
    fn open_selected(&mut self) -> bool {
        match self.state {
            AppState::Catalog => match self.catalog.selected_movie().map(|m| m.id) {
                Some(id) => {
                    self.open_movie(id, None);
                    true
                }
                None => false,
            },
            AppState::Feed => match self.feed.selected_entry().cloned() {
                Some(entry) => {
                    self.open_movie(entry.movie_id, Some(entry));
                    true
                }
                None => false,
            },
            AppState::Detail => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
