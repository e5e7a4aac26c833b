//! ReviewTUI - terminal client for a movie-review catalog
//!
//! Loads movies and their nested reviews from a headless CMS, filters and
//! sorts them client-side, and presents a movie grid, a reviews feed and a
//! per-movie detail view.
//!
//! # Modules
//!
//! - `models` - Movies, reviews, feed entries, sort order
//! - `api` - CMS client
//! - `catalog` - Search and rating order over loaded data
//! - `loader` - Cancellable background fetches
//! - `app` - Application state and navigation
//! - `ui` - TUI components
//! - `cli` / `commands` - Scriptable subcommands
//! - `config` / `logging` - Startup configuration and tracing

pub mod api;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod loader;
pub mod logging;
pub mod models;
pub mod ui;

// Re-export commonly used types
pub use models::{FeedReview, Movie, Review, SortOrder};

pub use api::{CmsClient, CmsError};
pub use app::{App, AppState};
pub use config::Config;
