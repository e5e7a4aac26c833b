//! CLI Command Handlers
//!
//! Each handler takes its CLI args, the shared context and Output, and
//! returns an ExitCode.

use chrono::Local;
use tracing::info;

use crate::api::{CmsClient, CmsError};
use crate::catalog::{filter_feed, filter_movies, filter_reviews, flatten_reviews};
use crate::cli::{ExitCode, ListCmd, Output, ReviewsCmd, ShowCmd};
use crate::models::{format_score, FeedReview, Movie, SortOrder};

/// What every handler needs besides its own arguments
#[derive(Debug, Clone)]
pub struct Context {
    pub client: CmsClient,
    /// Order used when a command does not pass `--sort`
    pub default_sort: SortOrder,
}

impl Context {
    pub fn new(client: CmsClient, default_sort: SortOrder) -> Self {
        Self {
            client,
            default_sort,
        }
    }
}

/// Map a client failure onto the exit code scripts can branch on
fn error_code(e: &CmsError) -> ExitCode {
    match e {
        CmsError::NotFound => ExitCode::NotFound,
        CmsError::ServerError(_) | CmsError::InvalidResponse(_) | CmsError::RequestFailed(_) => {
            ExitCode::NetworkError
        }
    }
}

fn truncate<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}

// =============================================================================
// List Command
// =============================================================================

pub async fn list_cmd(cmd: ListCmd, ctx: &Context, output: &Output) -> ExitCode {
    output.info(format!("Loading catalog from {}", ctx.client.base_url()));

    match ctx.client.list_movies().await {
        Ok(movies) => {
            let sort = cmd.filter.sort_or(ctx.default_sort);
            let view = truncate(filter_movies(&movies, cmd.filter.query(), sort), cmd.limit);
            info!(total = movies.len(), shown = view.len(), "listing movies");

            if let Err(e) = output.print(view, |v| render_movies(v)) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Catalog load failed: {}", e), error_code(&e)),
    }
}

fn render_movies(movies: &[Movie]) -> String {
    if movies.is_empty() {
        return "No reviews found".to_string();
    }
    movies
        .iter()
        .map(|m| format!("{:>5}  {}", m.id, m))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Reviews Command
// =============================================================================

pub async fn reviews_cmd(cmd: ReviewsCmd, ctx: &Context, output: &Output) -> ExitCode {
    output.info(format!("Loading reviews from {}", ctx.client.base_url()));

    match ctx.client.list_movies().await {
        Ok(movies) => {
            let feed = flatten_reviews(&movies);
            let sort = cmd.filter.sort_or(ctx.default_sort);
            let view = truncate(filter_feed(&feed, cmd.filter.query(), sort), cmd.limit);
            info!(total = feed.len(), shown = view.len(), "listing reviews");

            if let Err(e) = output.print(view, |v| render_feed(v)) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Review feed failed: {}", e), error_code(&e)),
    }
}

fn render_feed(entries: &[FeedReview]) -> String {
    if entries.is_empty() {
        return "No reviews found".to_string();
    }
    entries
        .iter()
        .map(|e| {
            format!(
                "{}  ★ {}/10  {} · {}\n    {}",
                e.movie_title,
                format_score(e.review.rating),
                e.review.author_name,
                e.review.date_label_in(&Local),
                e.review.comment
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Show Command
// =============================================================================

pub async fn show_cmd(cmd: ShowCmd, ctx: &Context, output: &Output) -> ExitCode {
    output.info(format!("Loading movie {}", cmd.id));

    let result = if cmd.direct {
        ctx.client.movie_direct(cmd.id).await
    } else {
        ctx.client.find_movie(cmd.id).await
    };

    match result {
        Ok(mut movie) => {
            let sort = cmd.filter.sort_or(ctx.default_sort);
            movie.reviews = filter_reviews(&movie.reviews, cmd.filter.query(), sort);

            if let Err(e) = output.print(movie, render_movie) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(CmsError::NotFound) => output.error("Review not found", ExitCode::NotFound),
        Err(e) => output.error(format!("Movie load failed: {}", e), error_code(&e)),
    }
}

fn render_movie(movie: &Movie) -> String {
    let mut lines = vec![
        format!("{}  {}", movie.title, movie.rating_label()),
    ];
    if let Some(poster) = &movie.poster_url {
        lines.push(format!("Poster: {}", poster));
    }
    if !movie.description.is_empty() {
        lines.push(String::new());
        lines.push(movie.description.clone());
    }
    lines.push(String::new());
    if movie.reviews.is_empty() {
        lines.push("No comments yet".to_string());
    }
    for review in &movie.reviews {
        lines.push(format!(
            "{}  ★ {}/10  {}",
            review.author_name,
            format_score(review.rating),
            review.date_label_in(&Local)
        ));
        lines.push(format!("    {}", review.comment));
    }
    lines.join("\n")
}
