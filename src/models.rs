//! Data structures for ReviewTUI
//!
//! Shared models used across the application:
//! - **Catalog**: movies and their nested reviews as served by the CMS
//! - **Feed**: reviews flattened across movies for the reviews feed
//! - **Ordering**: the rating sort order applied to every list view

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Catalog Models
// =============================================================================

/// A movie record with its embedded reviews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    pub title: String,
    pub description: String,
    /// Rating out of 10, if the movie has one
    pub rating: Option<f32>,
    pub poster_url: Option<String>,
    pub reviews: Vec<Review>,
}

impl Movie {
    /// Rating used for ordering; unrated movies count as 0
    pub fn rating_or_zero(&self) -> f32 {
        self.rating.unwrap_or(0.0)
    }

    /// "★ 8/10", "★ 7.5/10", or "★ --" when unrated
    pub fn rating_label(&self) -> String {
        match self.rating {
            Some(r) => format!("★ {}/10", format_score(r)),
            None => "★ --".to_string(),
        }
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({} reviews)",
            self.title,
            self.rating_label(),
            self.reviews.len()
        )
    }
}

/// A single review left on a movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: u64,
    pub author_name: String,
    pub rating: f32,
    /// ISO-8601 timestamp exactly as received
    pub date: String,
    pub comment: String,
}

impl Review {
    /// Parse the timestamp, `None` when the server sent something unparseable
    pub fn posted_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|d| d.with_timezone(&Utc))
    }

    /// Display date in the given timezone, falling back to the raw string
    pub fn date_label_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        match self.posted_at() {
            Some(at) => format_review_date(&at.with_timezone(tz)),
            None => self.date.clone(),
        }
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ★ {}/10: {}",
            self.author_name,
            format_score(self.rating),
            self.comment
        )
    }
}

// =============================================================================
// Feed Models
// =============================================================================

/// A review annotated with its parent movie, for the reviews feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedReview {
    pub movie_id: u64,
    pub movie_title: String,
    pub movie_poster_url: Option<String>,
    #[serde(flatten)]
    pub review: Review,
}

impl FeedReview {
    pub fn new(movie: &Movie, review: Review) -> Self {
        Self {
            movie_id: movie.id,
            movie_title: movie.title.clone(),
            movie_poster_url: movie.poster_url.clone(),
            review,
        }
    }
}

// =============================================================================
// Ordering
// =============================================================================

/// Rating order applied to a list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Keep the order the server returned
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "highest")]
    HighestFirst,
    #[serde(rename = "lowest")]
    LowestFirst,
}

impl SortOrder {
    /// Cycle Default -> HighestFirst -> LowestFirst -> Default
    pub fn next(self) -> Self {
        match self {
            SortOrder::Default => SortOrder::HighestFirst,
            SortOrder::HighestFirst => SortOrder::LowestFirst,
            SortOrder::LowestFirst => SortOrder::Default,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Default => "All Ratings",
            SortOrder::HighestFirst => "Highest Rated",
            SortOrder::LowestFirst => "Lowest Rated",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" | "all" => Ok(SortOrder::Default),
            "highest" | "highest-first" => Ok(SortOrder::HighestFirst),
            "lowest" | "lowest-first" => Ok(SortOrder::LowestFirst),
            other => Err(format!(
                "unknown sort order '{}' (expected default, highest or lowest)",
                other
            )),
        }
    }
}

// =============================================================================
// Formatting Helpers
// =============================================================================

/// Format a review timestamp like "Mar 5, 2024, 02:30 PM"
pub fn format_review_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    at.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Print a score as stored: whole scores lose the ".0", fractions are not rounded
pub fn format_score(score: f32) -> String {
    score.to_string()
}
