//! Client-side search and ordering
//!
//! Derives the visible list of a view from its loaded collection, a free-text
//! query and a [`SortOrder`]. Derivation is pure: the source is never touched
//! and the same inputs always produce the same output.

use crate::models::{FeedReview, Movie, Review, SortOrder};

/// Items that can be searched and ordered by rating
pub trait Filterable {
    /// Whether any searchable field contains `needle` (already lowercased)
    fn matches(&self, needle: &str) -> bool;

    /// Rating used for ordering, absent ratings count as 0
    fn rating(&self) -> f32;
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

impl Filterable for Movie {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.title, needle) || contains(&self.description, needle)
    }

    fn rating(&self) -> f32 {
        self.rating_or_zero()
    }
}

impl Filterable for FeedReview {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.movie_title, needle)
            || contains(&self.review.author_name, needle)
            || contains(&self.review.comment, needle)
    }

    fn rating(&self) -> f32 {
        self.review.rating
    }
}

impl Filterable for Review {
    fn matches(&self, needle: &str) -> bool {
        contains(&self.author_name, needle) || contains(&self.comment, needle)
    }

    fn rating(&self) -> f32 {
        self.rating
    }
}

/// Build the visible list for a view
///
/// A blank query keeps every item. Rating sorts are stable, so items with
/// equal ratings keep their source order.
pub fn derive_view<T: Filterable + Clone>(items: &[T], query: &str, sort: SortOrder) -> Vec<T> {
    let mut view: Vec<T> = if query.trim().is_empty() {
        items.to_vec()
    } else {
        let needle = query.to_lowercase();
        items.iter().filter(|i| i.matches(&needle)).cloned().collect()
    };

    match sort {
        SortOrder::Default => {}
        SortOrder::HighestFirst => view.sort_by(|a, b| b.rating().total_cmp(&a.rating())),
        SortOrder::LowestFirst => view.sort_by(|a, b| a.rating().total_cmp(&b.rating())),
    }

    view
}

/// Movie grid: matches title and description
pub fn filter_movies(movies: &[Movie], query: &str, sort: SortOrder) -> Vec<Movie> {
    derive_view(movies, query, sort)
}

/// Reviews feed: matches movie title, author and comment
pub fn filter_feed(feed: &[FeedReview], query: &str, sort: SortOrder) -> Vec<FeedReview> {
    derive_view(feed, query, sort)
}

/// Reviews nested in a single movie: matches author and comment
pub fn filter_reviews(reviews: &[Review], query: &str, sort: SortOrder) -> Vec<Review> {
    derive_view(reviews, query, sort)
}

/// Flatten every movie's reviews into one feed, in catalog order
pub fn flatten_reviews(movies: &[Movie]) -> Vec<FeedReview> {
    movies
        .iter()
        .flat_map(|movie| {
            movie
                .reviews
                .iter()
                .cloned()
                .map(move |review| FeedReview::new(movie, review))
        })
        .collect()
}
