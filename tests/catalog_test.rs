//! Catalog filter tests
//!
//! Properties of search and rating order over arbitrary catalogs, plus the
//! concrete scenarios the views rely on.

use proptest::prelude::*;
use reviewtui::catalog::{filter_feed, filter_movies, flatten_reviews};
use reviewtui::models::{Movie, Review, SortOrder};

fn movie(id: u64, title: &str, rating: Option<f32>) -> Movie {
    Movie {
        id,
        document_id: None,
        title: title.into(),
        description: String::new(),
        rating,
        poster_url: None,
        reviews: vec![],
    }
}

// =============================================================================
// Strategies
// =============================================================================

fn arb_review() -> impl Strategy<Value = Review> {
    (any::<u64>(), "[A-Za-z]{1,8}", 0u8..=20, "[A-Za-z ]{0,20}").prop_map(
        |(id, author, half_points, comment)| Review {
            id,
            author_name: author,
            rating: half_points as f32 / 2.0,
            date: "2024-03-05T14:30:00.000Z".into(),
            comment,
        },
    )
}

fn arb_movie() -> impl Strategy<Value = Movie> {
    (
        any::<u64>(),
        "[A-Za-z ]{1,12}",
        "[A-Za-z ]{0,24}",
        proptest::option::of(0u8..=20),
        proptest::collection::vec(arb_review(), 0..4),
    )
        .prop_map(|(id, title, description, rating, reviews)| Movie {
            id,
            document_id: None,
            title,
            description,
            rating: rating.map(|r| r as f32 / 2.0),
            poster_url: None,
            reviews,
        })
}

fn arb_catalog() -> impl Strategy<Value = Vec<Movie>> {
    proptest::collection::vec(arb_movie(), 0..12)
}

fn arb_sort() -> impl Strategy<Value = SortOrder> {
    prop_oneof![
        Just(SortOrder::Default),
        Just(SortOrder::HighestFirst),
        Just(SortOrder::LowestFirst),
    ]
}

fn ratings(movies: &[Movie]) -> Vec<f32> {
    movies.iter().map(Movie::rating_or_zero).collect()
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn empty_query_is_identity(catalog in arb_catalog(), query in "[a-z]{0,4}") {
        let narrowed = filter_movies(&catalog, &query, SortOrder::Default);
        let widened = filter_movies(&catalog, "", SortOrder::Default);
        prop_assert_eq!(&widened, &catalog);
        prop_assert!(narrowed.len() <= widened.len());
    }

    #[test]
    fn highest_first_is_non_increasing(catalog in arb_catalog()) {
        let view = filter_movies(&catalog, "", SortOrder::HighestFirst);
        let r = ratings(&view);
        prop_assert!(r.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn lowest_first_is_non_decreasing(catalog in arb_catalog()) {
        let view = filter_movies(&catalog, "", SortOrder::LowestFirst);
        let r = ratings(&view);
        prop_assert!(r.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn sorting_is_idempotent(catalog in arb_catalog(), sort in arb_sort()) {
        let once = filter_movies(&catalog, "", sort);
        let twice = filter_movies(&once, "", sort);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn search_is_case_insensitive(catalog in arb_catalog(), query in "[a-z]{1,3}") {
        let lower = filter_movies(&catalog, &query, SortOrder::Default);
        let upper = filter_movies(&catalog, &query.to_uppercase(), SortOrder::Default);
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn view_is_a_permutation_of_matches(catalog in arb_catalog(), sort in arb_sort()) {
        let view = filter_movies(&catalog, "", sort);
        prop_assert_eq!(view.len(), catalog.len());
        for m in &catalog {
            prop_assert!(view.contains(m));
        }
    }

    #[test]
    fn feed_preserves_review_count(catalog in arb_catalog()) {
        let total: usize = catalog.iter().map(|m| m.reviews.len()).sum();
        let feed = flatten_reviews(&catalog);
        prop_assert_eq!(feed.len(), total);
        prop_assert_eq!(filter_feed(&feed, "", SortOrder::Default), feed);
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_dune_cats_lowest_first() {
    let catalog = vec![movie(1, "Dune", Some(8.0)), movie(2, "Cats", Some(2.0))];
    let view = filter_movies(&catalog, "", SortOrder::LowestFirst);
    let titles: Vec<&str> = view.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Cats", "Dune"]);
}

#[test]
fn test_query_then_clear_restores_catalog() {
    let catalog = vec![movie(1, "Dune", Some(8.0)), movie(2, "Cats", Some(2.0))];
    assert_eq!(filter_movies(&catalog, "dun", SortOrder::Default).len(), 1);
    assert_eq!(filter_movies(&catalog, "", SortOrder::Default), catalog);
}

#[test]
fn test_empty_catalog() {
    assert!(filter_movies(&[], "dune", SortOrder::HighestFirst).is_empty());
    assert!(flatten_reviews(&[]).is_empty());
}
