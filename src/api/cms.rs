//! Headless CMS client
//!
//! Reads the movie catalog (with populated reviews) from the content API.
//! All calls are plain GETs; the catalog is never written to.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{Movie, Review};

/// Default content API host
pub const DEFAULT_BASE_URL: &str = "https://headless-cms-source-files-8c59.onrender.com";

/// CMS API error types
#[derive(Error, Debug)]
pub enum CmsError {
    #[error("Movie not found")]
    NotFound,

    #[error("Server returned HTTP {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

impl CmsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CmsError::NotFound)
    }
}

pub type Result<T> = std::result::Result<T, CmsError>;

/// CMS API client
#[derive(Debug, Clone)]
pub struct CmsClient {
    base_url: String,
    client: reqwest::Client,
}

impl CmsClient {
    /// Create a client for the given API host
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an endpoint and decode the JSON body
    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "request failed");
                CmsError::RequestFailed(e)
            })?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                serde_json::from_str(&body).map_err(|e| {
                    warn!(%url, error = %e, "unexpected response shape");
                    CmsError::InvalidResponse(format!("JSON parse error: {}", e))
                })
            }
            status => {
                warn!(%url, status = status.as_u16(), "non-success status");
                Err(CmsError::ServerError(status.as_u16()))
            }
        }
    }

    /// List every movie with its reviews populated
    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        let response: ListResponse = self.get("/api/movies?populate=*").await?;
        Ok(response.into_movies())
    }

    /// Fetch one movie by id through the single-record endpoint
    ///
    /// HTTP 404 and `data: null` are both reported as [`CmsError::NotFound`].
    pub async fn movie_direct(&self, id: u64) -> Result<Movie> {
        let endpoint = format!("/api/movies/{}?populate=*", id);
        let response: SingleResponse = match self.get(&endpoint).await {
            Err(CmsError::ServerError(404)) => return Err(CmsError::NotFound),
            other => other?,
        };
        response
            .data
            .map(MovieRaw::into_movie)
            .ok_or(CmsError::NotFound)
    }

    /// Fetch one movie by id through an id-filtered list query
    ///
    /// An empty result set is reported as [`CmsError::NotFound`].
    pub async fn find_movie(&self, id: u64) -> Result<Movie> {
        let endpoint = format!(
            "/api/movies?{}={}&populate=*",
            urlencoding::encode("filters[id][$eq]"),
            id
        );
        let response: ListResponse = self.get(&endpoint).await?;
        response
            .into_movies()
            .into_iter()
            .next()
            .ok_or(CmsError::NotFound)
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    data: Option<Vec<MovieRaw>>,
}

impl ListResponse {
    fn into_movies(self) -> Vec<Movie> {
        self.data
            .unwrap_or_default()
            .into_iter()
            .map(MovieRaw::into_movie)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct SingleResponse {
    #[serde(default)]
    data: Option<MovieRaw>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MovieRaw {
    id: u64,
    document_id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    rating: Option<f32>,
    poster: Option<PosterRaw>,
    reviews: Option<Vec<ReviewRaw>>,
}

impl MovieRaw {
    fn into_movie(self) -> Movie {
        Movie {
            id: self.id,
            document_id: self.document_id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            rating: self.rating,
            poster_url: self.poster.and_then(|p| p.url),
            reviews: self
                .reviews
                .unwrap_or_default()
                .into_iter()
                .map(ReviewRaw::into_review)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PosterRaw {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReviewRaw {
    id: u64,
    author_name: Option<String>,
    rating: Option<f32>,
    date: Option<String>,
    comment: Option<String>,
}

impl ReviewRaw {
    fn into_review(self) -> Review {
        Review {
            id: self.id,
            author_name: self.author_name.unwrap_or_default(),
            rating: self.rating.unwrap_or(0.0),
            date: self.date.unwrap_or_default(),
            comment: self.comment.unwrap_or_default(),
        }
    }
}
