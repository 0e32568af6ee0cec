//! Upstream movie credit client
//!
//! Fetches the cast list of every configured movie from a TMDB-compatible
//! API (`GET {base_url}/movie/{id}/credits`). Rows are deserialized with
//! every field optional so a missing `cast` array or a cast entry without a
//! name or character becomes a skipped row downstream, not a parse failure.

use async_trait::async_trait;
use castmap_common::config::MovieRef;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = concat!("castmap/", env!("CARGO_PKG_VERSION"));

/// Credit client errors
#[derive(Debug, Error)]
pub enum CreditError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Upstream API key not configured")]
    MissingApiKey,
}

/// One cast entry as returned upstream
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CastEntry {
    /// Performer name
    #[serde(default)]
    pub name: Option<String>,
    /// Role label
    #[serde(default)]
    pub character: Option<String>,
}

/// Credits payload; `cast` is absent for movies without cast data
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Option<Vec<CastEntry>>,
}

/// Credits for one movie, tagged with the configured movie title
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieCredits {
    pub movie_title: String,
    pub credits: Credits,
}

impl MovieCredits {
    pub fn new(movie_title: impl Into<String>, cast: Option<Vec<CastEntry>>) -> Self {
        Self {
            movie_title: movie_title.into(),
            credits: Credits { cast },
        }
    }
}

/// Source of raw per-movie cast lists
#[async_trait]
pub trait CreditSource: Send + Sync {
    /// Fetch credits for every movie, preserving input order
    ///
    /// Fails as a whole if any single movie cannot be fetched.
    async fn fetch_credits(&self, movies: &[MovieRef]) -> Result<Vec<MovieCredits>, CreditError>;
}

/// TMDB credit client
pub struct TmdbCreditClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TmdbCreditClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, CreditError> {
        if api_key.trim().is_empty() {
            return Err(CreditError::MissingApiKey);
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| CreditError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn credits_url(&self, movie_id: u64) -> String {
        format!("{}/movie/{}/credits", self.base_url, movie_id)
    }

    /// Fetch credits for a single movie
    pub async fn fetch_movie(&self, movie: &MovieRef) -> Result<MovieCredits, CreditError> {
        let url = self.credits_url(movie.id);

        tracing::debug!(movie = %movie.name, id = movie.id, url = %url, "Requesting movie credits");

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| CreditError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CreditError::Api(status.as_u16(), error_text));
        }

        let credits: Credits = response
            .json()
            .await
            .map_err(|e| CreditError::Parse(e.to_string()))?;

        tracing::debug!(
            movie = %movie.name,
            cast = credits.cast.as_ref().map(Vec::len).unwrap_or(0),
            "Retrieved movie credits"
        );

        Ok(MovieCredits {
            movie_title: movie.name.clone(),
            credits,
        })
    }
}

#[async_trait]
impl CreditSource for TmdbCreditClient {
    async fn fetch_credits(&self, movies: &[MovieRef]) -> Result<Vec<MovieCredits>, CreditError> {
        // try_join_all keeps input order and stops at the first failure
        let records = try_join_all(movies.iter().map(|movie| self.fetch_movie(movie))).await?;

        tracing::info!(movies = records.len(), "Fetched credits for all movies");

        Ok(records)
    }
}
