//! Memoized single-flight credit acquisition
//!
//! State machine: `Empty → Fetching → Cached`.
//!
//! - `Empty`: the first caller starts the upstream fetch and moves to
//!   `Fetching`, storing a shared handle to the in-flight future.
//! - `Fetching`: later callers clone that handle and await the same result.
//!   A second upstream fetch is never started while one is in flight.
//! - `Cached`: terminal. Every caller gets the stored dataset.
//!
//! A failed fetch is not cached. Every caller attached to it receives the
//! same error and the state returns to `Empty` so the next call retries.
//!
//! The state lock is never held across the upstream await.

use castmap_common::config::MovieRef;
use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::services::credit_client::{CreditError, CreditSource, MovieCredits};

/// Upstream failure shared by every caller of one fetch
#[derive(Debug, Clone, Error)]
#[error("Credit fetch failed: {0}")]
pub struct FetchError(Arc<CreditError>);

impl FetchError {
    pub fn credit_error(&self) -> &CreditError {
        &self.0
    }
}

impl From<CreditError> for FetchError {
    fn from(err: CreditError) -> Self {
        Self(Arc::new(err))
    }
}

/// Raw credits for every configured movie, in configuration order
#[derive(Debug)]
pub struct CreditDataset {
    pub records: Vec<MovieCredits>,
    pub fetched_at: DateTime<Utc>,
}

type FetchOutcome = Result<Arc<CreditDataset>, FetchError>;
type InFlight = Shared<BoxFuture<'static, FetchOutcome>>;

/// Observable coordinator phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Empty,
    Fetching,
    Cached,
}

enum FetchState {
    Empty,
    Fetching { attempt: u64, in_flight: InFlight },
    Cached(Arc<CreditDataset>),
}

struct Inner {
    state: FetchState,
    attempts: u64,
}

/// Single-flight, fetch-once wrapper around a [`CreditSource`]
pub struct FetchCoordinator {
    source: Arc<dyn CreditSource>,
    movies: Arc<[MovieRef]>,
    inner: Mutex<Inner>,
}

impl FetchCoordinator {
    pub fn new(source: Arc<dyn CreditSource>, movies: Vec<MovieRef>) -> Self {
        Self {
            source,
            movies: movies.into(),
            inner: Mutex::new(Inner {
                state: FetchState::Empty,
                attempts: 0,
            }),
        }
    }

    pub async fn phase(&self) -> FetchPhase {
        match self.inner.lock().await.state {
            FetchState::Empty => FetchPhase::Empty,
            FetchState::Fetching { .. } => FetchPhase::Fetching,
            FetchState::Cached(_) => FetchPhase::Cached,
        }
    }

    /// Cached dataset, if the fetch has completed successfully
    pub async fn cached(&self) -> Option<Arc<CreditDataset>> {
        match &self.inner.lock().await.state {
            FetchState::Cached(dataset) => Some(Arc::clone(dataset)),
            _ => None,
        }
    }

    /// Get the dataset, fetching it at most once across concurrent callers
    pub async fn dataset(&self) -> FetchOutcome {
        let (attempt, in_flight) = {
            let mut guard = self.inner.lock().await;
            let inner = &mut *guard;
            match &inner.state {
                FetchState::Cached(dataset) => return Ok(Arc::clone(dataset)),
                FetchState::Fetching { attempt, in_flight } => {
                    debug!(attempt, "Joining in-flight credit fetch");
                    (*attempt, in_flight.clone())
                }
                FetchState::Empty => {
                    inner.attempts += 1;
                    let attempt = inner.attempts;
                    let in_flight = self.start_fetch();
                    info!(attempt, movies = self.movies.len(), "Starting credit fetch");
                    inner.state = FetchState::Fetching {
                        attempt,
                        in_flight: in_flight.clone(),
                    };
                    (attempt, in_flight)
                }
            }
        };

        let outcome = in_flight.await;

        let mut inner = self.inner.lock().await;
        if matches!(&inner.state, FetchState::Fetching { attempt: current, .. } if *current == attempt) {
            inner.state = match &outcome {
                Ok(dataset) => {
                    info!(attempt, movies = dataset.records.len(), "Credit dataset cached");
                    FetchState::Cached(Arc::clone(dataset))
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Credit fetch failed, next request will retry");
                    FetchState::Empty
                }
            };
        }

        outcome
    }

    fn start_fetch(&self) -> InFlight {
        let source = Arc::clone(&self.source);
        let movies = Arc::clone(&self.movies);

        async move {
            let records = source.fetch_credits(&movies).await?;
            Ok::<_, FetchError>(Arc::new(CreditDataset {
                records,
                fetched_at: Utc::now(),
            }))
        }
        .boxed()
        .shared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CreditSource for CountingSource {
        async fn fetch_credits(&self, movies: &[MovieRef]) -> Result<Vec<MovieCredits>, CreditError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(movies.iter().map(|m| MovieCredits::new(&m.name, None)).collect())
        }
    }

    fn movies() -> Vec<MovieRef> {
        vec![
            MovieRef { name: "Iron Man".into(), id: 1726 },
            MovieRef { name: "Thor".into(), id: 10195 },
        ]
    }

    #[tokio::test]
    async fn test_fetches_once_then_serves_cache() {
        let source = Arc::new(CountingSource { calls: AtomicUsize::new(0) });
        let coordinator = FetchCoordinator::new(source.clone(), movies());

        assert_eq!(coordinator.phase().await, FetchPhase::Empty);
        assert!(coordinator.cached().await.is_none());

        let first = coordinator.dataset().await.unwrap();
        let second = coordinator.dataset().await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(coordinator.phase().await, FetchPhase::Cached);

        let titles: Vec<&str> = first.records.iter().map(|r| r.movie_title.as_str()).collect();
        assert_eq!(titles, vec!["Iron Man", "Thor"]);
    }

    #[test]
    fn test_fetch_error_keeps_source_error() {
        let err = FetchError::from(CreditError::Api(401, "Invalid API key".into()));
        assert!(matches!(err.credit_error(), CreditError::Api(401, _)));
        assert!(err.to_string().contains("401"));
    }
}
