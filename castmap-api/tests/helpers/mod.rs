//! Shared test helpers: a scripted credit source and record builders

#![allow(dead_code)]

use async_trait::async_trait;
use castmap_api::services::{CastEntry, CastViewService, CreditError, CreditSource, MovieCredits};
use castmap_common::config::{MatchingConfig, MovieRef};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Credit source returning canned records, counting invocations
///
/// The first `failures` invocations fail with a network error.
pub struct StubSource {
    records: Vec<MovieCredits>,
    delay: Duration,
    failures: AtomicUsize,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn new(records: Vec<MovieCredits>) -> Self {
        Self {
            records,
            delay: Duration::ZERO,
            failures: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing_first(self, failures: usize) -> Self {
        self.failures.store(failures, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CreditSource for StubSource {
    async fn fetch_credits(&self, _movies: &[MovieRef]) -> Result<Vec<MovieCredits>, CreditError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(CreditError::Network("upstream unreachable".to_string()));
        }

        Ok(self.records.clone())
    }
}

pub fn cast(name: &str, character: &str) -> CastEntry {
    CastEntry {
        name: Some(name.to_string()),
        character: Some(character.to_string()),
    }
}

pub fn movie(title: &str, entries: Vec<CastEntry>) -> MovieCredits {
    MovieCredits::new(title, Some(entries))
}

/// Service over `source` tracking `performers`, default thresholds
pub fn service(source: Arc<StubSource>, performers: &[&str]) -> CastViewService {
    let movies = vec![MovieRef {
        name: "unused".to_string(),
        id: 1,
    }];
    CastViewService::new(
        source,
        movies,
        performers.iter().map(|p| p.to_string()),
        MatchingConfig::default(),
    )
}
