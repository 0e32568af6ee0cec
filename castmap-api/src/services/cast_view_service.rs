//! Cast view service
//!
//! Owns the performer filter, the matcher and the fetch coordinator, and
//! exposes the three views as zero-argument async accessors. Every accessor
//! awaits the same memoized dataset, so concurrent callers racing the first
//! fetch all see identical records and produce identical views.

use castmap_common::config::{MatchingConfig, MovieRef};
use std::sync::Arc;

use crate::models::{PerformerFilter, PerformerRoleGroups, PerformerTitles, RolePerformers};
use crate::services::aggregation::AggregationViews;
use crate::services::credit_client::CreditSource;
use crate::services::fetch_coordinator::{CreditDataset, FetchCoordinator, FetchError, FetchPhase};
use crate::services::similarity::SimilarityMatcher;

pub struct CastViewService {
    coordinator: FetchCoordinator,
    filter: PerformerFilter,
    matcher: SimilarityMatcher,
}

impl CastViewService {
    pub fn new<S: Into<String>>(
        source: Arc<dyn CreditSource>,
        movies: Vec<MovieRef>,
        performers: impl IntoIterator<Item = S>,
        matching: MatchingConfig,
    ) -> Self {
        Self {
            coordinator: FetchCoordinator::new(source, movies),
            filter: performers.into_iter().collect(),
            matcher: SimilarityMatcher::new(matching),
        }
    }

    fn views(&self) -> AggregationViews<'_> {
        AggregationViews::new(&self.filter, &self.matcher)
    }

    async fn dataset(&self) -> Result<Arc<CreditDataset>, FetchError> {
        self.coordinator.dataset().await
    }

    /// Performer → movie titles
    pub async fn performer_titles(&self) -> Result<PerformerTitles, FetchError> {
        let dataset = self.dataset().await?;
        let view = self.views().performer_titles(&dataset.records);
        tracing::debug!(performers = view.len(), "Built performer titles view");
        Ok(view)
    }

    /// Performers with more than one distinct role
    pub async fn performer_role_groups(&self) -> Result<PerformerRoleGroups, FetchError> {
        let dataset = self.dataset().await?;
        let view = self.views().performer_role_groups(&dataset.records);
        tracing::debug!(performers = view.len(), "Built performer role groups view");
        Ok(view)
    }

    /// Roles played by more than one performer
    pub async fn role_performers(&self) -> Result<RolePerformers, FetchError> {
        let dataset = self.dataset().await?;
        let view = self.views().role_performers(&dataset.records);
        tracing::debug!(roles = view.len(), "Built role performers view");
        Ok(view)
    }

    pub async fn fetch_phase(&self) -> FetchPhase {
        self.coordinator.phase().await
    }

    pub async fn cached_dataset(&self) -> Option<Arc<CreditDataset>> {
        self.coordinator.cached().await
    }

    pub fn tracked_performers(&self) -> usize {
        self.filter.len()
    }
}
