//! Aggregation views over raw movie credits
//!
//! Three independent reducers. Each one filters the raw records down to the
//! appearances of tracked performers and builds its view to completion
//! before returning it. Nothing is shared between them, so they can run in
//! any order over the same records.

use std::collections::HashSet;

use crate::models::{
    Appearance, OrderedMap, PerformerFilter, PerformerRoleGroups, PerformerTitles, RolePerformers,
};
use crate::services::credit_client::MovieCredits;
use crate::services::identity_clusterer::IdentityClusterer;
use crate::services::similarity::SimilarityMatcher;

/// Extract the appearances of tracked performers, in input order
///
/// Movies without a cast array and cast entries missing a name or a
/// character are skipped.
pub fn collect_appearances(records: &[MovieCredits], filter: &PerformerFilter) -> Vec<Appearance> {
    let mut appearances = Vec::new();

    for record in records {
        let Some(cast) = record.credits.cast.as_ref() else {
            tracing::debug!(movie = %record.movie_title, "No cast data, skipping movie");
            continue;
        };

        for entry in cast {
            let (Some(name), Some(character)) = (entry.name.as_deref(), entry.character.as_deref()) else {
                tracing::debug!(
                    movie = %record.movie_title,
                    name = ?entry.name,
                    character = ?entry.character,
                    "Incomplete cast entry, skipping"
                );
                continue;
            };

            if filter.contains(name) {
                appearances.push(Appearance::new(&record.movie_title, name, character));
            }
        }
    }

    appearances
}

/// Reducers sharing one performer filter and one matcher
#[derive(Debug, Clone, Copy)]
pub struct AggregationViews<'a> {
    filter: &'a PerformerFilter,
    matcher: &'a SimilarityMatcher,
}

impl<'a> AggregationViews<'a> {
    pub fn new(filter: &'a PerformerFilter, matcher: &'a SimilarityMatcher) -> Self {
        Self { filter, matcher }
    }

    /// Performer → titles of every movie they appear in
    ///
    /// A performer credited twice in one movie gets that title twice.
    pub fn performer_titles(&self, records: &[MovieCredits]) -> PerformerTitles {
        let mut view = PerformerTitles::new();

        for appearance in collect_appearances(records, self.filter) {
            view.entry_or_default(&appearance.performer_name)
                .push(appearance.movie_title);
        }

        view
    }

    /// Performers who played more than one distinct character
    ///
    /// Each performer's appearances are clustered on their own. The view
    /// holds the first appearance of each group, in group creation order.
    pub fn performer_role_groups(&self, records: &[MovieCredits]) -> PerformerRoleGroups {
        let appearances = collect_appearances(records, self.filter);

        let mut by_performer: OrderedMap<Vec<&Appearance>> = OrderedMap::new();
        for appearance in &appearances {
            by_performer
                .entry_or_default(&appearance.performer_name)
                .push(appearance);
        }

        let clusterer = IdentityClusterer::new(self.matcher);
        let mut view = PerformerRoleGroups::new();

        for (performer, own) in by_performer {
            let groups = clusterer.cluster(own.into_iter().map(|a| (a, a.role_label.as_str())));
            if groups.len() < 2 {
                continue;
            }

            view.entry_or_default(&performer)
                .extend(groups.iter().map(|g| (*g.representative()).clone()));
        }

        view
    }

    /// Characters played by more than one distinct performer
    ///
    /// All appearances are clustered together across performers. Groups are
    /// keyed by their representative label. Labels that never match anything
    /// form singleton groups, so two kept groups cannot share a label; if
    /// they ever did their appearances would be appended under one key.
    pub fn role_performers(&self, records: &[MovieCredits]) -> RolePerformers {
        let appearances = collect_appearances(records, self.filter);
        let clusterer = IdentityClusterer::new(self.matcher);
        let groups = clusterer.cluster(appearances.iter().map(|a| (a, a.role_label.as_str())));

        let mut view = RolePerformers::new();

        for group in groups {
            let performers: HashSet<&str> = group
                .members()
                .iter()
                .map(|a| a.performer_name.as_str())
                .collect();
            if performers.len() < 2 {
                continue;
            }

            let label = group.label().to_string();
            view.entry_or_default(&label)
                .extend(group.into_members().into_iter().cloned());
        }

        view
    }
}
