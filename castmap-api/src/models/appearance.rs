//! Appearance records and the performer filter

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One performer-in-role record within one movie's cast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    pub movie_title: String,
    pub performer_name: String,
    pub role_label: String,
}

impl Appearance {
    pub fn new(
        movie_title: impl Into<String>,
        performer_name: impl Into<String>,
        role_label: impl Into<String>,
    ) -> Self {
        Self {
            movie_title: movie_title.into(),
            performer_name: performer_name.into(),
            role_label: role_label.into(),
        }
    }
}

/// Performers of interest
///
/// Appearances by anyone not in this set are excluded from every view.
/// Matching is exact on the performer name as returned upstream.
#[derive(Debug, Clone, Default)]
pub struct PerformerFilter {
    names: HashSet<String>,
}

impl PerformerFilter {
    pub fn contains(&self, performer_name: &str) -> bool {
        self.names.contains(performer_name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PerformerFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
