//! Greedy identity clustering of labelled items
//!
//! Items are visited once, in input order. Each item is compared against the
//! label of the first member of every existing group, in group creation
//! order, and joins the first group that matches. Otherwise it starts a new
//! group. Groups are never merged or re-evaluated and a group's label is
//! fixed by its first member.
//!
//! Because the matcher is not transitive the result depends on input order:
//! with A~B, B~C and A!~C, the order A,B,C yields {A,B},{C} while B,A,C yields
//! {B,A,C}. Replacing this with union-find or a transitive closure would
//! change the output.

use crate::services::similarity::SimilarityMatcher;

/// Items judged to denote one character identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityGroup<T> {
    label: String,
    members: Vec<T>,
}

impl<T> IdentityGroup<T> {
    fn new(label: &str, first: T) -> Self {
        Self {
            label: label.to_string(),
            members: vec![first],
        }
    }

    /// Label of the first member
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Members in join order, never empty
    pub fn members(&self) -> &[T] {
        &self.members
    }

    /// First member
    pub fn representative(&self) -> &T {
        &self.members[0]
    }

    pub fn into_members(self) -> Vec<T> {
        self.members
    }
}

/// Single-pass, first-match-wins clusterer
#[derive(Debug, Clone, Copy)]
pub struct IdentityClusterer<'m> {
    matcher: &'m SimilarityMatcher,
}

impl<'m> IdentityClusterer<'m> {
    pub fn new(matcher: &'m SimilarityMatcher) -> Self {
        Self { matcher }
    }

    /// Partition `(item, label)` pairs into groups in creation order
    pub fn cluster<'l, T, I>(&self, items: I) -> Vec<IdentityGroup<T>>
    where
        I: IntoIterator<Item = (T, &'l str)>,
    {
        let mut groups: Vec<IdentityGroup<T>> = Vec::new();

        for (item, label) in items {
            let matched = groups
                .iter()
                .position(|group| self.matcher.is_same_identity(&group.label, label));

            match matched {
                Some(i) => groups[i].members.push(item),
                None => groups.push(IdentityGroup::new(label, item)),
            }
        }

        groups
    }
}
