//! Role identity matching
//!
//! Two role labels denote the same character when both of these hold on the
//! normalized labels:
//! - token-set score >= `token_set_threshold` (word order and a superset
//!   label such as "Tony Stark / Iron Man" vs "Tony Stark" do not hurt it)
//! - full-string edit ratio >= `edit_ratio_threshold` (rejects a short label
//!   that is merely a subset of an unrelated longer one, "Hero" vs
//!   "Different Hero")
//!
//! Both scores are integers on 0-100. The verdict is symmetric but not
//! transitive.

use castmap_common::config::MatchingConfig;
use std::collections::BTreeSet;

use crate::services::name_normalizer::normalize_role_label;

/// Scores computed for one pair of labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleScores {
    pub token_set: u8,
    pub edit_ratio: u8,
}

/// Threshold-based role label matcher
#[derive(Debug, Clone, Copy)]
pub struct SimilarityMatcher {
    token_set_threshold: u8,
    edit_ratio_threshold: u8,
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self::new(MatchingConfig::default())
    }
}

impl SimilarityMatcher {
    pub fn new(config: MatchingConfig) -> Self {
        Self {
            token_set_threshold: config.token_set_threshold,
            edit_ratio_threshold: config.edit_ratio_threshold,
        }
    }

    /// Score two raw labels, or `None` if either normalizes to empty
    pub fn scores(&self, a: &str, b: &str) -> Option<RoleScores> {
        let a = normalize_role_label(a);
        let b = normalize_role_label(b);
        if a.is_empty() || b.is_empty() {
            return None;
        }

        Some(RoleScores {
            token_set: token_set_ratio(&a, &b),
            edit_ratio: edit_ratio(&a, &b),
        })
    }

    /// Whether two raw labels denote the same character
    pub fn is_same_identity(&self, a: &str, b: &str) -> bool {
        match self.scores(a, b) {
            Some(scores) => {
                scores.token_set >= self.token_set_threshold
                    && scores.edit_ratio >= self.edit_ratio_threshold
            }
            None => false,
        }
    }
}

/// Lowercase, turn every non-alphanumeric character into a separator and
/// collapse runs of separators into one space
fn preprocess(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Length of the longest common subsequence of two char slices
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Indel similarity of two already preprocessed strings: 2*LCS / (|a|+|b|)
fn indel_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let total = a.len() + b.len();
    let lcs = lcs_len(&a, &b);
    (200.0 * lcs as f64 / total as f64).round() as u8
}

/// Full-string edit ratio (0-100)
///
/// Strings with no alphanumeric content score 0, even against themselves.
pub fn edit_ratio(a: &str, b: &str) -> u8 {
    indel_ratio(&preprocess(a), &preprocess(b))
}

/// Order-insensitive token-set ratio (0-100)
///
/// Compares the sorted shared tokens against each side's sorted shared-plus-
/// remaining tokens and keeps the best of the three pairings, so a label
/// whose tokens are a subset of the other's scores 100.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    let a = preprocess(a);
    let b = preprocess(b);
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let shared = join_tokens(tokens_a.intersection(&tokens_b));
    let only_a = join_tokens(tokens_a.difference(&tokens_b));
    let only_b = join_tokens(tokens_b.difference(&tokens_a));

    let combined_a = format!("{} {}", shared, only_a).trim().to_string();
    let combined_b = format!("{} {}", shared, only_b).trim().to_string();

    [
        indel_ratio(&shared, &combined_a),
        indel_ratio(&shared, &combined_b),
        indel_ratio(&combined_a, &combined_b),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

fn join_tokens<'a, 'b: 'a>(tokens: impl Iterator<Item = &'a &'b str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}
