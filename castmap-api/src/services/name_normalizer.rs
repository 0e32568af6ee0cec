//! Role label normalization
//!
//! Upstream role labels carry annotations such as "(uncredited)" or
//! "(voice)" that say nothing about who the character is. They are removed
//! before two labels are compared.

use once_cell::sync::Lazy;
use regex::Regex;

/// A parenthesized run plus the whitespace around it.
///
/// `[^)]*` also swallows any nested `(`, so after one pass no `(` with a
/// later `)` remains. This keeps normalization idempotent.
static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]*\)\s*").expect("parenthetical pattern is valid"));

/// Strip every parenthesized annotation from a role label and trim the result
///
/// Each removed annotation leaves a single space so the words on either side
/// stay separated. Empty input yields an empty string.
pub fn normalize_role_label(label: &str) -> String {
    if label.is_empty() {
        return String::new();
    }
    PARENTHETICAL.replace_all(label, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_annotation_removed() {
        assert_eq!(normalize_role_label("Steve Rogers (uncredited)"), "Steve Rogers");
    }

    #[test]
    fn test_inner_annotation_keeps_word_boundary() {
        assert_eq!(normalize_role_label("Groot (voice) / Tree"), "Groot / Tree");
    }

    #[test]
    fn test_multiple_annotations() {
        assert_eq!(
            normalize_role_label("(archive footage) Howard Stark (uncredited)"),
            "Howard Stark"
        );
    }

    #[test]
    fn test_annotation_only_yields_empty() {
        assert_eq!(normalize_role_label("(uncredited)"), "");
        assert_eq!(normalize_role_label(""), "");
        assert_eq!(normalize_role_label("   "), "");
    }

    #[test]
    fn test_unbalanced_parenthesis_left_alone() {
        assert_eq!(normalize_role_label("Thor (Odinson"), "Thor (Odinson");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "Steve Rogers (uncredited)",
            "Groot (voice) / Tree",
            "A ((nested) b) c",
            "( (x) ) y",
            "Thor (Odinson",
            "  Nick Fury  ",
            "(a)(b)(c)",
        ];

        for sample in samples {
            let once = normalize_role_label(sample);
            let twice = normalize_role_label(&once);
            assert_eq!(once, twice, "normalize is not idempotent for {:?}", sample);
        }
    }
}
