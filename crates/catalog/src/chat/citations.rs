//! Extraction of cited record ids from free text.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

const PATTERNS: [&str; 4] = [
    r"(?i)ID:\s*(\d+)",
    r"(?i)book\s+#?(\d+)",
    r"\[(\d+)\]",
    r"(?i)ID\s+(\d+)",
];

lazy_static! {
    static ref CITATION_PATTERNS: Vec<Regex> = PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect();
}

/// Ids mentioned in `text` that exist in `valid_ids`, ascending and unique.
///
/// Every pattern is applied; overlapping matches collapse. Numbers that do
/// not fit an `i64` are skipped.
pub fn extract_ids(text: &str, valid_ids: &HashSet<i64>) -> Vec<i64> {
    let mut found = BTreeSet::new();

    for pattern in CITATION_PATTERNS.iter() {
        for caps in pattern.captures_iter(text) {
            let Some(digits) = caps.get(1) else {
                continue;
            };
            if let Ok(id) = digits.as_str().parse::<i64>() {
                if valid_ids.contains(&id) {
                    found.insert(id);
                }
            }
        }
    }

    found.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[i64]) -> HashSet<i64> {
        values.iter().copied().collect()
    }

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(CITATION_PATTERNS.len(), PATTERNS.len());
    }

    #[test]
    fn test_mixed_patterns() {
        let found = extract_ids("Book #3 and [7], also ID: 42", &ids(&[3, 7, 42, 99]));
        assert_eq!(found, vec![3, 7, 42]);
    }

    #[test]
    fn test_no_matches() {
        assert!(extract_ids("no ids here", &ids(&[1, 2])).is_empty());
    }

    #[test]
    fn test_unknown_ids_excluded() {
        assert!(extract_ids("book 5", &ids(&[1, 2])).is_empty());
    }

    #[test]
    fn test_case_insensitive_labels_and_dedupe() {
        let found = extract_ids(
            "BOOK 2 is great, id 2 again, and Id:1 as well as book #2",
            &ids(&[1, 2]),
        );
        assert_eq!(found, vec![1, 2]);
    }

    #[test]
    fn test_overflow_skipped() {
        let found = extract_ids(
            "[99999999999999999999999] and [4]",
            &ids(&[4]),
        );
        assert_eq!(found, vec![4]);
    }
}
