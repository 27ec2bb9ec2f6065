//! Weighted field scoring.

use super::fields::{Field, Searchable};
use super::tokenizer::TermSet;

/// Per-field weights added for every matching term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldWeights {
    pub title: f64,
    pub creator: f64,
    pub code: f64,
    pub genre: f64,
    pub tag: f64,
    pub description: f64,
    /// Applied to any field without a dedicated weight
    pub default: f64,
}

impl FieldWeights {
    pub const DEFAULT: FieldWeights = FieldWeights {
        title: 3.0,
        creator: 2.5,
        code: 2.0,
        genre: 1.5,
        tag: 1.25,
        description: 1.0,
        default: 0.5,
    };

    pub fn weight(&self, field: Field) -> f64 {
        match field {
            Field::Title => self.title,
            Field::Creator => self.creator,
            Field::Code => self.code,
            Field::Genre => self.genre,
            Field::Description => self.description,
            Field::Publisher => self.default,
        }
    }
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Lowercased view of a record's searchable text, built once per record.
struct Lowered {
    fields: Vec<(Field, String)>,
    tags: Vec<String>,
}

impl Lowered {
    fn of<R: Searchable + ?Sized>(record: &R) -> Self {
        let fields = Field::ALL
            .iter()
            .filter_map(|&f| record.field(f).map(|text| (f, text.to_lowercase())))
            .collect();
        let tags = record
            .tags()
            .iter()
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
            .collect();
        Self { fields, tags }
    }

    fn matches_any(&self, term: &str) -> bool {
        self.fields.iter().any(|(_, text)| text.contains(term))
            || self.tags.iter().any(|tag| tag.contains(term))
    }
}

/// Raw additive relevance of `record` for `terms`.
///
/// Each (term, field) substring match adds the field weight; each
/// (tag, term) match adds the tag weight. No normalization.
pub fn score<R: Searchable + ?Sized>(record: &R, terms: &TermSet, weights: &FieldWeights) -> f64 {
    let lowered = Lowered::of(record);
    let mut total = 0.0;

    for term in terms.iter() {
        for (field, text) in &lowered.fields {
            if text.contains(term) {
                total += weights.weight(*field);
            }
        }
        for tag in &lowered.tags {
            if tag.contains(term) {
                total += weights.tag;
            }
        }
    }

    total
}

/// Terms that hit any weighted field or tag, in term order.
pub fn matched_terms<R: Searchable + ?Sized>(record: &R, terms: &TermSet) -> Vec<String> {
    let lowered = Lowered::of(record);
    terms
        .iter()
        .filter(|term| lowered.matches_any(term))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Book, Game};
    use crate::search::tokenizer::tokenize;

    fn clean_code() -> Book {
        Book::new("Clean Code", "Robert C. Martin")
            .with_isbn("9780132350884")
            .with_genre("Software")
            .with_description("A handbook of agile software craftsmanship.")
    }

    #[test]
    fn test_title_match_dominates() {
        let s = score(&clean_code(), &tokenize("clean"), &FieldWeights::DEFAULT);
        assert_eq!(s, FieldWeights::DEFAULT.title);
    }

    #[test]
    fn test_no_match_scores_zero() {
        let s = score(&clean_code(), &tokenize("xyz"), &FieldWeights::DEFAULT);
        assert_eq!(s, 0.0);
    }

    #[test]
    fn test_fields_add_up() {
        // genre + description
        let s = score(&clean_code(), &tokenize("software"), &FieldWeights::DEFAULT);
        assert_eq!(s, 1.5 + 1.0);

        // title + author for two terms
        let s = score(&clean_code(), &tokenize("code martin"), &FieldWeights::DEFAULT);
        assert_eq!(s, 3.0 + 2.5);
    }

    #[test]
    fn test_isbn_substring_match() {
        let s = score(&clean_code(), &tokenize("0132350"), &FieldWeights::DEFAULT);
        assert_eq!(s, FieldWeights::DEFAULT.code);
    }

    #[test]
    fn test_isbn_match_is_case_insensitive() {
        let book = Book::new("T", "A").with_isbn("080442957X");
        let s = score(&book, &tokenize("957x"), &FieldWeights::DEFAULT);
        assert_eq!(s, FieldWeights::DEFAULT.code);
    }

    #[test]
    fn test_each_tag_term_pair_counts() {
        let game = Game::new("Elden Ring", "FromSoftware")
            .with_tags(["Open World", "World Building", "RPG"]);
        let s = score(&game, &tokenize("world"), &FieldWeights::DEFAULT);
        assert_eq!(s, 2.0 * FieldWeights::DEFAULT.tag);
    }

    #[test]
    fn test_publisher_uses_default_weight() {
        let game = Game::new("Elden Ring", "FromSoftware").with_publisher("Bandai Namco");
        let s = score(&game, &tokenize("bandai"), &FieldWeights::DEFAULT);
        assert_eq!(s, FieldWeights::DEFAULT.default);
    }

    #[test]
    fn test_weight_ordering() {
        let w = FieldWeights::DEFAULT;
        assert!(w.title > w.creator);
        assert!(w.creator > w.code);
        assert!(w.code > w.genre);
        assert!(w.genre > w.tag);
        assert!(w.tag > w.description);
        assert!(w.description > w.default);
    }

    #[test]
    fn test_matched_terms_in_query_order() {
        let terms = tokenize("xyz martin clean");
        assert_eq!(matched_terms(&clean_code(), &terms), vec!["martin", "clean"]);
    }
}
