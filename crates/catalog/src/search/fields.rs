//! Kind-agnostic field access for scoring.

use crate::models::{Book, Game};

/// A weighted text field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    /// Author for books, developer for games
    Creator,
    /// Identifier-like code such as an ISBN
    Code,
    Genre,
    Description,
    Publisher,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::Creator,
        Field::Code,
        Field::Genre,
        Field::Description,
        Field::Publisher,
    ];
}

/// A record the scorer can read.
///
/// Missing or empty fields contribute nothing to a score.
pub trait Searchable {
    fn field(&self, field: Field) -> Option<&str>;

    fn tags(&self) -> &[String] {
        &[]
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl Searchable for Book {
    fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => non_empty(&self.title),
            Field::Creator => non_empty(&self.author),
            Field::Code => self.isbn.as_deref().and_then(non_empty),
            Field::Genre => self.genre.as_deref().and_then(non_empty),
            Field::Description => self.description.as_deref().and_then(non_empty),
            Field::Publisher => None,
        }
    }
}

impl Searchable for Game {
    fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => non_empty(&self.title),
            Field::Creator => non_empty(&self.developer),
            Field::Code => None,
            Field::Genre => self.genre.as_deref().and_then(non_empty),
            Field::Description => self.description.as_deref().and_then(non_empty),
            Field::Publisher => non_empty(&self.publisher),
        }
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}
