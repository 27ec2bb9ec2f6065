//! Catalog record types and their validation rules.

use serde::{Deserialize, Serialize};
use shelf_core::{AppError, AppResult};

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Store-assigned identifier, ignored on create
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub isbn: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub genre: Option<String>,
}

impl Book {
    /// Create an unsaved book with the two required fields.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            author: author.into(),
            isbn: None,
            description: None,
            year: None,
            genre: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Check field limits. All violations are reported together.
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Violations::default();
        v.required("title", &self.title, 200);
        v.required("author", &self.author, 150);
        v.max_len("isbn", self.isbn.as_deref(), 13);
        v.max_len("description", self.description.as_deref(), 1000);
        v.max_len("genre", self.genre.as_deref(), 100);
        v.finish()
    }
}

/// A game in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub developer: String,

    #[serde(default)]
    pub publisher: String,

    /// `YYYY-MM-DD`
    #[serde(default)]
    pub release_date: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub genre: Option<String>,

    #[serde(default)]
    pub price: f64,

    #[serde(default)]
    pub discount_percentage: Option<f64>,

    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub store_page_url: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub supported_platforms: Vec<String>,
}

impl Game {
    /// Create an unsaved game with the two required fields.
    pub fn new(title: impl Into<String>, developer: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            developer: developer.into(),
            publisher: String::new(),
            release_date: None,
            description: None,
            genre: None,
            price: 0.0,
            discount_percentage: None,
            rating: None,
            image_url: None,
            store_page_url: None,
            tags: Vec::new(),
            supported_platforms: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = publisher.into();
        self
    }

    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = Some(date.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_discount(mut self, percentage: f64) -> Self {
        self.discount_percentage = Some(percentage);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_store_page_url(mut self, url: impl Into<String>) -> Self {
        self.store_page_url = Some(url.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_platforms<I, S>(mut self, platforms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_platforms = platforms.into_iter().map(Into::into).collect();
        self
    }

    /// Price after discount, when a discount is set.
    pub fn discounted_price(&self) -> Option<f64> {
        self.discount_percentage
            .map(|d| self.price * (100.0 - d) / 100.0)
    }

    /// Check field limits. All violations are reported together.
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Violations::default();
        v.required("title", &self.title, 200);
        v.required("developer", &self.developer, 150);
        v.max_len("publisher", Some(&self.publisher), 150);
        v.max_len("releaseDate", self.release_date.as_deref(), 20);
        v.max_len("description", self.description.as_deref(), 1000);
        v.max_len("genre", self.genre.as_deref(), 100);
        v.range("price", Some(self.price), 0.0, 1000.0);
        v.range("discountPercentage", self.discount_percentage, 0.0, 100.0);
        v.range("rating", self.rating, 0.0, 5.0);
        v.url("imageUrl", self.image_url.as_deref());
        v.url("storePageUrl", self.store_page_url.as_deref());
        v.finish()
    }
}

/// Outbound shape of a game, with the derived discounted price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    #[serde(flatten)]
    pub game: Game,
    pub discounted_price: Option<f64>,
}

impl From<Game> for GameView {
    fn from(game: Game) -> Self {
        let discounted_price = game.discounted_price();
        Self {
            game,
            discounted_price,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_items: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_items.div_ceil(page_size as u64)
        };
        Self {
            items,
            page,
            page_size,
            total_items,
            total_pages,
        }
    }

    /// Convert every item, keeping the paging numbers.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Default)]
struct Violations(Vec<String>);

impl Violations {
    fn required(&mut self, field: &str, value: &str, max: usize) {
        if value.trim().is_empty() {
            self.0.push(format!("{} is required", field));
        } else {
            self.max_len(field, Some(value), max);
        }
    }

    fn max_len(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(value) = value {
            if value.chars().count() > max {
                self.0
                    .push(format!("{} must be at most {} characters", field, max));
            }
        }
    }

    fn range(&mut self, field: &str, value: Option<f64>, min: f64, max: f64) {
        if let Some(value) = value {
            if !(min..=max).contains(&value) {
                self.0
                    .push(format!("{} must be between {} and {}", field, min, max));
            }
        }
    }

    fn url(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value {
            let has_scheme = value.starts_with("http://") || value.starts_with("https://");
            let has_host = value
                .split_once("://")
                .map(|(_, rest)| !rest.is_empty())
                .unwrap_or(false);
            if !has_scheme || !has_host || value.chars().any(char::is_whitespace) {
                self.0
                    .push(format!("{} must be an absolute http(s) URL", field));
            }
        }
    }

    fn finish(self) -> AppResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.0.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_serializes_camel_case_with_nulls() {
        let book = Book::new("Clean Code", "Robert C. Martin")
            .with_id(2)
            .with_year(2008);
        let json = serde_json::to_value(&book).unwrap();

        assert_eq!(json["id"], 2);
        assert_eq!(json["year"], 2008);
        assert!(json["genre"].is_null());
    }

    #[test]
    fn test_book_payload_without_id() {
        let book: Book =
            serde_json::from_str(r#"{"title":"Dune","author":"Frank Herbert"}"#).unwrap();
        assert_eq!(book.id, 0);
        assert!(book.validate().is_ok());
    }

    #[test]
    fn test_book_validation_reports_all_violations() {
        let book = Book::new("  ", "").with_isbn("12345678901234");
        let err = book.validate().unwrap_err().to_string();

        assert!(err.contains("title is required"));
        assert!(err.contains("author is required"));
        assert!(err.contains("isbn must be at most 13"));
    }

    #[test]
    fn test_title_limit_counts_chars() {
        let ok = Book::new("é".repeat(200), "A");
        assert!(ok.validate().is_ok());

        let too_long = Book::new("x".repeat(201), "A");
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_game_validation_ranges_and_urls() {
        let game = Game::new("Elden Ring", "FromSoftware")
            .with_price(59.99)
            .with_rating(4.8)
            .with_image_url("https://cdn.example.com/header.jpg");
        assert!(game.validate().is_ok());

        let bad = Game::new("X", "Y")
            .with_price(1000.01)
            .with_discount(-1.0)
            .with_rating(5.5)
            .with_store_page_url("store page");
        let err = bad.validate().unwrap_err().to_string();
        assert!(err.contains("price"));
        assert!(err.contains("discountPercentage"));
        assert!(err.contains("rating"));
        assert!(err.contains("storePageUrl"));
    }

    #[test]
    fn test_game_view_discounted_price() {
        let view = GameView::from(Game::new("G", "D").with_price(60.0).with_discount(25.0));
        assert_eq!(view.discounted_price, Some(45.0));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["discountedPrice"], 45.0);
        assert_eq!(json["title"], "G");

        let plain = GameView::from(Game::new("G", "D").with_price(60.0));
        assert_eq!(plain.discounted_price, None);
    }

    #[test]
    fn test_page_totals() {
        let page = Page::new(vec![1, 2], 1, 2, 5);
        assert_eq!(page.total_pages, 3);

        let mapped = page.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.total_items, 5);
    }
}
