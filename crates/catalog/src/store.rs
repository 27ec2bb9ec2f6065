//! SQLite-backed record store for books and games.

use crate::models::{Book, Game, Page};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use serde::Deserialize;
use shelf_core::{AppError, AppResult};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Page size used when the requested one is missing or out of range.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a caller may ask for.
pub const MAX_PAGE_SIZE: u32 = 100;

const BOOK_COLUMNS: &str = "id, title, author, isbn, description, year, genre";

const GAME_COLUMNS: &str = "id, title, developer, publisher, release_date, description, genre, \
     price, discount_percentage, rating, image_url, store_page_url, tags, supported_platforms";

/// Filters for the book listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookQuery {
    /// Substring over title, author, description, genre and ISBN
    pub q: Option<String>,
    /// Exact genre
    pub genre: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Filters and ordering for the game listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameQuery {
    /// Substring over title, developer and tags
    pub search: Option<String>,
    pub genre: Option<String>,
    pub developer: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Sort key for game listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSort {
    Title,
    ReleaseDate,
    Price,
    Rating,
}

impl GameSort {
    /// Parse a sort key; `None` for unknown keys.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "title" => Some(Self::Title),
            "releasedate" => Some(Self::ReleaseDate),
            "price" => Some(Self::Price),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::ReleaseDate => "release_date",
            Self::Price => "price",
            Self::Rating => "rating",
        }
    }
}

/// Clamp raw paging input: `page <= 0` becomes 1, an out-of-range size the default.
pub fn normalize_paging(page: Option<i64>, page_size: Option<i64>) -> (u32, u32) {
    let page = match page {
        Some(p) if p > 0 => u32::try_from(p).unwrap_or(u32::MAX),
        _ => 1,
    };
    let page_size = match page_size {
        Some(s) if s > 0 && s <= MAX_PAGE_SIZE as i64 => s as u32,
        _ => DEFAULT_PAGE_SIZE,
    };
    (page, page_size)
}

/// `ORDER BY` clause for a game listing. Unknown keys sort by title ascending.
fn game_order_clause(sort_by: Option<&str>, sort_order: Option<&str>) -> String {
    match sort_by.and_then(GameSort::parse) {
        Some(sort) => {
            let desc = sort_order
                .map(|o| o.trim().eq_ignore_ascii_case("desc"))
                .unwrap_or(false);
            format!(
                "ORDER BY {} {}, id",
                sort.column(),
                if desc { "DESC" } else { "ASC" }
            )
        }
        None => "ORDER BY title ASC, id".to_string(),
    }
}

fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn db_err(context: &'static str) -> impl Fn(rusqlite::Error) -> AppError {
    move |e| AppError::Catalog(format!("{}: {}", context, e))
}

fn json_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<String>> {
    let raw: Option<String> = row.get(idx)?;
    match raw {
        Some(text) if !text.is_empty() => serde_json::from_str(&text)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
        _ => Ok(Vec::new()),
    }
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        isbn: row.get(3)?,
        description: row.get(4)?,
        year: row.get(5)?,
        genre: row.get(6)?,
    })
}

fn game_from_row(row: &Row<'_>) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        title: row.get(1)?,
        developer: row.get(2)?,
        publisher: row.get(3)?,
        release_date: row.get(4)?,
        description: row.get(5)?,
        genre: row.get(6)?,
        price: row.get(7)?,
        discount_percentage: row.get(8)?,
        rating: row.get(9)?,
        image_url: row.get(10)?,
        store_page_url: row.get(11)?,
        tags: json_column(row, 12)?,
        supported_platforms: json_column(row, 13)?,
    })
}

/// The catalog database.
///
/// All access goes through one connection guarded by a mutex.
pub struct CatalogStore {
    conn: Mutex<Connection>,
}

impl CatalogStore {
    /// Open (or create) the catalog at `db_path`.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Catalog(format!("Failed to create database directory: {}", e))
                })?;
            }
        }

        let conn = Connection::open(db_path).map_err(db_err("Failed to open catalog"))?;
        tracing::debug!("Opened catalog database at {:?}", db_path);
        Self::init(conn)
    }

    /// Open a private in-memory catalog.
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory().map_err(db_err("Failed to open catalog"))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> AppResult<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                isbn TEXT,
                description TEXT,
                year INTEGER,
                genre TEXT
            );

            CREATE TABLE IF NOT EXISTS games (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                developer TEXT NOT NULL,
                publisher TEXT NOT NULL DEFAULT '',
                release_date TEXT,
                description TEXT,
                genre TEXT,
                price REAL NOT NULL DEFAULT 0,
                discount_percentage REAL,
                rating REAL,
                image_url TEXT,
                store_page_url TEXT,
                tags TEXT NOT NULL DEFAULT '[]',
                supported_platforms TEXT NOT NULL DEFAULT '[]'
            );

            CREATE INDEX IF NOT EXISTS idx_books_title ON books(title);
            CREATE INDEX IF NOT EXISTS idx_games_title ON games(title);
            "#,
        )
        .map_err(db_err("Failed to create tables"))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> AppResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::Catalog("Catalog connection lock poisoned".to_string()))
    }

    // ----- books -----

    /// One page of books ordered by title.
    pub fn list_books(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let (page, page_size) = normalize_paging(query.page, query.page_size);
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(q) = non_blank(&query.q) {
            clauses.push(
                "(title LIKE ? ESCAPE '\\' OR author LIKE ? ESCAPE '\\' \
                 OR description LIKE ? ESCAPE '\\' OR genre LIKE ? ESCAPE '\\' \
                 OR isbn LIKE ? ESCAPE '\\')",
            );
            let pattern = like_pattern(q);
            for _ in 0..5 {
                values.push(Value::Text(pattern.clone()));
            }
        }

        if let Some(genre) = non_blank(&query.genre) {
            clauses.push("genre = ?");
            values.push(Value::Text(genre.to_string()));
        }

        values.push(Value::Integer(page_size as i64));
        values.push(Value::Integer((page as i64 - 1) * page_size as i64));

        let sql = format!(
            "SELECT {} FROM books {} ORDER BY title, id LIMIT ? OFFSET ?",
            BOOK_COLUMNS,
            where_clause(&clauses)
        );

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql).map_err(db_err("Failed to prepare book query"))?;
        let books = stmt
            .query_map(params_from_iter(values), book_from_row)
            .map_err(db_err("Failed to query books"))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err("Failed to read book row"))?;

        Ok(books)
    }

    /// Every book, in id order.
    pub fn all_books(&self) -> AppResult<Vec<Book>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM books ORDER BY id", BOOK_COLUMNS))
            .map_err(db_err("Failed to prepare book query"))?;
        let books = stmt
            .query_map([], book_from_row)
            .map_err(db_err("Failed to query books"))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err("Failed to read book row"))?;
        Ok(books)
    }

    /// Up to `limit` books whose title, author, genre or description contains any keyword.
    pub fn books_matching_any(&self, keywords: &[String], limit: usize) -> AppResult<Vec<Book>> {
        if keywords.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();
        for keyword in keywords {
            clauses.push(
                "(title LIKE ? ESCAPE '\\' OR author LIKE ? ESCAPE '\\' \
                 OR genre LIKE ? ESCAPE '\\' OR description LIKE ? ESCAPE '\\')",
            );
            let pattern = like_pattern(keyword);
            for _ in 0..4 {
                values.push(Value::Text(pattern.clone()));
            }
        }
        values.push(Value::Integer(limit as i64));

        let sql = format!(
            "SELECT {} FROM books WHERE {} ORDER BY id LIMIT ?",
            BOOK_COLUMNS,
            clauses.join(" OR ")
        );

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql).map_err(db_err("Failed to prepare book query"))?;
        let books = stmt
            .query_map(params_from_iter(values), book_from_row)
            .map_err(db_err("Failed to query books"))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err("Failed to read book row"))?;
        Ok(books)
    }

    pub fn get_book(&self, id: i64) -> AppResult<Option<Book>> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {} FROM books WHERE id = ?1", BOOK_COLUMNS),
            params![id],
            book_from_row,
        )
        .optional()
        .map_err(db_err("Failed to load book"))
    }

    /// Validate and insert a book; the input id is ignored.
    pub fn create_book(&self, book: &Book) -> AppResult<Book> {
        book.validate()?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO books (title, author, isbn, description, year, genre)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                book.title,
                book.author,
                book.isbn,
                book.description,
                book.year,
                book.genre
            ],
        )
        .map_err(db_err("Failed to insert book"))?;

        let created = Book {
            id: conn.last_insert_rowid(),
            ..book.clone()
        };
        tracing::debug!("Created book {} ({})", created.id, created.title);
        Ok(created)
    }

    /// Validate and replace the book stored under `id`.
    pub fn update_book(&self, id: i64, book: &Book) -> AppResult<Book> {
        book.validate()?;

        let conn = self.conn()?;
        let changed = conn
            .execute(
                "UPDATE books SET title = ?1, author = ?2, isbn = ?3, description = ?4,
                 year = ?5, genre = ?6 WHERE id = ?7",
                params![
                    book.title,
                    book.author,
                    book.isbn,
                    book.description,
                    book.year,
                    book.genre,
                    id
                ],
            )
            .map_err(db_err("Failed to update book"))?;

        if changed == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }

        Ok(Book {
            id,
            ..book.clone()
        })
    }

    pub fn delete_book(&self, id: i64) -> AppResult<()> {
        let conn = self.conn()?;
        let changed = conn
            .execute("DELETE FROM books WHERE id = ?1", params![id])
            .map_err(db_err("Failed to delete book"))?;

        if changed == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }

    /// Ids of every stored book.
    pub fn book_ids(&self) -> AppResult<HashSet<i64>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT id FROM books")
            .map_err(db_err("Failed to prepare id query"))?;
        let ids = stmt
            .query_map([], |row| row.get::<_, i64>(0))
            .map_err(db_err("Failed to query book ids"))?
            .collect::<Result<HashSet<_>, _>>()
            .map_err(db_err("Failed to read book id"))?;
        Ok(ids)
    }

    pub fn count_books(&self) -> AppResult<u64> {
        self.count("books")
    }

    // ----- games -----

    /// One page of games with totals.
    pub fn list_games(&self, query: &GameQuery) -> AppResult<Page<Game>> {
        let (page, page_size) = normalize_paging(query.page, query.page_size);
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(search) = non_blank(&query.search) {
            clauses.push(
                "(title LIKE ? ESCAPE '\\' OR developer LIKE ? ESCAPE '\\' \
                 OR EXISTS (SELECT 1 FROM json_each(games.tags) WHERE json_each.value LIKE ? ESCAPE '\\'))",
            );
            let pattern = like_pattern(&search.to_lowercase());
            for _ in 0..3 {
                values.push(Value::Text(pattern.clone()));
            }
        }

        if let Some(genre) = non_blank(&query.genre) {
            clauses.push("genre = ?");
            values.push(Value::Text(genre.to_string()));
        }

        if let Some(developer) = non_blank(&query.developer) {
            clauses.push("developer = ?");
            values.push(Value::Text(developer.to_string()));
        }

        let filter = where_clause(&clauses);
        let conn = self.conn()?;

        let total_items: i64 = conn
            .query_row(
                &format!("SELECT COUNT(*) FROM games {}", filter),
                params_from_iter(values.iter()),
                |row| row.get(0),
            )
            .map_err(db_err("Failed to count games"))?;

        let order = game_order_clause(query.sort_by.as_deref(), query.sort_order.as_deref());
        values.push(Value::Integer(page_size as i64));
        values.push(Value::Integer((page as i64 - 1) * page_size as i64));

        let sql = format!(
            "SELECT {} FROM games {} {} LIMIT ? OFFSET ?",
            GAME_COLUMNS, filter, order
        );
        let mut stmt = conn.prepare(&sql).map_err(db_err("Failed to prepare game query"))?;
        let games = stmt
            .query_map(params_from_iter(values), game_from_row)
            .map_err(db_err("Failed to query games"))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err("Failed to read game row"))?;

        Ok(Page::new(games, page, page_size, total_items.max(0) as u64))
    }

    /// Every game, in id order.
    pub fn all_games(&self) -> AppResult<Vec<Game>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM games ORDER BY id", GAME_COLUMNS))
            .map_err(db_err("Failed to prepare game query"))?;
        let games = stmt
            .query_map([], game_from_row)
            .map_err(db_err("Failed to query games"))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err("Failed to read game row"))?;
        Ok(games)
    }

    pub fn get_game(&self, id: i64) -> AppResult<Option<Game>> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {} FROM games WHERE id = ?1", GAME_COLUMNS),
            params![id],
            game_from_row,
        )
        .optional()
        .map_err(db_err("Failed to load game"))
    }

    /// Validate and insert a game; the input id is ignored.
    pub fn create_game(&self, game: &Game) -> AppResult<Game> {
        game.validate()?;

        let tags = serde_json::to_string(&game.tags)?;
        let platforms = serde_json::to_string(&game.supported_platforms)?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO games (title, developer, publisher, release_date, description, genre,
                 price, discount_percentage, rating, image_url, store_page_url, tags,
                 supported_platforms)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                game.title,
                game.developer,
                game.publisher,
                game.release_date,
                game.description,
                game.genre,
                game.price,
                game.discount_percentage,
                game.rating,
                game.image_url,
                game.store_page_url,
                tags,
                platforms
            ],
        )
        .map_err(db_err("Failed to insert game"))?;

        let created = Game {
            id: conn.last_insert_rowid(),
            ..game.clone()
        };
        tracing::debug!("Created game {} ({})", created.id, created.title);
        Ok(created)
    }

    /// Distinct non-empty game genres, sorted.
    pub fn genres(&self) -> AppResult<Vec<String>> {
        self.distinct_strings(
            "SELECT DISTINCT genre FROM games WHERE genre IS NOT NULL AND genre <> '' ORDER BY genre",
        )
    }

    /// Distinct game developers, sorted.
    pub fn developers(&self) -> AppResult<Vec<String>> {
        self.distinct_strings("SELECT DISTINCT developer FROM games ORDER BY developer")
    }

    pub fn count_games(&self) -> AppResult<u64> {
        self.count("games")
    }

    fn distinct_strings(&self, sql: &str) -> AppResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(sql).map_err(db_err("Failed to prepare query"))?;
        let values = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(db_err("Failed to run query"))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err("Failed to read row"))?;
        Ok(values)
    }

    fn count(&self, table: &'static str) -> AppResult<u64> {
        let conn = self.conn()?;
        let n: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })
            .map_err(db_err("Failed to count rows"))?;
        Ok(n.max(0) as u64)
    }
}

fn where_clause(clauses: &[&str]) -> String {
    if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_books() -> CatalogStore {
        let store = CatalogStore::open_in_memory().unwrap();
        for book in [
            Book::new("Zen of Code", "A. Writer").with_genre("Software"),
            Book::new("Dune", "Frank Herbert").with_genre("Sci-Fi"),
            Book::new("Anathem", "Neal Stephenson")
                .with_genre("Sci-Fi")
                .with_isbn("9780061474095"),
        ] {
            store.create_book(&book).unwrap();
        }
        store
    }

    fn game(title: &str, developer: &str, price: f64) -> Game {
        Game::new(title, developer).with_price(price)
    }

    #[test]
    fn test_normalize_paging() {
        assert_eq!(normalize_paging(None, None), (1, 20));
        assert_eq!(normalize_paging(Some(0), Some(0)), (1, 20));
        assert_eq!(normalize_paging(Some(-3), Some(101)), (1, 20));
        assert_eq!(normalize_paging(Some(3), Some(100)), (3, 100));
    }

    #[test]
    fn test_game_order_clause() {
        assert_eq!(game_order_clause(None, None), "ORDER BY title ASC, id");
        assert_eq!(
            game_order_clause(Some("Price"), Some("DESC")),
            "ORDER BY price DESC, id"
        );
        assert_eq!(
            game_order_clause(Some("bogus"), Some("desc")),
            "ORDER BY title ASC, id"
        );
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn test_book_crud_round() {
        let store = CatalogStore::open_in_memory().unwrap();
        let created = store
            .create_book(&Book::new("Dune", "Frank Herbert").with_id(99))
            .unwrap();
        assert_ne!(created.id, 99);

        let fetched = store.get_book(created.id).unwrap().unwrap();
        assert_eq!(fetched, created);

        let updated = store
            .update_book(created.id, &fetched.clone().with_year(1965))
            .unwrap();
        assert_eq!(updated.year, Some(1965));

        store.delete_book(created.id).unwrap();
        assert!(store.get_book(created.id).unwrap().is_none());
    }

    #[test]
    fn test_missing_book_is_not_found() {
        let store = CatalogStore::open_in_memory().unwrap();
        let book = Book::new("T", "A");
        assert!(matches!(
            store.update_book(42, &book),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(store.delete_book(42), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_invalid_book_rejected() {
        let store = CatalogStore::open_in_memory().unwrap();
        let err = store.create_book(&Book::new("", "A")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.count_books().unwrap(), 0);
    }

    #[test]
    fn test_list_books_filters_and_orders() {
        let store = store_with_books();

        let all = store.list_books(&BookQuery::default()).unwrap();
        let titles: Vec<&str> = all.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Anathem", "Dune", "Zen of Code"]);

        let scifi = store
            .list_books(&BookQuery {
                genre: Some("Sci-Fi".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(scifi.len(), 2);

        let by_isbn = store
            .list_books(&BookQuery {
                q: Some(" 0061474 ".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_isbn.len(), 1);
        assert_eq!(by_isbn[0].title, "Anathem");

        let by_author = store
            .list_books(&BookQuery {
                q: Some("herbert".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_author[0].title, "Dune");
    }

    #[test]
    fn test_list_books_pagination() {
        let store = store_with_books();
        let page2 = store
            .list_books(&BookQuery {
                page: Some(2),
                page_size: Some(2),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(page2.len(), 1);
        assert_eq!(page2[0].title, "Zen of Code");
    }

    #[test]
    fn test_books_matching_any() {
        let store = store_with_books();
        let keywords = vec!["sci-fi".to_string(), "code".to_string()];
        let found = store.books_matching_any(&keywords, 5).unwrap();
        assert_eq!(found.len(), 3);

        let capped = store.books_matching_any(&keywords, 1).unwrap();
        assert_eq!(capped.len(), 1);

        assert!(store.books_matching_any(&[], 5).unwrap().is_empty());
    }

    #[test]
    fn test_book_ids() {
        let store = store_with_books();
        let ids = store.book_ids().unwrap();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_game_listing_sort_filter_and_totals() {
        let store = CatalogStore::open_in_memory().unwrap();
        store
            .create_game(&game("Hades", "Supergiant Games", 24.99).with_tags(["Roguelike"]))
            .unwrap();
        store
            .create_game(&game("Celeste", "Maddy Makes Games", 19.99).with_genre("Platformer"))
            .unwrap();
        store
            .create_game(&game("Bastion", "Supergiant Games", 14.99).with_genre("Action RPG"))
            .unwrap();

        let by_price = store
            .list_games(&GameQuery {
                sort_by: Some("price".to_string()),
                sort_order: Some("desc".to_string()),
                ..Default::default()
            })
            .unwrap();
        let titles: Vec<&str> = by_price.items.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Hades", "Celeste", "Bastion"]);
        assert_eq!(by_price.total_items, 3);
        assert_eq!(by_price.total_pages, 1);

        let by_dev = store
            .list_games(&GameQuery {
                developer: Some("Supergiant Games".to_string()),
                page_size: Some(1),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_dev.items.len(), 1);
        assert_eq!(by_dev.items[0].title, "Bastion");
        assert_eq!(by_dev.total_items, 2);
        assert_eq!(by_dev.total_pages, 2);

        let by_tag = store
            .list_games(&GameQuery {
                search: Some("ROGUE".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_tag.items.len(), 1);
        assert_eq!(by_tag.items[0].tags, vec!["Roguelike"]);

        assert_eq!(store.genres().unwrap(), vec!["Action RPG", "Platformer"]);
        assert_eq!(
            store.developers().unwrap(),
            vec!["Maddy Makes Games", "Supergiant Games"]
        );
    }

    #[test]
    fn test_reopen_persists_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/catalog.db");

        {
            let store = CatalogStore::open(&path).unwrap();
            store.create_book(&Book::new("Dune", "Frank Herbert")).unwrap();
        }

        let store = CatalogStore::open(&path).unwrap();
        assert_eq!(store.count_books().unwrap(), 1);
    }
}
