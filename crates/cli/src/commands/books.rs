//! Books command handler.

use super::{open_store, print_json};
use clap::{Args, Subcommand};
use shelf_catalog::{Book, BookQuery};
use shelf_core::{config::AppConfig, AppError, AppResult};

/// Manage books
#[derive(Args, Debug)]
pub struct BooksCommand {
    #[command(subcommand)]
    pub action: BooksAction,
}

#[derive(Subcommand, Debug)]
pub enum BooksAction {
    /// List books, ordered by title
    List(BooksListCommand),
    /// Show one book
    Show(BookIdArgs),
    /// Add a book
    Add(BooksAddCommand),
    /// Delete a book
    Delete(BookIdArgs),
}

#[derive(Args, Debug)]
pub struct BooksListCommand {
    /// Substring over title, author, description, genre and ISBN
    #[arg(short, long)]
    pub q: Option<String>,

    /// Exact genre
    #[arg(short, long)]
    pub genre: Option<String>,

    #[arg(long)]
    pub page: Option<i64>,

    #[arg(long)]
    pub page_size: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct BookIdArgs {
    pub id: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct BooksAddCommand {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub author: String,

    #[arg(long)]
    pub isbn: Option<String>,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub genre: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl BooksAddCommand {
    fn to_book(&self) -> Book {
        Book {
            id: 0,
            title: self.title.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            description: self.description.clone(),
            year: self.year,
            genre: self.genre.clone(),
        }
    }
}

impl BooksCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let store = open_store(config)?;

        match &self.action {
            BooksAction::List(cmd) => {
                let query = BookQuery {
                    q: cmd.q.clone(),
                    genre: cmd.genre.clone(),
                    page: cmd.page,
                    page_size: cmd.page_size,
                };
                let books = store.list_books(&query)?;
                if cmd.json {
                    return print_json(&books);
                }
                if books.is_empty() {
                    println!("No books found");
                }
                for book in &books {
                    println!("{}", summary(book));
                }
            }
            BooksAction::Show(args) => {
                let book = store
                    .get_book(args.id)?
                    .ok_or_else(|| AppError::NotFound(format!("Book {} not found", args.id)))?;
                if args.json {
                    return print_json(&book);
                }
                println!("{}", summary(&book));
                if let Some(ref isbn) = book.isbn {
                    println!("  ISBN: {}", isbn);
                }
                if let Some(ref description) = book.description {
                    println!("  {}", description);
                }
            }
            BooksAction::Add(cmd) => {
                let book = store.create_book(&cmd.to_book())?;
                if cmd.json {
                    return print_json(&book);
                }
                println!("Added {}", summary(&book));
            }
            BooksAction::Delete(args) => {
                store.delete_book(args.id)?;
                println!("Deleted book {}", args.id);
            }
        }

        Ok(())
    }
}

fn summary(book: &Book) -> String {
    let mut line = format!("#{} {} by {}", book.id, book.title, book.author);
    if let Some(year) = book.year {
        line.push_str(&format!(" ({})", year));
    }
    if let Some(ref genre) = book.genre {
        line.push_str(&format!(" [{}]", genre));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line() {
        let book = Book::new("Dune", "Frank Herbert")
            .with_id(3)
            .with_year(1965)
            .with_genre("Sci-Fi");
        assert_eq!(summary(&book), "#3 Dune by Frank Herbert (1965) [Sci-Fi]");
    }

    #[test]
    fn test_add_builds_unsaved_book() {
        let cmd = BooksAddCommand {
            title: "Emma".to_string(),
            author: "Jane Austen".to_string(),
            isbn: None,
            year: Some(1815),
            genre: None,
            description: None,
            json: false,
        };
        let book = cmd.to_book();
        assert_eq!(book.id, 0);
        assert_eq!(book.year, Some(1815));
        book.validate().unwrap();
    }
}
