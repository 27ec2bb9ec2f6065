//! Sample catalog data.

use crate::models::{Book, Game};
use crate::store::CatalogStore;
use shelf_core::AppResult;

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedStats {
    pub books: usize,
    pub games: usize,
}

pub fn sample_books() -> Vec<Book> {
    vec![
        Book::new("The Pragmatic Programmer", "Andrew Hunt, David Thomas")
            .with_year(1999)
            .with_genre("Software")
            .with_isbn("9780201616224")
            .with_description("Classic book on pragmatic approaches to software development."),
        Book::new("Clean Code", "Robert C. Martin")
            .with_year(2008)
            .with_genre("Software")
            .with_isbn("9780132350884")
            .with_description("A handbook of agile software craftsmanship."),
        Book::new("Design Patterns", "Erich Gamma et al.")
            .with_year(1994)
            .with_genre("Software")
            .with_isbn("9780201633610")
            .with_description("Elements of reusable object-oriented software."),
        Book::new("Deep Learning", "Ian Goodfellow, Yoshua Bengio, Aaron Courville")
            .with_year(2016)
            .with_genre("AI")
            .with_isbn("9780262035613")
            .with_description("Comprehensive textbook on deep learning."),
        Book::new("The Lord of the Rings", "J.R.R. Tolkien")
            .with_year(1954)
            .with_genre("Fantasy")
            .with_isbn("9780544003415")
            .with_description("Epic high-fantasy novel."),
    ]
}

pub fn sample_games() -> Vec<Game> {
    vec![
        Game::new("Elden Ring", "FromSoftware")
            .with_publisher("Bandai Namco")
            .with_release_date("2022-02-25")
            .with_genre("Action RPG")
            .with_price(59.99)
            .with_rating(4.8)
            .with_description(
                "A new fantasy action RPG where you'll face fearsome enemies in a world full of danger and discovery.",
            )
            .with_image_url("https://cdn.akamai.steamstatic.com/steam/apps/1245620/header.jpg")
            .with_store_page_url("https://store.steampowered.com/app/1245620/ELDEN_RING/")
            .with_tags(["Souls-like", "Open World", "RPG", "Difficult"])
            .with_platforms([
                "Windows",
                "PlayStation 4",
                "PlayStation 5",
                "Xbox One",
                "Xbox Series X|S",
            ]),
        Game::new("Hades", "Supergiant Games")
            .with_publisher("Supergiant Games")
            .with_release_date("2020-09-17")
            .with_genre("Roguelike")
            .with_price(24.99)
            .with_discount(40.0)
            .with_rating(4.9)
            .with_description(
                "Defy the god of the dead as you hack and slash out of the Underworld.",
            )
            .with_tags(["Roguelike", "Action", "Mythology", "Indie"])
            .with_platforms(["Windows", "macOS", "Nintendo Switch", "PlayStation 5"]),
        Game::new("Stardew Valley", "ConcernedApe")
            .with_publisher("ConcernedApe")
            .with_release_date("2016-02-26")
            .with_genre("Simulation")
            .with_price(14.99)
            .with_rating(4.9)
            .with_description(
                "Inherit your grandfather's old farm plot and build the farm of your dreams.",
            )
            .with_tags(["Farming Sim", "Relaxing", "Pixel Graphics", "Multiplayer"])
            .with_platforms(["Windows", "macOS", "Linux", "Nintendo Switch"]),
    ]
}

/// Insert the sample catalog into empty tables.
///
/// Tables that already hold records are left alone.
pub fn seed_sample_data(store: &CatalogStore) -> AppResult<SeedStats> {
    let mut stats = SeedStats::default();

    if store.count_books()? == 0 {
        for book in sample_books() {
            store.create_book(&book)?;
            stats.books += 1;
        }
    }

    if store.count_games()? == 0 {
        for game in sample_games() {
            store.create_game(&game)?;
            stats.games += 1;
        }
    }

    tracing::info!(
        "Seeded {} books and {} games",
        stats.books,
        stats.games
    );
    Ok(stats)
}
