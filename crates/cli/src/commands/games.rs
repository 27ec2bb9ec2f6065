//! Games command handler.

use super::{open_store, print_json};
use clap::{Args, Subcommand};
use shelf_catalog::{GameQuery, GameView};
use shelf_core::{config::AppConfig, AppError, AppResult};

/// Browse games
#[derive(Args, Debug)]
pub struct GamesCommand {
    #[command(subcommand)]
    pub action: GamesAction,
}

#[derive(Subcommand, Debug)]
pub enum GamesAction {
    /// List games, one page at a time
    List(GamesListCommand),
    /// Show one game
    Show(GameShowCommand),
    /// Distinct genres
    Genres,
    /// Distinct developers
    Developers,
}

#[derive(Args, Debug)]
pub struct GamesListCommand {
    /// Substring over title, developer and tags
    #[arg(short, long)]
    pub search: Option<String>,

    #[arg(short, long)]
    pub genre: Option<String>,

    #[arg(short, long)]
    pub developer: Option<String>,

    /// title, releaseDate, price or rating
    #[arg(long)]
    pub sort_by: Option<String>,

    /// asc or desc
    #[arg(long)]
    pub sort_order: Option<String>,

    #[arg(long)]
    pub page: Option<i64>,

    #[arg(long)]
    pub page_size: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct GameShowCommand {
    pub id: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl GamesCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let store = open_store(config)?;

        match &self.action {
            GamesAction::List(cmd) => {
                let query = GameQuery {
                    search: cmd.search.clone(),
                    genre: cmd.genre.clone(),
                    developer: cmd.developer.clone(),
                    sort_by: cmd.sort_by.clone(),
                    sort_order: cmd.sort_order.clone(),
                    page: cmd.page,
                    page_size: cmd.page_size,
                };
                let page = store.list_games(&query)?.map(GameView::from);
                if cmd.json {
                    return print_json(&page);
                }
                for view in &page.items {
                    println!("{}", price_line(view));
                }
                println!(
                    "Page {} of {} ({} games)",
                    page.page, page.total_pages, page.total_items
                );
            }
            GamesAction::Show(cmd) => {
                let game = store
                    .get_game(cmd.id)?
                    .ok_or_else(|| AppError::NotFound(format!("Game {} not found", cmd.id)))?;
                let view = GameView::from(game);
                if cmd.json {
                    return print_json(&view);
                }
                println!("{}", price_line(&view));
                if !view.game.tags.is_empty() {
                    println!("  Tags: {}", view.game.tags.join(", "));
                }
                if let Some(ref description) = view.game.description {
                    println!("  {}", description);
                }
            }
            GamesAction::Genres => {
                for genre in store.genres()? {
                    println!("{}", genre);
                }
            }
            GamesAction::Developers => {
                for developer in store.developers()? {
                    println!("{}", developer);
                }
            }
        }

        Ok(())
    }
}

fn price_line(view: &GameView) -> String {
    let game = &view.game;
    let price = match view.discounted_price {
        Some(discounted) => format!("${:.2} (was ${:.2})", discounted, game.price),
        None => format!("${:.2}", game.price),
    };
    format!("#{} {} by {} - {}", game.id, game.title, game.developer, price)
}
