//! Seed command handler.

use super::open_store;
use clap::Args;
use shelf_catalog::seed_sample_data;
use shelf_core::{config::AppConfig, AppResult};

/// Load the sample catalog into empty tables
#[derive(Args, Debug)]
pub struct SeedCommand {}

impl SeedCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let store = open_store(config)?;
        let stats = seed_sample_data(&store)?;

        if stats.books + stats.games == 0 {
            println!("Catalog already populated; nothing seeded");
        } else {
            println!("Seeded {} books and {} games", stats.books, stats.games);
        }
        Ok(())
    }
}
