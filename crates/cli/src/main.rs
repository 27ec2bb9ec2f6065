//! Shelf CLI
//!
//! Main entry point for the shelf command-line tool.
//! Serves the catalog API and exposes search, chat and catalog management.

mod commands;

use clap::{Parser, Subcommand};
use commands::{BooksCommand, ChatCommand, GamesCommand, SearchCommand, SeedCommand, ServeCommand};
use shelf_core::{
    config::AppConfig,
    logging::{self, LogFormat},
    AppResult,
};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// Shelf - book and game catalog with relevance search and a chat assistant
#[derive(Parser, Debug)]
#[command(name = "shelf")]
#[command(about = "Book and game catalog with search and a chat assistant", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "SHELF_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "SHELF_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog database path
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log output format (pretty, json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Chat provider (auto, simple, openai, ollama)
    #[arg(short, long, global = true)]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve(ServeCommand),

    /// Ranked search over books or games
    Search(SearchCommand),

    /// Ask the catalog assistant
    Chat(ChatCommand),

    /// Manage books
    Books(BooksCommand),

    /// Browse games
    Games(GamesCommand),

    /// Load the sample catalog into empty tables
    Seed(SeedCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Defaults, config file and environment
    let config = AppConfig::load_from(cli.workspace, cli.config)?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.database,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.log_format,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(
        config.log_level.as_deref(),
        config.no_color,
        LogFormat::parse(&config.log_format),
    )?;

    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Database: {:?}", config.database_path());
    tracing::debug!("Provider: {}", config.provider);

    config.ensure_shelf_dir()?;

    // Ctrl-C cancels whatever is in flight
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, shutting down");
            on_signal.cancel();
        }
    });

    let command_name = match &cli.command {
        Commands::Serve(_) => "serve",
        Commands::Search(_) => "search",
        Commands::Chat(_) => "chat",
        Commands::Books(_) => "books",
        Commands::Games(_) => "games",
        Commands::Seed(_) => "seed",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Serve(cmd) => cmd.execute(&config, cancel).await,
        Commands::Search(cmd) => cmd.execute(&config, &cancel),
        Commands::Chat(cmd) => cmd.execute(&config, &cancel).await,
        Commands::Books(cmd) => cmd.execute(&config),
        Commands::Games(cmd) => cmd.execute(&config),
        Commands::Seed(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::debug!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
