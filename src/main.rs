//! # ChatRH CLI (`chatrh`)
//!
//! The `chatrh` binary is the primary interface for ChatRH. It provides
//! commands for database initialization, corpus loading, taxonomy
//! inspection, excerpt search, grounded-context preview, grounded chat,
//! and starting the HTTP server.
//!
//! ## Usage
//!
//! ```bash
//! chatrh --config ./config/chatrh.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `chatrh init` | Create the SQLite database and run schema migrations |
//! | `chatrh load <file>` | Load a JSON corpus of subjects and articles |
//! | `chatrh subjects` | List subjects with their article counts |
//! | `chatrh search "<keyword>"` | Search article content, excerpt results |
//! | `chatrh context "<message>"` | Print the grounding block for a message |
//! | `chatrh ask "<message>"` | Grounded chat via OpenRouter |
//! | `chatrh serve` | Start the HTTP server |

mod chat;
mod config;
mod db;
mod ingest;
mod llm;
mod migrate;
mod search;
mod server;
mod sqlite_store;
mod subjects;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ChatRH CLI — a grounded chat assistant over labour-code articles.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/chatrh.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "chatrh",
    about = "ChatRH — a grounded chat assistant over labour-code articles",
    version,
    long_about = "ChatRH keeps a taxonomy of subjects and legal articles in SQLite, grounds \
    every user question on the relevant articles through a keyword-based retrieval cascade, \
    and forwards the grounded prompt to an OpenRouter-hosted language model."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/chatrh.toml`. Database, model, and server
    /// settings are read from this file.
    #[arg(long, global = true, default_value = "./config/chatrh.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and the `subjects` and `articles`
    /// tables. This command is idempotent — running it multiple times is
    /// safe.
    Init,

    /// Load a JSON corpus of subjects and articles.
    ///
    /// Upserts by id: re-loading an updated corpus replaces changed rows
    /// without duplicating anything.
    Load {
        /// Path to the corpus JSON file.
        file: PathBuf,
    },

    /// List subjects with their article counts.
    Subjects,

    /// Search article content by keyword.
    ///
    /// Prints excerpt windows around the first keyword occurrence, at
    /// most ten results. Use `context` to see what the model would
    /// actually receive.
    Search {
        /// The keyword to search for.
        keyword: String,
    },

    /// Print the grounding block for a message.
    ///
    /// Runs the full retrieval cascade (keyword table, subject scan,
    /// content search) and prints the context block that `ask` would
    /// send as the system prompt, without invoking the model.
    Context {
        /// The user message to ground.
        message: String,
    },

    /// Ask the assistant a question.
    ///
    /// Builds the grounding block for the message and sends both to
    /// OpenRouter. Requires the `OPENROUTER_API_KEY` environment
    /// variable.
    Ask {
        /// The question to ask.
        message: String,

        /// Override the configured model for this request.
        #[arg(long)]
        model: Option<String>,

        /// Override the configured sampling temperature.
        #[arg(long)]
        temperature: Option<f64>,
    },

    /// Start the HTTP server.
    ///
    /// Binds to the address configured in `[server].bind` and serves
    /// `POST /chat`, `GET /health`, and `GET /search/articles`.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Load { file } => {
            ingest::run_load(&cfg, &file).await?;
        }
        Commands::Subjects => {
            subjects::run_subjects(&cfg).await?;
        }
        Commands::Search { keyword } => {
            search::run_search(&cfg, &keyword).await?;
        }
        Commands::Context { message } => {
            chat::run_context(&cfg, &message).await?;
        }
        Commands::Ask {
            message,
            model,
            temperature,
        } => {
            chat::run_ask(&cfg, &message, model, temperature).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
