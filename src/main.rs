mod cli;
mod server;
mod tools;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use vowlog::config::VowlogConfig;

#[derive(Parser)]
#[command(name = "vowlog", version, about = "Contradictions, insights, and semantic recall for wedding-planning journals")]
struct Cli {
    /// Config file to load instead of ~/.vowlog/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server (transport from config: stdio or http)
    Serve,
    /// Detect budget, timeline, and vendor contradictions in an entries file
    Contradictions {
        file: PathBuf,
        /// Count days to the wedding from this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    /// Generate an insight report for an entries file
    Insights { file: PathBuf },
    /// Suggest next steps from the latest entry in a file
    NextSteps { file: PathBuf },
    /// Rank entries by semantic similarity to a query
    Search {
        file: PathBuf,
        query: String,
        /// Maximum number of results (default from config)
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Print the prompt context block of the entries most similar to a query
    Context {
        file: PathBuf,
        query: String,
        /// Number of entries to include (default from config)
        #[arg(long)]
        num: Option<usize>,
    },
    /// Run the lighter retrieval-time contradiction flags
    Flags {
        file: PathBuf,
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => VowlogConfig::load_from(path)?,
        None => VowlogConfig::load()?,
    };

    // Log to stderr so stdout stays clean for MCP JSON-RPC and reports.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Serve => server::serve(config).await,
        Command::Contradictions { file, as_of } => cli::report::contradictions(&config, &file, as_of),
        Command::Insights { file } => cli::report::insights(&config, &file),
        Command::NextSteps { file } => cli::report::next_steps(&config, &file),
        Command::Search { file, query, top_k } => cli::search::search(&config, &file, &query, top_k).await,
        Command::Context { file, query, num } => cli::search::context(&config, &file, &query, num).await,
        Command::Flags { file, as_of } => cli::report::contradiction_flags(&config, &file, as_of),
    };

    if let Err(e) = &result {
        let message = format!("{e:#}");
        tracing::error!(error = %message, "command failed");
    }
    result
}
