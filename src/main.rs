mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use packrat::config::PackratConfig;

#[derive(Parser)]
#[command(
    name = "packrat",
    version,
    about = "Personal article archive with memo threads and AI summarization"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List articles, newest first, optionally filtered
    List(cli::list::ListArgs),
    /// Show one article in full: metadata, attachments, body, memo thread
    Show {
        /// Article id (or unambiguous prefix)
        id: String,
    },
    /// Create a new article
    Add(cli::article::AddArgs),
    /// Edit an article; flags you leave unset keep their current values
    Edit(cli::article::EditArgs),
    /// Delete an article and all of its memos
    Delete {
        /// Article id (or unambiguous prefix)
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Print the category → keyword filter tree
    Categories,
    /// Manage the memo thread of an article
    Memo {
        #[command(subcommand)]
        action: cli::memo::MemoCommand,
    },
    /// Summarize text (or a whole article body) into a memo
    Summarize(cli::summarize::SummarizeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for the data path and log level)
    let config = PackratConfig::load()?;

    // Log to stderr so stdout stays clean for command output.
    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::List(args) => cli::list::run(&config, args),
        Command::Show { id } => cli::show::run(&config, &id),
        Command::Add(args) => cli::article::add(&config, args).await,
        Command::Edit(args) => cli::article::edit(&config, args).await,
        Command::Delete { id, yes } => cli::article::delete(&config, &id, yes),
        Command::Categories => cli::list::categories(&config),
        Command::Memo { action } => cli::memo::run(&config, action),
        Command::Summarize(args) => cli::summarize::run(&config, args).await,
    }
}
