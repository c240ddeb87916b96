//! gh-label - manage GitHub labels from the command line.
//!
//! A `gh` extension that creates, edits, deletes, lists, imports, and
//! exports labels for a repository by wrapping the authenticated `gh` CLI.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ghl_cmd::factory::Factory;
use ghl_core::Repo;

/// Exit codes.
mod exit_codes {
    pub const OK: i32 = 0;
    pub const ERROR: i32 = 1;
}

/// Manage GitHub labels from the command line.
#[derive(Debug, Parser)]
#[command(
    name = "gh-label",
    version,
    about = "Manage GitHub labels from the command line",
    long_about = "Create, edit, delete, list, import, and export labels for a GitHub repository."
)]
struct Cli {
    /// Select another repository using the OWNER/REPO format.
    #[arg(short = 'R', long, global = true, value_name = "OWNER/REPO")]
    repo: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a label in the repository.
    Create(ghl_cmd::create::CreateArgs),
    /// Delete a label from the repository.
    Delete(ghl_cmd::delete::DeleteArgs),
    /// Edit a label in the repository.
    Edit(ghl_cmd::edit::EditArgs),
    /// Export labels from the repository to a file, or stdout.
    Export(ghl_cmd::export::ExportArgs),
    /// Import labels into the repository from a file, or stdin.
    Import(ghl_cmd::imports::ImportArgs),
    /// List labels matching an optional substring.
    #[command(alias = "ls")]
    List(ghl_cmd::list::ListArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GH_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let exit_code = match run(cli).await {
        Ok(()) => exit_codes::OK,
        Err(e) => {
            tracing::error!("{e:#}");
            exit_codes::ERROR
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let repo = Repo::resolve(cli.repo.as_deref())?;
    let factory = Factory::new(env!("CARGO_PKG_VERSION").to_string(), repo);

    match cli.command {
        Commands::Create(args) => args.run(&factory).await,
        Commands::Delete(args) => args.run(&factory).await,
        Commands::Edit(args) => args.run(&factory).await,
        Commands::Export(args) => args.run(&factory).await,
        Commands::Import(args) => args.run(&factory).await,
        Commands::List(args) => args.run(&factory).await,
    }
}
