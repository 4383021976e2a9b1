//! teamsplit CLI - Command-line interface
//!
//! Commands:
//! - assign: Split a roster into balanced teams and print them
//! - check: Load a roster and summarize what was read

mod assign_cmd;
mod check_cmd;
mod input;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "teamsplit")]
#[command(about = "Split a player roster into balanced teams")]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign players to teams and print the result
    Assign(assign_cmd::AssignArgs),
    /// Load a roster and report rows read, skipped and its composition
    Check(check_cmd::CheckArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Assign(args) => assign_cmd::run(args),
        Commands::Check(args) => check_cmd::run(args),
    }
}

/// Log to stderr so reports on stdout stay pipeable
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
