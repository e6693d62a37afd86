//! Tidemark - apply ordered SQL migrations to a remote database.

use clap::Parser;

use tidemark_cli::cli::{Cli, Command};
use tidemark_cli::commands;
use tidemark_cli::error::CliResult;
use tidemark_cli::output;

#[tokio::main]
async fn main() {
    init_tracing();

    // Run the CLI and handle errors
    if let Err(e) = run().await {
        output::newline();
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Apply(args) => commands::apply::run(args).await,
        Command::Execute(args) => commands::execute::run(args).await,
        Command::Split(args) => commands::split::run(args).await,
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
