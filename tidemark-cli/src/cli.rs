//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Tidemark - ordered SQL migration application
#[derive(Parser, Debug)]
#[command(name = "tidemark")]
#[command(version)]
#[command(about = "Apply ordered SQL migrations to a remote database", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply migration scripts in file-name order
    Apply(ApplyArgs),

    /// Execute raw SQL through the same scanner and skip policy
    Execute(ExecuteArgs),

    /// Split a SQL file into statements without executing anything
    Split(SplitArgs),
}

/// Arguments for the `apply` command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Directory containing .sql migration files
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Target URL (postgres:// for the wire protocol, http(s):// for an RPC endpoint)
    #[arg(short, long, env = "DATABASE_URL")]
    pub url: Option<String>,

    /// Abort on every failure instead of skipping benign error codes
    #[arg(long)]
    pub strict: bool,

    /// Per-statement timeout in seconds; elapsing aborts the run
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Arguments for the `execute` command
#[derive(Args, Debug)]
pub struct ExecuteArgs {
    /// SQL to execute
    #[arg(short, long)]
    pub sql: Option<String>,

    /// Path to a SQL file
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Read SQL from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Target URL (postgres:// or http(s)://)
    #[arg(short, long, env = "DATABASE_URL")]
    pub url: Option<String>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub force: bool,
}

/// Arguments for the `split` command
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// SQL file to split
    pub file: PathBuf,
}
