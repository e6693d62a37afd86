//! # tidemark-migrate
//!
//! Core engine for applying SQL migration scripts to a remote
//! statement-execution endpoint.
//!
//! This crate provides:
//! - Statement scanning: splitting a raw SQL script into individually
//!   executable statements, quote- and comment-aware
//! - Script loading from a directory in ascending file-name order
//! - A narrow executor seam so any backend that can run one statement at a
//!   time can be plugged in
//! - An injectable allow-list of benign error codes
//! - Strictly sequential application with abort-on-first-fatal semantics
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────┐     ┌────────────────────┐
//! │ MigrationSource │────▶│   Scanner    │────▶│ StatementExecutor  │
//! │  (.sql files)   │     │  (split ;)   │     │ (remote endpoint)  │
//! └─────────────────┘     └──────────────┘     └────────────────────┘
//!                                                       │
//!                                                       ▼
//!                                              ┌────────────────────┐
//!                                              │    SkipPolicy      │
//!                                              │ benign → continue  │
//!                                              │ fatal  → abort     │
//!                                              └────────────────────┘
//! ```
//!
//! There is no applied-migrations ledger. Re-running a directory is safe
//! because failures that mean "the target state already exists" are
//! classified as benign and skipped; anything else aborts the run and
//! leaves already-applied statements in place.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tidemark_migrate::{DirectorySource, Runner};
//!
//! async fn apply(executor: impl tidemark_migrate::StatementExecutor) {
//!     let source = DirectorySource::new("./migrations");
//!     let report = Runner::new(executor).run(&source).await.unwrap();
//!     println!("{}", report.summary());
//! }
//! ```

pub mod error;
pub mod executor;
pub mod policy;
pub mod runner;
pub mod scanner;
pub mod source;

// Re-exports
pub use error::{MigrateResult, MigrationError};
pub use executor::{ExecError, ExecutionOutcome, StatementExecutor};
pub use policy::SkipPolicy;
pub use runner::{RunError, RunReport, Runner, RunnerConfig, SkippedStatement};
pub use scanner::split_statements;
pub use source::{DirectorySource, InMemorySource, MigrationScript, MigrationSource};
