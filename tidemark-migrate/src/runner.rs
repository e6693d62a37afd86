//! Sequential application of migration scripts.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::error::MigrationError;
use crate::executor::{ExecError, ExecutionOutcome, StatementExecutor};
use crate::policy::SkipPolicy;
use crate::scanner::split_statements;
use crate::source::MigrationSource;

/// Runner configuration.
#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    /// Upper bound on a single statement's execution time. Elapsing is
    /// fatal, not skippable: a hung statement aborts the run.
    pub statement_timeout: Option<Duration>,
}

impl RunnerConfig {
    /// Create a new configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-statement timeout.
    pub fn statement_timeout(mut self, timeout: Duration) -> Self {
        self.statement_timeout = Some(timeout);
        self
    }
}

/// One statement skipped under the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedStatement {
    /// Script the statement came from.
    pub script: String,
    /// One-based statement position within the script.
    pub statement: usize,
    /// The benign code that triggered the skip.
    pub code: String,
}

/// Outcome of a completed run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Number of scripts processed.
    pub scripts: usize,
    /// Number of statements applied successfully.
    pub applied: usize,
    /// Statements skipped under the policy.
    pub skipped: Vec<SkippedStatement>,
}

impl RunReport {
    /// Get a one-line summary of the run.
    pub fn summary(&self) -> String {
        if self.scripts == 0 {
            return "no migration scripts found".to_string();
        }

        let mut parts = vec![format!("{} applied", self.applied)];
        if !self.skipped.is_empty() {
            parts.push(format!("{} skipped", self.skipped.len()));
        }

        format!(
            "{} script{}, {}",
            self.scripts,
            if self.scripts == 1 { "" } else { "s" },
            parts.join(", ")
        )
    }
}

/// A run that did not complete.
///
/// Statements applied before the abort stay applied; partial application is
/// a visible terminal state, not something the runner rolls back.
#[derive(Debug, Error)]
pub enum RunError {
    /// Loading scripts from the source failed.
    #[error(transparent)]
    Load(#[from] MigrationError),

    /// A statement failed with a non-benign error.
    #[error("{script}: statement {statement} failed: {error}")]
    Statement {
        /// Script whose statement failed.
        script: String,
        /// One-based statement position within the script.
        statement: usize,
        /// The statement text.
        sql: String,
        /// The underlying failure.
        error: ExecError,
    },
}

/// Applies migration scripts strictly in order, one statement at a time.
pub struct Runner<E> {
    executor: E,
    policy: SkipPolicy,
    config: RunnerConfig,
}

impl<E: StatementExecutor> Runner<E> {
    /// Create a runner with the default skip policy and configuration.
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            policy: SkipPolicy::default(),
            config: RunnerConfig::default(),
        }
    }

    /// Replace the skip policy.
    pub fn with_policy(mut self, policy: SkipPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Apply every script the source yields.
    ///
    /// Statements execute one at a time; the next is not submitted until
    /// the previous call returns. Later statements may depend on schema
    /// changes made by earlier ones, so nothing here is ever parallelized.
    /// There are no retries: the first non-benign failure aborts the run
    /// with no further statements or scripts attempted.
    pub async fn run(&self, source: &dyn MigrationSource) -> Result<RunReport, RunError> {
        let scripts = source.load().await?;
        let mut report = RunReport::default();

        for script in &scripts {
            let statements = split_statements(&script.sql);
            debug!(
                script = %script.name,
                statements = statements.len(),
                "applying migration script"
            );

            for (position, statement) in statements.iter().enumerate() {
                let statement_no = position + 1;
                let payload = format!("{statement};");

                match self.classify(self.execute_one(&payload).await) {
                    ExecutionOutcome::Applied => report.applied += 1,
                    ExecutionOutcome::SkippedBenign(code) => {
                        warn!(
                            script = %script.name,
                            statement = statement_no,
                            code = %code,
                            "skipping statement"
                        );
                        report.skipped.push(SkippedStatement {
                            script: script.name.clone(),
                            statement: statement_no,
                            code,
                        });
                    }
                    ExecutionOutcome::Failed(error) => {
                        return Err(RunError::Statement {
                            script: script.name.clone(),
                            statement: statement_no,
                            sql: statement.clone(),
                            error,
                        });
                    }
                }
            }

            report.scripts += 1;
        }

        Ok(report)
    }

    async fn execute_one(&self, sql: &str) -> Result<(), ExecError> {
        match self.config.statement_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.executor.execute(sql)).await {
                Ok(result) => result,
                Err(_) => Err(ExecError::transport(format!(
                    "statement timed out after {}ms",
                    limit.as_millis()
                ))),
            },
            None => self.executor.execute(sql).await,
        }
    }

    fn classify(&self, result: Result<(), ExecError>) -> ExecutionOutcome {
        match result {
            Ok(()) => ExecutionOutcome::Applied,
            Err(error) => match error.code.as_deref() {
                Some(code) if self.policy.is_benign(Some(code)) => {
                    ExecutionOutcome::SkippedBenign(code.to_string())
                }
                _ => ExecutionOutcome::Failed(error),
            },
        }
    }
}
