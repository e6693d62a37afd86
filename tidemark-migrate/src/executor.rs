//! The remote statement-execution seam.

use async_trait::async_trait;
use thiserror::Error;

/// Structured failure reported by a statement backend.
///
/// `code` carries the server's machine-readable error code (SQLSTATE for
/// PostgreSQL-shaped backends) when one was reported. Transport-level
/// failures have no code, and a failure without a code is never skippable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", fmt_error(.code, .message))]
pub struct ExecError {
    /// Machine-readable error code, if the server reported one.
    pub code: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl ExecError {
    /// A server-reported failure with a machine-readable code.
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// A codeless failure: connectivity, timeouts, unparseable responses.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }
}

fn fmt_error(code: &Option<String>, message: &str) -> String {
    match code {
        Some(code) => format!("{message} [{code}]"),
        None => message.to_string(),
    }
}

/// Executes SQL against a remote endpoint, one statement per call.
///
/// The runner hands each statement over re-terminated with `;` and waits
/// for the call to resolve before submitting the next one.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Run a single statement to completion.
    async fn execute(&self, sql: &str) -> Result<(), ExecError>;
}

/// What happened to one statement, as classified against the skip policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The statement ran successfully.
    Applied,
    /// The statement failed with a code the policy treats as benign; the
    /// run continues.
    SkippedBenign(String),
    /// The statement failed fatally; the run aborts.
    Failed(ExecError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code_when_present() {
        let err = ExecError::with_code("42P07", "relation already exists");
        assert_eq!(err.to_string(), "relation already exists [42P07]");
    }

    #[test]
    fn display_without_code_is_just_the_message() {
        let err = ExecError::transport("connection refused");
        assert_eq!(err.to_string(), "connection refused");
    }
}
