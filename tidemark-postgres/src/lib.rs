//! PostgreSQL statement backend.
//!
//! Runs statements over the wire protocol via `tokio-postgres`, surfacing
//! server failures with their SQLSTATE so the skip policy can classify
//! them. Connection-level failures carry no code and are always fatal to
//! a run.

use async_trait::async_trait;
use tokio_postgres::NoTls;
use tracing::{debug, warn};

use tidemark_migrate::{ExecError, StatementExecutor};

/// A statement executor over one PostgreSQL connection.
///
/// Statements arrive one at a time and run through the simple-query
/// protocol, so multi-command strings produced by the scanner upstream are
/// never batched here.
pub struct PgExecutor {
    client: tokio_postgres::Client,
}

impl PgExecutor {
    /// Connect to a `postgres://` URL.
    pub async fn connect(url: &str) -> Result<Self, ExecError> {
        let (client, connection) = tokio_postgres::connect(url, NoTls)
            .await
            .map_err(pg_error)?;

        // Drive the connection until the client is dropped.
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                warn!(error = %e, "postgres connection terminated");
            }
        });

        Ok(Self { client })
    }
}

#[async_trait]
impl StatementExecutor for PgExecutor {
    async fn execute(&self, sql: &str) -> Result<(), ExecError> {
        debug!(sql = %sql, "executing statement");
        self.client.batch_execute(sql).await.map_err(pg_error)
    }
}

/// Map a driver error to the executor's failure shape, keeping the
/// SQLSTATE when the server reported one.
fn pg_error(err: tokio_postgres::Error) -> ExecError {
    match err.as_db_error() {
        Some(db) => ExecError::with_code(db.code().code(), db.message()),
        None => ExecError::transport(err.to_string()),
    }
}
