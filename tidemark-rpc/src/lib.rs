//! HTTP statement backend.
//!
//! Submits each statement to a hosted "execute raw SQL" endpoint as a JSON
//! POST (`{"query": "..."}`). Error responses are expected to carry a
//! structured body with `code` and `message` fields; responses that do not
//! parse become codeless failures, which no skip policy will tolerate.
//!
//! Uses `ureq` (sync) wrapped in `tokio::task::spawn_blocking` so the
//! sequential runner can await it without blocking the runtime.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use tidemark_migrate::{ExecError, StatementExecutor};

/// A statement executor over an HTTP raw-SQL endpoint.
pub struct RpcExecutor {
    endpoint: String,
    token: Option<String>,
}

impl RpcExecutor {
    /// Create an executor for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
        }
    }

    /// Attach a bearer token sent with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

#[async_trait]
impl StatementExecutor for RpcExecutor {
    async fn execute(&self, sql: &str) -> Result<(), ExecError> {
        debug!(endpoint = %self.endpoint, "submitting statement");

        let endpoint = self.endpoint.clone();
        let token = self.token.clone();
        let payload = serde_json::json!({ "query": sql });

        tokio::task::spawn_blocking(move || post_statement(&endpoint, token.as_deref(), &payload))
            .await
            .map_err(|e| ExecError::transport(format!("task join error: {e}")))?
    }
}

fn post_statement(
    endpoint: &str,
    token: Option<&str>,
    payload: &serde_json::Value,
) -> Result<(), ExecError> {
    // Non-2xx responses still carry the structured error body and must not
    // surface as transport errors.
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .into();

    let mut request = agent.post(endpoint);
    if let Some(token) = token {
        request = request.header("Authorization", &format!("Bearer {token}"));
    }

    let response = request
        .send_json(payload)
        .map_err(|e| ExecError::transport(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response
        .into_body()
        .read_to_string()
        .unwrap_or_default();
    Err(classify_response(status.as_u16(), &body))
}

/// The error body the endpoint is expected to return.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Turn a non-2xx response into an executor failure. A parseable body
/// keeps its machine-readable code; anything else is a codeless failure.
fn classify_response(status: u16, body: &str) -> ExecError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => ExecError {
            code: parsed.code,
            message: parsed
                .message
                .unwrap_or_else(|| format!("server returned HTTP {status}")),
        },
        Err(_) => ExecError::transport(format!(
            "server returned HTTP {status}: {}",
            body.trim()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coded_body_keeps_its_code() {
        let err = classify_response(
            400,
            r#"{"code": "42P07", "message": "relation already exists"}"#,
        );
        assert_eq!(err.code.as_deref(), Some("42P07"));
        assert_eq!(err.message, "relation already exists");
    }

    #[test]
    fn message_only_body_is_codeless() {
        let err = classify_response(500, r#"{"message": "internal error"}"#);
        assert!(err.code.is_none());
        assert_eq!(err.message, "internal error");
    }

    #[test]
    fn coded_body_without_message_reports_the_status() {
        let err = classify_response(400, r#"{"code": "42601"}"#);
        assert_eq!(err.code.as_deref(), Some("42601"));
        assert!(err.message.contains("400"));
    }

    #[test]
    fn unparseable_body_is_codeless() {
        let err = classify_response(502, "<html>Bad Gateway</html>");
        assert!(err.code.is_none());
        assert!(err.message.contains("502"));
        assert!(err.message.contains("Bad Gateway"));
    }

    #[test]
    fn empty_body_is_codeless() {
        let err = classify_response(503, "");
        assert!(err.code.is_none());
        assert!(err.message.contains("503"));
    }
}
