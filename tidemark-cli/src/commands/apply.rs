//! `tidemark apply` - apply migration scripts in file-name order.

use std::time::Duration;

use tidemark_migrate::{
    DirectorySource, MigrationSource, RunError, RunReport, Runner, RunnerConfig, SkipPolicy,
    StatementExecutor,
};
use tidemark_postgres::PgExecutor;
use tidemark_rpc::RpcExecutor;

use crate::cli::ApplyArgs;
use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::output::{self, success};

/// Run the apply command
pub async fn run(args: ApplyArgs) -> CliResult<()> {
    output::header("Apply Migrations");

    let cwd = std::env::current_dir()?;
    let config = Config::load_or_default(&cwd)?;

    let dir = args
        .dir
        .unwrap_or_else(|| cwd.join(&config.migrations.directory));
    let url = config.resolve_url(args.url)?;

    output::kv("Migrations", &dir.display().to_string());
    output::kv("Target", &url);
    output::newline();

    let policy = if args.strict {
        SkipPolicy::none()
    } else {
        config.skip_policy()
    };

    let mut runner_config = RunnerConfig::new();
    if let Some(secs) = args.timeout.or(config.migrations.statement_timeout_secs) {
        runner_config = runner_config.statement_timeout(Duration::from_secs(secs));
    }

    let source = DirectorySource::new(&dir);
    let report = run_source(&url, config.bearer_token(), policy, runner_config, &source).await?;

    for skipped in &report.skipped {
        output::skip(&format!(
            "{}: statement {} skipped ({})",
            skipped.script, skipped.statement, skipped.code
        ));
    }

    output::newline();
    success(&report.summary());

    Ok(())
}

/// Dispatch on the URL scheme, run the source to completion, and print the
/// failure report when the run aborts. Shared with `execute`.
pub(crate) async fn run_source(
    url: &str,
    token: Option<String>,
    policy: SkipPolicy,
    config: RunnerConfig,
    source: &dyn MigrationSource,
) -> CliResult<RunReport> {
    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        let executor = PgExecutor::connect(url)
            .await
            .map_err(|e| CliError::Database(e.to_string()))?;
        drive(executor, policy, config, source).await
    } else if url.starts_with("http://") || url.starts_with("https://") {
        let mut executor = RpcExecutor::new(url);
        if let Some(token) = token {
            executor = executor.with_token(token);
        }
        drive(executor, policy, config, source).await
    } else {
        Err(CliError::Config(format!(
            "unsupported target URL scheme: {url}"
        )))
    }
}

async fn drive<E: StatementExecutor>(
    executor: E,
    policy: SkipPolicy,
    config: RunnerConfig,
    source: &dyn MigrationSource,
) -> CliResult<RunReport> {
    let runner = Runner::new(executor)
        .with_policy(policy)
        .with_config(config);

    match runner.run(source).await {
        Ok(report) => Ok(report),
        Err(RunError::Statement {
            script,
            statement,
            sql,
            error,
        }) => {
            output::newline();
            output::error(&format!(
                "{script}: statement {statement} failed: {error}"
            ));
            output::section("Failed statement");
            output::code(&sql);
            Err(CliError::Migration(format!(
                "aborted at {script}, statement {statement}"
            )))
        }
        Err(RunError::Load(e)) => Err(e.into()),
    }
}
