//! `tidemark execute` - run ad-hoc SQL through the scanner and runner.

use tidemark_migrate::{InMemorySource, RunnerConfig};

use crate::cli::ExecuteArgs;
use crate::commands::apply::run_source;
use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::output::{self, success};

/// Run the execute command
pub async fn run(args: ExecuteArgs) -> CliResult<()> {
    output::header("Execute SQL");

    // Get SQL to execute
    let (label, sql) = if let Some(sql) = args.sql {
        ("<inline>".to_string(), sql)
    } else if let Some(file) = args.file {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        (name, std::fs::read_to_string(&file)?)
    } else if args.stdin {
        let mut sql = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut sql)?;
        ("<stdin>".to_string(), sql)
    } else {
        return Err(CliError::Command(
            "must provide SQL via --sql, --file, or --stdin".to_string(),
        ));
    };

    let cwd = std::env::current_dir()?;
    let config = Config::load_or_default(&cwd)?;
    let url = config.resolve_url(args.url)?;

    output::kv("Target", &url);
    output::section("SQL");
    output::code(&sql);

    // Confirm if not forced
    if !args.force && !output::confirm("Execute this SQL?") {
        output::newline();
        output::info("Execution cancelled.");
        return Ok(());
    }

    let source = InMemorySource::single(label, sql);
    let report = run_source(
        &url,
        config.bearer_token(),
        config.skip_policy(),
        RunnerConfig::new(),
        &source,
    )
    .await?;

    output::newline();
    success(&report.summary());

    Ok(())
}
