//! `tidemark split` - show how a SQL file scans into statements.

use tidemark_migrate::split_statements;

use crate::cli::SplitArgs;
use crate::error::CliResult;
use crate::output;

/// Run the split command
pub async fn run(args: SplitArgs) -> CliResult<()> {
    let sql = std::fs::read_to_string(&args.file)?;
    let statements = split_statements(&sql);

    if statements.is_empty() {
        output::info("No statements found.");
        return Ok(());
    }

    for (index, statement) in statements.iter().enumerate() {
        output::section(&format!("Statement {}", index + 1));
        output::code(statement);
    }

    output::dim(&format!(
        "{} statement{}",
        statements.len(),
        if statements.len() == 1 { "" } else { "s" }
    ));

    Ok(())
}
