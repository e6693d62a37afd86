//! CLI configuration handling.

use serde::{Deserialize, Serialize};
use std::path::Path;

use tidemark_migrate::SkipPolicy;

use crate::error::{CliError, CliResult};

/// Default config file name (lives in project root)
pub const CONFIG_FILE_NAME: &str = "tidemark.toml";

/// Default migrations directory (relative to project root)
pub const MIGRATIONS_DIR: &str = "migrations";

/// Tidemark CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Migration configuration
    pub migrations: MigrationsConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `tidemark.toml` from a directory, or defaults when absent
    pub fn load_or_default(dir: &Path) -> CliResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the target URL: flag (or `DATABASE_URL` via clap) first,
    /// then the config file.
    pub fn resolve_url(&self, flag: Option<String>) -> CliResult<String> {
        flag.or_else(|| self.database.url.clone()).ok_or_else(|| {
            CliError::Config(
                "no target URL: pass --url, set DATABASE_URL, or set database.url in tidemark.toml"
                    .to_string(),
            )
        })
    }

    /// The skip policy: a configured `skip_codes` list replaces the default
    /// code set entirely.
    pub fn skip_policy(&self) -> SkipPolicy {
        match &self.migrations.skip_codes {
            Some(codes) => SkipPolicy::from_codes(codes.iter().cloned()),
            None => SkipPolicy::default(),
        }
    }

    /// Bearer token for HTTP endpoints: config first, then `TIDEMARK_TOKEN`.
    pub fn bearer_token(&self) -> Option<String> {
        self.database
            .bearer_token
            .clone()
            .or_else(|| std::env::var("TIDEMARK_TOKEN").ok())
    }
}

/// Database configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Target URL: postgres:// for the wire protocol, http(s):// for an
    /// RPC endpoint
    pub url: Option<String>,

    /// Bearer token sent to HTTP endpoints
    pub bearer_token: Option<String>,
}

/// Migration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationsConfig {
    /// Directory of .sql migration files
    pub directory: String,

    /// Override of the benign-error code allow-list
    pub skip_codes: Option<Vec<String>>,

    /// Per-statement timeout in seconds
    pub statement_timeout_secs: Option<u64>,
}

impl Default for MigrationsConfig {
    fn default() -> Self {
        Self {
            directory: MIGRATIONS_DIR.to_string(),
            skip_codes: None,
            statement_timeout_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config() {
        let config: Config = toml::from_str(
            r#"
            [database]
            url = "postgres://localhost/app"

            [migrations]
            directory = "db/migrations"
            skip_codes = ["42P07"]
            statement_timeout_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(
            config.database.url.as_deref(),
            Some("postgres://localhost/app")
        );
        assert_eq!(config.migrations.directory, "db/migrations");
        assert_eq!(config.migrations.statement_timeout_secs, Some(30));
    }

    #[test]
    fn defaults_when_sections_are_missing() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.database.url.is_none());
        assert_eq!(config.migrations.directory, MIGRATIONS_DIR);
    }

    #[test]
    fn flag_takes_precedence_over_config() {
        let config: Config = toml::from_str(
            r#"
            [database]
            url = "postgres://config/app"
            "#,
        )
        .unwrap();

        let url = config
            .resolve_url(Some("postgres://flag/app".to_string()))
            .unwrap();
        assert_eq!(url, "postgres://flag/app");
    }

    #[test]
    fn missing_url_is_a_config_error() {
        let config = Config::default();
        assert!(matches!(
            config.resolve_url(None),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn skip_codes_replace_the_default_policy() {
        let config: Config = toml::from_str(
            r#"
            [migrations]
            skip_codes = ["XX000"]
            "#,
        )
        .unwrap();

        let policy = config.skip_policy();
        assert!(policy.is_benign(Some("XX000")));
        assert!(!policy.is_benign(Some("42P07")));
    }
}
