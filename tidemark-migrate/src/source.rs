//! Loading migration scripts.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{MigrateResult, MigrationError};

/// One migration script: the name it sorts by and the raw SQL it contains.
///
/// Scripts are read once per run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScript {
    /// File name (or synthetic label); the sort key for application order.
    pub name: String,
    /// Full script text.
    pub sql: String,
}

impl MigrationScript {
    /// Create a new script.
    pub fn new(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
        }
    }
}

/// Where migration scripts come from.
///
/// Implementations return scripts in ascending name order; the runner
/// applies them exactly in the order returned.
#[async_trait]
pub trait MigrationSource: Send + Sync {
    /// Load every script, sorted.
    async fn load(&self) -> MigrateResult<Vec<MigrationScript>>;
}

/// Reads every `.sql` file in one directory, sorted by file name.
///
/// Non-recursive; files with other extensions and subdirectories are
/// ignored. The sort is over file names, not modification times, so
/// `001_y.sql` always precedes `002_x.sql` regardless of directory
/// enumeration order.
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Create a source over a migrations directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory being read.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl MigrationSource for DirectorySource {
    async fn load(&self) -> MigrateResult<Vec<MigrationScript>> {
        if !self.dir.is_dir() {
            return Err(MigrationError::MissingDirectory(self.dir.clone()));
        }

        let mut scripts = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() || !is_sql_file(&path) {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let sql = tokio::fs::read_to_string(&path).await?;
            scripts.push(MigrationScript::new(name, sql));
        }

        scripts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(scripts)
    }
}

fn is_sql_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("sql"))
}

/// Scripts held in memory, for one-off runs and tests.
pub struct InMemorySource {
    scripts: Vec<MigrationScript>,
}

impl InMemorySource {
    /// Create a source over a set of scripts.
    pub fn new(scripts: Vec<MigrationScript>) -> Self {
        Self { scripts }
    }

    /// A source holding exactly one script.
    pub fn single(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self::new(vec![MigrationScript::new(name, sql)])
    }
}

#[async_trait]
impl MigrationSource for InMemorySource {
    async fn load(&self) -> MigrateResult<Vec<MigrationScript>> {
        let mut scripts = self.scripts.clone();
        scripts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(scripts)
    }
}
