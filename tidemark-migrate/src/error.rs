//! Error types for script loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for migration operations.
pub type MigrateResult<T> = Result<T, MigrationError>;

/// Errors that can occur while loading migration scripts.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The migrations directory does not exist.
    #[error("migrations directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_names_the_path() {
        let err = MigrationError::MissingDirectory(PathBuf::from("/tmp/none"));
        assert!(err.to_string().contains("/tmp/none"));
    }
}
