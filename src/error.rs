//! Error kinds raised while harvesting PDF metadata.
//!
//! `FileRead`, `DateParse` and `Database` are recovered per file by the
//! scanner; `InvalidDirectory` ends the run before any traversal.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum HarvestError {
    /// The PDF could not be opened or parsed (corrupt, encrypted, not a PDF).
    FileRead { path: PathBuf, reason: String },
    /// A `/CreationDate` or `/ModDate` value is malformed.
    DateParse { input: String, reason: String },
    /// Connection, schema or insert failure.
    Database(String),
    /// The scan root does not exist.
    InvalidDirectory(PathBuf),
}

impl HarvestError {
    pub fn file_read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        HarvestError::FileRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn date_parse(input: &str, reason: impl ToString) -> Self {
        HarvestError::DateParse {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for HarvestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarvestError::FileRead { path, reason } => {
                write!(f, "failed to read PDF {}: {}", path.display(), reason)
            }
            HarvestError::DateParse { input, reason } => {
                write!(f, "invalid PDF date '{}': {}", input, reason)
            }
            HarvestError::Database(e) => write!(f, "database error: {}", e),
            HarvestError::InvalidDirectory(path) => {
                write!(f, "invalid directory path: {}", path.display())
            }
        }
    }
}

impl std::error::Error for HarvestError {}

impl From<sqlx::Error> for HarvestError {
    fn from(e: sqlx::Error) -> Self {
        HarvestError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_read_message_names_the_path() {
        let err = HarvestError::file_read("docs/x.pdf", "invalid file header");
        let msg = err.to_string();
        assert!(msg.contains("docs/x.pdf"));
        assert!(msg.contains("invalid file header"));
    }

    #[test]
    fn sqlx_errors_become_database_errors() {
        let err: HarvestError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, HarvestError::Database(_)));
    }
}
