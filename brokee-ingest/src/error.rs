use thiserror::Error;

/// Result type alias for statement ingestion.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Fatal ingestion failures.
///
/// Individual statement lines never produce an error; they are skipped.
/// Only losing the statement text itself aborts an import.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("statement text unavailable from {source_name}: {reason}")]
    InputUnavailable { source_name: String, reason: String },

    #[error("I/O error reading {path}: {error}")]
    Io {
        path: String,
        #[source]
        error: std::io::Error,
    },
}

impl IngestError {
    pub fn input_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        IngestError::InputUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = IngestError::input_unavailable("statement.pdf", "extractor crashed");
        assert_eq!(
            err.to_string(),
            "statement text unavailable from statement.pdf: extractor crashed"
        );
    }
}
