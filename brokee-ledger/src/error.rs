use brokee_ingest::IngestError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("import category '{name}' unavailable: {reason}")]
    CategoryUnavailable { name: String, reason: String },

    #[error("failed to persist ledger entry: {0}")]
    Store(String),
}
