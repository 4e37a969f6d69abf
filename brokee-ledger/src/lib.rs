//! brokee-ledger: classification of imported statement rows, ledger entries,
//! and the statement import service

pub mod classify;
pub mod entry;
pub mod error;
pub mod import;
pub mod summary;

pub use classify::{Classified, TxType, classify};
pub use entry::{CategoryId, LedgerEntry};
pub use error::{LedgerError, Result};
pub use import::{
    CategoryResolver, ImportReport, ImportService, LedgerStore, MemoryCategories, MemoryLedger,
};
pub use summary::ImportSummary;
