//! brokee-ingest: turns extracted bank statement text into typed transactions.

pub mod amount;
pub mod error;
pub mod importer;
pub mod line_parser;
pub mod months;
pub mod source;
pub mod types;

pub use error::{IngestError, Result};
pub use importer::{ImportStats, StatementImporter, parse_statement, parse_statement_with_stats};
pub use line_parser::{parse_line, try_parse_line};
pub use source::{InMemoryText, PlainTextFile, TextSource};
pub use types::{ParsedLine, TransactionRecord};
