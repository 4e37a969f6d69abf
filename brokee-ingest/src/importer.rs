//! Whole-statement driver: split the extracted text into lines, run the line
//! parser over each one, keep the matches in document order.

use serde::Serialize;

use crate::error::Result;
use crate::line_parser::parse_line;
use crate::source::TextSource;
use crate::types::TransactionRecord;

/// Line counts from one pass over a statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub lines: usize,
    pub matched: usize,
    pub skipped: usize,
}

/// Split on `\n`, `\r\n` and bare `\r`.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().flat_map(|line| line.split('\r'))
}

/// Parse extracted statement text into transactions.
///
/// Lines that are not transaction rows are skipped; an input without any
/// rows gives an empty vec.
pub fn parse_statement(full_text: &str) -> Vec<TransactionRecord> {
    parse_statement_with_stats(full_text).0
}

pub fn parse_statement_with_stats(full_text: &str) -> (Vec<TransactionRecord>, ImportStats) {
    let mut stats = ImportStats::default();
    let mut out = Vec::new();

    for line in split_lines(full_text) {
        stats.lines += 1;
        match parse_line(line) {
            Some(record) => {
                stats.matched += 1;
                out.push(record);
            }
            None => stats.skipped += 1,
        }
    }

    tracing::debug!(
        lines = stats.lines,
        matched = stats.matched,
        skipped = stats.skipped,
        "parsed statement"
    );

    (out, stats)
}

/// Reads statement text from a [`TextSource`] and parses it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementImporter;

impl StatementImporter {
    pub fn new() -> Self {
        Self
    }

    /// Fails only when the source cannot deliver text.
    pub fn import(&self, source: &impl TextSource) -> Result<Vec<TransactionRecord>> {
        Ok(self.import_with_stats(source)?.0)
    }

    pub fn import_with_stats(
        &self,
        source: &impl TextSource,
    ) -> Result<(Vec<TransactionRecord>, ImportStats)> {
        let text = source.extract_text()?;
        let (records, stats) = parse_statement_with_stats(&text);
        tracing::info!(
            source = %source.name(),
            records = records.len(),
            skipped = stats.skipped,
            "imported statement"
        );
        Ok((records, stats))
    }
}
