//! Totals over a batch of imported ledger entries.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::entry::LedgerEntry;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub expense_count: usize,
    pub income_count: usize,
    pub expense_total: Decimal,
    pub income_total: Decimal,
}

impl ImportSummary {
    pub fn from_entries(entries: &[LedgerEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut acc, e| {
            if e.is_expense() {
                acc.expense_count += 1;
                acc.expense_total += e.amount;
            } else {
                acc.income_count += 1;
                acc.income_total += e.amount;
            }
            acc
        })
    }

    /// Income minus expenses
    pub fn net(&self) -> Decimal {
        self.income_total - self.expense_total
    }

    pub fn total_count(&self) -> usize {
        self.expense_count + self.income_count
    }
}
