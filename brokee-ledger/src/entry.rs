//! Ledger entries built from imported statement rows.

use brokee_ingest::TransactionRecord;
use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::classify::{TxType, classify};

pub type CategoryId = u64;

/// A dated ledger transaction owned by one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    /// Subject of the owning user
    pub user_sub: String,
    pub tx_type: TxType,
    /// Amount as classified from the statement row
    pub amount: Decimal,
    pub category_id: CategoryId,
    /// Statement date at midnight UTC
    pub tx_time: DateTime<Utc>,
    pub description: String,
}

impl LedgerEntry {
    pub fn from_record(
        record: &TransactionRecord,
        user_sub: impl Into<String>,
        category_id: CategoryId,
    ) -> Self {
        let classified = classify(record);
        Self {
            user_sub: user_sub.into(),
            tx_type: classified.tx_type,
            amount: classified.amount,
            category_id,
            tx_time: record.date.and_time(NaiveTime::MIN).and_utc(),
            description: record.description.clone(),
        }
    }

    pub fn is_expense(&self) -> bool {
        self.tx_type == TxType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.tx_type == TxType::Income
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use std::str::FromStr;

    #[test]
    fn test_entry_at_midnight_utc() {
        let record = TransactionRecord::new(
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            "Salary",
            Decimal::ZERO,
            Decimal::from_str("123.45").unwrap(),
        );
        let entry = LedgerEntry::from_record(&record, "user-1", 7);

        assert_eq!(entry.tx_time, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
        assert!(entry.is_income());
        assert_eq!(entry.amount, Decimal::from_str("123.45").unwrap());
        assert_eq!(entry.category_id, 7);
        assert_eq!(entry.user_sub, "user-1");
    }
}
