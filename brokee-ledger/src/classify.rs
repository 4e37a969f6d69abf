//! Outflow/inflow classification of parsed statement rows.

use brokee_ingest::TransactionRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ledger transaction type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TxType {
    #[serde(rename = "E")]
    Expense,
    #[serde(rename = "I")]
    Income,
}

impl TxType {
    pub fn code(&self) -> &'static str {
        match self {
            TxType::Expense => "E",
            TxType::Income => "I",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub tx_type: TxType,
    pub amount: Decimal,
}

/// A strictly positive sent amount is an expense of that amount; anything
/// else is income of the received amount.
///
/// Rows with both sides non-zero only count the sent side.
pub fn classify(record: &TransactionRecord) -> Classified {
    if record.sent_amount > Decimal::ZERO {
        Classified {
            tx_type: TxType::Expense,
            amount: record.sent_amount,
        }
    } else {
        Classified {
            tx_type: TxType::Income,
            amount: record.received_amount,
        }
    }
}
