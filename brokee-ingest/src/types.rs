use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw capture set of one transaction-shaped statement line.
///
/// Nothing here is normalized yet; see [`crate::line_parser::parse_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub date_token: String,
    pub description: String,
    pub sent_raw: String,
    pub received_raw: String,
}

/// Normalized output of the statement importer.
///
/// Both amounts are always present. They keep the sign and scale printed in
/// the statement, so `€-4,50` becomes `-4.50`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub description: String,
    pub sent_amount: Decimal,
    pub received_amount: Decimal,
}

impl TransactionRecord {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        sent_amount: Decimal,
        received_amount: Decimal,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            sent_amount,
            received_amount,
        }
    }
}
