//! Single-line matcher for monthly account statement text.
//!
//! Expected rows after PDF-to-text:
//!   01.08.2025     Some Shop            €-123,45   €0,00
//!   2. kol 2025.   Salary               €0,00      €3.210,99
//!
//! Columns are DATE, DESCRIPTION, SENT, RECEIVED separated by runs of
//! whitespace. Anything else on the page (headers, totals, footers) fails
//! the whole-line match and is skipped.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::amount::normalize_amount;
use crate::months::month_number;
use crate::types::{ParsedLine, TransactionRecord};

static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^(?P<date>[0-9]{2}\.[0-9]{2}\.[0-9]{4}|[0-9]{1,2}\.\s*[a-zšđčćž]{3}\s+[0-9]{4}\.)\s+",
        r"(?P<desc>.+?)\s+",
        r"€?(?P<sent>[-−]?[0-9][0-9.,]*)\s+",
        r"€?(?P<received>[-−]?[0-9][0-9.,]*)$"
    ))
    .expect("statement line pattern")
});

static NUMERIC_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4}$").expect("numeric date pattern"));

static TEXT_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?P<day>[0-9]{1,2})\.\s*(?P<month>[a-zšđčćž]{3})\s+(?P<year>[0-9]{4})\.$")
        .expect("textual date pattern")
});

/// Match one line against the statement row shape and return its raw fields.
pub fn try_parse_line(line: &str) -> Option<ParsedLine> {
    let caps = LINE_RE.captures(line.trim())?;
    Some(ParsedLine {
        date_token: caps["date"].to_string(),
        description: caps["desc"].trim().to_string(),
        sent_raw: caps["sent"].to_string(),
        received_raw: caps["received"].to_string(),
    })
}

/// Match and normalize one line. `None` covers every soft-skip case: wrong
/// shape, unknown month, impossible date, or an amount that is not a number.
pub fn parse_line(line: &str) -> Option<TransactionRecord> {
    let parsed = try_parse_line(line)?;

    let Some(date) = parse_date(&parsed.date_token) else {
        tracing::debug!(token = %parsed.date_token, "skipping line: unparseable date");
        return None;
    };

    let (Some(sent), Some(received)) = (
        normalize_amount(&parsed.sent_raw),
        normalize_amount(&parsed.received_raw),
    ) else {
        tracing::debug!(
            sent = %parsed.sent_raw,
            received = %parsed.received_raw,
            "skipping line: unparseable amount"
        );
        return None;
    };

    Some(TransactionRecord::new(date, parsed.description, sent, received))
}

/// Parse either `DD.MM.YYYY` or `D. mmm YYYY.` into a calendar date.
pub fn parse_date(token: &str) -> Option<NaiveDate> {
    let token = token.trim();

    if NUMERIC_DATE_RE.is_match(token) {
        return NaiveDate::parse_from_str(token, "%d.%m.%Y").ok();
    }

    let caps = TEXT_DATE_RE.captures(token)?;
    let day: u32 = caps["day"].parse().ok()?;
    let month = month_number(&caps["month"])?;
    let year: i32 = caps["year"].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_captures_raw_fields() {
        let parsed = try_parse_line("  12.05.2024 Coffee Shop €-4,50 €0,00  ").unwrap();
        assert_eq!(
            parsed,
            ParsedLine {
                date_token: "12.05.2024".to_string(),
                description: "Coffee Shop".to_string(),
                sent_raw: "-4,50".to_string(),
                received_raw: "0,00".to_string(),
            }
        );
    }

    #[test]
    fn test_description_keeps_inner_numbers() {
        let rec = parse_line("01.08.2025 Shop 24 Zagreb €-1,00 €0,00").unwrap();
        assert_eq!(rec.description, "Shop 24 Zagreb");
        assert_eq!(rec.sent_amount, dec("-1.00"));
    }

    #[test]
    fn test_amounts_without_euro_glyph() {
        let rec = parse_line("03.08.2025 Transfer -1234,56 0,00").unwrap();
        assert_eq!(rec.sent_amount, dec("-1234.56"));
        assert_eq!(rec.received_amount, Decimal::ZERO);
    }

    #[test]
    fn test_locale_date_equivalence() {
        let numeric = parse_line("01.08.2025 Some Shop €-123,45 €0,00").unwrap();
        let textual = parse_line("1. kol 2025. Some Shop €-123,45 €0,00").unwrap();
        assert_eq!(numeric.date, ymd(2025, 8, 1));
        assert_eq!(numeric, textual);
    }

    #[test]
    fn test_textual_date_uppercase_and_tight_spacing() {
        assert_eq!(parse_date("2.KOL 2025."), Some(ymd(2025, 8, 2)));
        assert_eq!(parse_date("15. Ožu 2024."), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn test_unknown_month_is_skipped() {
        let line = "1. aug 2025. Salary €0,00 €100,00";
        assert!(try_parse_line(line).is_some(), "shape still matches");
        assert_eq!(parse_line(line), None);
    }

    #[test]
    fn test_impossible_date_is_skipped() {
        assert_eq!(parse_line("31.02.2024 Rent €-500,00 €0,00"), None);
        assert_eq!(parse_date("29.02.2024"), Some(ymd(2024, 2, 29)));
    }

    #[test]
    fn test_whitespace_runs_do_not_matter() {
        let tight = parse_line("08.08.2025 Groceries €-123,45 €0,00").unwrap();
        let loose = parse_line("08.08.2025     Groceries         €-123,45            €0,00").unwrap();
        let tabs = parse_line("08.08.2025\tGroceries\t\t€-123,45\t€0,00").unwrap();
        assert_eq!(tight, loose);
        assert_eq!(tight, tabs);
    }

    #[test]
    fn test_unicode_minus_equivalence() {
        let ascii = parse_line("03.08.2025 Big Purchase €-1.234,56 €0,00").unwrap();
        let unicode = parse_line("03.08.2025 Big Purchase €−1.234,56 €0,00").unwrap();
        assert_eq!(ascii, unicode);
        assert_eq!(unicode.sent_amount, dec("-1234.56"));
    }

    #[test]
    fn test_non_euro_currency_rejected() {
        assert_eq!(try_parse_line("07.08.2025 USD purchase $-10.00 $0.00"), None);
    }

    #[test]
    fn test_boilerplate_rejected() {
        assert_eq!(try_parse_line("Statement for August 2025"), None);
        assert_eq!(try_parse_line("Total for period: €1.234,56"), None);
        assert_eq!(try_parse_line(""), None);
        assert_eq!(try_parse_line("01.08.2025 €-1,00 €0,00"), None);
    }

    #[test]
    fn test_single_amount_rejected() {
        assert_eq!(try_parse_line("01.08.2025 Coffee €-2,50"), None);
    }

    #[test]
    fn test_amount_beyond_decimal_precision_is_skipped() {
        let line = "01.08.2025 Rounding €1,00000000000000000000000000001 €0,00";
        assert!(try_parse_line(line).is_some());
        assert_eq!(parse_line(line), None);

        let text = format!("{}\n09.08.2025 Coffee €-2,50 €0,00", line);
        let records = crate::importer::parse_statement(&text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].description, "Coffee");
        assert_eq!(records[0].sent_amount, dec("-2.50"));
    }
}
