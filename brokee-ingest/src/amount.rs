//! Amount normalization for European-formatted statement amounts.
//!
//! Statements mix `1.234,56`, `1,234.56` and `1234,56`. Whichever glyph is
//! used, the decimal separator is always the last `.` or `,` in the token;
//! any earlier one is a thousands separator.

use rust_decimal::Decimal;

const UNICODE_MINUS: char = '\u{2212}';
const EURO: char = '€';

/// Normalize a raw amount token into an exact decimal.
///
/// Returns `None` when the token does not resolve to a number. Never rounds:
/// tokens with more precision than `Decimal` can hold are rejected.
pub fn normalize_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != EURO && !c.is_whitespace())
        .map(|c| if c == UNICODE_MINUS { '-' } else { c })
        .collect();

    let canonical = match cleaned.rfind(['.', ',']) {
        Some(idx) => {
            let integer: String = cleaned[..idx]
                .chars()
                .filter(|c| *c != '.' && *c != ',')
                .collect();
            let fraction = &cleaned[idx + 1..];
            if fraction.is_empty() {
                integer
            } else {
                format!("{integer}.{fraction}")
            }
        }
        None => cleaned,
    };

    let unsigned = canonical.strip_prefix('-').unwrap_or(&canonical);
    if !unsigned.chars().any(|c| c.is_ascii_digit())
        || !unsigned.chars().all(|c| c.is_ascii_digit() || c == '.')
    {
        return None;
    }

    Decimal::from_str_exact(&canonical).ok()
}
