//! Croatian three-letter month abbreviations as printed in statement dates
//! like `1. kol 2025.`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static MONTHS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("sij", 1),
        ("vel", 2),
        ("ožu", 3),
        ("tra", 4),
        ("svi", 5),
        ("lip", 6),
        ("srp", 7),
        ("kol", 8),
        ("ruj", 9),
        ("lis", 10),
        ("stu", 11),
        ("pro", 12),
    ])
});

/// Month number (1-12) for an abbreviation, case-insensitive.
pub fn month_number(abbrev: &str) -> Option<u32> {
    MONTHS.get(abbrev.to_lowercase().as_str()).copied()
}
