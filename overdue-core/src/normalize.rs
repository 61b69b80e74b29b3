//! Cell normalization: loosely formatted cells into decimal amounts and dates.
//!
//! Nothing here fails. Unreadable amounts collapse to zero and unreadable dates
//! to `None`; the classifier turns both into exclusions.

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::cell::CellValue;

/// Outcome of reading a balance cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountReading {
    /// Absent, empty or whitespace-only cell.
    Blank,
    Parsed(Decimal),
    /// Non-empty text that is not a number.
    Malformed,
}

impl AmountReading {
    /// The amount to use downstream; blank and malformed cells count as zero.
    pub fn value(self) -> Decimal {
        match self {
            AmountReading::Parsed(d) => d,
            AmountReading::Blank | AmountReading::Malformed => Decimal::ZERO,
        }
    }

    pub fn is_malformed(self) -> bool {
        matches!(self, AmountReading::Malformed)
    }
}

/// Read a balance cell, keeping track of whether the text was unreadable.
///
/// Text is compacted (every whitespace character, NBSP included, removed) and a
/// comma decimal separator becomes a period: `"1 234,50"` reads as `1234.50`.
pub fn read_amount(cell: &CellValue) -> AmountReading {
    match cell {
        CellValue::Empty => AmountReading::Blank,
        CellValue::Number(n) => Decimal::try_from(*n)
            .map(AmountReading::Parsed)
            .unwrap_or(AmountReading::Malformed),
        CellValue::Text(s) => {
            let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
            if compact.is_empty() {
                return AmountReading::Blank;
            }
            let normalized = compact.replace(',', ".");
            Decimal::from_str(&normalized)
                .or_else(|_| Decimal::from_scientific(&normalized))
                .map(AmountReading::Parsed)
                .unwrap_or(AmountReading::Malformed)
        }
    }
}

/// Best-effort amount: zero for anything that is not a readable number.
pub fn normalize_amount(cell: &CellValue) -> Decimal {
    read_amount(cell).value()
}

/// Normalize a date cell. `None` means the cell is absent or unreadable.
///
/// Numbers (and text that reads as a single number) are spreadsheet serial
/// dates. Other text, dotted dates like `14.03.2024` included, goes through
/// [`text_date_strategies`] in order; the first hit wins.
pub fn normalize_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Empty => None,
        CellValue::Number(n) => date_from_serial(*n),
        CellValue::Text(s) => {
            let text = s.trim();
            if text.is_empty() {
                return None;
            }
            if is_numeric_text(text) {
                if let Ok(serial) = text.parse::<f64>() {
                    return date_from_serial(serial);
                }
            }
            text_date_strategies().iter().find_map(|strategy| strategy.parse(text))
        }
    }
}

fn is_numeric_text(text: &str) -> bool {
    text.bytes().any(|b| b.is_ascii_digit())
        && text.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}

/// Convert a spreadsheet serial date (1900 date system) to a calendar date.
///
/// Serial 1 is 1900-01-01. Serials from 61 on are shifted by the phantom
/// 1900-02-29 that spreadsheets count; serial 60 itself lands on 1900-02-28.
/// Values below 1 carry only a time of day and yield `None`.
pub fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let days = serial.floor() as u64;
    let epoch = if days < 60 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    epoch.checked_add_days(Days::new(days))
}

/// A way of reading a date out of trimmed, non-empty text.
pub trait DateStrategy: Sync {
    fn name(&self) -> &'static str;
    fn parse(&self, text: &str) -> Option<NaiveDate>;
}

/// Free-form reading: ISO and RFC timestamps, US slash dates, dotted and dashed
/// European dates, and month names with optional ordinals and commas.
pub struct FreeForm;

/// Exactly one `chrono` format string.
pub struct Pattern(pub &'static str);

static ORDINAL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("static regex")
});

const FREE_FORM_DATES: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    // Two-digit years first: `%Y` would also read "24" as year 24.
    "%m/%d/%y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d.%m.%y",
    "%d.%m.%Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%B %d %Y",
    "%Y %B %d",
];

const FREE_FORM_DATETIMES: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d.%m.%Y %H:%M",
    "%d %B %Y %H:%M",
];

impl DateStrategy for FreeForm {
    fn name(&self) -> &'static str {
        "free-form"
    }

    fn parse(&self, text: &str) -> Option<NaiveDate> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.date_naive());
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
            return Some(dt.date_naive());
        }

        let cleaned = ORDINAL_SUFFIX.replace_all(text, "$1").replace(',', " ");
        let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

        FREE_FORM_DATES
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok())
            .or_else(|| {
                FREE_FORM_DATETIMES
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(&cleaned, fmt).ok())
                    .map(|dt| dt.date())
            })
    }
}

impl DateStrategy for Pattern {
    fn name(&self) -> &'static str {
        self.0
    }

    fn parse(&self, text: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(text, self.0).ok()
    }
}

static TEXT_DATE_STRATEGIES: [&dyn DateStrategy; 3] =
    [&FreeForm, &Pattern("%d/%m/%Y"), &Pattern("%Y-%m-%d")];

/// Strategies tried, in order, on textual date cells.
pub fn text_date_strategies() -> &'static [&'static dyn DateStrategy] {
    &TEXT_DATE_STRATEGIES
}
