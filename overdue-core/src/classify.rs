//! Per-row inclusion decision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cell::RawRow;
use crate::normalize::{normalize_date, read_amount};
use crate::policy::AgingPolicy;
use crate::record::{format_amount, Record, UNKNOWN_CONTACT};

/// Why a row was left out of the report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Exclusion {
    /// Balance is zero, negative, blank or unreadable
    NonPositiveBalance,
    MissingPaymentDate,
    UnparseablePaymentDate,
    /// Last payment is older than the window
    BeforeWindow,
    /// Last payment is more recent than the window
    AfterWindow,
}

impl Exclusion {
    pub const ALL: [Exclusion; 5] = [
        Exclusion::NonPositiveBalance,
        Exclusion::MissingPaymentDate,
        Exclusion::UnparseablePaymentDate,
        Exclusion::BeforeWindow,
        Exclusion::AfterWindow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Exclusion::NonPositiveBalance => "non-positive-balance",
            Exclusion::MissingPaymentDate => "missing-payment-date",
            Exclusion::UnparseablePaymentDate => "unparseable-payment-date",
            Exclusion::BeforeWindow => "before-window",
            Exclusion::AfterWindow => "after-window",
        }
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify one row, substituting [`UNKNOWN_CONTACT`] for a blank contact.
pub fn classify(row: &RawRow, policy: &AgingPolicy) -> Result<Record, Exclusion> {
    classify_with(row, policy, UNKNOWN_CONTACT)
}

/// Classify one row against the policy window.
///
/// Checks run in a fixed order and the first failing one decides the reason:
/// balance, then date presence, then date parsing, then the window bounds.
pub fn classify_with(
    row: &RawRow,
    policy: &AgingPolicy,
    unknown_contact: &str,
) -> Result<Record, Exclusion> {
    let balance = read_amount(&row.balance).value();
    if balance <= Decimal::ZERO {
        return Err(Exclusion::NonPositiveBalance);
    }

    if row.last_payment.is_blank() {
        return Err(Exclusion::MissingPaymentDate);
    }
    let last_payment_date =
        normalize_date(&row.last_payment).ok_or(Exclusion::UnparseablePaymentDate)?;

    if policy.min_date.is_some_and(|min| last_payment_date < min) {
        return Err(Exclusion::BeforeWindow);
    }
    if last_payment_date > policy.max_date {
        return Err(Exclusion::AfterWindow);
    }

    let mut contact = row.contact.as_text().trim().to_string();
    if contact.is_empty() {
        contact = match unknown_contact.trim() {
            "" => UNKNOWN_CONTACT.to_string(),
            sentinel => sentinel.to_string(),
        };
    }

    Ok(Record {
        code: row.code.as_text().trim().to_string(),
        name: row.name.as_text().trim().to_string(),
        contact,
        balance_raw: balance,
        balance_display: format_amount(balance),
        last_payment_date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use crate::policy::select_policy;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(balance: &str, date: &str) -> RawRow {
        RawRow::new(" C-001 ", "  Dupont SARL ", "  ", balance, date)
    }

    #[test]
    fn test_accepts_in_window_row() {
        let policy = select_policy("30_37", ymd(2024, 6, 15));
        let rec = classify(&row("1 234,50", "2024-05-10"), &policy).unwrap();
        assert_eq!(rec.code, "C-001");
        assert_eq!(rec.name, "Dupont SARL");
        assert_eq!(rec.contact, UNKNOWN_CONTACT);
        assert_eq!(rec.balance_raw, dec!(1234.50));
        assert_eq!(rec.balance_display, "1 234,50");
        assert_eq!(rec.last_payment_date, ymd(2024, 5, 10));
    }

    #[test]
    fn test_blank_sentinel_falls_back_to_default_contact() {
        let policy = select_policy("overdue", ymd(2024, 6, 15));
        for sentinel in ["", "   "] {
            let rec = classify_with(&row("10", "2024-01-01"), &policy, sentinel).unwrap();
            assert_eq!(rec.contact, UNKNOWN_CONTACT, "sentinel {sentinel:?}");
        }
        let rec = classify_with(&row("10", "2024-01-01"), &policy, " n/a ").unwrap();
        assert_eq!(rec.contact, "n/a");
    }

    #[test]
    fn test_dotted_payment_date_is_accepted() {
        let policy = select_policy("overdue", ymd(2024, 6, 15));
        let rec = classify(&row("10", "14.03.2024"), &policy).unwrap();
        assert_eq!(rec.last_payment_date, ymd(2024, 3, 14));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let policy = select_policy("30_37", ymd(2024, 6, 15));
        assert!(classify(&row("10", "2024-05-09"), &policy).is_ok());
        assert!(classify(&row("10", "2024-05-16"), &policy).is_ok());
        assert_eq!(
            classify(&row("10", "2024-05-08"), &policy),
            Err(Exclusion::BeforeWindow)
        );
        assert_eq!(
            classify(&row("10", "2024-05-17"), &policy),
            Err(Exclusion::AfterWindow)
        );
    }

    #[test]
    fn test_out_of_window_date_is_excluded_but_balance_still_reads() {
        let policy = select_policy("30_37", ymd(2024, 6, 15));
        let r = row("1 234,50", "14/03/2024");
        assert_eq!(classify(&r, &policy), Err(Exclusion::BeforeWindow));
        assert_eq!(read_amount(&r.balance).value(), dec!(1234.50));
    }

    #[test]
    fn test_missing_date_is_excluded() {
        let policy = select_policy("overdue", ymd(2024, 6, 15));
        assert_eq!(
            classify(&row("500", ""), &policy),
            Err(Exclusion::MissingPaymentDate)
        );
        assert_eq!(
            classify(&row("500", "soon"), &policy),
            Err(Exclusion::UnparseablePaymentDate)
        );
    }

    #[test]
    fn test_zero_and_junk_balances_are_excluded() {
        let policy = select_policy("overdue", ymd(2024, 6, 15));
        for bal in ["0", "0,00", "-25", " ", ",", "abc"] {
            assert_eq!(
                classify(&row(bal, "2024-01-01"), &policy),
                Err(Exclusion::NonPositiveBalance),
                "balance {bal:?}"
            );
        }
    }

    #[test]
    fn test_blank_row_fails_at_balance_first() {
        let policy = select_policy("overdue", ymd(2024, 6, 15));
        assert_eq!(
            classify(&RawRow::default(), &policy),
            Err(Exclusion::NonPositiveBalance)
        );
    }

    #[test]
    fn test_numeric_cells() {
        let policy = select_policy("overdue", ymd(2024, 6, 15));
        let r = RawRow::new(
            CellValue::Number(1042.0),
            "Martin",
            "06 12 34 56 78",
            CellValue::Number(89.9),
            CellValue::Number(45366.0),
        );
        let rec = classify(&r, &policy).unwrap();
        assert_eq!(rec.code, "1042");
        assert_eq!(rec.contact, "06 12 34 56 78");
        assert_eq!(rec.balance_display, "89,90");
        assert_eq!(rec.last_payment_date, ymd(2024, 3, 15));
    }

    #[test]
    fn test_custom_unknown_contact() {
        let policy = select_policy("overdue", ymd(2024, 6, 15));
        let rec = classify_with(&row("10", "2024-01-01"), &policy, "n/a").unwrap();
        assert_eq!(rec.contact, "n/a");
    }
}
