//! Totals over accepted records.

use rust_decimal::Decimal;

use crate::record::Record;

/// Exact sum of `balance_raw`. Display strings are never read.
pub fn aggregate(records: &[Record]) -> Decimal {
    records.iter().map(|r| r.balance_raw).sum()
}
