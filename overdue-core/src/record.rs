//! Accepted, normalized client records.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Contact placeholder used when the source cell is blank.
pub const UNKNOWN_CONTACT: &str = "inconnu";

/// One client that made it into the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub code: String,
    pub name: String,
    /// Never empty
    pub contact: String,
    /// Exact balance, always > 0
    pub balance_raw: Decimal,
    /// `balance_raw` formatted for display, e.g. `1 234,50`
    pub balance_display: String,
    pub last_payment_date: NaiveDate,
}

/// Format an amount with two decimals, a comma decimal separator and spaces
/// between thousands groups. Halves round away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();

    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    format!("{}{},{}", if negative { "-" } else { "" }, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(1234.5)), "1 234,50");
        assert_eq!(format_amount(dec!(0)), "0,00");
        assert_eq!(format_amount(dec!(999.999)), "1 000,00");
        assert_eq!(format_amount(dec!(1234567.891)), "1 234 567,89");
        assert_eq!(format_amount(dec!(12.345)), "12,35");
        assert_eq!(format_amount(dec!(-1500)), "-1 500,00");
        assert_eq!(format_amount(dec!(100)), "100,00");
    }
}
