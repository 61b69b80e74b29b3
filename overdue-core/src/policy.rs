//! Aging policies: which last-payment dates a report type selects.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Report type selector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ReportType {
    #[default]
    #[serde(rename = "overdue")]
    Overdue,
    #[serde(rename = "30_37")]
    Days30To37,
    #[serde(rename = "37_44")]
    Days37To44,
    #[serde(rename = "24_31")]
    Days24To31,
}

impl ReportType {
    pub const ALL: [ReportType; 4] = [
        ReportType::Overdue,
        ReportType::Days30To37,
        ReportType::Days37To44,
        ReportType::Days24To31,
    ];

    /// Resolve a user-supplied selector. Unknown selectors fall back to
    /// [`ReportType::Overdue`].
    pub fn from_selector(selector: &str) -> Self {
        Self::recognize(selector).unwrap_or_default()
    }

    /// Strict lookup, for callers that want to warn about a fallback.
    pub fn recognize(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        Self::ALL.into_iter().find(|t| t.selector() == selector)
    }

    pub fn selector(&self) -> &'static str {
        match self {
            ReportType::Overdue => "overdue",
            ReportType::Days30To37 => "30_37",
            ReportType::Days37To44 => "37_44",
            ReportType::Days24To31 => "24_31",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportType::Overdue => "Over 30 days overdue (overdue)",
            ReportType::Days30To37 => "Early Warning (30-37 days)",
            ReportType::Days37To44 => "Advanced Warning (37-44 days)",
            ReportType::Days24To31 => "Early Warning (24-31 days)",
        }
    }

    /// `(oldest, newest)` day offsets back from the reference date.
    /// `None` for the oldest offset means no lower bound.
    fn offsets(&self) -> (Option<u64>, u64) {
        match self {
            ReportType::Overdue => (None, 30),
            ReportType::Days30To37 => (Some(37), 30),
            ReportType::Days37To44 => (Some(44), 37),
            ReportType::Days24To31 => (Some(31), 24),
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// Date shown as the lower bound of an unbounded range.
pub fn range_floor() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// The active date window for one report run. Both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingPolicy {
    pub report_type: ReportType,
    pub reference_date: NaiveDate,
    /// `None` means no lower bound.
    pub min_date: Option<NaiveDate>,
    pub max_date: NaiveDate,
    pub label: String,
}

impl AgingPolicy {
    /// Build the policy for `report_type`, anchored at `reference_date`.
    pub fn new(report_type: ReportType, reference_date: NaiveDate) -> Self {
        let (oldest, newest) = report_type.offsets();
        let back = |days: u64| {
            reference_date
                .checked_sub_days(Days::new(days))
                .unwrap_or(NaiveDate::MIN)
        };

        Self {
            report_type,
            reference_date,
            min_date: oldest.map(back),
            max_date: back(newest),
            label: report_type.label().to_string(),
        }
    }

    /// Inclusive on both ends; an unset lower bound accepts any earlier date.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min_date.is_none_or(|min| date >= min) && date <= self.max_date
    }

    /// `YYYY-MM-DD → YYYY-MM-DD`, with [`range_floor`] standing in for an
    /// unbounded start.
    pub fn range_description(&self) -> String {
        format!(
            "{} → {}",
            self.min_date.unwrap_or_else(range_floor).format("%Y-%m-%d"),
            self.max_date.format("%Y-%m-%d")
        )
    }
}

/// Select the policy for a raw selector string. Never fails.
pub fn select_policy(selector: &str, reference_date: NaiveDate) -> AgingPolicy {
    AgingPolicy::new(ReportType::from_selector(selector), reference_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_overdue_policy() {
        let p = select_policy("overdue", ymd(2024, 6, 15));
        assert_eq!(p.report_type, ReportType::Overdue);
        assert_eq!(p.min_date, None);
        assert_eq!(p.max_date, ymd(2024, 5, 16));
        assert_eq!(p.label, "Over 30 days overdue (overdue)");
        assert_eq!(p.range_description(), "1900-01-01 → 2024-05-16");
    }

    #[test]
    fn test_bounded_policies() {
        let today = ymd(2024, 6, 15);

        let p = select_policy("30_37", today);
        assert_eq!(p.min_date, Some(ymd(2024, 5, 9)));
        assert_eq!(p.max_date, ymd(2024, 5, 16));
        assert_eq!(p.label, "Early Warning (30-37 days)");

        let p = select_policy("37_44", today);
        assert_eq!(p.min_date, Some(ymd(2024, 5, 2)));
        assert_eq!(p.max_date, ymd(2024, 5, 9));
        assert_eq!(p.label, "Advanced Warning (37-44 days)");

        let p = select_policy("24_31", today);
        assert_eq!(p.min_date, Some(ymd(2024, 5, 15)));
        assert_eq!(p.max_date, ymd(2024, 5, 22));
        assert_eq!(p.range_description(), "2024-05-15 → 2024-05-22");
    }

    #[test]
    fn test_unknown_selector_falls_back() {
        let p = select_policy("bogus", ymd(2024, 6, 15));
        assert_eq!(p, AgingPolicy::new(ReportType::Overdue, ymd(2024, 6, 15)));
        assert_eq!(ReportType::recognize("bogus"), None);
        assert_eq!(ReportType::recognize(" 37_44 "), Some(ReportType::Days37To44));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let p = select_policy("30_37", ymd(2024, 6, 15));
        assert!(p.contains(ymd(2024, 5, 9)));
        assert!(p.contains(ymd(2024, 5, 16)));
        assert!(!p.contains(ymd(2024, 5, 8)));
        assert!(!p.contains(ymd(2024, 5, 17)));

        let open = select_policy("overdue", ymd(2024, 6, 15));
        assert!(open.contains(ymd(1850, 1, 1)));
    }

    #[test]
    fn test_selector_serde_names() {
        let json = serde_json::to_string(&ReportType::Days24To31).unwrap();
        assert_eq!(json, "\"24_31\"");
        for t in ReportType::ALL {
            assert_eq!(ReportType::from_selector(t.selector()), t);
        }
    }
}
