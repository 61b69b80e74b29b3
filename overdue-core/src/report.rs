//! Report assembly and the one-shot row pipeline.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::aggregate::aggregate;
use crate::cell::RawRow;
use crate::classify::{classify_with, Exclusion};
use crate::normalize::read_amount;
use crate::policy::{AgingPolicy, ReportType};
use crate::record::{format_amount, Record, UNKNOWN_CONTACT};

/// Counters collected while classifying a row source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationStats {
    pub rows_seen: usize,
    pub accepted: usize,
    pub excluded: BTreeMap<Exclusion, usize>,
    /// Non-empty balance cells that were not numbers and counted as zero.
    pub malformed_balances: usize,
}

impl ClassificationStats {
    pub fn excluded_total(&self) -> usize {
        self.excluded.values().sum()
    }

    pub fn excluded_for(&self, reason: Exclusion) -> usize {
        self.excluded.get(&reason).copied().unwrap_or(0)
    }

    fn record_exclusion(&mut self, reason: Exclusion) {
        *self.excluded.entry(reason).or_insert(0) += 1;
    }
}

/// Everything a renderer needs for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub report_type: ReportType,
    pub label: String,
    pub reference_date: NaiveDate,
    /// `YYYY-MM-DD → YYYY-MM-DD`
    pub range_description: String,
    /// Accepted records in source order
    pub records: Vec<Record>,
    pub total_outstanding: Decimal,
    pub total_display: String,
    /// Set when nothing matched; renderers show a fallback message instead of a table.
    pub no_records: bool,
    #[serde(default)]
    pub diagnostics: ClassificationStats,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn with_diagnostics(mut self, stats: ClassificationStats) -> Self {
        self.diagnostics = stats;
        self
    }
}

/// Package a policy, its accepted records and their total.
pub fn assemble(policy: &AgingPolicy, records: Vec<Record>, total: Decimal) -> Report {
    let no_records = records.is_empty();
    Report {
        report_type: policy.report_type,
        label: policy.label.clone(),
        reference_date: policy.reference_date,
        range_description: policy.range_description(),
        records,
        total_outstanding: total,
        total_display: format_amount(total),
        no_records,
        diagnostics: ClassificationStats::default(),
    }
}

/// Classify every row in order, total the survivors and assemble the report.
pub fn build_report<I>(rows: I, policy: &AgingPolicy) -> Report
where
    I: IntoIterator<Item = RawRow>,
{
    build_report_with(rows, policy, UNKNOWN_CONTACT)
}

/// Like [`build_report`], with a custom placeholder for blank contacts.
pub fn build_report_with<I>(rows: I, policy: &AgingPolicy, unknown_contact: &str) -> Report
where
    I: IntoIterator<Item = RawRow>,
{
    let mut stats = ClassificationStats::default();
    let mut records = Vec::new();

    for (idx, row) in rows.into_iter().enumerate() {
        stats.rows_seen += 1;

        if read_amount(&row.balance).is_malformed() {
            stats.malformed_balances += 1;
            warn!(row = idx, cell = ?row.balance, "unreadable balance counted as zero");
        }

        match classify_with(&row, policy, unknown_contact) {
            Ok(record) => {
                stats.accepted += 1;
                records.push(record);
            }
            Err(reason) => {
                debug!(row = idx, %reason, "row excluded");
                stats.record_exclusion(reason);
            }
        }
    }

    let total = aggregate(&records);
    info!(
        report_type = %policy.report_type,
        rows = stats.rows_seen,
        accepted = stats.accepted,
        excluded = stats.excluded_total(),
        total = %total,
        "report built"
    );

    assemble(policy, records, total).with_diagnostics(stats)
}
