//! overdue-core: cell normalization, aging policies, record classification and
//! report assembly for client balance aging reports.
//!
//! The crate is pure: no I/O, no clock. Callers pass the reference date and the
//! rows, and get a [`Report`] back.

pub mod aggregate;
pub mod cell;
pub mod classify;
pub mod normalize;
pub mod policy;
pub mod record;
pub mod report;

pub use aggregate::aggregate;
pub use cell::{CellValue, RawRow};
pub use classify::{classify, classify_with, Exclusion};
pub use normalize::{
    date_from_serial, normalize_amount, normalize_date, read_amount, text_date_strategies,
    AmountReading, DateStrategy,
};
pub use policy::{range_floor, select_policy, AgingPolicy, ReportType};
pub use record::{format_amount, Record, UNKNOWN_CONTACT};
pub use report::{assemble, build_report, build_report_with, ClassificationStats, Report};
