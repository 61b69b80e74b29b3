//! overdue-ingest: row sources for the aging report (spreadsheets and delimited exports).

pub mod error;
pub mod parsers;
pub mod types;

use overdue_core::RawRow;
use std::path::Path;
use tracing::info;

pub use error::{IngestError, Result};
pub use parsers::{delimited::read_delimited, workbook::read_workbook};
pub use types::{column_index, ColumnIndices, ColumnMap, SheetLayout};

/// Read all data rows from `path`, picking the reader from the file extension.
pub fn read_rows(path: impl AsRef<Path>, layout: &SheetLayout) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IngestError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => read_workbook(path, layout)?,
        "csv" => read_delimited(path, b',', layout)?,
        "tsv" => read_delimited(path, b'\t', layout)?,
        _ => return Err(IngestError::UnsupportedFormat(ext)),
    };

    info!(path = %path.display(), rows = rows.len(), "rows loaded");
    Ok(rows)
}
