//! Spreadsheet workbooks (.xls, .xlsx, .xlsm, .xlsb, .ods) via calamine.
//!
//! Rows are addressed by absolute sheet position, so leading blank rows still
//! count towards `header_rows` the way they do in the spreadsheet UI.

use calamine::{open_workbook_auto, Data, Range, Reader};
use overdue_core::{CellValue, RawRow};
use std::path::Path;
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::types::{ColumnIndices, SheetLayout};

/// Read the configured (or first) worksheet into raw rows.
pub fn read_workbook(path: &Path, layout: &SheetLayout) -> Result<Vec<RawRow>> {
    let columns = layout.columns.resolve()?;
    let mut workbook = open_workbook_auto(path)?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match &layout.sheet {
        Some(wanted) => sheet_names
            .iter()
            .find(|n| *n == wanted)
            .cloned()
            .ok_or_else(|| IngestError::SheetNotFound(wanted.clone()))?,
        None => sheet_names.first().cloned().ok_or(IngestError::EmptyWorkbook)?,
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    let rows = rows_from_range(&range, layout.header_rows, columns);
    debug!(sheet = %sheet_name, rows = rows.len(), "worksheet read");
    Ok(rows)
}

/// Extract data rows from a sheet range, skipping the first `header_rows`
/// absolute rows.
pub fn rows_from_range(range: &Range<Data>, header_rows: usize, columns: ColumnIndices) -> Vec<RawRow> {
    let Some((last_row, _)) = range.end() else {
        return Vec::new();
    };

    let first = u32::try_from(header_rows).unwrap_or(u32::MAX);
    if first > last_row {
        return Vec::new();
    }

    let cell = |row: u32, col: usize| -> CellValue {
        let col = u32::try_from(col).unwrap_or(u32::MAX);
        cell_value(range.get_value((row, col)))
    };

    (first..=last_row)
        .map(|row| RawRow {
            code: cell(row, columns.code),
            name: cell(row, columns.name),
            contact: cell(row, columns.contact),
            balance: cell(row, columns.balance),
            last_payment: cell(row, columns.last_payment),
        })
        .collect()
}

/// Map a calamine cell onto the core cell model. Date cells keep their serial
/// number; the core converts serials itself.
pub fn cell_value(data: Option<&Data>) -> CellValue {
    match data {
        None | Some(Data::Empty) | Some(Data::Error(_)) => CellValue::Empty,
        Some(Data::Int(i)) => CellValue::Number(*i as f64),
        Some(Data::Float(f)) => CellValue::Number(*f),
        Some(Data::Bool(b)) => CellValue::Number(if *b { 1.0 } else { 0.0 }),
        Some(Data::DateTime(dt)) => CellValue::Number(dt.as_f64()),
        Some(Data::String(s)) | Some(Data::DateTimeIso(s)) | Some(Data::DurationIso(s)) => {
            CellValue::Text(s.clone())
        }
    }
}
