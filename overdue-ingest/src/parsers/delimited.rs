//! Delimited text exports (.csv, .tsv). Every non-empty cell is text.

use overdue_core::{CellValue, RawRow};
use std::path::Path;

use crate::error::Result;
use crate::types::SheetLayout;

/// Read a delimited file into raw rows, skipping `layout.header_rows` records.
pub fn read_delimited(path: &Path, delimiter: u8, layout: &SheetLayout) -> Result<Vec<RawRow>> {
    let columns = layout.columns.resolve()?;
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .delimiter(delimiter)
        .from_path(path)?;

    let mut rows = Vec::new();
    for result in rdr.records().skip(layout.header_rows) {
        let record = result?;
        let cell = |idx: usize| -> CellValue {
            match record.get(idx) {
                Some(s) if !s.is_empty() => CellValue::text(s),
                _ => CellValue::Empty,
            }
        };

        rows.push(RawRow {
            code: cell(columns.code),
            name: cell(columns.name),
            contact: cell(columns.contact),
            balance: cell(columns.balance),
            last_payment: cell(columns.last_payment),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_rows_after_header() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "Code,Nom,Contact,Agence,Solde,Dernier paiement").unwrap();
        writeln!(f, "C-1,Dupont,01 23 45 67 89,Nord,\"1 234,50\",14/03/2024").unwrap();
        writeln!(f, "C-2,Martin,,Sud,0,2024-01-01").unwrap();
        writeln!(f, "C-3,Short").unwrap();

        let rows = read_delimited(f.path(), b',', &SheetLayout::default()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].code, CellValue::text("C-1"));
        assert_eq!(rows[0].balance, CellValue::text("1 234,50"));
        assert_eq!(rows[0].last_payment, CellValue::text("14/03/2024"));
        assert_eq!(rows[1].contact, CellValue::Empty);
        assert_eq!(rows[2].name, CellValue::text("Short"));
        assert_eq!(rows[2].balance, CellValue::Empty);
    }

    #[test]
    fn test_tab_delimited_without_header() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "C-9\tRenaud\tr@x.fr\t\t42\t2024-02-02").unwrap();

        let layout = SheetLayout { header_rows: 0, ..SheetLayout::default() };
        let rows = read_delimited(f.path(), b'\t', &layout).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].contact, CellValue::text("r@x.fr"));
        assert_eq!(rows[0].balance, CellValue::text("42"));
    }
}
