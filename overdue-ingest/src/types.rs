use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Parse a spreadsheet column letter (`A`, `F`, `AB`) into a zero-based index.
pub fn column_index(letters: &str) -> Result<usize> {
    let letters = letters.trim();
    if letters.is_empty() || letters.len() > 3 || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(IngestError::InvalidColumn(letters.to_string()));
    }
    let n = letters
        .to_ascii_uppercase()
        .bytes()
        .fold(0usize, |acc, b| acc * 26 + (b - b'A' + 1) as usize);
    Ok(n - 1)
}

/// Which column holds each role, as spreadsheet letters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub code: String,
    pub name: String,
    pub contact: String,
    pub balance: String,
    pub last_payment: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            code: "A".to_string(),
            name: "B".to_string(),
            contact: "C".to_string(),
            balance: "E".to_string(),
            last_payment: "F".to_string(),
        }
    }
}

/// Zero-based column indices, resolved from a [`ColumnMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    pub code: usize,
    pub name: usize,
    pub contact: usize,
    pub balance: usize,
    pub last_payment: usize,
}

impl ColumnMap {
    pub fn resolve(&self) -> Result<ColumnIndices> {
        Ok(ColumnIndices {
            code: column_index(&self.code)?,
            name: column_index(&self.name)?,
            contact: column_index(&self.contact)?,
            balance: column_index(&self.balance)?,
            last_payment: column_index(&self.last_payment)?,
        })
    }
}

/// Where the records sit inside the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Worksheet to read; the first one when unset
    pub sheet: Option<String>,
    /// Leading rows to skip (headers)
    pub header_rows: usize,
    pub columns: ColumnMap,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet: None,
            header_rows: 1,
            columns: ColumnMap::default(),
        }
    }
}
