//! Raw spreadsheet cells and rows, as handed over by a row source.

use serde::{Deserialize, Serialize};

/// A single cell value before normalization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// Absent cells and empty strings both count as blank.
    /// Whitespace-only text is not blank; it is left to the normalizers.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Render the cell as display text.
    ///
    /// Whole numbers print without a fractional part so a numeric client code
    /// like `1042.0` reads back as `1042`.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", *n as i64)
            }
            CellValue::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// One row of the source table, addressed by column role.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawRow {
    pub code: CellValue,
    pub name: CellValue,
    pub contact: CellValue,
    pub balance: CellValue,
    pub last_payment: CellValue,
}

impl RawRow {
    pub fn new(
        code: impl Into<CellValue>,
        name: impl Into<CellValue>,
        contact: impl Into<CellValue>,
        balance: impl Into<CellValue>,
        last_payment: impl Into<CellValue>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            contact: contact.into(),
            balance: balance.into(),
            last_payment: last_payment.into(),
        }
    }

    /// True when every cell is blank (typically a trailing spreadsheet row).
    pub fn is_blank(&self) -> bool {
        [&self.code, &self.name, &self.contact, &self.balance, &self.last_payment]
            .iter()
            .all(|c| c.is_blank())
    }
}
