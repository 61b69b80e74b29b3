use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file type '{0}' (expected .xls, .xlsx, .xlsm, .xlsb, .ods, .csv or .tsv)")]
    UnsupportedFormat(String),

    #[error("could not read workbook: {0}")]
    Workbook(String),

    #[error("workbook has no worksheets")]
    EmptyWorkbook,

    #[error("worksheet '{0}' not found")]
    SheetNotFound(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid column '{0}' (expected letters such as A, F or AB)")]
    InvalidColumn(String),
}

impl From<calamine::Error> for IngestError {
    fn from(err: calamine::Error) -> Self {
        IngestError::Workbook(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
