pub mod delimited;
pub mod workbook;
