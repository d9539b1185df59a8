use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to build the spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Value '{0}' cannot be represented in a spreadsheet cell")]
    Numeric(String),
}
