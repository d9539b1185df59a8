use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No records match the selected periods")]
    EmptyInput,

    #[error("Pivot conflict: {0}")]
    PivotConflict(String),

    #[error("Column '{0}' is not part of the table")]
    UnknownColumn(String),
}
