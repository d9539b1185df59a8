use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to open data file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse data file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required column '{0}' is missing from the data file")]
    MissingColumn(&'static str),

    #[error("Column '{0}' does not match any declared metric")]
    UnknownMetric(String),

    #[error("Row {row}, column '{column}': '{value}' is not a valid number")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },
}
