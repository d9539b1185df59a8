use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("'{0}' does not match any declared metric")]
    UnknownMetric(String),
}
