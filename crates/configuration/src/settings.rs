use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub data: Data,
    pub export: Export,
}

/// Where the raw metric records come from.
#[derive(Debug, Clone, Deserialize)]
pub struct Data {
    /// Path to the CSV source with one row per (bank, period).
    pub file_path: PathBuf,
}

/// Where exported spreadsheets go.
#[derive(Debug, Clone, Deserialize)]
pub struct Export {
    /// Directory that receives the generated .xlsx files.
    pub output_dir: PathBuf,
}
