use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Data, Export, Settings};

/// Loads the application configuration.
///
/// Values come from `meridian.toml` in the working directory (optional;
/// sensible defaults apply when it is absent) with `MERIDIAN_*` environment
/// variables layered on top, e.g. `MERIDIAN_DATA__FILE_PATH`.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .set_default("data.file_path", "data.csv")?
        .set_default("export.output_dir", "reports")?
        .add_source(config::File::with_name("meridian").required(false))
        .add_source(config::Environment::with_prefix("MERIDIAN").separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;

    Ok(settings)
}
