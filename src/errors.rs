// errors.rs
use thiserror::Error;

/// Errors that abort a whole run: unreadable input, bad configuration,
/// or a sink that could not be written. Per-field parse failures never
/// surface here; they degrade to an absent value inside the pipeline.
#[derive(Debug, Error)]
pub enum CleanerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Spreadsheet error: {0}")]
    Xlsx(String),

    #[error("Database error: {0}")]
    Db(String),
}

// Type alias used across the crate.
pub type Result<T> = std::result::Result<T, CleanerError>;
