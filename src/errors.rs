use thiserror::Error;

/// Main error type for the tailwind-variants crate
#[derive(Debug, Error)]
pub enum VariantError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("No files found matching the provided patterns")]
    NoFilesFound,

    #[error("Configuration error in `{field}`: {message}")]
    ConfigError { field: String, message: String },

    #[error("Failed to load configuration {path}: {message}")]
    LoadError { path: String, message: String },

    #[error("Compound slot #{index} references undeclared slot `{slot}`")]
    UndeclaredSlot { index: usize, slot: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Input error: {0}")]
    InputError(String),

    #[error("Failed to write output to {path}: {message}")]
    OutputError { path: String, message: String },
}

impl VariantError {
    /// Shorthand for a configuration error on a named field
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigError {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VariantError>;
