use thiserror::Error;

/// Configuration errors, fatal at load time
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Engine compute-cycle errors
///
/// Neither variant is fatal: an insufficient-data cycle is retried on the
/// next tick, and an eigensolver failure only skips the mode update.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("window for {symbol} has {samples} samples, need at least 2")]
    InsufficientData { symbol: String, samples: usize },

    #[error("eigen decomposition did not converge")]
    EigenNonConvergence,
}

/// State snapshot persistence errors
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
