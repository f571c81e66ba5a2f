use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Threshold must be a percentage between 0 and 100, got {0}")]
    InvalidThreshold(f64),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
