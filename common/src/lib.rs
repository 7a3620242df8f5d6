use thiserror::Error;

pub mod config;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Failed to load model artifact '{path}': {reason}")]
    ArtifactLoad { path: String, reason: String },

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("model is not loaded: {0}")]
    ModelUnavailable(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Invalid feature value: {0}")]
    InvalidFeature(String),

    #[error("Classifier returned no labels")]
    EmptyPrediction,

    #[error("Unexpected class label {0}, expected 0 or 1")]
    UnexpectedLabel(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn artifact_load(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Error::ArtifactLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
