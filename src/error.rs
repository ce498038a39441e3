use std::path::PathBuf;
use thiserror::Error;

#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("failed to launch linter '{command}': {source}")]
    LinterLaunch {
        command: String,
        source: std::io::Error,
    },

    #[error("linter produced unparseable output: {0}")]
    LinterReport(String),

    #[error("could not serialize SARIF output for {path}: {source}", path = .path.display())]
    OutputSerialize {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("could not write SARIF output to {path}: {source}", path = .path.display())]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
