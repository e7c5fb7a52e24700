use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl ChunkError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the failure came from the data itself rather than from
    /// reading or writing it.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::MalformedInput(_) => true,
            Self::Json(e) => !e.is_io(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChunkError>;
