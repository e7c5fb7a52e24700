//! Partitioning configuration with documented defaults
//!
//! Values can come from a TOML file, from command-line flags, or from
//! `Default`. The binary applies them in that order of precedence:
//! flag, then file, then default.

use crate::core::error::{ChunkError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Number of frames per chunk artifact
///
/// Sized so that one chunk of typical network frames stays well under the
/// request limits of the batch APIs the artifacts are submitted to.
/// This is the only default chunk size in the crate.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Directory artifacts are written to when none is configured
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Configuration for a partitioning run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    /// Maximum frames per chunk (must be positive)
    pub chunk_size: usize,

    /// Directory the artifact files are written into
    ///
    /// Created on demand, including missing parents.
    pub output_dir: PathBuf,

    /// Optional prefix for every artifact name
    pub prefix: Option<String>,

    /// Use the replay's match id as the prefix when `prefix` is unset
    pub prefix_with_match_id: bool,

    /// Write frame chunks indented instead of compact
    ///
    /// Compact is the default because chunks are the bulk of the output.
    pub pretty_chunks: bool,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            prefix: None,
            prefix_with_match_id: false,
            pretty_chunks: false,
        }
    }
}

impl PartitionConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| ChunkError::io(path, e))?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a config from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: PartitionConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Artifact prefix for a document with the given match id
    pub fn resolve_prefix<'a>(&'a self, match_id: Option<&'a str>) -> Option<&'a str> {
        match self.prefix.as_deref() {
            Some(prefix) => Some(prefix),
            None if self.prefix_with_match_id => match_id,
            None => None,
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        validate_chunk_size(self.chunk_size)?;

        if self.output_dir.as_os_str().is_empty() {
            return Err(ChunkError::InvalidConfiguration(
                "output_dir must not be empty".into(),
            ));
        }

        Ok(())
    }
}

/// Reject chunk sizes that cannot produce a finite set of chunks
pub fn validate_chunk_size(chunk_size: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(ChunkError::InvalidConfiguration(
            "chunk_size must be a positive integer, got 0".into(),
        ));
    }
    Ok(())
}
