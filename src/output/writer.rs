//! Persisting artifacts
//!
//! Writing is kept behind the `ArtifactWriter` trait so the partitioner
//! never touches the file system. `DirectoryWriter` puts one file per
//! artifact into a directory; `MemoryWriter` keeps them in memory.

use crate::core::config::PartitionConfig;
use crate::core::error::{ChunkError, Result};
use crate::output::artifact::{artifacts, is_frame_chunk_name, Encoding};
use crate::replay::partition::PartitionResult;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for encoded artifacts
pub trait ArtifactWriter {
    /// Called once before the first write of a partition
    ///
    /// Frame chunks left over from an earlier partition under the same
    /// prefix must not survive, since a rerun may produce fewer chunks.
    fn prepare(&mut self, _prefix: Option<&str>) -> Result<()> {
        Ok(())
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<()>;
}

/// Writes each artifact as a file under one directory
#[derive(Debug)]
pub struct DirectoryWriter {
    dir: PathBuf,
    created: bool,
}

impl DirectoryWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            created: false,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&mut self) -> Result<()> {
        if !self.created {
            fs::create_dir_all(&self.dir).map_err(|e| ChunkError::io(&self.dir, e))?;
            tracing::debug!(dir = %self.dir.display(), "Output directory ready");
            self.created = true;
        }
        Ok(())
    }
}

impl ArtifactWriter for DirectoryWriter {
    fn prepare(&mut self, prefix: Option<&str>) -> Result<()> {
        self.ensure_dir()?;

        let entries = fs::read_dir(&self.dir).map_err(|e| ChunkError::io(&self.dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| ChunkError::io(&self.dir, e))?;
            let is_stale = entry
                .file_name()
                .to_str()
                .map_or(false, |name| is_frame_chunk_name(name, prefix));
            if !is_stale {
                continue;
            }

            let path = entry.path();
            if path.is_file() {
                fs::remove_file(&path).map_err(|e| ChunkError::io(&path, e))?;
                tracing::debug!(path = %path.display(), "Removed stale frame chunk");
            }
        }
        Ok(())
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.ensure_dir()?;
        let path = self.dir.join(name);
        fs::write(&path, bytes).map_err(|e| ChunkError::io(&path, e))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote artifact");
        Ok(())
    }
}

/// Keeps artifacts in memory, keyed by name
#[derive(Debug, Default)]
pub struct MemoryWriter {
    pub files: BTreeMap<String, Vec<u8>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.files
            .get(name)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}

impl ArtifactWriter for MemoryWriter {
    fn prepare(&mut self, prefix: Option<&str>) -> Result<()> {
        self.files.retain(|name, _| !is_frame_chunk_name(name, prefix));
        Ok(())
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.files.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Encode every artifact of `result`, then hand them to `writer`
///
/// Encoding finishes before the first write, so an encoding failure
/// writes nothing. Stale frame chunks under the same prefix are cleared
/// before writing. Returns the artifact names in emission order.
pub fn write_partition<W: ArtifactWriter + ?Sized>(
    result: &PartitionResult,
    config: &PartitionConfig,
    prefix: Option<&str>,
    writer: &mut W,
) -> Result<Vec<String>> {
    let chunk_encoding = if config.pretty_chunks {
        Encoding::Pretty
    } else {
        Encoding::Compact
    };

    let encoded = artifacts(result, chunk_encoding)
        .into_iter()
        .map(|artifact| -> Result<(String, Vec<u8>)> {
            Ok((artifact.file_name(prefix), artifact.encode()?))
        })
        .collect::<Result<Vec<_>>>()?;

    writer.prepare(prefix)?;

    let mut names = Vec::with_capacity(encoded.len());
    for (name, bytes) in encoded {
        writer.write(&name, &bytes)?;
        names.push(name);
    }

    tracing::info!(artifacts = names.len(), "Wrote partition artifacts");
    Ok(names)
}
