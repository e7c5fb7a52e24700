//! Load replay documents from disk

use crate::core::error::{ChunkError, Result};
use crate::replay::document::ReplayDocument;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read and decode a replay JSON file
pub fn load_document(path: &Path) -> Result<ReplayDocument> {
    let file = File::open(path).map_err(|e| ChunkError::io(path, e))?;
    let document = ReplayDocument::from_reader(BufReader::new(file))?;

    tracing::info!(path = %path.display(), "Loaded replay document");
    Ok(document)
}
