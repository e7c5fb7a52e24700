//! Load, partition, and write in one call

use crate::core::config::PartitionConfig;
use crate::core::error::Result;
use crate::loader::load_document;
use crate::output::writer::{write_partition, ArtifactWriter, DirectoryWriter};
use crate::replay::document::ReplayDocument;
use crate::replay::partition::{partition, PartitionSummary};
use std::path::Path;

/// Partition a document and persist every artifact through `writer`
///
/// Returns the artifact names in emission order.
pub fn split_document<W: ArtifactWriter + ?Sized>(
    document: &ReplayDocument,
    config: &PartitionConfig,
    writer: &mut W,
) -> Result<Vec<String>> {
    config.validate()?;

    let result = partition(document, config.chunk_size)?;
    let prefix = config.resolve_prefix(document.match_id());

    tracing::info!(
        frames = result.total_frames(),
        chunks = result.frame_chunks.len(),
        goals = result.goals.len(),
        player_stats = result.player_stats.len(),
        "Partitioned replay"
    );

    write_partition(&result, config, prefix, writer)
}

/// Split a replay file into `config.output_dir`
pub fn split_file(input: &Path, config: &PartitionConfig) -> Result<Vec<String>> {
    let document = load_document(input)?;
    let mut writer = DirectoryWriter::new(&config.output_dir);
    split_document(&document, config, &mut writer)
}

/// Describe how a replay file would be partitioned, writing nothing
pub fn inspect_file(input: &Path, chunk_size: usize) -> Result<PartitionSummary> {
    let document = load_document(input)?;
    let result = partition(&document, chunk_size)?;
    Ok(result.summary(chunk_size, document.match_id()))
}
