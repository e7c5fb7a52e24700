//! Split a replay document into independently consumable parts
//!
//! The partitioner pulls the property mapping, goals, and player stats out
//! of a `ReplayDocument` unchanged and cuts the network frame sequence into
//! contiguous windows of at most `chunk_size` frames. It is a pure function
//! of its inputs: nothing is written and the document is only borrowed.

use crate::core::config::validate_chunk_size;
use crate::core::error::Result;
use crate::replay::document::ReplayDocument;
use serde::Serialize;
use serde_json::{Map, Value};

/// The four logical outputs of one partitioning pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartitionResult {
    /// The full `properties` mapping, including goals and player stats
    pub metadata: Map<String, Value>,
    pub goals: Vec<Value>,
    pub player_stats: Vec<Value>,
    /// Frame windows in original order; chunk `i` becomes artifact `i`
    pub frame_chunks: Vec<Vec<Value>>,
}

impl PartitionResult {
    pub fn total_frames(&self) -> usize {
        self.frame_chunks.iter().map(Vec::len).sum()
    }

    /// Metadata, goals, and player stats plus one artifact per chunk
    pub fn artifact_count(&self) -> usize {
        self.frame_chunks.len() + 3
    }

    /// Counts describing this result, without any payload
    pub fn summary(&self, chunk_size: usize, match_id: Option<&str>) -> PartitionSummary {
        PartitionSummary {
            match_id: match_id.map(str::to_owned),
            chunk_size,
            total_frames: self.total_frames(),
            chunk_count: self.frame_chunks.len(),
            chunk_lengths: self.frame_chunks.iter().map(Vec::len).collect(),
            goal_count: self.goals.len(),
            player_stat_count: self.player_stats.len(),
            metadata_keys: self.metadata.len(),
        }
    }
}

/// Shape of a partition, as reported by `inspect`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionSummary {
    pub match_id: Option<String>,
    pub chunk_size: usize,
    pub total_frames: usize,
    pub chunk_count: usize,
    pub chunk_lengths: Vec<usize>,
    pub goal_count: usize,
    pub player_stat_count: usize,
    pub metadata_keys: usize,
}

/// Cut `frames` into contiguous windows of `chunk_size`, the last one short
///
/// Produces `ceil(frames.len() / chunk_size)` chunks and none for an empty
/// input. Fails with `InvalidConfiguration` when `chunk_size` is zero.
pub fn chunk_frames(frames: &[Value], chunk_size: usize) -> Result<Vec<Vec<Value>>> {
    validate_chunk_size(chunk_size)?;
    Ok(frames.chunks(chunk_size).map(<[Value]>::to_vec).collect())
}

/// Partition a replay document
///
/// All fields are checked before any output is built, so an error never
/// leaves a partially populated result behind.
pub fn partition(document: &ReplayDocument, chunk_size: usize) -> Result<PartitionResult> {
    validate_chunk_size(chunk_size)?;

    let properties = document.properties()?;
    let goals = document.goals()?;
    let player_stats = document.player_stats()?;
    let frames = document.frames()?;

    let frame_chunks = chunk_frames(frames, chunk_size)?;

    tracing::debug!(
        frames = frames.len(),
        chunks = frame_chunks.len(),
        chunk_size,
        "Partitioned replay frames"
    );

    Ok(PartitionResult {
        metadata: properties.into_owned(),
        goals: goals.to_vec(),
        player_stats: player_stats.to_vec(),
        frame_chunks,
    })
}
