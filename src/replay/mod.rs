//! Replay documents and the partitioning transform

pub mod document;
pub mod partition;

pub use document::ReplayDocument;
pub use partition::{chunk_frames, partition, PartitionResult, PartitionSummary};
