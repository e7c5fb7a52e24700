//! Replay Chunker - split decoded replay documents into batch-sized artifacts

pub mod core;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod replay;

pub use crate::core::{ChunkError, PartitionConfig, Result, DEFAULT_CHUNK_SIZE};
pub use crate::replay::{partition, PartitionResult, ReplayDocument};
