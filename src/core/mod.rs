pub mod config;
pub mod error;

pub use config::{PartitionConfig, DEFAULT_CHUNK_SIZE};
pub use error::{ChunkError, Result};
