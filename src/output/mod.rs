pub mod artifact;
pub mod writer;

pub use artifact::{artifacts, is_frame_chunk_name, Artifact, ArtifactKind, Encoding};
pub use writer::{write_partition, ArtifactWriter, DirectoryWriter, MemoryWriter};
