//! Artifact naming and encoding
//!
//! A `PartitionResult` is emitted as an ordered list of artifacts:
//! metadata, goals, player stats, then one per frame chunk. Chunk `i`
//! is always named `frame_chunk_{i}.json`.

use crate::core::error::Result;
use crate::replay::partition::PartitionResult;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};
use std::fmt;

const PRETTY_INDENT: &[u8] = b"    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Metadata,
    Goals,
    PlayerStats,
    FrameChunk(usize),
}

impl ArtifactKind {
    pub fn base_name(&self) -> String {
        match self {
            ArtifactKind::Metadata => "metadata.json".to_string(),
            ArtifactKind::Goals => "goals.json".to_string(),
            ArtifactKind::PlayerStats => "player_stats.json".to_string(),
            ArtifactKind::FrameChunk(index) => format!("frame_chunk_{}.json", index),
        }
    }

    /// File name, optionally namespaced as `{prefix}.{base_name}`
    pub fn file_name(&self, prefix: Option<&str>) -> String {
        format!("{}{}", name_head(prefix), self.base_name())
    }
}

/// True when `name` is a frame chunk file written under `prefix`
pub fn is_frame_chunk_name(name: &str, prefix: Option<&str>) -> bool {
    let head = format!("{}frame_chunk_", name_head(prefix));
    name.strip_prefix(head.as_str())
        .and_then(|rest| rest.strip_suffix(".json"))
        .map_or(false, |index| {
            !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit())
        })
}

fn name_head(prefix: Option<&str>) -> String {
    match prefix.map(sanitize_prefix).filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{}.", prefix),
        None => String::new(),
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Metadata => write!(f, "metadata"),
            ArtifactKind::Goals => write!(f, "goals"),
            ArtifactKind::PlayerStats => write!(f, "player_stats"),
            ArtifactKind::FrameChunk(index) => write!(f, "frame_chunk[{}]", index),
        }
    }
}

/// How an artifact body is serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Four-space indented, for documents people read
    Pretty,
    /// No whitespace at all
    Compact,
}

#[derive(Debug, Clone, Copy)]
enum Payload<'a> {
    Object(&'a Map<String, Value>),
    Array(&'a [Value]),
}

/// One output document, borrowing its body from a `PartitionResult`
#[derive(Debug, Clone, Copy)]
pub struct Artifact<'a> {
    pub kind: ArtifactKind,
    pub encoding: Encoding,
    payload: Payload<'a>,
}

impl<'a> Artifact<'a> {
    pub fn encode(&self) -> Result<Vec<u8>> {
        match self.payload {
            Payload::Object(map) => encode_value(map, self.encoding),
            Payload::Array(items) => encode_value(items, self.encoding),
        }
    }

    pub fn file_name(&self, prefix: Option<&str>) -> String {
        self.kind.file_name(prefix)
    }
}

/// List the artifacts of a result in emission order
pub fn artifacts(result: &PartitionResult, chunk_encoding: Encoding) -> Vec<Artifact<'_>> {
    let mut out = Vec::with_capacity(result.artifact_count());

    out.push(Artifact {
        kind: ArtifactKind::Metadata,
        encoding: Encoding::Pretty,
        payload: Payload::Object(&result.metadata),
    });
    out.push(Artifact {
        kind: ArtifactKind::Goals,
        encoding: Encoding::Pretty,
        payload: Payload::Array(&result.goals),
    });
    out.push(Artifact {
        kind: ArtifactKind::PlayerStats,
        encoding: Encoding::Pretty,
        payload: Payload::Array(&result.player_stats),
    });

    for (index, chunk) in result.frame_chunks.iter().enumerate() {
        out.push(Artifact {
            kind: ArtifactKind::FrameChunk(index),
            encoding: chunk_encoding,
            payload: Payload::Array(chunk),
        });
    }

    out
}

pub fn encode_value<T: Serialize + ?Sized>(value: &T, encoding: Encoding) -> Result<Vec<u8>> {
    let bytes = match encoding {
        Encoding::Compact => serde_json::to_vec(value)?,
        Encoding::Pretty => {
            let mut buf = Vec::new();
            let formatter = PrettyFormatter::with_indent(PRETTY_INDENT);
            let mut ser = Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut ser)?;
            buf
        }
    };
    Ok(bytes)
}

/// Keep prefixes from escaping the output directory
fn sanitize_prefix(prefix: &str) -> String {
    prefix.trim().replace(['/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_result() -> PartitionResult {
        let mut metadata = Map::new();
        metadata.insert("TeamSize".into(), json!(3));
        PartitionResult {
            metadata,
            goals: vec![json!({ "frame": 1 })],
            player_stats: vec![],
            frame_chunks: vec![vec![json!({ "t": 0 }), json!({ "t": 1 })], vec![json!({ "t": 2 })]],
        }
    }

    #[test]
    fn test_base_names() {
        assert_eq!(ArtifactKind::Metadata.base_name(), "metadata.json");
        assert_eq!(ArtifactKind::Goals.base_name(), "goals.json");
        assert_eq!(ArtifactKind::PlayerStats.base_name(), "player_stats.json");
        assert_eq!(ArtifactKind::FrameChunk(7).base_name(), "frame_chunk_7.json");
    }

    #[test]
    fn test_prefixed_names() {
        assert_eq!(
            ArtifactKind::Goals.file_name(Some("7F3A21")),
            "7F3A21.goals.json"
        );
        assert_eq!(
            ArtifactKind::FrameChunk(0).file_name(Some("../evil")),
            ".._evil.frame_chunk_0.json"
        );
        assert_eq!(ArtifactKind::Metadata.file_name(Some("  ")), "metadata.json");
        assert_eq!(ArtifactKind::Metadata.file_name(None), "metadata.json");
    }

    #[test]
    fn test_frame_chunk_name_matching() {
        assert!(is_frame_chunk_name("frame_chunk_0.json", None));
        assert!(is_frame_chunk_name("frame_chunk_12.json", None));
        assert!(!is_frame_chunk_name("frame_chunk_.json", None));
        assert!(!is_frame_chunk_name("frame_chunk_1a.json", None));
        assert!(!is_frame_chunk_name("goals.json", None));
        assert!(!is_frame_chunk_name("m1.frame_chunk_0.json", None));

        assert!(is_frame_chunk_name("m1.frame_chunk_3.json", Some("m1")));
        assert!(!is_frame_chunk_name("frame_chunk_3.json", Some("m1")));
        assert!(!is_frame_chunk_name("m2.frame_chunk_3.json", Some("m1")));
    }

    #[test]
    fn test_emission_order() {
        let result = sample_result();
        let kinds: Vec<ArtifactKind> = artifacts(&result, Encoding::Compact)
            .iter()
            .map(|a| a.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ArtifactKind::Metadata,
                ArtifactKind::Goals,
                ArtifactKind::PlayerStats,
                ArtifactKind::FrameChunk(0),
                ArtifactKind::FrameChunk(1),
            ]
        );
    }

    #[test]
    fn test_chunks_compact_others_pretty() {
        let result = sample_result();
        let list = artifacts(&result, Encoding::Compact);

        let chunk = String::from_utf8(list[3].encode().unwrap()).unwrap();
        assert_eq!(chunk, r#"[{"t":0},{"t":1}]"#);

        let metadata = String::from_utf8(list[0].encode().unwrap()).unwrap();
        assert_eq!(metadata, "{\n    \"TeamSize\": 3\n}");

        let stats = String::from_utf8(list[2].encode().unwrap()).unwrap();
        assert_eq!(stats, "[]");
    }

    #[test]
    fn test_pretty_chunks_opt_in() {
        let result = sample_result();
        let list = artifacts(&result, Encoding::Pretty);
        let chunk = String::from_utf8(list[4].encode().unwrap()).unwrap();
        assert_eq!(chunk, "[\n    {\n        \"t\": 2\n    }\n]");
    }
}
