//! Decoded replay documents
//!
//! A `ReplayDocument` holds the decoded JSON of one replay. Only the few
//! fields the partitioner needs are looked at; everything else, including
//! the contents of individual frames, goals, and player stats, is carried
//! as opaque `serde_json::Value` nodes.
//!
//! Every lookup defaults when the key is missing (or `null`) and fails
//! with `ChunkError::MalformedInput` when the key is present with the
//! wrong JSON type.

use crate::core::error::{ChunkError, Result};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::io::Read;

pub const PROPERTIES_KEY: &str = "properties";
pub const NETWORK_FRAMES_KEY: &str = "network_frames";
pub const FRAMES_KEY: &str = "frames";
pub const GOALS_KEY: &str = "Goals";
pub const PLAYER_STATS_KEY: &str = "PlayerStats";
pub const MATCH_ID_KEY: &str = "Id";

/// One decoded replay whose root is known to be a JSON object
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayDocument {
    root: Map<String, Value>,
}

impl ReplayDocument {
    /// Wrap an already decoded value
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(ChunkError::MalformedInput(format!(
                "document root: expected object, found {}",
                json_type(&other)
            ))),
        }
    }

    /// Decode a document from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Decode a document from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    /// The replay's top-level property mapping, empty when absent
    pub fn properties(&self) -> Result<Cow<'_, Map<String, Value>>> {
        Ok(match object_field(&self.root, PROPERTIES_KEY, PROPERTIES_KEY)? {
            Some(map) => Cow::Borrowed(map),
            None => Cow::Owned(Map::new()),
        })
    }

    /// Goal events from `properties.Goals`
    pub fn goals(&self) -> Result<&[Value]> {
        match object_field(&self.root, PROPERTIES_KEY, PROPERTIES_KEY)? {
            Some(props) => array_field(props, GOALS_KEY, "properties.Goals"),
            None => Ok(&[]),
        }
    }

    /// Per-player statistics from `properties.PlayerStats`
    pub fn player_stats(&self) -> Result<&[Value]> {
        match object_field(&self.root, PROPERTIES_KEY, PROPERTIES_KEY)? {
            Some(props) => array_field(props, PLAYER_STATS_KEY, "properties.PlayerStats"),
            None => Ok(&[]),
        }
    }

    /// Network frames from `network_frames.frames`
    pub fn frames(&self) -> Result<&[Value]> {
        match object_field(&self.root, NETWORK_FRAMES_KEY, NETWORK_FRAMES_KEY)? {
            Some(network) => array_field(network, FRAMES_KEY, "network_frames.frames"),
            None => Ok(&[]),
        }
    }

    /// Match identifier from `properties.Id`, when it is a string
    pub fn match_id(&self) -> Option<&str> {
        self.root
            .get(PROPERTIES_KEY)?
            .as_object()?
            .get(MATCH_ID_KEY)?
            .as_str()
    }
}

fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn object_field<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<&'a Map<String, Value>>> {
    match lookup(map, key) {
        None => Ok(None),
        Some(Value::Object(inner)) => Ok(Some(inner)),
        Some(other) => Err(type_mismatch(path, "object", other)),
    }
}

fn array_field<'a>(map: &'a Map<String, Value>, key: &str, path: &str) -> Result<&'a [Value]> {
    match lookup(map, key) {
        None => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(type_mismatch(path, "array", other)),
    }
}

fn type_mismatch(path: &str, expected: &str, found: &Value) -> ChunkError {
    ChunkError::MalformedInput(format!(
        "{}: expected {}, found {}",
        path,
        expected,
        json_type(found)
    ))
}

/// JSON type name used in error messages
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> ReplayDocument {
        ReplayDocument::from_value(value).unwrap()
    }

    #[test]
    fn test_non_object_root_rejected() {
        for value in [json!([]), json!(3), json!("replay"), Value::Null] {
            let err = ReplayDocument::from_value(value).unwrap_err();
            assert!(matches!(err, ChunkError::MalformedInput(_)));
        }
    }

    #[test]
    fn test_empty_document_defaults() {
        let d = doc(json!({}));
        assert!(d.properties().unwrap().is_empty());
        assert!(d.goals().unwrap().is_empty());
        assert!(d.player_stats().unwrap().is_empty());
        assert!(d.frames().unwrap().is_empty());
        assert!(d.match_id().is_none());
    }

    #[test]
    fn test_missing_inner_keys_default() {
        let d = doc(json!({
            "properties": { "MapName": "stadium_p" },
            "network_frames": { "count": 0 }
        }));
        assert_eq!(d.properties().unwrap().len(), 1);
        assert!(d.goals().unwrap().is_empty());
        assert!(d.player_stats().unwrap().is_empty());
        assert!(d.frames().unwrap().is_empty());
    }

    #[test]
    fn test_null_treated_as_absent() {
        let d = doc(json!({
            "properties": { "Goals": null },
            "network_frames": null
        }));
        assert!(d.goals().unwrap().is_empty());
        assert!(d.frames().unwrap().is_empty());
    }

    #[test]
    fn test_fields_read_in_order() {
        let d = doc(json!({
            "properties": {
                "Goals": [{ "frame": 10 }, { "frame": 20 }],
                "PlayerStats": [{ "Name": "a" }]
            },
            "network_frames": { "frames": [1, 2, 3] }
        }));
        assert_eq!(d.goals().unwrap(), &[json!({ "frame": 10 }), json!({ "frame": 20 })]);
        assert_eq!(d.player_stats().unwrap(), &[json!({ "Name": "a" })]);
        assert_eq!(d.frames().unwrap(), &[json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_wrong_shapes_report_path() {
        let d = doc(json!({ "network_frames": { "frames": "lots" } }));
        let msg = d.frames().unwrap_err().to_string();
        assert!(msg.contains("network_frames.frames"));
        assert!(msg.contains("string"));

        let d = doc(json!({ "properties": [] }));
        assert!(matches!(d.properties(), Err(ChunkError::MalformedInput(_))));
        assert!(matches!(d.goals(), Err(ChunkError::MalformedInput(_))));

        let d = doc(json!({ "properties": { "PlayerStats": {} } }));
        let msg = d.player_stats().unwrap_err().to_string();
        assert!(msg.contains("properties.PlayerStats"));
    }

    #[test]
    fn test_match_id() {
        let d = doc(json!({ "properties": { "Id": "7F3A21" } }));
        assert_eq!(d.match_id(), Some("7F3A21"));

        let d = doc(json!({ "properties": { "Id": 42 } }));
        assert_eq!(d.match_id(), None);
    }

    #[test]
    fn test_from_json_str_rejects_invalid_json() {
        let err = ReplayDocument::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ChunkError::Json(_)));
    }
}
