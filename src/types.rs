//! Core types for the a3s-facade system
//!
//! All serializable types use camelCase JSON for wire compatibility.

use crate::error::FacadeError;
use crate::value::{Map, Value};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of event a payload describes
///
/// Parsed case-insensitively from a payload's `type` (or legacy `action`)
/// field; always rendered in lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Alias,
    Delete,
    Group,
    Identify,
    Page,
    Screen,
    Track,
}

impl EventType {
    /// All event types, in alphabetical order
    pub const ALL: [EventType; 7] = [
        EventType::Alias,
        EventType::Delete,
        EventType::Group,
        EventType::Identify,
        EventType::Page,
        EventType::Screen,
        EventType::Track,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alias => "alias",
            Self::Delete => "delete",
            Self::Group => "group",
            Self::Identify => "identify",
            Self::Page => "page",
            Self::Screen => "screen",
            Self::Track => "track",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = FacadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| FacadeError::UnknownType(s.to_string()))
    }
}

/// Options controlling how a facade stores and hands out its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacadeOptions {
    /// Hand out deep copies from `field`/`proxy` (default) instead of
    /// borrowing the stored data
    #[serde(default = "default_true")]
    pub clone: bool,

    /// Turn ISO-8601 strings into dates across the payload at construction
    #[serde(default = "default_true")]
    pub traverse: bool,
}

fn default_true() -> bool {
    true
}

impl Default for FacadeOptions {
    fn default() -> Self {
        Self {
            clone: true,
            traverse: true,
        }
    }
}

impl FacadeOptions {
    pub fn with_clone(mut self, clone: bool) -> Self {
        self.clone = clone;
        self
    }

    pub fn with_traverse(mut self, traverse: bool) -> Self {
        self.traverse = traverse;
        self
    }
}

/// Name and version of the client library that produced an event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Library {
    pub name: String,
    pub version: Option<Value>,
    /// Any other keys the payload's library object carried
    #[serde(flatten)]
    pub extra: Map,
}

impl Library {
    /// Placeholder used when the payload names no library
    pub fn unknown() -> Self {
        Self {
            name: "unknown".to_string(),
            version: None,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_parse_case_insensitive() {
        assert_eq!("track".parse::<EventType>().unwrap(), EventType::Track);
        assert_eq!("Identify".parse::<EventType>().unwrap(), EventType::Identify);
        assert_eq!("SCREEN".parse::<EventType>().unwrap(), EventType::Screen);
        assert_eq!(
            "foo".parse::<EventType>().unwrap_err(),
            FacadeError::UnknownType("foo".to_string())
        );
    }

    #[test]
    fn test_event_type_display() {
        for t in EventType::ALL {
            assert_eq!(t.to_string(), t.as_str());
            assert_eq!(t.as_str().parse::<EventType>().unwrap(), t);
        }
    }

    #[test]
    fn test_event_type_serialization() {
        let json = serde_json::to_string(&EventType::Page).unwrap();
        assert_eq!(json, "\"page\"");
        let parsed: EventType = serde_json::from_str("\"delete\"").unwrap();
        assert_eq!(parsed, EventType::Delete);
    }

    #[test]
    fn test_facade_options_default() {
        let opts = FacadeOptions::default();
        assert!(opts.clone);
        assert!(opts.traverse);
    }

    #[test]
    fn test_facade_options_deserialize_defaults() {
        let opts: FacadeOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, FacadeOptions::default());

        let opts: FacadeOptions = serde_json::from_str(r#"{"clone":false}"#).unwrap();
        assert!(!opts.clone);
        assert!(opts.traverse);
    }

    #[test]
    fn test_facade_options_builders() {
        let opts = FacadeOptions::default()
            .with_clone(false)
            .with_traverse(false);
        assert!(!opts.clone);
        assert!(!opts.traverse);
    }

    #[test]
    fn test_library_serialization() {
        let json = serde_json::to_string(&Library::unknown()).unwrap();
        assert_eq!(json, r#"{"name":"unknown","version":null}"#);

        let mut library = Library::unknown();
        library.extra.insert("build".to_string(), Value::from(42_i64));
        let json = serde_json::to_string(&library).unwrap();
        assert_eq!(json, r#"{"name":"unknown","version":null,"build":42}"#);
    }
}
