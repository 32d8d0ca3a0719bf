//! Domain DTOs for the collection browser and saved requests.
//!
//! # Design
//! Field names serialize in camelCase to match the frontend models. Saved
//! request timestamps are optional in memory; older builds of the app wrote
//! the zero time `0001-01-01T00:00:00Z` for "unset", which reads back as
//! `None`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::http::HttpRequest;

/// A file or directory as shown in the collection tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSystemEntry {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    pub size: u64,
    /// Unix timestamp, seconds.
    pub modified: i64,
}

/// A node in the collection tree. Files have no children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryTree {
    pub entry: FileSystemEntry,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DirectoryTree>,
}

impl DirectoryTree {
    /// Names of the direct children, in tree order.
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.entry.name.as_str()).collect()
    }

    /// Depth-first search for a node by path.
    pub fn find(&self, path: &str) -> Option<&DirectoryTree> {
        if self.entry.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(path))
    }
}

/// A request saved to a `.postier` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub query: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "unset_if_zero", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "unset_if_zero", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SavedRequest {
    /// The document created for a brand new request: a bare GET.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            method: "GET".to_string(),
            ..Self::default()
        }
    }

    /// The executable part of the document.
    pub fn to_request(&self) -> HttpRequest {
        HttpRequest {
            method: self.method.clone(),
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            query: self.query.clone(),
        }
    }

    /// Replace the executable part, keeping name, description and timestamps.
    pub fn set_request(&mut self, req: HttpRequest) {
        self.method = req.method;
        self.url = req.url;
        self.headers = req.headers;
        self.body = req.body;
        self.query = req.query;
    }
}

fn unset_if_zero<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(value.filter(|ts| ts.timestamp() != ZERO_TIME_SECS))
}

/// Seconds from the Unix epoch to `0001-01-01T00:00:00Z`.
const ZERO_TIME_SECS: i64 = -62_135_596_800;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn entry_serializes_camel_case() {
        let entry = FileSystemEntry {
            name: "a.postier".to_string(),
            path: "/c/a.postier".to_string(),
            is_dir: false,
            size: 10,
            modified: 1_700_000_000,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["isDir"], false);
        assert_eq!(json["modified"], 1_700_000_000);
    }

    #[test]
    fn file_node_omits_children() {
        let tree = DirectoryTree {
            entry: FileSystemEntry {
                name: "f".to_string(),
                path: "/f".to_string(),
                is_dir: false,
                size: 0,
                modified: 0,
            },
            children: Vec::new(),
        };
        let json = serde_json::to_value(&tree).unwrap();
        assert!(json.get("children").is_none());
    }

    #[test]
    fn zero_time_reads_as_unset() {
        let doc = r#"{"name":"x","method":"GET","url":"","headers":{},"body":"","query":{},
            "createdAt":"0001-01-01T00:00:00Z","updatedAt":"2024-05-01T10:00:00Z"}"#;
        let saved: SavedRequest = serde_json::from_str(doc).unwrap();
        assert!(saved.created_at.is_none());
        assert_eq!(
            saved.updated_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn missing_and_null_timestamps_read_as_unset() {
        let saved: SavedRequest =
            serde_json::from_str(r#"{"name":"x","createdAt":null}"#).unwrap();
        assert!(saved.created_at.is_none());
        assert!(saved.updated_at.is_none());
        assert!(saved.headers.is_empty());
    }

    #[test]
    fn frontend_fractional_timestamps_parse() {
        let saved: SavedRequest =
            serde_json::from_str(r#"{"createdAt":"2025-02-03T04:05:06.789Z"}"#).unwrap();
        assert_eq!(saved.created_at.unwrap().timestamp_subsec_millis(), 789);
    }

    #[test]
    fn new_request_is_bare_get() {
        let saved = SavedRequest::new("Users");
        assert_eq!(saved.name, "Users");
        assert_eq!(saved.method, "GET");
        assert!(saved.url.is_empty());
        assert!(saved.created_at.is_none());
    }

    #[test]
    fn request_conversion_keeps_metadata() {
        let mut saved = SavedRequest::new("Users");
        saved.description = "list users".to_string();
        let req = HttpRequest::new("POST", "http://localhost/users").body("{}");
        saved.set_request(req.clone());
        assert_eq!(saved.to_request(), req);
        assert_eq!(saved.description, "list users");
    }

    #[test]
    fn tree_find_locates_nested_node() {
        let leaf = DirectoryTree {
            entry: FileSystemEntry {
                name: "x".to_string(),
                path: "/r/d/x".to_string(),
                is_dir: false,
                size: 0,
                modified: 0,
            },
            children: Vec::new(),
        };
        let dir = DirectoryTree {
            entry: FileSystemEntry {
                name: "d".to_string(),
                path: "/r/d".to_string(),
                is_dir: true,
                size: 0,
                modified: 0,
            },
            children: vec![leaf],
        };
        assert_eq!(dir.find("/r/d/x").unwrap().entry.name, "x");
        assert!(dir.find("/r/none").is_none());
        assert_eq!(dir.child_names(), vec!["x"]);
    }
}
