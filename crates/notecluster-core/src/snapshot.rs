//! Input snapshot consumed by the clustering pipeline
//!
//! The vault listing, metadata cache and link resolver live outside this
//! crate; a `Snapshot` is their already-materialised output. It is read-only
//! for the duration of a pipeline run.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, Result};

/// Source path -> (target path -> number of references)
///
/// Directed: a link from A to B says nothing about B to A.
pub type ResolvedLinks = BTreeMap<String, BTreeMap<String, u32>>;

/// A note as listed by the vault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Vault-relative path, unique within a snapshot
    pub path: String,
    /// File name without extension
    pub basename: String,
    /// Containing folder, empty for root-level notes
    #[serde(default)]
    pub folder: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub modified_at: DateTime<Utc>,
}

impl FileInfo {
    /// Build a `FileInfo` from a vault-relative path, deriving the folder and
    /// basename. Timestamps are left at the epoch.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let (folder, file_name) = match path.rsplit_once('/') {
            Some((folder, name)) => (folder.to_string(), name),
            None => (String::new(), path.as_str()),
        };
        let basename = match file_name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => file_name.to_string(),
        };

        FileInfo {
            basename,
            folder,
            created_at: DateTime::<Utc>::default(),
            modified_at: DateTime::<Utc>::default(),
            path,
        }
    }
}

/// Cached per-note metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub headings: Vec<String>,
    #[serde(default)]
    pub frontmatter: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub word_count: usize,
}

/// Full vault snapshot: notes, their metadata and the resolved link graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub files: Vec<FileInfo>,
    #[serde(default)]
    pub metadata: BTreeMap<String, FileMetadata>,
    #[serde(default)]
    pub resolved_links: ResolvedLinks,
}

impl Snapshot {
    /// Snapshot of notes without metadata or links
    pub fn from_files(files: Vec<FileInfo>) -> Self {
        Snapshot {
            files,
            ..Default::default()
        }
    }

    /// Parse a snapshot from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(content)?;
        Ok(snapshot)
    }

    /// Load and validate a snapshot file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ClusterError::SnapshotNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content).map_err(|e| ClusterError::InvalidSnapshot {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        snapshot
            .validate()
            .map_err(|reason| ClusterError::InvalidSnapshot {
                path: path.to_path_buf(),
                reason,
            })?;

        Ok(snapshot)
    }

    /// Check that note paths are unique
    pub fn validate(&self) -> std::result::Result<(), String> {
        let mut seen = HashSet::with_capacity(self.files.len());
        for file in &self.files {
            if !seen.insert(file.path.as_str()) {
                return Err(format!("duplicate note path: {}", file.path));
            }
        }
        Ok(())
    }
}
