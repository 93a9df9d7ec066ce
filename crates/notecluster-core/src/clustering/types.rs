use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Why a cluster was formed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterReason {
    /// Notes share a folder
    Folder,
    /// Notes share dominant tags
    Tags,
    /// Notes are connected by links
    Links,
}

impl fmt::Display for ClusterReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClusterReason::Folder => write!(f, "folder"),
            ClusterReason::Tags => write!(f, "tags"),
            ClusterReason::Links => write!(f, "links"),
        }
    }
}

/// A group of notes considered topically related.
///
/// Clusters are values: the splitter and merger build new clusters with
/// fresh IDs and drop their inputs rather than editing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: String,
    /// Member note paths
    pub note_ids: Vec<String>,
    /// Originating folder, empty for root-level notes
    pub folder_path: String,
    /// Name suggestions, most specific first
    pub candidate_names: Vec<String>,
    /// `#`-prefixed tags representative of the members
    pub dominant_tags: BTreeSet<String>,
    /// Realised internal links over possible ordered pairs (0.0-1.0)
    #[serde(default)]
    pub internal_link_density: f64,
    pub reasons: BTreeSet<ClusterReason>,
    pub created_at: DateTime<Utc>,
}

impl Cluster {
    /// Number of member notes
    pub fn size(&self) -> usize {
        self.note_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.note_ids.is_empty()
    }

    /// Primary display name, falling back to the ID
    pub fn display_name(&self) -> &str {
        self.candidate_names
            .first()
            .map(String::as_str)
            .unwrap_or(&self.id)
    }

    /// Whether the two clusters share at least one dominant tag
    pub fn shares_tags_with(&self, other: &Cluster) -> bool {
        !self.dominant_tags.is_disjoint(&other.dominant_tags)
    }

    /// Copy of this cluster with the given dominant tags
    pub fn with_dominant_tags(self, dominant_tags: BTreeSet<String>) -> Self {
        Cluster {
            dominant_tags,
            ..self
        }
    }

    /// Copy of this cluster with the given link density
    pub fn with_link_density(self, internal_link_density: f64) -> Self {
        Cluster {
            internal_link_density,
            ..self
        }
    }
}
