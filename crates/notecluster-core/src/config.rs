//! Clustering configuration
//!
//! Every field has a default, so a TOML file only needs the values it
//! overrides:
//!
//! ```toml
//! min_cluster_size = 3
//! max_cluster_size = 40
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, Result};
use crate::{bail_config, bail_invalid};

/// Default lower size bound; smaller clusters are merge candidates
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 5;

/// Default upper size bound; larger clusters are split
pub const DEFAULT_MAX_CLUSTER_SIZE: usize = 50;

/// Default share of member notes a tag needs to count as dominant
pub const DEFAULT_DOMINANT_TAG_RATIO: f64 = 0.5;

/// Default number of dominant tags kept per cluster
pub const DEFAULT_MAX_DOMINANT_TAGS: usize = 5;

/// Options for the clustering pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Clusters below this size are merge candidates
    #[serde(default = "default_min_cluster_size")]
    pub min_cluster_size: usize,

    /// Clusters above this size are split
    #[serde(default = "default_max_cluster_size")]
    pub max_cluster_size: usize,

    /// Fraction of member notes (0.0-1.0) that must carry a tag for it
    /// to become one of the cluster's dominant tags
    #[serde(default = "default_dominant_tag_ratio")]
    pub dominant_tag_ratio: f64,

    /// Upper bound on dominant tags per cluster
    #[serde(default = "default_max_dominant_tags")]
    pub max_dominant_tags: usize,

    /// Also treat undersized clusters in nested folders as merge partners
    #[serde(default)]
    pub merge_nested_folders: bool,
}

fn default_min_cluster_size() -> usize {
    DEFAULT_MIN_CLUSTER_SIZE
}

fn default_max_cluster_size() -> usize {
    DEFAULT_MAX_CLUSTER_SIZE
}

fn default_dominant_tag_ratio() -> f64 {
    DEFAULT_DOMINANT_TAG_RATIO
}

fn default_max_dominant_tags() -> usize {
    DEFAULT_MAX_DOMINANT_TAGS
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            min_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
            max_cluster_size: DEFAULT_MAX_CLUSTER_SIZE,
            dominant_tag_ratio: DEFAULT_DOMINANT_TAG_RATIO,
            max_dominant_tags: DEFAULT_MAX_DOMINANT_TAGS,
            merge_nested_folders: false,
        }
    }
}

impl ClusteringConfig {
    /// Override the lower size bound
    pub fn with_min_cluster_size(mut self, size: usize) -> Self {
        self.min_cluster_size = size;
        self
    }

    /// Override the upper size bound
    pub fn with_max_cluster_size(mut self, size: usize) -> Self {
        self.max_cluster_size = size;
        self
    }

    /// Check that the size bounds can be satisfied
    pub fn validate(&self) -> Result<()> {
        if self.max_cluster_size == 0 {
            bail_config!("max_cluster_size must be at least 1");
        }
        if self.min_cluster_size > self.max_cluster_size {
            bail_config!(
                "min_cluster_size ({}) exceeds max_cluster_size ({})",
                self.min_cluster_size,
                self.max_cluster_size
            );
        }
        if !(0.0..=1.0).contains(&self.dominant_tag_ratio) {
            bail_invalid!("dominant_tag_ratio", self.dominant_tag_ratio);
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ClusteringConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ClusterError::failed("serialize config", e))?;
        fs::write(path, content)?;
        Ok(())
    }
}
