//! Notecluster Core Library
//!
//! Structural clustering of a note vault: notes are grouped by folder,
//! rebalanced against size bounds using the link graph, and merged by
//! folder or tag similarity.

pub mod clustering;
pub mod config;
pub mod error;
pub mod folders;
pub mod logging;
pub mod snapshot;

pub use clustering::{
    run_clustering_pipeline, Cluster, ClusterReason, PipelineResult, PipelineStats,
};
pub use config::ClusteringConfig;
pub use snapshot::{FileInfo, FileMetadata, ResolvedLinks, Snapshot};
