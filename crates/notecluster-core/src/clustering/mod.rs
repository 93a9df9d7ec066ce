//! Folder, tag and link based clustering
//!
//! Pipeline stages:
//! - `initial`: one seed cluster per folder
//! - `tags`: dominant tags from note metadata
//! - `split`: connectivity-aware splitting of oversized clusters
//! - `merge`: folder/tag merging of undersized clusters
//! - `normalize`: split, then merge
//! - `density`: internal link density
//!
//! Each stage consumes clusters and returns new ones; nothing is edited in
//! place.

mod density;
mod graph;
mod ids;
mod initial;
mod merge;
mod normalize;
mod pipeline;
mod split;
mod tags;
pub mod types;

pub use density::{assign_link_density, internal_link_density};
pub use ids::ClusterIdGenerator;
pub use initial::cluster_by_folder;
pub use merge::{merge_compatibility, merge_pair, merge_small_clusters};
pub use normalize::{normalize_cluster_sizes, Normalized};
pub use pipeline::{run_clustering_pipeline, PipelineResult, PipelineStats};
pub use split::split_large_cluster;
pub use tags::{assign_dominant_tags, dominant_tags, normalize_tag};
pub use types::{Cluster, ClusterReason};
