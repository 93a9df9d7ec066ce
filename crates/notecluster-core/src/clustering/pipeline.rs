use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::density::assign_link_density;
use super::ids::ClusterIdGenerator;
use super::initial::cluster_by_folder;
use super::normalize::normalize_cluster_sizes;
use super::tags::assign_dominant_tags;
use super::types::Cluster;
use crate::config::ClusteringConfig;
use crate::error::Result;
use crate::folders::{folder_depth, get_folders_by_depth};
use crate::snapshot::Snapshot;
use crate::trace_time;

/// Aggregate figures for one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineStats {
    pub total_clusters: usize,
    pub total_notes: usize,
    /// Distinct non-root folders in the snapshot
    pub folder_count: usize,
    pub max_folder_depth: usize,
    pub average_cluster_size: f64,
    pub smallest_cluster: usize,
    pub largest_cluster: usize,
    /// Clusters left below `min_cluster_size` for lack of a partner
    pub undersized_clusters: usize,
    pub oversized_clusters: usize,
    pub average_link_density: f64,
    pub split_clusters: usize,
    pub merged_clusters: usize,
}

/// Final clusters and statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub clusters: Vec<Cluster>,
    pub stats: PipelineStats,
}

/// Cluster a full vault snapshot.
///
/// Folder seeding, dominant tag assignment, size normalization and link
/// density, in that order. Pure apart from reading the clock for
/// `created_at`; fails only on an invalid config, before any work is done.
#[tracing::instrument(skip_all, fields(files = snapshot.files.len()))]
pub fn run_clustering_pipeline(
    snapshot: &Snapshot,
    config: &ClusteringConfig,
) -> Result<PipelineResult> {
    config.validate()?;
    let start = Instant::now();
    let mut ids = ClusterIdGenerator::new();

    let seeds = cluster_by_folder(&snapshot.files, &mut ids);
    let seeds = assign_dominant_tags(seeds, &snapshot.metadata, config);
    trace_time!(start, "seed_clusters", clusters = seeds.len());

    let normalized = normalize_cluster_sizes(seeds, &snapshot.resolved_links, config, &mut ids)?;
    let clusters = assign_link_density(normalized.clusters, &snapshot.resolved_links);

    let folders = get_folders_by_depth(&snapshot.files);
    let stats = PipelineStats {
        folder_count: folders.len(),
        max_folder_depth: folders.first().map(|f| folder_depth(f)).unwrap_or(0),
        split_clusters: normalized.split_clusters,
        merged_clusters: normalized.merged_clusters,
        ..summarize(&clusters, config)
    };

    debug!(ids_issued = ids.issued_count(), "cluster_ids");
    info!(
        clusters = stats.total_clusters,
        notes = stats.total_notes,
        undersized = stats.undersized_clusters,
        "clustering complete"
    );
    trace_time!(start, "run_clustering_pipeline");

    Ok(PipelineResult { clusters, stats })
}

fn summarize(clusters: &[Cluster], config: &ClusteringConfig) -> PipelineStats {
    if clusters.is_empty() {
        return PipelineStats::default();
    }

    let count = clusters.len();
    let total_notes: usize = clusters.iter().map(Cluster::size).sum();
    let density_sum: f64 = clusters.iter().map(|c| c.internal_link_density).sum();

    PipelineStats {
        total_clusters: count,
        total_notes,
        average_cluster_size: total_notes as f64 / count as f64,
        smallest_cluster: clusters.iter().map(Cluster::size).min().unwrap_or(0),
        largest_cluster: clusters.iter().map(Cluster::size).max().unwrap_or(0),
        undersized_clusters: clusters
            .iter()
            .filter(|c| c.size() < config.min_cluster_size)
            .count(),
        oversized_clusters: clusters
            .iter()
            .filter(|c| c.size() > config.max_cluster_size)
            .count(),
        average_link_density: density_sum / count as f64,
        ..Default::default()
    }
}
