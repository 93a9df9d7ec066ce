use std::time::Instant;

use tracing::debug;

use super::ids::ClusterIdGenerator;
use super::merge::merge_small_clusters;
use super::split::split_large_cluster;
use super::types::Cluster;
use crate::config::ClusteringConfig;
use crate::error::Result;
use crate::snapshot::ResolvedLinks;
use crate::trace_time;

/// Result of size normalization
#[derive(Debug, Clone)]
pub struct Normalized {
    pub clusters: Vec<Cluster>,
    /// Oversized clusters that were split
    pub split_clusters: usize,
    /// Successful pairings performed by the merger
    pub merged_clusters: usize,
}

/// Bring clusters within `[min_cluster_size, max_cluster_size]`.
///
/// Every oversized cluster is split first, then the merger runs once over
/// the flat result, so it only ever sees clusters within the maximum.
/// Undersized clusters without a compatible partner are returned as they
/// are.
#[tracing::instrument(skip_all, fields(clusters = clusters.len()))]
pub fn normalize_cluster_sizes(
    clusters: Vec<Cluster>,
    links: &ResolvedLinks,
    config: &ClusteringConfig,
    ids: &mut ClusterIdGenerator,
) -> Result<Normalized> {
    config.validate()?;
    let start = Instant::now();

    let mut split_clusters = 0;
    let mut bounded = Vec::with_capacity(clusters.len());
    for cluster in clusters {
        if cluster.size() > config.max_cluster_size {
            split_clusters += 1;
        }
        bounded.extend(split_large_cluster(cluster, links, config, ids));
    }
    trace_time!(start, "split_phase", clusters = bounded.len());

    let before_merge = bounded.len();
    let clusters = merge_small_clusters(bounded, config, ids);
    let merged_clusters = before_merge - clusters.len();

    debug!(
        split_clusters,
        merged_clusters,
        clusters = clusters.len(),
        "normalize_cluster_sizes"
    );
    trace_time!(start, "normalize_cluster_sizes");

    Ok(Normalized {
        clusters,
        split_clusters,
        merged_clusters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clustering::initial::cluster_by_folder;
    use crate::error::ClusterError;
    use crate::snapshot::FileInfo;

    fn seeds(paths: &[String], ids: &mut ClusterIdGenerator) -> Vec<Cluster> {
        let files: Vec<FileInfo> = paths.iter().map(|p| FileInfo::from_path(p.as_str())).collect();
        cluster_by_folder(&files, ids)
    }

    fn notes(folder: &str, count: usize) -> Vec<String> {
        (0..count).map(|i| format!("{folder}/{i}.md")).collect()
    }

    #[test]
    fn test_split_then_merge() {
        let mut ids = ClusterIdGenerator::new();
        let mut paths = notes("big", 12);
        paths.extend(notes("tiny", 1));
        paths.extend(notes("other", 1));
        let clusters = seeds(&paths, &mut ids);
        let config = ClusteringConfig::default()
            .with_min_cluster_size(3)
            .with_max_cluster_size(5);

        let result =
            normalize_cluster_sizes(clusters, &ResolvedLinks::new(), &config, &mut ids).unwrap();

        assert_eq!(result.split_clusters, 1);
        // 12 notes over 3 parts of 4; tiny and other share nothing
        let sizes: Vec<usize> = result.clusters.iter().map(Cluster::size).collect();
        assert_eq!(sizes, vec![4, 4, 4, 1, 1]);
        assert_eq!(result.merged_clusters, 0);
    }

    #[test]
    fn test_split_parts_are_not_remerged() {
        let mut ids = ClusterIdGenerator::new();
        let clusters = seeds(&notes("big", 6), &mut ids);
        let config = ClusteringConfig::default()
            .with_min_cluster_size(4)
            .with_max_cluster_size(5);

        let result =
            normalize_cluster_sizes(clusters, &ResolvedLinks::new(), &config, &mut ids).unwrap();

        // Two parts of 3 share a folder but 6 > max, so they stay apart
        assert_eq!(result.clusters.len(), 2);
        assert!(result.clusters.iter().all(|c| c.size() <= 5));
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let mut ids = ClusterIdGenerator::new();
        let clusters = seeds(&notes("a", 3), &mut ids);
        let config = ClusteringConfig::default()
            .with_min_cluster_size(10)
            .with_max_cluster_size(2);

        let err =
            normalize_cluster_sizes(clusters, &ResolvedLinks::new(), &config, &mut ids).unwrap_err();
        assert!(matches!(err, ClusterError::InvalidConfig { .. }));
    }
}
