use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::types::Cluster;
use crate::config::ClusteringConfig;
use crate::snapshot::FileMetadata;

/// Normalize a tag to a single leading `#`; blank tags yield `None`
pub fn normalize_tag(tag: &str) -> Option<String> {
    let bare = tag.trim().trim_start_matches('#');
    if bare.is_empty() {
        None
    } else {
        Some(format!("#{}", bare))
    }
}

/// Tags carried by enough member notes to represent the cluster.
///
/// A tag counts once per note and must appear on at least
/// `ceil(dominant_tag_ratio * size)` notes (never fewer than one). The
/// `max_dominant_tags` most frequent survive, ties broken by name.
pub fn dominant_tags(
    cluster: &Cluster,
    metadata: &BTreeMap<String, FileMetadata>,
    config: &ClusteringConfig,
) -> BTreeSet<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for note_id in &cluster.note_ids {
        let Some(meta) = metadata.get(note_id) else {
            continue;
        };
        let note_tags: HashSet<String> =
            meta.tags.iter().filter_map(|t| normalize_tag(t)).collect();
        for tag in note_tags {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }

    let threshold =
        ((config.dominant_tag_ratio * cluster.size() as f64).ceil() as usize).max(1);
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count >= threshold)
        .collect();
    // BTreeMap order is by name, so a stable sort breaks count ties by name
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(config.max_dominant_tags);

    ranked.into_iter().map(|(tag, _)| tag).collect()
}

/// Fill in `dominant_tags` for every cluster from note metadata
#[tracing::instrument(skip_all, fields(clusters = clusters.len()))]
pub fn assign_dominant_tags(
    clusters: Vec<Cluster>,
    metadata: &BTreeMap<String, FileMetadata>,
    config: &ClusteringConfig,
) -> Vec<Cluster> {
    clusters
        .into_iter()
        .map(|cluster| {
            let tags = dominant_tags(&cluster, metadata, config);
            cluster.with_dominant_tags(tags)
        })
        .collect()
}
