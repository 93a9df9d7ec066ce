use std::collections::HashSet;

use chrono::Utc;
use tracing::debug;

use super::ids::ClusterIdGenerator;
use super::types::{Cluster, ClusterReason};
use crate::config::ClusteringConfig;
use crate::folders::is_subfolder_of;

/// Why two undersized clusters may be combined, if they may.
///
/// Both must be below `min_cluster_size` and together no larger than
/// `max_cluster_size`. Same non-empty folder is a folder match; otherwise
/// a shared dominant tag is a tag match. With `merge_nested_folders`,
/// nested non-root folders also count as a folder match.
pub fn merge_compatibility(
    a: &Cluster,
    b: &Cluster,
    config: &ClusteringConfig,
) -> Option<ClusterReason> {
    if a.size() >= config.min_cluster_size || b.size() >= config.min_cluster_size {
        return None;
    }
    if a.size() + b.size() > config.max_cluster_size {
        return None;
    }

    let both_in_folders = !a.folder_path.is_empty() && !b.folder_path.is_empty();
    if both_in_folders && a.folder_path == b.folder_path {
        return Some(ClusterReason::Folder);
    }
    if a.shares_tags_with(b) {
        return Some(ClusterReason::Tags);
    }
    if config.merge_nested_folders
        && both_in_folders
        && (is_subfolder_of(&a.folder_path, &b.folder_path)
            || is_subfolder_of(&b.folder_path, &a.folder_path))
    {
        return Some(ClusterReason::Folder);
    }
    None
}

/// Combine two clusters into a new one.
///
/// The larger input (the first on ties) is the base: its folder and
/// candidate names are kept and its notes come first. Notes, tags and
/// reasons are unioned and the result gets a fresh ID.
pub fn merge_pair(
    first: Cluster,
    second: Cluster,
    reason: ClusterReason,
    ids: &mut ClusterIdGenerator,
) -> Cluster {
    let (base, other) = if second.size() > first.size() {
        (second, first)
    } else {
        (first, second)
    };

    let mut seen: HashSet<String> = HashSet::with_capacity(base.size() + other.size());
    let note_ids: Vec<String> = base
        .note_ids
        .into_iter()
        .chain(other.note_ids)
        .filter(|id| seen.insert(id.clone()))
        .collect();

    let mut dominant_tags = base.dominant_tags;
    dominant_tags.extend(other.dominant_tags);

    let mut reasons = base.reasons;
    reasons.extend(other.reasons);
    reasons.insert(reason);

    Cluster {
        id: ids.next_id(&format!("{}+{}", base.id, other.id)),
        note_ids,
        folder_path: base.folder_path,
        candidate_names: base.candidate_names,
        dominant_tags,
        internal_link_density: 0.0,
        reasons,
        created_at: Utc::now(),
    }
}

/// Absorb undersized clusters into compatible undersized partners.
///
/// Sources are visited in order. Each undersized source pairs with later
/// compatible clusters until it reaches `min_cluster_size` or runs out of
/// partners; absorbed clusters are never visited as sources. Passes repeat
/// until one makes no pairing, so any two undersized survivors are
/// incompatible. Everything else, including undersized clusters without a
/// partner, keeps its relative position.
#[tracing::instrument(skip_all, fields(clusters = clusters.len()))]
pub fn merge_small_clusters(
    mut clusters: Vec<Cluster>,
    config: &ClusteringConfig,
    ids: &mut ClusterIdGenerator,
) -> Vec<Cluster> {
    loop {
        let before = clusters.len();
        clusters = merge_pass(clusters, config, ids);
        if clusters.len() == before {
            return clusters;
        }
    }
}

fn merge_pass(
    clusters: Vec<Cluster>,
    config: &ClusteringConfig,
    ids: &mut ClusterIdGenerator,
) -> Vec<Cluster> {
    let mut slots: Vec<Option<Cluster>> = clusters.into_iter().map(Some).collect();
    let mut merged = Vec::with_capacity(slots.len());

    for i in 0..slots.len() {
        let Some(mut current) = slots[i].take() else {
            continue;
        };

        let mut j = i + 1;
        while j < slots.len() && current.size() < config.min_cluster_size {
            let reason = slots[j]
                .as_ref()
                .and_then(|candidate| merge_compatibility(&current, candidate, config));
            let partner = reason.and_then(|_| slots[j].take());
            match (reason, partner) {
                (Some(reason), Some(partner)) => {
                    debug!(
                        source = %current.id,
                        partner = %partner.id,
                        reason = %reason,
                        "merge"
                    );
                    current = merge_pair(current, partner, reason, ids);
                    // The merged cluster has new tags; recheck skipped candidates
                    j = i + 1;
                }
                _ => j += 1,
            }
        }

        merged.push(current);
    }

    merged
}
