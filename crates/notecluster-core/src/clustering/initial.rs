use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use tracing::debug;

use super::ids::ClusterIdGenerator;
use super::types::{Cluster, ClusterReason};
use crate::folders::candidate_names;
use crate::snapshot::FileInfo;

/// Group notes into one seed cluster per folder.
///
/// Clusters appear in the order their folder is first seen and keep member
/// notes in input order. Root-level notes (folder `""` or `"/"`) form a
/// single cluster with folder path `""`.
#[tracing::instrument(skip_all, fields(files = files.len()))]
pub fn cluster_by_folder(files: &[FileInfo], ids: &mut ClusterIdGenerator) -> Vec<Cluster> {
    let mut groups: Vec<(&str, Vec<String>)> = Vec::new();
    let mut index_by_folder: HashMap<&str, usize> = HashMap::new();

    for file in files {
        let folder = match file.folder.as_str() {
            "/" => "",
            other => other,
        };
        let slot = *index_by_folder.entry(folder).or_insert_with(|| {
            groups.push((folder, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(file.path.clone());
    }

    let created_at = Utc::now();
    let clusters: Vec<Cluster> = groups
        .into_iter()
        .map(|(folder, note_ids)| Cluster {
            id: ids.next_id(folder),
            note_ids,
            folder_path: folder.to_string(),
            candidate_names: candidate_names(folder),
            dominant_tags: BTreeSet::new(),
            internal_link_density: 0.0,
            reasons: BTreeSet::from([ClusterReason::Folder]),
            created_at,
        })
        .collect();

    debug!(clusters = clusters.len(), "cluster_by_folder");
    clusters
}
