use std::collections::HashSet;

use super::types::Cluster;
use crate::snapshot::ResolvedLinks;

/// Share of possible ordered member pairs `(a, b)`, `a != b`, joined by a
/// link from `a` to `b`. Clusters with fewer than two notes have density 0.
pub fn internal_link_density(note_ids: &[String], links: &ResolvedLinks) -> f64 {
    let n = note_ids.len();
    if n < 2 {
        return 0.0;
    }

    let members: HashSet<&str> = note_ids.iter().map(String::as_str).collect();
    let mut realized = 0usize;
    for source in &members {
        let Some(targets) = links.get(*source) else {
            continue;
        };
        realized += targets
            .iter()
            .filter(|(target, weight)| {
                **weight > 0 && target.as_str() != *source && members.contains(target.as_str())
            })
            .count();
    }

    realized as f64 / (n * (n - 1)) as f64
}

/// Compute `internal_link_density` for every cluster
pub fn assign_link_density(clusters: Vec<Cluster>, links: &ResolvedLinks) -> Vec<Cluster> {
    clusters
        .into_iter()
        .map(|cluster| {
            let density = internal_link_density(&cluster.note_ids, links);
            cluster.with_link_density(density)
        })
        .collect()
}
