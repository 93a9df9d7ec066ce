use std::cmp::Reverse;
use std::time::Instant;

use chrono::Utc;
use tracing::debug;

use super::graph::MemberGraph;
use super::ids::ClusterIdGenerator;
use super::types::{Cluster, ClusterReason};
use crate::config::ClusteringConfig;
use crate::snapshot::ResolvedLinks;
use crate::trace_time;

/// Break an oversized cluster into parts of at most `max_cluster_size` notes.
///
/// Members are grouped by link connectivity (see [`MemberGraph::components`])
/// and the components are packed first-fit, largest first, into chunks. A
/// component that fits in one chunk is never divided; a larger one is cut
/// along its traversal order. Chunk capacity is `n / ceil(n / max)` rounded
/// up, so unlinked notes spread evenly instead of leaving a tiny last part,
/// while a component up to `max` notes may still take a chunk of its own.
///
/// Each part keeps the folder and dominant tags, appends `"Part N"` to the
/// candidate names and gets a fresh ID. A cluster within bounds is returned
/// unchanged as the only element.
#[tracing::instrument(skip_all, fields(cluster = %cluster.id, size = cluster.size()))]
pub fn split_large_cluster(
    cluster: Cluster,
    links: &ResolvedLinks,
    config: &ClusteringConfig,
    ids: &mut ClusterIdGenerator,
) -> Vec<Cluster> {
    let max = config.max_cluster_size.max(1);
    if cluster.size() <= max {
        return vec![cluster];
    }

    let start = Instant::now();
    let graph = MemberGraph::new(&cluster.note_ids, links);
    let chunks = pack_components(graph.components(), cluster.size(), max);

    let mut reasons = cluster.reasons.clone();
    if graph.has_edges() {
        reasons.insert(ClusterReason::Links);
    }

    let created_at = Utc::now();
    let parts: Vec<Cluster> = chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let label = format!("Part {}", i + 1);
            let mut candidate_names = cluster.candidate_names.clone();
            candidate_names.push(label.clone());

            Cluster {
                id: ids.next_id(&format!("{}:{}", cluster.id, label)),
                note_ids: chunk
                    .into_iter()
                    .map(|member| cluster.note_ids[member].clone())
                    .collect(),
                folder_path: cluster.folder_path.clone(),
                candidate_names,
                dominant_tags: cluster.dominant_tags.clone(),
                internal_link_density: 0.0,
                reasons: reasons.clone(),
                created_at,
            }
        })
        .collect();

    debug!(
        folder = %cluster.folder_path,
        parts = parts.len(),
        "split_large_cluster"
    );
    trace_time!(start, "split_large_cluster", parts = parts.len());
    parts
}

/// First-fit-decreasing packing of components into chunks of member indices
fn pack_components(components: Vec<Vec<usize>>, total: usize, max: usize) -> Vec<Vec<usize>> {
    let part_count = total.div_ceil(max);
    let capacity = total.div_ceil(part_count);

    let mut pieces: Vec<Vec<usize>> = Vec::with_capacity(components.len());
    for component in components {
        if component.len() <= max {
            pieces.push(component);
        } else {
            pieces.extend(component.chunks(max).map(<[usize]>::to_vec));
        }
    }
    // Stable: equal sizes keep discovery order
    pieces.sort_by_key(|piece| Reverse(piece.len()));

    let mut chunks: Vec<Vec<usize>> = Vec::new();
    for piece in pieces {
        match chunks
            .iter_mut()
            .find(|chunk| chunk.len() + piece.len() <= capacity)
        {
            Some(chunk) => chunk.extend(piece),
            None => chunks.push(piece),
        }
    }
    chunks
}
