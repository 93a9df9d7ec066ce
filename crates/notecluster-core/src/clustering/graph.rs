//! Link subgraph induced by a cluster's members

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::snapshot::ResolvedLinks;

/// Undirected view of the links among a fixed set of notes.
///
/// Links in either direction contribute to the same edge and their weights
/// add up. Self-links, zero weights and links to notes outside the member
/// set are ignored.
pub(crate) struct MemberGraph<'a> {
    members: &'a [String],
    adjacency: Vec<BTreeMap<usize, u64>>,
}

impl<'a> MemberGraph<'a> {
    pub(crate) fn new(members: &'a [String], links: &ResolvedLinks) -> Self {
        let index: HashMap<&str, usize> = members
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();
        let mut adjacency: Vec<BTreeMap<usize, u64>> = vec![BTreeMap::new(); members.len()];

        for (from, source) in members.iter().enumerate() {
            let Some(targets) = links.get(source) else {
                continue;
            };
            for (target, weight) in targets {
                let Some(&to) = index.get(target.as_str()) else {
                    continue;
                };
                if to == from || *weight == 0 {
                    continue;
                }
                *adjacency[from].entry(to).or_insert(0) += u64::from(*weight);
                *adjacency[to].entry(from).or_insert(0) += u64::from(*weight);
            }
        }

        MemberGraph { members, adjacency }
    }

    /// Whether any two members are linked
    pub(crate) fn has_edges(&self) -> bool {
        self.adjacency.iter().any(|n| !n.is_empty())
    }

    /// Connected components, each in breadth-first visiting order.
    ///
    /// Components are discovered in member order and each walk starts from
    /// the component's first member. Neighbours are enqueued by descending
    /// combined link weight, ties broken by note path.
    pub(crate) fn components(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.members.len()];
        let mut components = Vec::new();

        for start in 0..self.members.len() {
            if visited[start] {
                continue;
            }
            visited[start] = true;

            let mut component = Vec::new();
            let mut queue = VecDeque::from([start]);
            while let Some(current) = queue.pop_front() {
                component.push(current);

                let mut neighbors: Vec<(usize, u64)> = self.adjacency[current]
                    .iter()
                    .filter(|(n, _)| !visited[**n])
                    .map(|(n, w)| (*n, *w))
                    .collect();
                neighbors.sort_by(|a, b| {
                    Reverse(a.1)
                        .cmp(&Reverse(b.1))
                        .then_with(|| self.members[a.0].cmp(&self.members[b.0]))
                });

                for (neighbor, _) in neighbors {
                    visited[neighbor] = true;
                    queue.push_back(neighbor);
                }
            }
            components.push(component);
        }

        components
    }
}
