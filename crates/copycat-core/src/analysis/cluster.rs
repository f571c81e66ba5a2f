use super::graph::SimilarityGraph;
use crate::model::Cluster;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Connected components of `graph`, found with an iterative depth-first search.
///
/// Every node lands in exactly one component. Members are sorted by path and
/// components are ordered by their first member so the result is stable across runs.
pub fn connected_components(graph: &SimilarityGraph) -> Vec<Vec<PathBuf>> {
    let mut visited = vec![false; graph.node_count()];
    let mut components: Vec<Vec<PathBuf>> = Vec::new();

    for start in 0..graph.node_count() {
        if visited[start] {
            continue;
        }

        let mut stack = vec![start];
        let mut component = Vec::new();
        visited[start] = true;

        while let Some(current) = stack.pop() {
            component.push(graph.path(current).to_path_buf());
            for edge in graph.edges(current) {
                if !visited[edge.neighbor] {
                    visited[edge.neighbor] = true;
                    stack.push(edge.neighbor);
                }
            }
        }

        component.sort();
        components.push(component);
    }

    components.sort_by(|a, b| a[0].cmp(&b[0]));
    components
}

/// The member with the most edges. Ties go to the lexicographically smallest path.
pub fn select_central<'a>(graph: &SimilarityGraph, members: &'a [PathBuf]) -> Option<&'a Path> {
    members
        .iter()
        .max_by(|a, b| {
            graph
                .degree(a)
                .cmp(&graph.degree(b))
                .then_with(|| b.cmp(a))
        })
        .map(PathBuf::as_path)
}

/// Components of `graph` with a central file picked for each.
pub fn find_clusters(graph: &SimilarityGraph) -> Vec<Cluster> {
    let clusters: Vec<Cluster> = connected_components(graph)
        .into_iter()
        .filter_map(|members| {
            let central = select_central(graph, &members)?.to_path_buf();
            Some(Cluster { central, members })
        })
        .collect();

    debug!(
        "{} clusters covering {} files",
        clusters.len(),
        clusters.iter().map(Cluster::len).sum::<usize>()
    );
    clusters
}
