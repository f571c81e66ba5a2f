use crate::model::ScoredPair;
use ahash::AHashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub neighbor: usize,
    pub score: f64,
}

/// Undirected similarity graph. Only files that take part in at least one pair
/// become nodes.
#[derive(Debug, Default)]
pub struct SimilarityGraph {
    nodes: Vec<PathBuf>,
    index: AHashMap<PathBuf, usize>,
    adjacency: Vec<Vec<Edge>>,
    edge_count: usize,
}

impl SimilarityGraph {
    pub fn from_pairs(pairs: &[ScoredPair]) -> Self {
        let mut graph = Self::default();
        for pair in pairs {
            graph.add_edge(&pair.a, &pair.b, pair.score);
        }
        debug!(
            "Built similarity graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }

    fn node_id(&mut self, path: &Path) -> usize {
        if let Some(&id) = self.index.get(path) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(path.to_path_buf());
        self.index.insert(path.to_path_buf(), id);
        self.adjacency.push(Vec::new());
        id
    }

    fn add_edge(&mut self, a: &Path, b: &Path, score: f64) {
        if a == b {
            debug!("Ignoring self-pair for {}", a.display());
            return;
        }
        let ia = self.node_id(a);
        let ib = self.node_id(b);
        if self.adjacency[ia].iter().any(|e| e.neighbor == ib) {
            debug!(
                "Ignoring repeated pair {} <-> {}",
                a.display(),
                b.display()
            );
            return;
        }
        self.adjacency[ia].push(Edge { neighbor: ib, score });
        self.adjacency[ib].push(Edge { neighbor: ia, score });
        self.edge_count += 1;
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.index.contains_key(path)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[PathBuf] {
        &self.nodes
    }

    pub fn path(&self, id: usize) -> &Path {
        &self.nodes[id]
    }

    pub fn id_of(&self, path: &Path) -> Option<usize> {
        self.index.get(path).copied()
    }

    pub fn edges(&self, id: usize) -> &[Edge] {
        &self.adjacency[id]
    }

    /// Number of edges touching `path`; 0 for files outside the graph.
    pub fn degree(&self, path: &Path) -> usize {
        self.id_of(path).map_or(0, |id| self.adjacency[id].len())
    }

    pub fn neighbors(&self, path: &Path) -> Vec<(&Path, f64)> {
        match self.id_of(path) {
            Some(id) => self.adjacency[id]
                .iter()
                .map(|e| (self.nodes[e.neighbor].as_path(), e.score))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Score of the edge between `a` and `b`, if they are adjacent.
    pub fn score(&self, a: &Path, b: &Path) -> Option<f64> {
        let ia = self.id_of(a)?;
        let ib = self.id_of(b)?;
        self.adjacency[ia]
            .iter()
            .find(|e| e.neighbor == ib)
            .map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: &str, b: &str, score: f64) -> ScoredPair {
        ScoredPair {
            a: PathBuf::from(a),
            b: PathBuf::from(b),
            score,
        }
    }

    #[test]
    fn test_edges_are_bidirectional() {
        let graph = SimilarityGraph::from_pairs(&[pair("/x", "/y", 60.0)]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.score(Path::new("/x"), Path::new("/y")), Some(60.0));
        assert_eq!(graph.score(Path::new("/y"), Path::new("/x")), Some(60.0));
        assert_eq!(graph.degree(Path::new("/x")), 1);
        assert_eq!(graph.degree(Path::new("/y")), 1);
    }

    #[test]
    fn test_no_self_loops_or_parallel_edges() {
        let graph = SimilarityGraph::from_pairs(&[
            pair("/x", "/x", 100.0),
            pair("/x", "/y", 70.0),
            pair("/y", "/x", 70.0),
        ]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(Path::new("/x")), 1);
        assert_eq!(graph.degree(Path::new("/y")), 1);
    }

    #[test]
    fn test_unknown_path_has_no_degree() {
        let graph = SimilarityGraph::from_pairs(&[pair("/x", "/y", 60.0)]);
        assert!(!graph.contains(Path::new("/z")));
        assert_eq!(graph.degree(Path::new("/z")), 0);
        assert!(graph.neighbors(Path::new("/z")).is_empty());
        assert_eq!(graph.score(Path::new("/x"), Path::new("/z")), None);
    }

    #[test]
    fn test_neighbors() {
        let graph = SimilarityGraph::from_pairs(&[
            pair("/x", "/y", 60.0),
            pair("/y", "/z", 55.0),
        ]);
        let mut neighbors = graph.neighbors(Path::new("/y"));
        neighbors.sort_by(|a, b| a.0.cmp(b.0));
        assert_eq!(
            neighbors,
            vec![(Path::new("/x"), 60.0), (Path::new("/z"), 55.0)]
        );
    }

    #[test]
    fn test_empty_pairs_empty_graph() {
        let graph = SimilarityGraph::from_pairs(&[]);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }
}
