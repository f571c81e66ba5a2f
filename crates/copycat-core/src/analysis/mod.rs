pub mod cluster;
pub mod graph;
pub mod similarity;

pub use cluster::{connected_components, find_clusters, select_central};
pub use graph::SimilarityGraph;
pub use similarity::{compare_all, similarity};
