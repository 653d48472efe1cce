pub mod edge_order;
pub mod mst;
pub mod union_find;

pub use edge_order::{EdgeOrdering, MinHeap, SortedArray};
pub use mst::{is_spanning_tree, kruskal_mst, total_weight, Edge, KruskalVariant, Weight};
pub use union_find::{BySize, DisjointSetForest, Naive, UnionStrategy};
