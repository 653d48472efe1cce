//-------------------------------------------------------
// Minimum Spanning Tree (Kruskal's Algorithm)
//-------------------------------------------------------
use std::fmt;
use std::ops::Add;

use super::edge_order::{EdgeOrdering, MinHeap, SortedArray};
use super::union_find::{BySize, DisjointSetForest, Naive, UnionStrategy};
use crate::error::Result;

/// Numeric edge weight.
pub trait Weight:
    Copy + PartialOrd + Add<Output = Self> + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Whether two tree totals should count as the same weight. Float totals
    /// are summed in different orders by different variants, so they only
    /// need to agree to a relative tolerance.
    fn same_total(self, other: Self) -> bool;
}

macro_rules! exact_weight {
    ($($ty:ty),*) => {
        $(impl Weight for $ty {
            fn same_total(self, other: Self) -> bool {
                self == other
            }
        })*
    };
}

macro_rules! float_weight {
    ($($ty:ty),*) => {
        $(impl Weight for $ty {
            fn same_total(self, other: Self) -> bool {
                let scale = self.abs().max(other.abs()).max(1.0);
                (self - other).abs() <= 1e-9 * scale
            }
        })*
    };
}

exact_weight!(i32, i64, u32, u64, usize);
float_weight!(f32, f64);

/// Undirected edge between nodes `a` and `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<W = f64> {
    pub a: usize,
    pub b: usize,
    pub weight: W,
}

impl<W> Edge<W> {
    pub fn new(a: usize, b: usize, weight: W) -> Self {
        Self { a, b, weight }
    }

    /// Endpoints with the smaller id first.
    pub fn endpoints(&self) -> (usize, usize) {
        if self.a < self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }
}

/// Kruskal's algorithm over `node_count` nodes.
///
/// Edges are pulled from `O` lightest-first and kept when their endpoints are
/// still in different components of a fresh forest using strategy `S`. Stops
/// as soon as `node_count - 1` edges are kept. A disconnected graph drains the
/// whole source and returns its minimum spanning forest instead.
///
/// # Errors
/// [`crate::Error::OutOfRange`] if an edge names a node outside
/// `0..node_count`.
pub fn kruskal_mst<O, S, W>(node_count: usize, edges: &[Edge<W>]) -> Result<Vec<Edge<W>>>
where
    O: EdgeOrdering,
    S: UnionStrategy,
    W: Weight,
{
    let mut mst = Vec::new();
    if node_count < 2 {
        return Ok(mst);
    }

    let tree_size = node_count - 1;
    let mut forest = DisjointSetForest::<S>::new(node_count);
    mst.reserve(tree_size.min(edges.len()));

    for edge in O::source(edges) {
        let root_a = forest.find(edge.a)?;
        let root_b = forest.find(edge.b)?;
        if root_a == root_b {
            continue;
        }

        forest.merge_roots(root_a, root_b)?;
        mst.push(edge);
        if mst.len() == tree_size {
            break;
        }
    }

    Ok(mst)
}

/// The four edge ordering and union-find pairings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KruskalVariant {
    SortedNaive,
    SortedBySize,
    HeapNaive,
    HeapBySize,
}

impl KruskalVariant {
    pub const ALL: [KruskalVariant; 4] = [
        KruskalVariant::SortedNaive,
        KruskalVariant::SortedBySize,
        KruskalVariant::HeapNaive,
        KruskalVariant::HeapBySize,
    ];

    /// Short name, also used as the results column header.
    pub fn label(self) -> &'static str {
        match self {
            KruskalVariant::SortedNaive => "sorted_naive",
            KruskalVariant::SortedBySize => "sorted_by_size",
            KruskalVariant::HeapNaive => "heap_naive",
            KruskalVariant::HeapBySize => "heap_by_size",
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            KruskalVariant::SortedNaive => "sorted array without find optimization",
            KruskalVariant::SortedBySize => "sorted array with path compression and union by size",
            KruskalVariant::HeapNaive => "heap without find optimization",
            KruskalVariant::HeapBySize => "heap with path compression and union by size",
        }
    }

    pub fn build<W: Weight>(self, node_count: usize, edges: &[Edge<W>]) -> Result<Vec<Edge<W>>> {
        match self {
            KruskalVariant::SortedNaive => kruskal_mst::<SortedArray, Naive, W>(node_count, edges),
            KruskalVariant::SortedBySize => {
                kruskal_mst::<SortedArray, BySize, W>(node_count, edges)
            }
            KruskalVariant::HeapNaive => kruskal_mst::<MinHeap, Naive, W>(node_count, edges),
            KruskalVariant::HeapBySize => kruskal_mst::<MinHeap, BySize, W>(node_count, edges),
        }
    }
}

impl fmt::Display for KruskalVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn total_weight<W: Weight>(edges: &[Edge<W>]) -> W {
    edges
        .iter()
        .fold(W::default(), |total, edge| total + edge.weight)
}

/// True when `edges` is acyclic and connects all `node_count` nodes.
pub fn is_spanning_tree<W>(node_count: usize, edges: &[Edge<W>]) -> bool {
    if edges.len() + 1 != node_count.max(1) {
        return false;
    }
    let mut forest = DisjointSetForest::<BySize>::new(node_count);
    edges
        .iter()
        .all(|edge| matches!(forest.union(edge.a, edge.b), Ok(true)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use bevy::math::{DVec2, IVec2};
    use rand::{Rng, SeedableRng};

    fn random_graph(n: usize, seed: u64) -> Graph<IVec2> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        // A small grid forces plenty of equal weights.
        Graph::complete((0..n).map(|_| IVec2::new(rng.gen_range(0..8), rng.gen_range(0..8))))
    }

    /// Prim's algorithm on the dense weight matrix, as an independent check.
    fn prim_total(graph: &Graph<IVec2>) -> i64 {
        let n = graph.node_count();
        if n < 2 {
            return 0;
        }
        let mut in_tree = vec![false; n];
        let mut best = vec![i64::MAX; n];
        best[0] = 0;
        let mut total = 0;
        for _ in 0..n {
            let next = (0..n)
                .filter(|&v| !in_tree[v])
                .min_by_key(|&v| best[v])
                .unwrap();
            in_tree[next] = true;
            total += best[next];
            for edge in graph.edges() {
                let other = match edge.endpoints() {
                    (a, b) if a == next => b,
                    (a, b) if b == next => a,
                    _ => continue,
                };
                if !in_tree[other] && edge.weight < best[other] {
                    best[other] = edge.weight;
                }
            }
        }
        total
    }

    #[test]
    fn triangle_with_tied_weights() {
        let graph = Graph::complete([IVec2::new(0, 0), IVec2::new(3, 4), IVec2::new(0, 8)]);
        for variant in KruskalVariant::ALL {
            let mst = graph.mst(variant).unwrap();
            assert_eq!(mst.len(), 2, "{variant}");
            assert_eq!(total_weight(&mst), 50, "{variant}");
            assert!(is_spanning_tree(3, &mst), "{variant}");
        }
    }

    #[test]
    fn square_never_uses_a_diagonal() {
        let graph = Graph::complete([
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ]);
        assert_eq!(graph.edges().len(), 6);
        for variant in KruskalVariant::ALL {
            let mst = graph.mst(variant).unwrap();
            assert_eq!(mst.len(), 3, "{variant}");
            assert!(mst.iter().all(|edge| edge.weight == 1.0), "{variant} took a diagonal");
            assert_eq!(total_weight(&mst), 3.0);
            assert!(is_spanning_tree(4, &mst));
        }
    }

    #[test]
    fn trivial_inputs_give_empty_trees() {
        for variant in KruskalVariant::ALL {
            assert!(variant.build::<f64>(0, &[]).unwrap().is_empty());
            let single = Graph::complete([DVec2::new(2.0, 3.0)]);
            assert!(single.mst(variant).unwrap().is_empty());
        }
    }

    #[test]
    fn disconnected_pairs_give_a_forest() {
        let graph = Graph::with_edges(
            [
                IVec2::new(0, 0),
                IVec2::new(1, 0),
                IVec2::new(10, 10),
                IVec2::new(10, 12),
            ],
            &[(0, 1), (2, 3)],
        )
        .unwrap();
        for variant in KruskalVariant::ALL {
            let mut mst = graph.mst(variant).unwrap();
            mst.sort_by_key(|edge| edge.endpoints());
            assert_eq!(mst, vec![Edge::new(0, 1, 1), Edge::new(2, 3, 4)], "{variant}");
            assert!(!is_spanning_tree(4, &mst));
        }
    }

    #[test]
    fn no_edges_is_not_an_error() {
        for variant in KruskalVariant::ALL {
            assert!(variant.build::<i64>(5, &[]).unwrap().is_empty());
        }
    }

    #[test]
    fn stops_once_the_tree_is_complete() {
        // The heavy edge names a node that doesn't exist. It must never be
        // pulled, since the tree is done before it comes up.
        let edges = vec![
            Edge::new(0, 1, 1),
            Edge::new(1, 2, 2),
            Edge::new(0, 2, 3),
            Edge::new(0, 99, 100),
        ];
        for variant in KruskalVariant::ALL {
            let mst = variant.build(3, &edges).unwrap();
            assert_eq!(mst, vec![Edge::new(0, 1, 1), Edge::new(1, 2, 2)], "{variant}");
        }
    }

    #[test]
    fn out_of_range_endpoint_fails() {
        let edges = vec![Edge::new(0, 4, 1.0), Edge::new(0, 1, 2.0)];
        for variant in KruskalVariant::ALL {
            let err = variant.build(3, &edges).unwrap_err();
            assert!(err.is_out_of_range(), "{variant}: {err}");
        }
    }

    #[test]
    fn variants_agree_on_random_graphs() {
        for seed in 0..20 {
            let n = 2 + seed as usize * 3;
            let graph = random_graph(n, seed);
            let expected = prim_total(&graph);
            for variant in KruskalVariant::ALL {
                let mst = graph.mst(variant).unwrap();
                assert!(is_spanning_tree(n, &mst), "{variant} on seed {seed}");
                assert_eq!(total_weight(&mst), expected, "{variant} on seed {seed}");
            }
        }
    }

    #[test]
    fn float_graphs_agree_within_tolerance() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let graph = Graph::random(200, &mut rng);
        let totals: Vec<f64> = KruskalVariant::ALL
            .into_iter()
            .map(|variant| total_weight(&graph.mst(variant).unwrap()))
            .collect();
        assert!(totals.iter().all(|&total| total.same_total(totals[0])), "{totals:?}");
    }

    #[test]
    fn variants_run_on_separate_threads() {
        let graph = random_graph(60, 3);
        let totals: Vec<i64> = std::thread::scope(|scope| {
            let handles: Vec<_> = KruskalVariant::ALL
                .into_iter()
                .map(|variant| {
                    let graph = &graph;
                    scope.spawn(move || total_weight(&graph.mst(variant).unwrap()))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(totals.iter().all(|&total| total == totals[0]));
    }

    #[test]
    fn spanning_tree_check_rejects_cycles() {
        let cycle = [Edge::new(0, 1, 1), Edge::new(1, 0, 1)];
        assert!(!is_spanning_tree(3, &cycle));
        assert!(is_spanning_tree::<i64>(1, &[]));
        assert!(is_spanning_tree::<i64>(0, &[]));
    }
}
