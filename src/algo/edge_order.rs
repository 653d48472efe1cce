use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::mst::{Edge, Weight};

/// A way of handing edges to Kruskal's algorithm lightest-first.
///
/// The source is consumed once, front to back. Among equal weights the order
/// is up to the implementation.
pub trait EdgeOrdering {
    type Source<W: Weight>: Iterator<Item = Edge<W>>;

    fn source<W: Weight>(edges: &[Edge<W>]) -> Self::Source<W>;
}

/// Sorts a copy of every edge up front.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortedArray;

/// Heapifies every edge and pops the lightest one on demand.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinHeap;

// Weights that don't compare (NaN) are treated as equal rather than panicking.
fn compare_weights<W: Weight>(a: &W, b: &W) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

impl EdgeOrdering for SortedArray {
    type Source<W: Weight> = std::vec::IntoIter<Edge<W>>;

    fn source<W: Weight>(edges: &[Edge<W>]) -> Self::Source<W> {
        let mut sorted_edges = edges.to_vec();
        sorted_edges.sort_unstable_by(|e1, e2| compare_weights(&e1.weight, &e2.weight));
        sorted_edges.into_iter()
    }
}

impl EdgeOrdering for MinHeap {
    type Source<W: Weight> = HeapEdges<W>;

    fn source<W: Weight>(edges: &[Edge<W>]) -> Self::Source<W> {
        let entries: Vec<_> = edges.iter().copied().map(Lightest).collect();
        HeapEdges {
            heap: BinaryHeap::from(entries),
        }
    }
}

/// Edge wrapper whose ordering is inverted on weight, so the max-heap
/// `BinaryHeap` surfaces the lightest edge first.
#[derive(Debug, Clone, Copy)]
struct Lightest<W>(Edge<W>);

impl<W: Weight> PartialEq for Lightest<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: Weight> Eq for Lightest<W> {}

impl<W: Weight> Ord for Lightest<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_weights(&self.0.weight, &other.0.weight).reverse()
    }
}

impl<W: Weight> PartialOrd for Lightest<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lazily drains a heap of edges in non-decreasing weight order.
#[derive(Debug, Clone)]
pub struct HeapEdges<W> {
    heap: BinaryHeap<Lightest<W>>,
}

impl<W: Weight> Iterator for HeapEdges<W> {
    type Item = Edge<W>;

    fn next(&mut self) -> Option<Edge<W>> {
        self.heap.pop().map(|Lightest(edge)| edge)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<W: Weight> ExactSizeIterator for HeapEdges<W> {}
