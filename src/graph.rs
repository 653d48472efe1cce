use std::fmt;

use bevy::math::{DVec2, IVec2, Vec2};
use rand::Rng;

use crate::algo::mst::{Edge, KruskalVariant, Weight};
use crate::error::{Error, Result};

/// A 2D position an edge weight can be measured between.
pub trait Point: Copy + fmt::Debug + Send + Sync {
    type Weight: Weight;

    fn squared_distance(self, other: Self) -> Self::Weight;
    fn write_coords(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl Point for Vec2 {
    type Weight = f32;

    fn squared_distance(self, other: Self) -> f32 {
        self.distance_squared(other)
    }

    fn write_coords(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl Point for DVec2 {
    type Weight = f64;

    fn squared_distance(self, other: Self) -> f64 {
        self.distance_squared(other)
    }

    fn write_coords(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl Point for IVec2 {
    type Weight = i64;

    // An i32 square overflows once coordinates differ by ~46k. Widening to
    // i64 holds for coordinates within about ±1e9.
    fn squared_distance(self, other: Self) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }

    fn write_coords(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node<P> {
    pub id: usize,
    pub position: P,
}

/// Nodes plus candidate edges, each weighted by squared Euclidean distance.
///
/// Node ids are dense indices assigned in insertion order. Edges are weighted
/// once when added and never change.
#[derive(Debug, Clone)]
pub struct Graph<P: Point> {
    nodes: Vec<Node<P>>,
    edges: Vec<Edge<P::Weight>>,
}

impl<P: Point> Graph<P> {
    /// Nodes only, no edges.
    pub fn new(positions: impl IntoIterator<Item = P>) -> Self {
        let nodes = positions
            .into_iter()
            .enumerate()
            .map(|(id, position)| Node { id, position })
            .collect();
        Self {
            nodes,
            edges: Vec::new(),
        }
    }

    /// Every unordered pair of distinct nodes, `n(n-1)/2` edges in total.
    pub fn complete(positions: impl IntoIterator<Item = P>) -> Self {
        let mut graph = Self::new(positions);
        let n = graph.nodes.len();
        graph.edges.reserve(n * n.saturating_sub(1) / 2);
        for a in 0..n {
            for b in (a + 1)..n {
                graph.push_edge(a, b);
            }
        }
        graph
    }

    /// Nodes plus exactly the listed pairs.
    pub fn with_edges(
        positions: impl IntoIterator<Item = P>,
        pairs: &[(usize, usize)],
    ) -> Result<Self> {
        let mut graph = Self::new(positions);
        for &(a, b) in pairs {
            graph.connect(a, b)?;
        }
        Ok(graph)
    }

    pub fn connect(&mut self, a: usize, b: usize) -> Result<&Edge<P::Weight>> {
        let len = self.nodes.len();
        if let Some(&index) = [a, b].iter().find(|&&ix| ix >= len) {
            return Err(Error::OutOfRange { index, len });
        }
        if a == b {
            return Err(Error::SelfLoop(a));
        }
        Ok(self.push_edge(a, b))
    }

    fn push_edge(&mut self, a: usize, b: usize) -> &Edge<P::Weight> {
        let weight = self.nodes[a]
            .position
            .squared_distance(self.nodes[b].position);
        self.edges.push(Edge::new(a, b, weight));
        &self.edges[self.edges.len() - 1]
    }

    pub fn nodes(&self) -> &[Node<P>] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge<P::Weight>] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn mst(&self, variant: KruskalVariant) -> Result<Vec<Edge<P::Weight>>> {
        variant.build(self.nodes.len(), &self.edges)
    }
}

impl Graph<DVec2> {
    /// Complete graph over `n` points drawn uniformly from the unit square.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let positions: Vec<DVec2> = (0..n)
            .map(|_| DVec2::new(rng.gen_range(0.0..=1.0), rng.gen_range(0.0..=1.0)))
            .collect();
        Self::complete(positions)
    }
}

impl<P: Point> fmt::Display for Graph<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes:")?;
        for node in &self.nodes {
            write!(f, "  node {}:", node.id)?;
            node.position.write_coords(f)?;
            writeln!(f)?;
        }
        writeln!(f, "edges:")?;
        for edge in &self.edges {
            writeln!(f, "  ({}, {})  weight: {}", edge.a, edge.b, edge.weight)?;
        }
        Ok(())
    }
}

/// Prints as a python list: `edges = [(a,b,w), ...]`.
pub struct EdgeList<'a, W>(pub &'a [Edge<W>]);

impl<W: fmt::Display> fmt::Display for EdgeList<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edges = [")?;
        for (i, edge) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({},{},{})", edge.a, edge.b, edge.weight)?;
        }
        write!(f, "]")
    }
}

/// Prints as a python list: `nodes = [(x,y), ...]`, or `nodes3 = [...]`
/// when given a suffix.
pub struct NodeList<'a, P> {
    pub nodes: &'a [Node<P>],
    pub suffix: Option<usize>,
}

impl<P: Point> fmt::Display for NodeList<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suffix {
            Some(suffix) => write!(f, "nodes{suffix} = [")?,
            None => write!(f, "nodes = [")?,
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            node.position.write_coords(f)?;
        }
        write!(f, "]")
    }
}
