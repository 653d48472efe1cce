//! Kruskal minimum spanning trees over 2D point sets, with a disjoint set
//! forest that can run with or without path compression and union by size,
//! and edges fed either from a sorted array or a heap.
//!
//! The [`sweep`] module wraps the four combinations in a timing harness over
//! random complete graphs.

pub mod algo;
pub mod error;
pub mod graph;
pub mod sweep;

pub use error::{Error, Result};
