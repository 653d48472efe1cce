//-------------------------------------------------------
// Disjoint Set Forest (Union-Find)
//-------------------------------------------------------
use std::marker::PhantomData;

use crate::error::{Error, Result};

/// How a forest resolves roots and links two components together.
///
/// Both functions are only ever called with indices already checked against
/// the forest's length, and `link` only with two distinct roots.
pub trait UnionStrategy {
    fn find_root(parent: &mut [usize], x: usize) -> usize;
    fn link(parent: &mut [usize], size: &mut [usize], root_x: usize, root_y: usize);
}

/// Path compression on `find`, union by size on `link`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BySize;

/// Plain parent walks and unbalanced links. Repeated unions can build long
/// chains, which is what makes it useful as a baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct Naive;

impl UnionStrategy for BySize {
    fn find_root(parent: &mut [usize], x: usize) -> usize {
        let mut root = x;
        while parent[root] != root {
            root = parent[root];
        }

        // Second pass: point everything on the path straight at the root.
        let mut node = x;
        while node != root {
            let next = parent[node];
            parent[node] = root;
            node = next;
        }

        root
    }

    fn link(parent: &mut [usize], size: &mut [usize], root_x: usize, root_y: usize) {
        // Ties keep `root_x` on top.
        let (larger, smaller) = if size[root_x] < size[root_y] {
            (root_y, root_x)
        } else {
            (root_x, root_y)
        };
        parent[smaller] = larger;
        size[larger] += size[smaller];
    }
}

impl UnionStrategy for Naive {
    fn find_root(parent: &mut [usize], x: usize) -> usize {
        let mut root = x;
        while parent[root] != root {
            root = parent[root];
        }
        root
    }

    fn link(parent: &mut [usize], _size: &mut [usize], root_x: usize, root_y: usize) {
        parent[root_y] = root_x;
    }
}

/// A partition of `0..n` into disjoint components.
///
/// Every element starts as its own singleton root. The forest is meant to be
/// built fresh for a single computation and dropped afterwards.
#[derive(Debug, Clone)]
pub struct DisjointSetForest<S = BySize> {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
    strategy: PhantomData<S>,
}

impl<S: UnionStrategy> DisjointSetForest<S> {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            components: n,
            strategy: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint components currently in the forest.
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Stored parent of `x`. Equal to `x` for roots.
    pub fn parent(&self, x: usize) -> Result<usize> {
        self.check(x)?;
        Ok(self.parent[x])
    }

    pub fn find(&mut self, x: usize) -> Result<usize> {
        self.check(x)?;
        Ok(S::find_root(&mut self.parent, x))
    }

    /// Merges the components of `x` and `y`. Returns `false` when they were
    /// already the same component, in which case nothing changes.
    pub fn union(&mut self, x: usize, y: usize) -> Result<bool> {
        let root_x = self.find(x)?;
        let root_y = self.find(y)?;
        self.merge_roots(root_x, root_y)
    }

    /// Links two roots the caller already resolved with [`Self::find`],
    /// skipping the extra lookups `union` would do.
    pub fn merge_roots(&mut self, root_x: usize, root_y: usize) -> Result<bool> {
        self.check(root_x)?;
        self.check(root_y)?;
        debug_assert_eq!(self.parent[root_x], root_x, "{root_x} is not a root");
        debug_assert_eq!(self.parent[root_y], root_y, "{root_y} is not a root");

        if root_x == root_y {
            return Ok(false);
        }
        S::link(&mut self.parent, &mut self.size, root_x, root_y);
        self.components -= 1;
        Ok(true)
    }

    pub fn connected(&mut self, x: usize, y: usize) -> Result<bool> {
        Ok(self.find(x)? == self.find(y)?)
    }

    fn check(&self, x: usize) -> Result<()> {
        if x < self.parent.len() {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                index: x,
                len: self.parent.len(),
            })
        }
    }
}

impl DisjointSetForest<BySize> {
    /// Number of elements sharing a component with `x`. Only the by-size
    /// forest keeps sizes up to date.
    pub fn component_size(&mut self, x: usize) -> Result<usize> {
        let root = self.find(x)?;
        Ok(self.size[root])
    }
}
