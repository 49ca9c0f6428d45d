// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bit-packed digraph.
//!
//! A digraph on `n <= MAXN` vertices stores one outgoing-adjacency
//! [`VertexSet`] per vertex. Self-loops live in the adjacency rows like any
//! other edge; [`Digraph::without_loops`] splits them off into per-vertex flags
//! for analyses that must not see them.

use crate::errors::{GsinksError, Result};
use crate::graph::constants::{words_for, MAXN};
use crate::graph::VertexSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digraph {
    rows: Vec<VertexSet>,
}

impl Digraph {
    /// Create a digraph on `n` vertices with no edges.
    pub fn new(n: usize) -> Result<Self> {
        if n > MAXN {
            return Err(GsinksError::CapacityExceeded { n });
        }
        Ok(Self {
            rows: vec![VertexSet::empty(); n],
        })
    }

    /// Create a digraph on `n` vertices with the given directed edges.
    ///
    /// # Panics
    ///
    /// Panics if an endpoint is not below `n`.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut graph = Self::new(n)?;
        for &(from, to) in edges {
            graph.add_edge(from, to);
        }
        Ok(graph)
    }

    /// Number of vertices.
    pub fn order(&self) -> usize {
        self.rows.len()
    }

    /// Number of adjacency words per row.
    pub fn word_count(&self) -> usize {
        words_for(self.order())
    }

    /// Add the edge `from -> to`.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is not a vertex of this digraph.
    pub fn add_edge(&mut self, from: usize, to: usize) {
        assert!(
            from < self.order() && to < self.order(),
            "edge ({}, {}) out of range for {} vertices",
            from,
            to,
            self.order()
        );
        self.rows[from].insert(to);
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.rows[from].contains(to)
    }

    pub fn has_loop(&self, v: usize) -> bool {
        self.rows[v].contains(v)
    }

    /// The outgoing adjacency row of `v`.
    pub fn out_neighbours(&self, v: usize) -> &VertexSet {
        &self.rows[v]
    }

    /// Total number of edges, self-loops included.
    pub fn edge_count(&self) -> usize {
        self.rows.iter().map(VertexSet::len).sum()
    }

    /// The digraph with every edge reversed.
    pub fn converse(&self) -> Self {
        let mut rows = vec![VertexSet::empty(); self.order()];
        for (from, row) in self.rows.iter().enumerate() {
            for to in row {
                rows[to].insert(from);
            }
        }
        Self { rows }
    }

    /// Split off the self-loops: returns the loopless digraph and one flag per
    /// vertex recording whether it had a loop.
    pub fn without_loops(&self) -> (Self, Vec<bool>) {
        let mut stripped = self.clone();
        let loops = (0..self.order())
            .map(|v| {
                let had_loop = self.has_loop(v);
                stripped.rows[v].remove(v);
                had_loop
            })
            .collect();
        (stripped, loops)
    }

    /// Put back self-loops previously split off by [`Digraph::without_loops`].
    pub fn with_loops(&self, loops: &[bool]) -> Self {
        let mut restored = self.clone();
        for (v, &had_loop) in loops.iter().enumerate() {
            if had_loop {
                restored.rows[v].insert(v);
            }
        }
        restored
    }

    /// A copy of this digraph with one extra vertex `n` and no edges at it.
    pub fn with_extra_vertex(&self) -> Result<Self> {
        let n = self.order() + 1;
        if n > MAXN {
            return Err(GsinksError::CapacityExceeded { n });
        }
        let mut rows = self.rows.clone();
        rows.push(VertexSet::empty());
        Ok(Self { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_oversized() {
        assert!(Digraph::new(MAXN).is_ok());
        assert!(matches!(
            Digraph::new(MAXN + 1),
            Err(GsinksError::CapacityExceeded { n }) if n == MAXN + 1
        ));
    }

    #[test]
    fn test_edges_are_directed() {
        let g = Digraph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        assert!(g.has_edge(0, 1));
        assert!(!g.has_edge(1, 0));
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.word_count(), 1);
    }

    #[test]
    fn test_converse() {
        let g = Digraph::from_edges(3, &[(0, 1), (1, 2), (2, 2)]).unwrap();
        let c = g.converse();
        assert!(c.has_edge(1, 0));
        assert!(c.has_edge(2, 1));
        assert!(c.has_loop(2));
        assert_eq!(c.converse(), g);
    }

    #[test]
    fn test_loops_round_trip() {
        let g = Digraph::from_edges(3, &[(0, 0), (0, 1), (2, 2)]).unwrap();
        let (stripped, loops) = g.without_loops();
        assert_eq!(loops, vec![true, false, true]);
        assert!(!stripped.has_loop(0));
        assert!(stripped.has_edge(0, 1));
        assert_eq!(stripped.with_loops(&loops), g);
    }

    #[test]
    fn test_with_extra_vertex() {
        let g = Digraph::from_edges(2, &[(0, 1)]).unwrap();
        let h = g.with_extra_vertex().unwrap();
        assert_eq!(h.order(), 3);
        assert!(h.has_edge(0, 1));
        assert!(h.out_neighbours(2).is_empty());

        let full = Digraph::new(MAXN).unwrap();
        assert!(full.with_extra_vertex().is_err());
    }
}
