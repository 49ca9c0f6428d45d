// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Strongly-connected component decomposition.
//!
//! Tarjan's algorithm partitions a digraph into SCCs and, as a by-product,
//! closes them in reverse topological order of the condensation. While each
//! component is closed we also decide whether it is a *leaf* of the
//! condensation: a component with no edge leaving it.
//!
//! # Algorithm
//!
//! Each vertex gets a discovery index and a lowlink. The depth-first traversal
//! is driven by an explicit worklist of `(vertex, cursor)` frames, so the depth
//! of the digraph never touches the call stack. When a vertex finishes with
//! `lowlink == index`, the vertex stack is popped down to it: that is one SCC.
//!
//! Leafness: while popping, the out-neighbours ("descendants") of the members
//! are accumulated. The component is a leaf when nothing outside it remains.
//! The very first component closed is marked a leaf without looking: nothing
//! that could be its successor has been closed yet, so it cannot have one.
//!
//! # Example
//!
//! ```
//! use gsinks::graph::Digraph;
//! use gsinks::scc::decompose;
//!
//! // 0 -> 1
//! let g = Digraph::from_edges(2, &[(0, 1)]).unwrap();
//! let sccs = decompose(&g);
//!
//! assert_eq!(sccs.len(), 2);
//! let leaves: Vec<_> = sccs.leaves().map(|scc| scc.vertices.to_string()).collect();
//! assert_eq!(leaves, vec!["{1}"]);
//! ```

use crate::graph::{Digraph, VertexSet};

/// One strongly-connected component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scc {
    /// Member vertices.
    pub vertices: VertexSet,
    /// Number of members.
    pub size: usize,
    /// True iff no edge leaves the component.
    pub is_leaf: bool,
}

/// The SCCs of one digraph, in the order they were closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SccDecomposition {
    components: Vec<Scc>,
    component_of: Vec<usize>,
}

impl SccDecomposition {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[Scc] {
        &self.components
    }

    /// Index (in closing order) of the component containing `v`.
    pub fn component_of(&self, v: usize) -> usize {
        self.component_of[v]
    }

    /// The leaf components.
    pub fn leaves(&self) -> impl Iterator<Item = &Scc> + '_ {
        self.components.iter().filter(|scc| scc.is_leaf)
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }
}

/// Decompose `graph` into strongly-connected components.
pub fn decompose(graph: &Digraph) -> SccDecomposition {
    Tarjan::new(graph).run()
}

/// A suspended visit of one vertex: how far through its adjacency row we are.
#[derive(Debug, Clone, Copy)]
struct Frame {
    vertex: usize,
    cursor: usize,
}

/// Per-digraph traversal state.
struct Tarjan<'g> {
    graph: &'g Digraph,
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    descendants: Vec<VertexSet>,
    stack: Vec<usize>,
    next_index: usize,
    components: Vec<Scc>,
    component_of: Vec<usize>,
}

impl<'g> Tarjan<'g> {
    fn new(graph: &'g Digraph) -> Self {
        let n = graph.order();
        Self {
            graph,
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            descendants: vec![VertexSet::empty(); n],
            stack: Vec::with_capacity(n),
            next_index: 0,
            components: Vec::with_capacity(n),
            component_of: vec![0; n],
        }
    }

    fn run(mut self) -> SccDecomposition {
        for v in 0..self.graph.order() {
            if self.index[v].is_none() {
                self.strong_connect(v);
            }
        }
        SccDecomposition {
            components: self.components,
            component_of: self.component_of,
        }
    }

    fn discover(&mut self, v: usize) -> Frame {
        self.index[v] = Some(self.next_index);
        self.lowlink[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
        Frame {
            vertex: v,
            cursor: 0,
        }
    }

    fn strong_connect(&mut self, root: usize) {
        let mut worklist = vec![self.discover(root)];

        while let Some(frame) = worklist.last_mut() {
            let v = frame.vertex;
            match self.graph.out_neighbours(v).next_element(frame.cursor) {
                Some(w) => {
                    frame.cursor = w + 1;
                    self.descendants[v].insert(w);
                    match self.index[w] {
                        None => {
                            let child = self.discover(w);
                            worklist.push(child);
                        }
                        Some(w_index) if self.on_stack[w] => {
                            self.lowlink[v] = self.lowlink[v].min(w_index);
                        }
                        Some(_) => {}
                    }
                }
                None => {
                    worklist.pop();
                    if Some(self.lowlink[v]) == self.index[v] {
                        self.close_component(v);
                    }
                    if let Some(parent) = worklist.last() {
                        let p = parent.vertex;
                        self.lowlink[p] = self.lowlink[p].min(self.lowlink[v]);
                    }
                }
            }
        }
    }

    /// Pop the vertex stack down to `v`, recording one completed component.
    fn close_component(&mut self, v: usize) {
        let component = self.components.len();
        let mut members = VertexSet::empty();
        let mut reach = VertexSet::empty();

        while let Some(w) = self.stack.pop() {
            self.on_stack[w] = false;
            members.insert(w);
            reach.union_with(&self.descendants[w]);
            self.component_of[w] = component;
            if w == v {
                break;
            }
        }

        let escapes = reach.difference(&members);
        let is_leaf = if self.components.is_empty() {
            debug_assert!(
                escapes.is_empty(),
                "first closed component {} has edges to {}",
                members,
                escapes
            );
            true
        } else {
            escapes.is_empty()
        };

        self.components.push(Scc {
            vertices: members,
            size: members.len(),
            is_leaf,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_sets(sccs: &SccDecomposition) -> Vec<VertexSet> {
        sccs.leaves().map(|scc| scc.vertices).collect()
    }

    #[test]
    fn test_single_vertex_is_leaf() {
        let g = Digraph::new(1).unwrap();
        let sccs = decompose(&g);
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs.components()[0].size, 1);
        assert!(sccs.components()[0].is_leaf);
    }

    #[test]
    fn test_empty_digraph_has_no_components() {
        let g = Digraph::new(0).unwrap();
        assert!(decompose(&g).is_empty());
    }

    #[test]
    fn test_single_edge() {
        let g = Digraph::from_edges(2, &[(0, 1)]).unwrap();
        let sccs = decompose(&g);
        assert_eq!(sccs.len(), 2);
        assert!(sccs.components().iter().all(|scc| scc.size == 1));
        assert_eq!(leaf_sets(&sccs), vec![VertexSet::from_vertices(&[1])]);
    }

    #[test]
    fn test_three_cycle_feeding_sink() {
        let g = Digraph::from_edges(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
        let sccs = decompose(&g);
        assert_eq!(sccs.len(), 2);
        assert_eq!(leaf_sets(&sccs), vec![VertexSet::from_vertices(&[3])]);

        let cycle = sccs.component_of(0);
        assert_eq!(sccs.component_of(1), cycle);
        assert_eq!(sccs.component_of(2), cycle);
        assert_eq!(sccs.components()[cycle].size, 3);
        assert!(!sccs.components()[cycle].is_leaf);
    }

    #[test]
    fn test_self_loop_does_not_escape() {
        let g = Digraph::from_edges(2, &[(0, 0), (1, 1), (1, 0)]).unwrap();
        let sccs = decompose(&g);
        assert_eq!(leaf_sets(&sccs), vec![VertexSet::from_vertices(&[0])]);
    }

    #[test]
    fn test_first_closed_component_is_a_true_leaf() {
        // Sink reached late in the traversal, after a long chain and a back edge.
        let g = Digraph::from_edges(
            6,
            &[(0, 1), (1, 2), (2, 1), (2, 3), (3, 4), (4, 3), (0, 5), (5, 4)],
        )
        .unwrap();
        let sccs = decompose(&g);
        let first = &sccs.components()[0];
        for v in &first.vertices {
            assert!(g.out_neighbours(v).difference(&first.vertices).is_empty());
        }
        assert!(first.is_leaf);
    }

    #[test]
    fn test_partition_property() {
        let g = Digraph::from_edges(
            7,
            &[(0, 1), (1, 0), (1, 2), (3, 4), (4, 5), (5, 3), (5, 6), (6, 2)],
        )
        .unwrap();
        let sccs = decompose(&g);

        let mut seen = VertexSet::empty();
        for scc in sccs.components() {
            assert!(seen.difference(&scc.vertices) == seen);
            assert_eq!(scc.vertices.len(), scc.size);
            seen.union_with(&scc.vertices);
        }
        assert_eq!(seen, VertexSet::first(7));

        for v in 0..7 {
            assert!(sccs.components()[sccs.component_of(v)].vertices.contains(v));
        }
    }

    #[test]
    fn test_leaf_iff_no_edge_leaves() {
        let g = Digraph::from_edges(
            7,
            &[(0, 1), (1, 0), (1, 2), (3, 4), (4, 5), (5, 3), (5, 6), (6, 2)],
        )
        .unwrap();
        let sccs = decompose(&g);
        for scc in sccs.components() {
            let leaves_component = scc
                .vertices
                .iter()
                .any(|v| !g.out_neighbours(v).difference(&scc.vertices).is_empty());
            assert_eq!(scc.is_leaf, !leaves_component);
        }
        assert_eq!(leaf_sets(&sccs), vec![VertexSet::from_vertices(&[2])]);
    }

    #[test]
    fn test_long_path_does_not_recurse() {
        use crate::graph::MAXN;
        let edges: Vec<_> = (0..MAXN - 1).map(|v| (v, v + 1)).collect();
        let g = Digraph::from_edges(MAXN, &edges).unwrap();
        let sccs = decompose(&g);
        assert_eq!(sccs.len(), MAXN);
        assert_eq!(sccs.leaf_count(), 1);
        assert!(sccs.components()[0].vertices.contains(MAXN - 1));
    }
}
