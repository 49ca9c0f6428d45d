// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Vertex ordering constraints for the colouring search.
//!
//! Two vertices are *twins* when swapping them is an automorphism of the
//! loopless digraph and they agree on having a self-loop. Among a run of
//! twins, any colouring can be rearranged so colours are non-increasing along
//! the run, so the search only has to try those. Each vertex records the most
//! recent earlier twin (`prev`) and a `weight` counting its position in the run.
//!
//! The weights also split the vertices into cells for the automorphism oracle:
//! the group it returns must preserve weight. Swapping twins is then left to
//! the ordering constraint, and the group left over is usually far smaller.
//!
//! After the oracle answers, one more constraint comes from its orbits: the
//! first vertex `j` that is the representative of a non-trivial orbit is fixed
//! by nothing before it, so every later member of its orbit may be given
//! `prev = j`.

use crate::graph::{Digraph, VertexSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexOrdering {
    /// Earlier vertex whose colour bounds this vertex's colour from above.
    pub prev: Vec<Option<usize>>,
    /// Position within the run of twins, offset by the fixed prefix.
    pub weight: Vec<usize>,
}

impl VertexOrdering {
    /// Twin ordering for `graph`. Vertices `0..nfixed` form a separate region:
    /// twins are only looked for within a region.
    pub fn twins(graph: &Digraph, nfixed: usize) -> Self {
        let n = graph.order();
        let (loopless, loops) = graph.without_loops();
        let converse = loopless.converse();

        let mut prev = vec![None; n];
        let mut weight = vec![0; n];

        let split = nfixed.min(n);
        for (start, stop) in [(0, split), (split, n)] {
            for i in start..stop {
                let twin = (start..i)
                    .rev()
                    .find(|&j| are_twins(&loopless, &converse, &loops, i, j));
                if let Some(j) = twin {
                    prev[i] = Some(j);
                    weight[i] = weight[j] + 1;
                }
            }
        }
        for w in weight.iter_mut().skip(split) {
            *w += split;
        }

        Self { prev, weight }
    }

    /// Tighten `prev` using the orbits of the weight-preserving group.
    ///
    /// `orbits[v]` is the smallest vertex in the orbit of `v`.
    pub fn apply_orbits(&mut self, orbits: &[usize]) {
        let Some(j) = orbits
            .iter()
            .enumerate()
            .filter(|&(i, &rep)| rep < i)
            .map(|(_, &rep)| rep)
            .min()
        else {
            return;
        };
        for i in j + 1..orbits.len() {
            if orbits[i] == j {
                self.prev[i] = Some(j);
            }
        }
    }
}

fn are_twins(graph: &Digraph, converse: &Digraph, loops: &[bool], i: usize, j: usize) -> bool {
    if loops[i] != loops[j] || graph.has_edge(i, j) != graph.has_edge(j, i) {
        return false;
    }
    let pair = VertexSet::from_vertices(&[i, j]);
    let same = |g: &Digraph| {
        g.out_neighbours(i).difference(&pair) == g.out_neighbours(j).difference(&pair)
    };
    same(graph) && same(converse)
}
