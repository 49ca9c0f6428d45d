// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Automorphism oracle.
//!
//! The colouring search treats the automorphism group of a digraph as an
//! external capability: it asks once per digraph and then only uses the answer
//! as a decision procedure. [`AutomorphismOracle`] is that capability; any
//! canonical-labelling engine can stand behind it. [`BacktrackOracle`] is the
//! reference implementation shipped with the crate.
//!
//! # Example
//!
//! ```
//! use gsinks::graph::Digraph;
//! use gsinks::symmetry::{AutomorphismOracle, BacktrackOracle};
//!
//! // Directed 3-cycle: the rotations.
//! let g = Digraph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
//! let analysis = BacktrackOracle.analyse(&g, 0).unwrap();
//! assert_eq!(analysis.group.order(), 3);
//! assert_eq!(analysis.ordering.prev, vec![None, Some(0), Some(0)]);
//! ```

use tracing::trace;

use crate::errors::{GsinksError, Result};
use crate::graph::Digraph;
use crate::symmetry::{Permutation, PermutationGroup, VertexOrdering};

/// What an oracle reports about one digraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automorphisms {
    /// Group order.
    pub order: u128,
    /// Generators, each a permutation of all `n` vertices.
    pub generators: Vec<Permutation>,
    /// `orbits[v]` is the smallest vertex in the orbit of `v`.
    pub orbits: Vec<usize>,
}

/// Everything the colouring search needs to know about the symmetry of a digraph.
#[derive(Debug, Clone)]
pub struct SymmetryAnalysis {
    pub group: PermutationGroup,
    pub ordering: VertexOrdering,
}

impl SymmetryAnalysis {
    /// Group order.
    pub fn order(&self) -> u128 {
        self.group.order()
    }

    pub fn generators(&self) -> &[Permutation] {
        self.group.generators()
    }

    /// Per-vertex weights.
    pub fn weights(&self) -> &[usize] {
        &self.ordering.weight
    }
}

pub trait AutomorphismOracle {
    /// Automorphisms of `graph` (self-loops included) that map every vertex to
    /// a vertex of the same weight.
    fn automorphisms(&self, graph: &Digraph, weights: &[usize]) -> Result<Automorphisms>;

    /// Weights, group and ordering constraints for `graph`, with vertices
    /// `0..nfixed` treated as a separately ordered prefix.
    ///
    /// The oracle's answer is checked before use: a generator that is not a
    /// weight-preserving automorphism, a wrong group order or wrong orbits are
    /// reported as [`GsinksError::OracleInconsistency`].
    fn analyse(&self, graph: &Digraph, nfixed: usize) -> Result<SymmetryAnalysis> {
        let n = graph.order();
        let mut ordering = VertexOrdering::twins(graph, nfixed);
        let answer = self.automorphisms(graph, &ordering.weight)?;

        for g in &answer.generators {
            if g.len() != n {
                return Err(inconsistent(format!(
                    "generator {} acts on {} points, digraph has {}",
                    g,
                    g.len(),
                    n
                )));
            }
            if !g.is_automorphism_of(graph) {
                return Err(inconsistent(format!("generator {} is not an automorphism", g)));
            }
            if (0..n).any(|v| ordering.weight[g[v]] != ordering.weight[v]) {
                return Err(inconsistent(format!("generator {} does not preserve weights", g)));
            }
        }

        let group = PermutationGroup::from_generators(n, &answer.generators);
        if group.order() != answer.order {
            return Err(inconsistent(format!(
                "reported order {} but generators give {}",
                answer.order,
                group.order()
            )));
        }
        if group.orbits() != answer.orbits {
            return Err(inconsistent(format!(
                "reported orbits {:?} do not match the generators",
                answer.orbits
            )));
        }

        ordering.apply_orbits(&answer.orbits);
        trace!(order = answer.order, generators = answer.generators.len(), "automorphisms");
        Ok(SymmetryAnalysis { group, ordering })
    }
}

fn inconsistent(reason: String) -> GsinksError {
    GsinksError::OracleInconsistency { reason }
}

/// Reference oracle: depth-first search over weight-preserving vertex maps.
///
/// For each base vertex `b`, from the last down to the first, it looks for
/// automorphisms fixing `0..b` and sending `b` to each vertex not yet known to
/// be in the orbit of `b`. The automorphisms found form a strong generating set.
/// Fine for the small digraphs this crate is sized for; exponential in general.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackOracle;

impl AutomorphismOracle for BacktrackOracle {
    fn automorphisms(&self, graph: &Digraph, weights: &[usize]) -> Result<Automorphisms> {
        let n = graph.order();
        if weights.len() != n {
            return Err(inconsistent(format!(
                "{} weights for a digraph on {} vertices",
                weights.len(),
                n
            )));
        }
        let matcher = Matcher::new(graph, weights);

        let mut generators: Vec<Permutation> = Vec::new();
        for base in (0..n).rev() {
            for target in base + 1..n {
                if matcher.class[target] != matcher.class[base]
                    || orbit_of(base, &generators, n).contains(&target)
                {
                    continue;
                }
                if let Some(g) = matcher.find(base, target) {
                    trace!(base, target, generator = %g, "found automorphism");
                    generators.push(g);
                }
            }
        }

        let group = PermutationGroup::from_generators(n, &generators);
        Ok(Automorphisms {
            order: group.order(),
            orbits: group.orbits(),
            generators,
        })
    }
}

fn orbit_of(v: usize, generators: &[Permutation], n: usize) -> Vec<usize> {
    let mut seen = vec![false; n];
    let mut orbit = vec![v];
    seen[v] = true;
    let mut next = 0;
    while next < orbit.len() {
        let y = orbit[next];
        next += 1;
        for g in generators {
            if !seen[g[y]] {
                seen[g[y]] = true;
                orbit.push(g[y]);
            }
        }
    }
    orbit
}

/// Vertex invariants plus the extension test for partial maps.
struct Matcher<'g> {
    graph: &'g Digraph,
    /// Vertices with different classes can never be swapped.
    class: Vec<(usize, bool, usize, usize)>,
}

impl<'g> Matcher<'g> {
    fn new(graph: &'g Digraph, weights: &[usize]) -> Self {
        let converse = graph.converse();
        let class = (0..graph.order())
            .map(|v| {
                (
                    weights[v],
                    graph.has_loop(v),
                    graph.out_neighbours(v).len(),
                    converse.out_neighbours(v).len(),
                )
            })
            .collect();
        Self { graph, class }
    }

    /// An automorphism fixing `0..base` and sending `base` to `target`.
    fn find(&self, base: usize, target: usize) -> Option<Permutation> {
        let n = self.graph.order();
        let mut images = vec![usize::MAX; n];
        let mut used = vec![false; n];
        for v in 0..base {
            images[v] = v;
            used[v] = true;
        }
        if !self.consistent(&images, base, target) {
            return None;
        }
        images[base] = target;
        used[target] = true;
        if self.extend(&mut images, &mut used, base + 1) {
            Permutation::from_images(images)
        } else {
            None
        }
    }

    fn extend(&self, images: &mut [usize], used: &mut [bool], v: usize) -> bool {
        if v == images.len() {
            return true;
        }
        for w in 0..images.len() {
            if used[w] || self.class[w] != self.class[v] || !self.consistent(images, v, w) {
                continue;
            }
            images[v] = w;
            used[w] = true;
            if self.extend(images, used, v + 1) {
                return true;
            }
            used[w] = false;
        }
        images[v] = usize::MAX;
        false
    }

    /// Would mapping `v -> w` agree with every edge between `v` and the
    /// vertices `0..v` already mapped?
    fn consistent(&self, images: &[usize], v: usize, w: usize) -> bool {
        (0..v).all(|u| {
            let image = images[u];
            self.graph.has_edge(u, v) == self.graph.has_edge(image, w)
                && self.graph.has_edge(v, u) == self.graph.has_edge(w, image)
        })
    }
}
