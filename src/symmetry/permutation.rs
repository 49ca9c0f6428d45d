// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Permutations of the vertex set `0..n`.
//!
//! A permutation `p` is stored as its image list: `p[i]` is where `i` goes.
//! Composition follows the order of application: `p.then(&q)` first applies
//! `p`, then `q`.

use std::fmt;
use std::ops::Index;

use crate::graph::Digraph;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    pub fn identity(n: usize) -> Self {
        Self((0..n).collect())
    }

    /// Build a permutation from its image list, or `None` if `images` is not a
    /// bijection of `0..images.len()`.
    pub fn from_images(images: Vec<usize>) -> Option<Self> {
        let n = images.len();
        let mut seen = vec![false; n];
        for &image in &images {
            if image >= n || seen[image] {
                return None;
            }
            seen[image] = true;
        }
        Some(Self(images))
    }

    /// The transposition swapping `a` and `b`.
    pub fn transposition(n: usize, a: usize, b: usize) -> Self {
        let mut images: Vec<usize> = (0..n).collect();
        images.swap(a, b);
        Self(images)
    }

    /// Number of points acted on (the degree of the permutation).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(i, &image)| i == image)
    }

    /// Apply `self`, then `other`.
    pub fn then(&self, other: &Self) -> Self {
        debug_assert_eq!(self.len(), other.len());
        Self(self.0.iter().map(|&image| other.0[image]).collect())
    }

    pub fn inverse(&self) -> Self {
        let mut images = vec![0; self.len()];
        for (i, &image) in self.0.iter().enumerate() {
            images[image] = i;
        }
        Self(images)
    }

    /// True iff `self` maps the edge set of `graph` (loops included) onto itself.
    pub fn is_automorphism_of(&self, graph: &Digraph) -> bool {
        self.len() == graph.order()
            && (0..graph.order()).all(|v| {
                graph
                    .out_neighbours(v)
                    .iter()
                    .all(|w| graph.has_edge(self.0[v], self.0[w]))
            })
    }
}

impl Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, i: usize) -> &usize {
        &self.0[i]
    }
}

impl fmt::Display for Permutation {
    /// Format as the image list, e.g. "[1 2 0]".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, image) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", image)?;
        }
        write!(f, "]")
    }
}
