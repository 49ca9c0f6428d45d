// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Vertex colourings.
//!
//! A colouring assigns 0 or 1 to every vertex of a digraph. Vertices coloured 1
//! are the ones that will feed the new global sink.

use std::fmt;

use crate::graph::VertexSet;

/// A complete assignment of colours to the vertices `0..n`.
///
/// Colourings compare lexicographically by vertex index, which is the order the
/// canonicity test uses.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Colouring(Vec<u8>);

impl Colouring {
    pub fn new(colours: Vec<u8>) -> Self {
        Self(colours)
    }

    /// Number of coloured vertices.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// The vertices coloured 1.
    pub fn feeders(&self) -> VertexSet {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != 0)
            .map(|(v, _)| v)
            .collect()
    }

    /// Number of vertices coloured 1.
    pub fn feeder_count(&self) -> usize {
        self.0.iter().filter(|&&c| c != 0).count()
    }
}

impl From<&[u8]> for Colouring {
    fn from(colours: &[u8]) -> Self {
        Self(colours.to_vec())
    }
}

impl fmt::Display for Colouring {
    /// Format a colouring as "(0,1,1)".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}
