// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! VertexSet type for representing sets of vertices as bitsets.
//!
//! A VertexSet is the row type of the adjacency model: bit `v` is set if vertex
//! `v` is in the set. Since MAXN can exceed 64 (with the `maxn_128` feature),
//! the set is an array of MAXM u64 words.
//!
//! # Examples
//!
//! ```
//! use gsinks::graph::VertexSet;
//!
//! let mut set = VertexSet::empty();
//! set.insert(0);
//! set.insert(5);
//!
//! assert_eq!(set.len(), 2);
//! assert!(set.contains(5));
//! assert_eq!(set.next_element(1), Some(5));
//! assert_eq!(set.next_element(6), None);
//! ```

use crate::graph::constants::{MAXM, MAXN, WORDSIZE};
use std::fmt;

/// A set of vertices represented as a bitset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VertexSet([u64; MAXM]);

impl VertexSet {
    /// Create an empty vertex set.
    pub const fn empty() -> Self {
        Self([0; MAXM])
    }

    /// Create the set `{0, 1, ..., n-1}`.
    ///
    /// # Panics
    ///
    /// Panics if `n > MAXN`.
    pub fn first(n: usize) -> Self {
        assert!(n <= MAXN, "vertex count out of range: {} > {}", n, MAXN);
        let mut words = [0u64; MAXM];
        let complete_words = n / WORDSIZE;
        for word in words.iter_mut().take(complete_words) {
            *word = u64::MAX;
        }
        let remaining_bits = n % WORDSIZE;
        if remaining_bits > 0 {
            words[complete_words] = (1u64 << remaining_bits) - 1;
        }
        Self(words)
    }

    /// Create a vertex set from a slice of vertices.
    pub fn from_vertices(vertices: &[usize]) -> Self {
        let mut set = Self::empty();
        for &v in vertices {
            set.insert(v);
        }
        set
    }

    #[inline]
    fn locate(v: usize) -> (usize, usize) {
        assert!(v < MAXN, "vertex out of range: {} >= {}", v, MAXN);
        (v / WORDSIZE, v % WORDSIZE)
    }

    /// Check if the set contains vertex `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v >= MAXN`.
    pub fn contains(&self, v: usize) -> bool {
        let (word, bit) = Self::locate(v);
        (self.0[word] >> bit) & 1 != 0
    }

    /// Insert vertex `v`.
    pub fn insert(&mut self, v: usize) {
        let (word, bit) = Self::locate(v);
        self.0[word] |= 1u64 << bit;
    }

    /// Remove vertex `v`.
    pub fn remove(&mut self, v: usize) {
        let (word, bit) = Self::locate(v);
        self.0[word] &= !(1u64 << bit);
    }

    /// Flip the membership of vertex `v`.
    pub fn toggle(&mut self, v: usize) {
        let (word, bit) = Self::locate(v);
        self.0[word] ^= 1u64 << bit;
    }

    /// Number of vertices in the set (population count).
    pub fn len(&self) -> usize {
        self.0.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// The underlying bitset words.
    pub fn words(&self) -> &[u64; MAXM] {
        &self.0
    }

    /// Compute the union of two vertex sets.
    pub fn union(&self, other: &Self) -> Self {
        let mut result = [0u64; MAXM];
        for (i, word) in result.iter_mut().enumerate() {
            *word = self.0[i] | other.0[i];
        }
        Self(result)
    }

    /// Compute the difference of two vertex sets (self - other).
    pub fn difference(&self, other: &Self) -> Self {
        let mut result = [0u64; MAXM];
        for (i, word) in result.iter_mut().enumerate() {
            *word = self.0[i] & !other.0[i];
        }
        Self(result)
    }

    /// True iff the two sets share a vertex.
    pub fn intersects(&self, other: &Self) -> bool {
        self.0.iter().zip(other.0.iter()).any(|(a, b)| a & b != 0)
    }

    /// In-place union.
    pub fn union_with(&mut self, other: &Self) {
        for (word, &theirs) in self.0.iter_mut().zip(other.0.iter()) {
            *word |= theirs;
        }
    }

    /// Smallest element `>= from`, or `None` when there is none.
    pub fn next_element(&self, from: usize) -> Option<usize> {
        if from >= MAXN {
            return None;
        }
        let mut word_idx = from / WORDSIZE;
        let mut word = self.0[word_idx] & (u64::MAX << (from % WORDSIZE));
        loop {
            if word != 0 {
                return Some(word_idx * WORDSIZE + word.trailing_zeros() as usize);
            }
            word_idx += 1;
            if word_idx >= MAXM {
                return None;
            }
            word = self.0[word_idx];
        }
    }

    /// Iterate over the vertices in ascending order.
    pub fn iter(&self) -> VertexSetIter<'_> {
        VertexSetIter { set: self, next: 0 }
    }
}

/// Iterator over the vertices of a VertexSet.
pub struct VertexSetIter<'a> {
    set: &'a VertexSet,
    next: usize,
}

impl Iterator for VertexSetIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.set.next_element(self.next)?;
        self.next = v + 1;
        Some(v)
    }
}

impl<'a> IntoIterator for &'a VertexSet {
    type Item = usize;
    type IntoIter = VertexSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<usize> for VertexSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::empty();
        for v in iter {
            set.insert(v);
        }
        set
    }
}

impl fmt::Display for VertexSet {
    /// Format a vertex set as "{0,3,5}".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "}}")
    }
}
