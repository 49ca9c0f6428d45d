// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bit-packed adjacency model.
//!
//! This module contains the data types every other component works on:
//! - VertexSet: fixed-capacity bitset over vertices
//! - Digraph: one outgoing-adjacency VertexSet per vertex
//! - Colouring: 0/1 assignment to the vertices of a digraph

pub mod colouring;
pub mod constants;
pub mod digraph;
pub mod vertex_set;

// Re-export for convenience
pub use colouring::Colouring;
pub use constants::*;
pub use digraph::Digraph;
pub use vertex_set::VertexSet;
