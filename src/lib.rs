// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Counting digraphs with a single global sink.
//!
//! Given a digraph `G` on `n` vertices, choose a set of *feeder* vertices, add
//! a new vertex `n` and an edge from every feeder to it. The new vertex is the
//! unique global sink (reachable from everywhere, and the only vertex with no
//! way out) exactly when every leaf strongly-connected component of `G` contains
//! a feeder. This crate counts the feeder sets, up to the automorphisms of `G`,
//! and can write out the extended digraphs.
//!
//! Run over a file holding every digraph on `n` vertices up to isomorphism,
//! this counts (and generates) the digraphs on `n + 1` vertices with a single
//! global sink, up to isomorphism.
//!
//! # Architecture
//!
//! ## Per digraph
//!
//! 1. **SCC decomposition** ([`scc`]): Tarjan with an explicit worklist marks
//!    the leaf components.
//! 2. **Canonical colouring search** ([`search`]): 2-colourings (colour 1 =
//!    feeder) generated one per automorphism orbit. The automorphism group
//!    comes from an [`symmetry::AutomorphismOracle`]; canonicity is tested by
//!    walking the group's elements ([`symmetry`]).
//! 3. **Admissibility filter** ([`extension`]): keeps colourings with a feeder
//!    in every leaf component and builds the extended digraph.
//!
//! ## Around it
//!
//! - [`codec`]: digraph6/graph6 input, digraph6 output
//! - [`driver`]: runs the pipeline over input files and reports totals
//! - [`config`]: command-line configuration
//! - [`state`]: search statistics
//! - [`errors`]: the crate's error type
//!
//! # Example
//!
//! ```
//! use gsinks::driver::BatchDriver;
//! use gsinks::graph::Digraph;
//! use gsinks::symmetry::BacktrackOracle;
//!
//! // The three digraphs on two vertices: 1 + 2 + 2 extensions.
//! let graphs = vec![
//!     Digraph::new(2),
//!     Digraph::from_edges(2, &[(0, 1)]),
//!     Digraph::from_edges(2, &[(0, 1), (1, 0)]),
//! ];
//! let mut driver = BatchDriver::new(BacktrackOracle);
//! assert_eq!(driver.count_digraphs(graphs).unwrap(), 5);
//! ```
//!
//! # Capacity
//!
//! Digraphs are bit-packed with a compile-time bound `MAXN` on the vertex count
//! (32 by default; see [`graph::constants`]).

pub mod codec;
pub mod config;
pub mod driver;
pub mod errors;
pub mod extension;
pub mod graph;
pub mod scc;
pub mod search;
pub mod state;
pub mod symmetry;

// Re-export commonly used types
pub use driver::BatchDriver;
pub use errors::{GsinksError, Result};
pub use graph::{Colouring, Digraph, VertexSet};
pub use search::{ColourBudget, ColouringSearch};
