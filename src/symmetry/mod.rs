// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Symmetry of digraphs and canonicity of colourings.
//!
//! ## Module Structure
//!
//! - `permutation`: Permutations of `0..n`
//! - `group`: Stabilizer chains, group order, orbits and element enumeration
//! - `ordering`: Twin runs and the `prev`/`weight` constraints they give
//! - `oracle`: The automorphism oracle interface and a backtracking reference oracle
//! - `canonical`: Orbit-maximality of colourings with fail-level reporting

pub mod canonical;
pub mod group;
pub mod oracle;
pub mod ordering;
pub mod permutation;

pub use canonical::{check_permutation, Canonicity, OrbitCanonicity};
pub use group::PermutationGroup;
pub use oracle::{AutomorphismOracle, Automorphisms, BacktrackOracle, SymmetryAnalysis};
pub use ordering::VertexOrdering;
pub use permutation::Permutation;
