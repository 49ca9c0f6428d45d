// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compile-time capacity constants for the bit-packed adjacency model.
//!
//! MAXN (the largest supported vertex count) can be configured at compile time
//! via cargo features. Everything else is derived from it.
//!
//! # Supported MAXN values
//!
//! - 32: **default**, enough for every published digraph data file
//! - 64: `--features maxn_64`
//! - 128: `--features maxn_128` (two words per adjacency row)
//!
//! # Example
//!
//! ```bash
//! # Default: MAXN=32
//! cargo build
//!
//! # Build for MAXN=64
//! cargo build --features maxn_64
//! ```

/// Maximum number of vertices in any digraph, including the added sink.
#[cfg(not(any(feature = "maxn_64", feature = "maxn_128")))]
pub const MAXN: usize = 32;

#[cfg(all(feature = "maxn_64", not(feature = "maxn_128")))]
pub const MAXN: usize = 64;

#[cfg(feature = "maxn_128")]
pub const MAXN: usize = 128;

/// Number of bits in one adjacency word.
pub const WORDSIZE: usize = u64::BITS as usize;

/// Number of words needed to hold a set of MAXN vertices.
pub const MAXM: usize = MAXN.div_ceil(WORDSIZE);

/// Number of colours available to the colouring search.
///
/// Colour 1 marks a vertex that feeds the new sink; colour 0 does not.
pub const NUM_COLOURS: u8 = 2;

/// Number of words a row needs for a digraph on `n` vertices.
pub const fn words_for(n: usize) -> usize {
    if n == 0 {
        1
    } else {
        n.div_ceil(WORDSIZE)
    }
}
