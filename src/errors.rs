// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types.
//!
//! Every failure here is fatal for the run: malformed input, capacity overflow
//! and inconsistent oracle answers all abort with a nonzero status. Colourings
//! that are rejected by the search or the admissibility filter are not errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::graph::constants::MAXN;

/// Why a single digraph6/graph6 record could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("empty record")]
    Empty,

    #[error("byte {byte:#04x} at offset {offset} is outside the printable range 63..=126")]
    InvalidByte { byte: u8, offset: usize },

    #[error("record ends after {found} of {expected} bytes")]
    Truncated { expected: usize, found: usize },

    #[error("{extra} unexpected trailing bytes")]
    TrailingBytes { extra: usize },

    #[error("{n} vertices exceeds MAXN = {capacity}", capacity = MAXN)]
    TooManyVertices { n: usize },
}

#[derive(Debug, Error)]
pub enum GsinksError {
    #[error("MAXN exceeded: {n} vertices requested, capacity is {capacity}", capacity = MAXN)]
    CapacityExceeded { n: usize },

    #[error("line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: DecodeError,
    },

    #[error("cannot open input file {}: {source}", .path.display())]
    InputFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("automorphism oracle answered inconsistently: {reason}")]
    OracleInconsistency { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, GsinksError>;
