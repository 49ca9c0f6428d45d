// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Run-time configuration, parsed from the command line.
//!
//! Input digraphs come from files named `dig{n}.d6` (or `digl{n}.d6` for the
//! self-loop variants) in the data directory, each holding every digraph on
//! `n` vertices up to isomorphism. Asking for `N` vertices reads the file for
//! `N - 1`, since the extension adds one.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use clap::Parser;

use crate::graph::MAXN;

/// Vertex counts processed when none is given.
pub const DEFAULT_VERTEX_COUNTS: RangeInclusive<usize> = 2..=10;

const INFILE_PREFIX: &str = "dig";
const INFILE_LOOP_MODIFIER: &str = "l";
const INFILE_SUFFIX: &str = "d6";

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "gsinks",
    version,
    about = "Count digraphs with a single global sink, up to isomorphism"
)]
pub struct RunConfig {
    /// Suppress the per-file totals on stderr
    #[arg(short = 'q')]
    pub quiet: bool,

    /// Write every generated digraph to stdout in digraph6
    #[arg(short = 'd')]
    pub emit_digraphs: bool,

    /// Read the digraphs with self-loops (digl*.d6)
    #[arg(short = 'l')]
    pub loops: bool,

    /// Vertex count of the generated digraphs; 2 to 10 in turn if omitted
    #[arg(value_name = "N", value_parser = clap::value_parser!(u64).range(1..=MAXN as u64))]
    pub vertex_count: Option<u64>,

    /// Directory holding the dig*.d6 input files
    #[arg(long, env = "GSINKS_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,
}

impl RunConfig {
    /// Configuration for the given data directory and all default settings.
    pub fn for_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            quiet: false,
            emit_digraphs: false,
            loops: false,
            vertex_count: None,
            data_dir: data_dir.into(),
        }
    }

    /// The vertex counts of the generated digraphs, in processing order.
    pub fn vertex_counts(&self) -> Vec<usize> {
        match self.vertex_count {
            Some(n) => vec![n as usize],
            None => DEFAULT_VERTEX_COUNTS.collect(),
        }
    }

    /// Input file for generated digraphs on `n` vertices (`n >= 2`).
    pub fn input_path(&self, n: usize) -> PathBuf {
        let modifier = if self.loops { INFILE_LOOP_MODIFIER } else { "" };
        self.data_dir.join(format!(
            "{}{}{}.{}",
            INFILE_PREFIX,
            modifier,
            n - 1,
            INFILE_SUFFIX
        ))
    }
}
