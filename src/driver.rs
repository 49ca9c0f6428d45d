// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Batch driver: runs the per-digraph pipeline over input files.
//!
//! For each digraph: decompose into SCCs, run the canonical colouring search
//! with no budget restriction, and pass every canonical colouring through the
//! admissibility filter. The digraph's result is the number of colourings the
//! filter admits; a file's result is the sum over its digraphs.

use std::fs::File;
use std::io::{BufReader, Write};
use std::iter;
use std::path::Path;

use tracing::{debug, info};

use crate::codec::{Digraph6Reader, Digraph6Writer};
use crate::config::RunConfig;
use crate::errors::{GsinksError, Result};
use crate::extension::{ExtensionSink, SinkFilter};
use crate::graph::Digraph;
use crate::scc::decompose;
use crate::search::{ColourBudget, ColouringSearch};
use crate::state::Statistics;
use crate::symmetry::{AutomorphismOracle, BacktrackOracle};

pub struct BatchDriver<'s, O = BacktrackOracle> {
    oracle: O,
    sink: Option<&'s mut dyn ExtensionSink>,
    statistics: Statistics,
}

impl<'s, O: AutomorphismOracle> BatchDriver<'s, O> {
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            sink: None,
            statistics: Statistics::new(),
        }
    }

    /// Send every extended digraph to `sink`.
    pub fn with_sink(mut self, sink: &'s mut dyn ExtensionSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Counters accumulated over everything processed so far.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Number of admissible canonical colourings of one digraph.
    pub fn count_digraph(&mut self, graph: &Digraph) -> Result<u64> {
        let components = decompose(graph);
        let mut search = ColouringSearch::new(
            graph,
            &self.oracle,
            ColourBudget::all(graph.order()),
            0,
        )?;

        let mut filter = SinkFilter::new(graph, &components);
        if let Some(sink) = self.sink.as_deref_mut() {
            filter = filter.with_sink(sink);
        }
        search.for_each_accepted(|colouring| filter.offer(colouring))?;

        let count = filter.count();
        debug!(
            n = graph.order(),
            components = components.len(),
            leaves = components.leaf_count(),
            group_order = search.group_order(),
            count,
            "digraph done"
        );
        self.statistics.merge(search.statistics());
        self.statistics.merge(filter.statistics());
        Ok(count)
    }

    /// Total over a sequence of digraphs; stops at the first error.
    pub fn count_digraphs<I>(&mut self, graphs: I) -> Result<u64>
    where
        I: IntoIterator<Item = Result<Digraph>>,
    {
        let mut total = 0;
        for graph in graphs {
            total += self.count_digraph(&graph?)?;
        }
        Ok(total)
    }

    /// Total over every digraph in a digraph6 file.
    pub fn count_file(&mut self, path: &Path) -> Result<u64> {
        let file = File::open(path).map_err(|source| GsinksError::InputFile {
            path: path.to_path_buf(),
            source,
        })?;
        let total = self.count_digraphs(Digraph6Reader::new(BufReader::new(file)))?;
        info!(path = %path.display(), total, "file done");
        Ok(total)
    }

    /// Total for generated digraphs on `n` vertices.
    ///
    /// `n = 1` needs no input file: the only digraph to extend is the empty
    /// one.
    pub fn count_vertices(&mut self, config: &RunConfig, n: usize) -> Result<u64> {
        if n == 1 {
            let total = self.count_digraphs(iter::once(Digraph::new(0)))?;
            info!(total, "no input file needed for one vertex");
            return Ok(total);
        }
        self.count_file(&config.input_path(n))
    }
}

/// Process every vertex count the configuration asks for, writing generated
/// digraphs to `output` (when enabled) and one total per count to `report`
/// (unless quiet). Returns the totals.
pub fn run<W, R>(config: &RunConfig, output: W, mut report: R) -> Result<Vec<u64>>
where
    W: Write,
    R: Write,
{
    let mut writer = Digraph6Writer::new(output);
    let mut driver = BatchDriver::new(BacktrackOracle);
    if config.emit_digraphs {
        driver = driver.with_sink(&mut writer);
    }

    let mut totals = Vec::new();
    for n in config.vertex_counts() {
        let total = driver.count_vertices(config, n)?;
        if !config.quiet {
            writeln!(report, "{}", total)?;
        }
        totals.push(total);
    }
    debug!(statistics = %driver.statistics(), "run done");
    drop(driver);
    writer.flush()?;
    Ok(totals)
}
