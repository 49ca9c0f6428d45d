// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Admissibility filter and extension builder.
//!
//! Adding a vertex `n` with an edge from every vertex coloured 1 gives a digraph
//! in which `n` is the unique global sink exactly when every leaf component of
//! the original digraph has a vertex coloured 1: every vertex reaches some leaf
//! component, and the leaves are the only places a walk can get stuck.

use std::io::Write;

use tracing::trace;

use crate::codec::Digraph6Writer;
use crate::errors::Result;
use crate::graph::{Colouring, Digraph};
use crate::scc::SccDecomposition;
use crate::state::{Counters, Statistics};

/// True iff every leaf component has a vertex coloured 1.
pub fn is_admissible(components: &SccDecomposition, colouring: &Colouring) -> bool {
    let feeders = colouring.feeders();
    components
        .leaves()
        .all(|leaf| leaf.vertices.intersects(&feeders))
}

/// The digraph with vertex `n` added and an edge `v -> n` for every `v`
/// coloured 1. Self-loops of the original are kept.
pub fn extend(graph: &Digraph, colouring: &Colouring) -> Result<Digraph> {
    let mut extended = graph.with_extra_vertex()?;
    let sink = graph.order();
    for v in colouring.feeders().iter() {
        extended.add_edge(v, sink);
    }
    Ok(extended)
}

/// Receives each extended digraph.
pub trait ExtensionSink {
    fn accept(&mut self, extended: &Digraph) -> Result<()>;
}

impl ExtensionSink for Vec<Digraph> {
    fn accept(&mut self, extended: &Digraph) -> Result<()> {
        self.push(extended.clone());
        Ok(())
    }
}

impl<W: Write> ExtensionSink for Digraph6Writer<W> {
    fn accept(&mut self, extended: &Digraph) -> Result<()> {
        self.write(extended)
    }
}

/// Counts the admissible colourings of one digraph, optionally handing the
/// extended digraphs to a sink.
pub struct SinkFilter<'a> {
    graph: &'a Digraph,
    components: &'a SccDecomposition,
    sink: Option<&'a mut dyn ExtensionSink>,
    count: u64,
    statistics: Statistics,
}

impl<'a> SinkFilter<'a> {
    pub fn new(graph: &'a Digraph, components: &'a SccDecomposition) -> Self {
        Self {
            graph,
            components,
            sink: None,
            count: 0,
            statistics: Statistics::new(),
        }
    }

    pub fn with_sink(mut self, sink: &'a mut dyn ExtensionSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Filter one canonical colouring.
    pub fn offer(&mut self, colouring: &Colouring) -> Result<()> {
        if !is_admissible(self.components, colouring) {
            trace!(%colouring, "leaf without feeder");
            self.statistics.increment(Counters::Inadmissible);
            return Ok(());
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.accept(&extend(self.graph, colouring)?)?;
        }
        self.statistics.increment(Counters::Extensions);
        self.count += 1;
        Ok(())
    }

    /// Number of admissible colourings seen.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scc::decompose;

    fn colouring(colours: &[u8]) -> Colouring {
        Colouring::from(colours)
    }

    #[test]
    fn test_single_edge_needs_the_sink_coloured() {
        let g = Digraph::from_edges(2, &[(0, 1)]).unwrap();
        let components = decompose(&g);
        assert!(!is_admissible(&components, &colouring(&[0, 0])));
        assert!(is_admissible(&components, &colouring(&[0, 1])));
        assert!(!is_admissible(&components, &colouring(&[1, 0])));
        assert!(is_admissible(&components, &colouring(&[1, 1])));
    }

    #[test]
    fn test_cycle_needs_any_member() {
        let g = Digraph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        let components = decompose(&g);
        assert!(!is_admissible(&components, &colouring(&[0, 0, 0])));
        assert!(is_admissible(&components, &colouring(&[0, 0, 1])));
    }

    #[test]
    fn test_empty_digraph_is_admissible() {
        let g = Digraph::new(0).unwrap();
        assert!(is_admissible(&decompose(&g), &colouring(&[])));
    }

    #[test]
    fn test_extend_adds_feeder_edges() {
        let g = Digraph::from_edges(3, &[(0, 0), (0, 1)]).unwrap();
        let extended = extend(&g, &colouring(&[1, 0, 1])).unwrap();
        assert_eq!(extended.order(), 4);
        assert!(extended.has_edge(0, 3) && extended.has_edge(2, 3));
        assert!(!extended.has_edge(1, 3));
        assert!(extended.has_loop(0));
        assert_eq!(extended.edge_count(), g.edge_count() + 2);
    }

    #[test]
    fn test_extended_digraph_has_one_global_sink() {
        let g = Digraph::from_edges(5, &[(0, 1), (1, 2), (2, 0), (2, 3), (4, 4)]).unwrap();
        let components = decompose(&g);
        let col = colouring(&[0, 0, 0, 1, 1]);
        assert!(is_admissible(&components, &col));

        let extended = extend(&g, &col).unwrap();
        let after = decompose(&extended);
        let leaves: Vec<_> = after.leaves().collect();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].vertices.iter().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn test_extend_at_capacity_fails() {
        let g = Digraph::new(crate::graph::MAXN).unwrap();
        let col = Colouring::new(vec![1; crate::graph::MAXN]);
        assert!(matches!(
            extend(&g, &col),
            Err(crate::errors::GsinksError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_filter_counts_and_collects() {
        let g = Digraph::from_edges(2, &[(0, 1)]).unwrap();
        let components = decompose(&g);
        let mut collected: Vec<Digraph> = Vec::new();
        let mut filter = SinkFilter::new(&g, &components).with_sink(&mut collected);
        for col in [[0u8, 0], [0, 1], [1, 0], [1, 1]] {
            filter.offer(&colouring(&col)).unwrap();
        }
        assert_eq!(filter.count(), 2);
        assert_eq!(filter.statistics().get(Counters::Inadmissible), 2);
        drop(filter);
        assert_eq!(collected.len(), 2);
        assert!(collected[0].has_edge(1, 2));
    }
}
