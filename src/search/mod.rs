// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Canonical 2-colouring search.
//!
//! Enumerates the colourings of a digraph's vertices with colours `{0, 1}`, one
//! per orbit of the digraph's automorphism group.
//!
//! # Algorithm
//!
//! Colours are assigned in vertex order, each vertex trying its colours in
//! ascending order within the range allowed by:
//!
//! - the budget: the number of vertices coloured 1 must end up within
//!   `[min_ones, max_ones]`;
//! - the ordering constraint: a vertex with `prev = Some(j)` may not take a
//!   colour greater than vertex `j` did.
//!
//! Every complete colouring is tested for canonicity under the
//! weight-preserving automorphism group (see [`crate::symmetry::canonical`]).
//!
//! The recursion returns the level at which the search should try its next
//! choice. After an acceptance that is the last vertex. After a rejection with
//! fail level `f` it is `f - 1`: every colouring sharing the first `f + 1`
//! colours is rejected by the same automorphism, so the whole subtree is
//! skipped. A return of `-1` from level 0 ends the search.
//!
//! # Example
//!
//! ```
//! use gsinks::graph::Digraph;
//! use gsinks::search::{ColourBudget, ColouringSearch};
//! use gsinks::symmetry::BacktrackOracle;
//!
//! let g = Digraph::from_edges(2, &[(0, 1)]).unwrap();
//! let mut search = ColouringSearch::new(&g, &BacktrackOracle, ColourBudget::all(2), 0).unwrap();
//! let found: Vec<String> = search.accepted().unwrap().iter().map(|c| c.to_string()).collect();
//! assert_eq!(found, vec!["(0,0)", "(0,1)", "(1,0)", "(1,1)"]);
//! ```

use tracing::trace;

use crate::errors::Result;
use crate::graph::{Colouring, Digraph, NUM_COLOURS};
use crate::state::{Counters, Statistics};
use crate::symmetry::{AutomorphismOracle, Canonicity, OrbitCanonicity, VertexOrdering};

/// Bounds on the number of vertices coloured 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColourBudget {
    pub min_ones: usize,
    pub max_ones: usize,
}

impl ColourBudget {
    /// No restriction on a digraph with `n` vertices.
    pub fn all(n: usize) -> Self {
        Self {
            min_ones: 0,
            max_ones: n,
        }
    }

    pub fn new(min_ones: usize, max_ones: usize) -> Self {
        Self { min_ones, max_ones }
    }
}

/// Search state for one digraph.
pub struct ColouringSearch<'g> {
    graph: &'g Digraph,
    budget: ColourBudget,
    ordering: VertexOrdering,
    canonicity: OrbitCanonicity,
    col: Vec<u8>,
    statistics: Statistics,
}

impl<'g> ColouringSearch<'g> {
    /// Prepare a search over `graph`, asking `oracle` for its automorphisms.
    ///
    /// Vertices `0..nfixed` are ordered separately from the rest. `max_ones`
    /// is clamped to the number of vertices.
    pub fn new<O>(
        graph: &'g Digraph,
        oracle: &O,
        budget: ColourBudget,
        nfixed: usize,
    ) -> Result<Self>
    where
        O: AutomorphismOracle + ?Sized,
    {
        let n = graph.order();
        let analysis = oracle.analyse(graph, nfixed)?;
        Ok(Self {
            graph,
            budget: ColourBudget {
                min_ones: budget.min_ones,
                max_ones: budget.max_ones.min(n),
            },
            ordering: analysis.ordering,
            canonicity: OrbitCanonicity::new(analysis.group),
            col: vec![0; n],
            statistics: Statistics::new(),
        })
    }

    pub fn graph(&self) -> &Digraph {
        self.graph
    }

    /// Order of the weight-preserving automorphism group.
    pub fn group_order(&self) -> u128 {
        self.canonicity.order()
    }

    pub fn ordering(&self) -> &VertexOrdering {
        &self.ordering
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Run the search, calling `visit` once per canonical colouring, in the
    /// order they are found. An error from `visit` stops the search.
    pub fn for_each_accepted<F>(&mut self, mut visit: F) -> Result<()>
    where
        F: FnMut(&Colouring) -> Result<()>,
    {
        if self.budget.min_ones > self.budget.max_ones {
            trace!(budget = ?self.budget, "empty budget");
            return Ok(());
        }
        self.col.iter_mut().for_each(|c| *c = 0);
        let resume = self.scan(0, 0, &mut visit)?;
        debug_assert!(resume < 0);
        Ok(())
    }

    /// Collect every canonical colouring.
    pub fn accepted(&mut self) -> Result<Vec<Colouring>> {
        let mut found = Vec::new();
        self.for_each_accepted(|col| {
            found.push(col.clone());
            Ok(())
        })?;
        Ok(found)
    }

    fn scan<F>(&mut self, level: usize, sofar: usize, visit: &mut F) -> Result<isize>
    where
        F: FnMut(&Colouring) -> Result<()>,
    {
        let n = self.col.len();
        if level == n {
            return self.try_this_one(visit);
        }

        let left = n - level - 1;
        let min = self
            .budget
            .min_ones
            .saturating_sub(sofar + (NUM_COLOURS as usize - 1) * left);
        let mut max = (self.budget.max_ones - sofar).min(NUM_COLOURS as usize - 1);
        if let Some(j) = self.ordering.prev[level] {
            max = max.min(self.col[j] as usize);
        }

        for k in min..=max {
            self.col[level] = k as u8;
            let resume = self.scan(level + 1, sofar + k, visit)?;
            if resume < level as isize {
                return Ok(resume);
            }
        }
        Ok(level as isize - 1)
    }

    fn try_this_one<F>(&mut self, visit: &mut F) -> Result<isize>
    where
        F: FnMut(&Colouring) -> Result<()>,
    {
        let n = self.col.len() as isize;
        self.statistics.increment(Counters::Candidates);
        match self.canonicity.check(&self.col) {
            Canonicity::Maximal => {
                self.statistics.increment(Counters::Accepted);
                let colouring = Colouring::from(&self.col[..]);
                trace!(%colouring, "accepted");
                visit(&colouring)?;
                Ok(n - 1)
            }
            Canonicity::NotMaximal { fail_level } => {
                self.statistics.increment(Counters::NonMaximal);
                trace!(col = ?self.col, fail_level, "not maximal");
                Ok(fail_level as isize - 1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GsinksError;
    use crate::symmetry::BacktrackOracle;

    fn search_all(g: &Digraph) -> Vec<String> {
        let mut search =
            ColouringSearch::new(g, &BacktrackOracle, ColourBudget::all(g.order()), 0).unwrap();
        search
            .accepted()
            .unwrap()
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn test_three_cycle_ordering() {
        let g = Digraph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        let search = ColouringSearch::new(&g, &BacktrackOracle, ColourBudget::all(3), 0).unwrap();
        assert_eq!(search.graph(), &g);
        assert_eq!(search.group_order(), 3);
        // No twins, but all three vertices share one orbit.
        assert_eq!(search.ordering().weight, vec![0, 0, 0]);
        assert_eq!(search.ordering().prev, vec![None, Some(0), Some(0)]);
    }

    #[test]
    fn test_single_edge() {
        let g = Digraph::from_edges(2, &[(0, 1)]).unwrap();
        assert_eq!(search_all(&g), vec!["(0,0)", "(0,1)", "(1,0)", "(1,1)"]);
    }

    #[test]
    fn test_isolated_pair_yields_one_of_each_pattern() {
        let g = Digraph::new(2).unwrap();
        assert_eq!(search_all(&g), vec!["(0,0)", "(1,0)", "(1,1)"]);
    }

    #[test]
    fn test_two_cycle() {
        let g = Digraph::from_edges(2, &[(0, 1), (1, 0)]).unwrap();
        assert_eq!(search_all(&g), vec!["(0,0)", "(1,0)", "(1,1)"]);
    }

    #[test]
    fn test_directed_three_cycle_has_four_orbits() {
        let g = Digraph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        assert_eq!(search_all(&g), vec!["(0,0,0)", "(1,0,0)", "(1,1,0)", "(1,1,1)"]);
    }

    #[test]
    fn test_out_star() {
        // Leaves 1 and 2 are twins: colourings of the leaves are 00, 10, 11.
        let g = Digraph::from_edges(3, &[(0, 1), (0, 2)]).unwrap();
        assert_eq!(search_all(&g).len(), 6);
    }

    #[test]
    fn test_orbit_counts_match_burnside() {
        // Directed 4-cycle: (2^4 + 2 + 2^2 + 2) / 4 = 6 orbits.
        let g = Digraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        assert_eq!(search_all(&g).len(), 6);

        // Two disjoint directed 3-cycles, group of order 18:
        // fixed points sum to 64 + 4*16 + 4*4 + 3*8 + 6*2 = 180 -> 10 orbits.
        let g = Digraph::from_edges(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)])
            .unwrap();
        assert_eq!(search_all(&g).len(), 10);
    }

    #[test]
    fn test_empty_digraph_counts_by_number_of_ones() {
        let g = Digraph::new(5).unwrap();
        assert_eq!(search_all(&g).len(), 6);
    }

    #[test]
    fn test_no_vertices() {
        let g = Digraph::new(0).unwrap();
        assert_eq!(search_all(&g), vec!["()"]);
    }

    #[test]
    fn test_single_vertex() {
        let g = Digraph::new(1).unwrap();
        assert_eq!(search_all(&g), vec!["(0)", "(1)"]);
    }

    #[test]
    fn test_deterministic() {
        let g = Digraph::from_edges(5, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 3), (2, 3)])
            .unwrap();
        assert_eq!(search_all(&g), search_all(&g));
    }

    #[test]
    fn test_budget_limits_ones() {
        let g = Digraph::new(4).unwrap();
        let mut search =
            ColouringSearch::new(&g, &BacktrackOracle, ColourBudget::new(1, 2), 0).unwrap();
        let found: Vec<String> = search
            .accepted()
            .unwrap()
            .iter()
            .map(|c| c.to_string())
            .collect();
        assert_eq!(found, vec!["(1,0,0,0)", "(1,1,0,0)"]);
    }

    #[test]
    fn test_infeasible_budget_is_empty() {
        let g = Digraph::new(3).unwrap();
        let mut search =
            ColouringSearch::new(&g, &BacktrackOracle, ColourBudget::new(4, 10), 0).unwrap();
        assert!(search.accepted().unwrap().is_empty());
        assert_eq!(search.statistics().get(Counters::Candidates), 0);
    }

    #[test]
    fn test_fixed_prefix_is_ordered_separately() {
        // Without a prefix the four isolated vertices give 5 colourings; with
        // {0,1} fixed apart from {2,3} each half is ordered on its own.
        let g = Digraph::new(4).unwrap();
        let mut search = ColouringSearch::new(&g, &BacktrackOracle, ColourBudget::all(4), 2)
            .unwrap();
        assert_eq!(search.accepted().unwrap().len(), 9);
    }

    #[test]
    fn test_statistics() {
        let g = Digraph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        let mut search =
            ColouringSearch::new(&g, &BacktrackOracle, ColourBudget::all(3), 0).unwrap();
        search.accepted().unwrap();
        let stats = search.statistics();
        assert_eq!(stats.get(Counters::Accepted), 4);
        assert_eq!(
            stats.get(Counters::Candidates),
            stats.get(Counters::Accepted) + stats.get(Counters::NonMaximal)
        );
        assert_eq!(search.group_order(), 3);
    }

    #[test]
    fn test_visitor_error_stops_search() {
        let g = Digraph::new(3).unwrap();
        let mut search =
            ColouringSearch::new(&g, &BacktrackOracle, ColourBudget::all(3), 0).unwrap();
        let mut seen = 0;
        let result = search.for_each_accepted(|_| {
            seen += 1;
            Err(GsinksError::CapacityExceeded { n: 99 })
        });
        assert!(result.is_err());
        assert_eq!(seen, 1);
    }
}
