// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use gsinks::codec::{encode, Digraph6Writer};
use gsinks::graph::Digraph;
use gsinks::symmetry::{Permutation, PermutationGroup};

/// Every permutation of `0..n`.
pub fn all_permutations(n: usize) -> Vec<Permutation> {
    if n < 2 {
        return vec![Permutation::identity(n)];
    }
    let cycle = Permutation::from_images((1..n).chain([0]).collect()).unwrap();
    PermutationGroup::from_generators(n, &[cycle, Permutation::transposition(n, 0, 1)]).elements()
}

/// `graph` with vertex `v` renamed `p[v]`.
pub fn relabel(graph: &Digraph, p: &Permutation) -> Digraph {
    let mut image = Digraph::new(graph.order()).unwrap();
    for v in 0..graph.order() {
        for w in graph.out_neighbours(v).iter() {
            image.add_edge(p[v], p[w]);
        }
    }
    image
}

/// A string that is equal for two digraphs iff they are isomorphic.
pub fn isomorphism_class(graph: &Digraph, perms: &[Permutation]) -> String {
    perms
        .iter()
        .map(|p| encode(&relabel(graph, p)))
        .min()
        .unwrap()
}

/// One digraph per isomorphism class on `n` vertices, by brute force.
pub fn all_digraphs(n: usize, loops: bool) -> Vec<Digraph> {
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .filter(|&(i, j)| loops || i != j)
        .collect();
    let perms = all_permutations(n);
    let mut classes = BTreeMap::new();
    for bits in 0u64..(1 << pairs.len()) {
        let edges: Vec<(usize, usize)> = pairs
            .iter()
            .enumerate()
            .filter(|&(k, _)| bits >> k & 1 == 1)
            .map(|(_, &edge)| edge)
            .collect();
        let graph = Digraph::from_edges(n, &edges).unwrap();
        classes
            .entry(isomorphism_class(&graph, &perms))
            .or_insert(graph);
    }
    classes.into_values().collect()
}

/// Write `graphs` to `path` in digraph6, one per line.
pub fn write_data_file(path: &Path, graphs: &[Digraph]) {
    let mut writer = Digraph6Writer::new(BufWriter::new(File::create(path).unwrap()));
    for graph in graphs {
        writer.write(graph).unwrap();
    }
    writer.flush().unwrap();
}

/// Populate `dir` with `dig{n}.d6` (and `digl{n}.d6` when `loops`) for each `n`.
pub fn write_data_files(dir: &Path, counts: &[usize], loops: bool) {
    for &n in counts {
        let name = format!("dig{}{}.d6", if loops { "l" } else { "" }, n);
        write_data_file(&dir.join(name), &all_digraphs(n, loops));
    }
}
