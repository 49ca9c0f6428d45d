// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Permutation groups given by generators.
//!
//! The canonicity test needs to walk every element of an automorphism group,
//! but the oracle only hands us generators. We build a stabilizer chain with
//! the base `0, 1, ..., n-1` (deterministic Schreier–Sims) and then enumerate
//! the group as products of coset representatives, one per level, without
//! ever storing the whole group.
//!
//! # Stabilizer chain
//!
//! Level `i` holds the orbit of `i` under `G(i)`, the subgroup fixing `0..i`
//! pointwise, and for each orbit point `y` a representative `u_y` with
//! `u_y(i) = y`. `G(i)` is generated by the strong generators fixing `0..i`.
//! The chain is complete once every Schreier generator of every level sifts
//! through the levels below it. Every `g` in `G(i)` factors uniquely
//! as `h.then(u_{g(i)})` with `h` in `G(i+1)`, so
//! `|G| = product of orbit lengths`.

use std::ops::ControlFlow;

use crate::symmetry::Permutation;

#[derive(Debug, Clone)]
struct Level {
    /// Orbit of the base point, in discovery order (base point first).
    orbit: Vec<usize>,
    /// `transversal[y]` maps the base point to `y`, for `y` in the orbit.
    transversal: Vec<Option<Permutation>>,
}

impl Level {
    /// Orbit of `base` under `generators`, with a transversal.
    fn new(degree: usize, base: usize, generators: &[&Permutation]) -> Self {
        let mut transversal = vec![None; degree];
        transversal[base] = Some(Permutation::identity(degree));
        let mut orbit = vec![base];

        let mut next = 0;
        while next < orbit.len() {
            let y = orbit[next];
            next += 1;
            let Some(u_y) = transversal[y].clone() else {
                continue;
            };
            for g in generators {
                let z = g[y];
                if transversal[z].is_none() {
                    transversal[z] = Some(u_y.then(g));
                    orbit.push(z);
                }
            }
        }
        Self { orbit, transversal }
    }
}

/// A permutation group on `0..degree`, held as a stabilizer chain.
#[derive(Debug, Clone)]
pub struct PermutationGroup {
    degree: usize,
    generators: Vec<Permutation>,
    /// Strong generators: each one's first moved point is the level it serves.
    strong: Vec<Permutation>,
    levels: Vec<Level>,
}

impl PermutationGroup {
    /// The group containing only the identity.
    pub fn trivial(degree: usize) -> Self {
        let mut group = Self {
            degree,
            generators: Vec::new(),
            strong: Vec::new(),
            levels: Vec::new(),
        };
        group.rebuild_levels();
        group
    }

    /// The group generated by `generators`.
    ///
    /// # Panics
    ///
    /// Panics if a generator does not act on exactly `degree` points.
    pub fn from_generators(degree: usize, generators: &[Permutation]) -> Self {
        let mut group = Self::trivial(degree);
        for g in generators {
            assert_eq!(g.len(), degree, "generator {} has the wrong degree", g);
            if !g.is_identity() {
                group.generators.push(g.clone());
                group.strong.push(g.clone());
            }
        }
        group.rebuild_levels();
        while let Some(residue) = group.unsifted_schreier_generator() {
            group.strong.push(residue);
            group.rebuild_levels();
        }
        group
    }

    pub fn generators(&self) -> &[Permutation] {
        &self.generators
    }

    /// Number of group elements, saturating at `u128::MAX`.
    pub fn order(&self) -> u128 {
        self.levels
            .iter()
            .fold(1u128, |acc, level| acc.saturating_mul(level.orbit.len() as u128))
    }

    pub fn is_trivial(&self) -> bool {
        self.levels.iter().all(|level| level.orbit.len() == 1)
    }

    /// Membership test by sifting through the chain.
    pub fn contains(&self, g: &Permutation) -> bool {
        g.len() == self.degree && self.strip(0, g).is_identity()
    }

    /// Orbit representatives: `orbits[v]` is the smallest vertex in the orbit of `v`.
    pub fn orbits(&self) -> Vec<usize> {
        let mut orbits: Vec<usize> = (0..self.degree).collect();
        fn find(orbits: &mut [usize], v: usize) -> usize {
            let mut root = v;
            while orbits[root] != root {
                root = orbits[root];
            }
            let mut v = v;
            while orbits[v] != root {
                let up = orbits[v];
                orbits[v] = root;
                v = up;
            }
            root
        }
        for g in &self.generators {
            for v in 0..self.degree {
                let (a, b) = (find(&mut orbits, v), find(&mut orbits, g[v]));
                if a != b {
                    let (low, high) = if a < b { (a, b) } else { (b, a) };
                    orbits[high] = low;
                }
            }
        }
        (0..self.degree).map(|v| find(&mut orbits, v)).collect()
    }

    /// Visit every element, identity first, stopping as soon as `visit` breaks.
    pub fn for_each_element<F>(&self, mut visit: F) -> ControlFlow<()>
    where
        F: FnMut(&Permutation) -> ControlFlow<()>,
    {
        let active: Vec<&Level> = self
            .levels
            .iter()
            .filter(|level| level.orbit.len() > 1)
            .collect();
        walk(&active, Permutation::identity(self.degree), &mut visit)
    }

    /// Every element, identity first.
    pub fn elements(&self) -> Vec<Permutation> {
        let mut elements = Vec::new();
        let _ = self.for_each_element(|g| {
            elements.push(g.clone());
            ControlFlow::Continue(())
        });
        elements
    }

    /// Recompute every level from the strong generators. Level `i` uses the
    /// strong generators fixing `0..i`.
    fn rebuild_levels(&mut self) {
        let first_moved: Vec<usize> = self
            .strong
            .iter()
            .map(|s| (0..self.degree).find(|&v| s[v] != v).unwrap_or(self.degree))
            .collect();
        self.levels = (0..self.degree)
            .map(|base| {
                let generators: Vec<&Permutation> = self
                    .strong
                    .iter()
                    .zip(&first_moved)
                    .filter(|&(_, &moved)| moved >= base)
                    .map(|(s, _)| s)
                    .collect();
                Level::new(self.degree, base, &generators)
            })
            .collect();
    }

    /// A Schreier generator of some level that does not sift through the
    /// levels below it, as its non-identity residue. `None` once the chain is
    /// complete.
    fn unsifted_schreier_generator(&self) -> Option<Permutation> {
        for (base, level) in self.levels.iter().enumerate().rev() {
            let generators = self
                .strong
                .iter()
                .filter(|s| (0..base).all(|v| s[v] == v));
            for s in generators {
                for &y in &level.orbit {
                    let z = s[y];
                    let (Some(u_y), Some(u_z)) = (&level.transversal[y], &level.transversal[z])
                    else {
                        continue;
                    };
                    let schreier = u_y.then(s).then(&u_z.inverse());
                    let residue = self.strip(base + 1, &schreier);
                    if !residue.is_identity() {
                        return Some(residue);
                    }
                }
            }
        }
        None
    }

    /// Sift `g` through levels `from..`; returns the residue (identity iff `g`
    /// is in the group generated so far).
    fn strip(&self, from: usize, g: &Permutation) -> Permutation {
        let mut h = g.clone();
        for (base, level) in self.levels.iter().enumerate().skip(from) {
            match &level.transversal[h[base]] {
                Some(u) => h = h.then(&u.inverse()),
                None => return h,
            }
        }
        h
    }
}

fn walk<F>(levels: &[&Level], suffix: Permutation, visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(&Permutation) -> ControlFlow<()>,
{
    let Some((level, deeper)) = levels.split_first() else {
        return visit(&suffix);
    };
    for &y in &level.orbit {
        if let Some(u) = &level.transversal[y] {
            walk(deeper, u.then(&suffix), visit)?;
        }
    }
    ControlFlow::Continue(())
}
