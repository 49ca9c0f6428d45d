// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Orbit canonicity of colourings.
//!
//! A colouring `col` is canonical under a group `G` when it is the
//! lexicographically greatest member of its orbit: for every `p` in `G`, the
//! permuted colouring `i -> col[p[i]]` is not greater than `col`.
//!
//! When a permutation proves a colouring non-canonical we also report a *fail
//! level*: the largest vertex the comparison had to look at. Every colouring
//! that agrees with the rejected one on vertices `0..=fail_level` is rejected by
//! the same permutation, so the search may resume below that level.

use std::ops::ControlFlow;

use crate::symmetry::{Permutation, PermutationGroup};

/// Result of a canonicity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Canonicity {
    /// Colouring is the greatest in its orbit (accept).
    Maximal,
    /// Some group element maps it to something greater (reject).
    NotMaximal { fail_level: usize },
}

/// Compare `col` with `col` permuted by `p`.
///
/// Scans vertices in order; the first vertex whose colour differs from the
/// colour of its image decides. Equal colourings are maximal.
pub fn check_permutation(col: &[u8], p: &Permutation) -> Canonicity {
    let mut fail = 0;
    for (i, &own) in col.iter().enumerate() {
        let k = p[i];
        fail = fail.max(k);
        match col[k].cmp(&own) {
            std::cmp::Ordering::Greater => return Canonicity::NotMaximal { fail_level: fail },
            std::cmp::Ordering::Less => return Canonicity::Maximal,
            std::cmp::Ordering::Equal => {}
        }
    }
    Canonicity::Maximal
}

/// Canonicity test against a whole group, remembering the last witness of
/// non-maximality.
///
/// Consecutive candidates produced by the search share long prefixes, so the
/// permutation that rejected the previous candidate often rejects the next one
/// too. It is tried first, and for groups of order 2 a candidate that survives
/// it needs no further checks: it is the only non-identity element.
#[derive(Debug, Clone)]
pub struct OrbitCanonicity {
    group: PermutationGroup,
    order: u128,
    last_rejection: Option<Permutation>,
}

impl OrbitCanonicity {
    pub fn new(group: PermutationGroup) -> Self {
        let order = group.order();
        Self {
            group,
            order,
            last_rejection: None,
        }
    }

    pub fn order(&self) -> u128 {
        self.order
    }

    /// The most recent permutation that proved a candidate non-maximal.
    pub fn last_rejection(&self) -> Option<&Permutation> {
        self.last_rejection.as_ref()
    }

    /// Decide whether `col` is canonical under the group.
    pub fn check(&mut self, col: &[u8]) -> Canonicity {
        if self.order == 1 {
            return Canonicity::Maximal;
        }

        if let Some(witness) = &self.last_rejection {
            let verdict = check_permutation(col, witness);
            if verdict != Canonicity::Maximal {
                return verdict;
            }
            if self.order == 2 {
                return Canonicity::Maximal;
            }
        }

        let mut verdict = Canonicity::Maximal;
        let mut witness = None;
        let _ = self.group.for_each_element(|p| {
            if p.is_identity() {
                return ControlFlow::Continue(());
            }
            match check_permutation(col, p) {
                Canonicity::Maximal => ControlFlow::Continue(()),
                rejected => {
                    verdict = rejected;
                    witness = Some(p.clone());
                    ControlFlow::Break(())
                }
            }
        });
        if witness.is_some() {
            self.last_rejection = witness;
        }
        verdict
    }
}
