use std::collections::HashSet;

use crate::tsp::Cycle;

/// Normalized form of a cycle, identical for the cycle, its rotations and its reversal.
///
/// Only used as a set key while deduplicating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(Vec<usize>);

impl CanonicalKey {
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Computes the canonical key of `cycle`.
///
/// The cycle is rotated so its smallest node comes first, then compared position by
/// position (from index 1) against its reversal with that node held fixed; the
/// lexicographically smaller of the two is the key.
///
/// # Example
/// ```
/// use brute_tsp::tsp::canonical_key;
///
/// assert_eq!(canonical_key(&[0, 3, 2, 1]), canonical_key(&[0, 1, 2, 3]));
/// assert_eq!(canonical_key(&[2, 3, 0, 1]).as_slice(), &[0, 1, 2, 3]);
/// ```
pub fn canonical_key(cycle: &[usize]) -> CanonicalKey {
    let mut rotated = cycle.to_vec();
    rotate_cycle_to_smallest(&mut rotated);

    if rotated.len() > 2 {
        // Hold the first node, reverse the rest: [0,1,2,3] <-> [0,3,2,1].
        let mut reversed = rotated.clone();
        reversed[1..].reverse();
        if reversed[1..] < rotated[1..] {
            return CanonicalKey(reversed);
        }
    }
    CanonicalKey(rotated)
}

/// Removes cycles that are rotations or reversals of an earlier cycle.
///
/// The first-seen cycle of each class is kept as given (not normalized), and the
/// relative order of the kept cycles is unchanged.
pub fn dedup_cycles(cycles: Vec<Cycle>) -> Vec<Cycle> {
    let mut seen = HashSet::with_capacity(cycles.len() / 2 + 1);
    cycles
        .into_iter()
        .filter(|cycle| seen.insert(canonical_key(cycle)))
        .collect()
}

/// Rotate the cycle so that the smallest node is first.
/// E.g. [2,3,0,1] -> [0,1,2,3].
fn rotate_cycle_to_smallest(cycle: &mut [usize]) {
    let smallest = cycle
        .iter()
        .enumerate()
        .min_by_key(|&(_, &node)| node)
        .map(|(pos, _)| pos);
    if let Some(pos) = smallest {
        cycle.rotate_left(pos);
    }
}
