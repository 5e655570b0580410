//! Neighbor moves on customer permutations.

use crate::error::CvrpResult;
use crate::oracle::{checked_scores, ScoringOracle};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A perturbation of a permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Remove the element at `from` and reinsert it at `to`.
    Relocate { from: usize, to: usize },
    /// Exchange the elements at two positions.
    Swap { first: usize, second: usize },
    /// Leave the permutation unchanged.
    Identity,
}

impl Move {
    /// Apply the move to a copy of `permutation`.
    ///
    /// Positions outside the permutation leave it unchanged.
    pub fn apply(&self, permutation: &[usize]) -> Vec<usize> {
        let mut result = permutation.to_vec();
        let len = result.len();

        match *self {
            Move::Relocate { from, to } if from < len && to < len => {
                let element = result.remove(from);
                result.insert(to, element);
            }
            Move::Swap { first, second } if first < len && second < len => {
                result.swap(first, second);
            }
            _ => {}
        }

        result
    }
}

/// Relocate a uniformly chosen element to a uniformly chosen position.
pub fn random_relocate<R: Rng>(len: usize, rng: &mut R) -> Move {
    if len < 2 {
        return Move::Identity;
    }
    Move::Relocate {
        from: rng.gen_range(0..len),
        to: rng.gen_range(0..len),
    }
}

/// Swap two uniformly chosen positions.
pub fn random_swap<R: Rng>(len: usize, rng: &mut R) -> Move {
    if len < 2 {
        return Move::Identity;
    }
    Move::Swap {
        first: rng.gen_range(0..len),
        second: rng.gen_range(0..len),
    }
}

/// Relocate the element picked by [`oracle_position`] to a random position.
pub fn guided_relocate<R: Rng>(
    permutation: &[usize],
    depot: usize,
    size: usize,
    oracle: &dyn ScoringOracle,
    rng: &mut R,
) -> CvrpResult<Move> {
    if permutation.len() < 2 {
        return Ok(Move::Identity);
    }
    let from = oracle_position(permutation, depot, size, oracle)?;
    Ok(Move::Relocate {
        from,
        to: rng.gen_range(0..permutation.len()),
    })
}

/// Position of the element whose score, as successor of its predecessor
/// (the depot for the first element), lies closest to the best score the
/// predecessor hands out. Ties go to the earliest position.
pub fn oracle_position(
    permutation: &[usize],
    depot: usize,
    size: usize,
    oracle: &dyn ScoringOracle,
) -> CvrpResult<usize> {
    let mut position = 0;
    let mut smallest_gap = f64::INFINITY;

    for (j, &element) in permutation.iter().enumerate() {
        let predecessor = if j == 0 { depot } else { permutation[j - 1] };
        let scores = checked_scores(oracle, predecessor, size)?;
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let gap = max - scores.get(element).copied().unwrap_or(f64::NEG_INFINITY);

        if gap < smallest_gap {
            smallest_gap = gap;
            position = j;
        }
    }

    Ok(position)
}
