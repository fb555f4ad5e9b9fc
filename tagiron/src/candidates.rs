use itertools::Itertools;
use tracing::debug;

use crate::{Hand, Tile, HAND_SIZE, TILE_UNIVERSE};

/// The tiles of the universe that are not in `hand`, in universe order.
///
/// Holding one five leaves the other five in the result.
pub fn remaining_tiles(hand: &Hand) -> Vec<Tile> {
    // Both the universe and the hand are sorted, so a single merge pass suffices
    let mut held = hand.iter().copied().peekable();
    let mut remaining = Vec::with_capacity(TILE_UNIVERSE.len() - HAND_SIZE);
    for &tile in TILE_UNIVERSE.iter() {
        if held.peek() == Some(&tile) {
            held.next();
        } else {
            remaining.push(tile);
        }
    }
    remaining
}

/// Every distinct hand the opponent could hold, sorted.
///
/// Combinations are taken over positions in [`remaining_tiles()`], so when both green
/// fives remain, two combinations can produce the same hand. Those are collapsed into one.
pub fn enumerate_candidates(hand: &Hand) -> Vec<Hand> {
    let remaining = remaining_tiles(hand);
    let mut candidates: Vec<Hand> = remaining
        .iter()
        .copied()
        .combinations(HAND_SIZE)
        .map(|tiles| Hand::from_drawn(std::array::from_fn(|idx| tiles[idx])))
        .collect();
    let num_combinations = candidates.len();
    candidates.sort();
    candidates.dedup();
    assert!(!candidates.is_empty());
    debug!(
        hand = %hand,
        num_combinations,
        num_candidates = candidates.len(),
        "Enumerated candidates"
    );
    candidates
}
