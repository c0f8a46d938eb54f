//! Candidate evaluation for a single unresolved cell
//!
//! Each resolved neighbor narrows the cell's possibilities; unresolved and
//! off-grid neighbors are skipped entirely, so an unconstrained cell keeps
//! the full declared universe. Admissibility must hold in both directions:
//! the neighbor's rule must admit the candidate toward the cell, and the
//! candidate's rule must admit the neighbor back. Weights accumulate only
//! from the neighbors' outward lists.

use crate::algorithm::bitset::TypeBitset;
use crate::rules::{Direction, RuleTable, TileId};
use crate::spatial::Grid;

/// One surviving tile choice for a cell, with its accumulated weight
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// The admissible tile type
    pub tile: TileId,
    /// Summed weight across all contributing neighbors
    pub weight: u64,
}

/// Evaluate the admissible tile types for the cell at `position`
///
/// Returns candidates in ascending id order. With no contributing neighbor
/// the result is the full declared universe at the wildcard weight of 1;
/// an empty result therefore always signals a contradiction.
pub fn candidates(grid: &Grid, rules: &RuleTable, position: [i32; 2]) -> Vec<Candidate> {
    let type_count = rules.len();
    let mut survivors = TypeBitset::all(type_count);
    let mut weights = vec![0u64; type_count];
    let mut contributing = 0usize;

    for direction in Direction::ALL {
        let offset = direction.offset();
        let Some(neighbor) = grid.get(position[0] + offset[0], position[1] + offset[1]) else {
            continue;
        };
        contributing += 1;

        // The neighbor constrains us through its list toward this cell
        let toward_cell = direction.opposite();
        let mut admitted = TypeBitset::empty(type_count);
        for tile in rules.tile_ids() {
            let outward = rules.outward_weight(neighbor, toward_cell, tile);
            if outward == 0 {
                continue;
            }
            // The candidate must admit the neighbor back in the direction it sits
            if rules.outward_weight(tile, direction, neighbor) == 0 {
                continue;
            }
            admitted.insert(tile);
            if let Some(weight) = weights.get_mut(tile.index()) {
                *weight += u64::from(outward);
            }
        }
        survivors.intersect_with(&admitted);
    }

    if contributing == 0 {
        return rules
            .tile_ids()
            .map(|tile| Candidate { tile, weight: 1 })
            .collect();
    }

    survivors
        .iter()
        .map(|tile| Candidate {
            tile,
            weight: weights.get(tile.index()).copied().unwrap_or(0),
        })
        .collect()
}

/// The cell's uncertainty: how many tile types remain admissible
pub fn uncertainty(grid: &Grid, rules: &RuleTable, position: [i32; 2]) -> usize {
    candidates(grid, rules, position).len()
}
