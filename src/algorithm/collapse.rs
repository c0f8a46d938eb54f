use crate::algorithm::candidates::candidates;
use crate::algorithm::sampler::Sampler;
use crate::io::error::{GenerationError, Result};
use crate::rules::{RuleTable, TileId};
use crate::spatial::Grid;

/// Resolve the cell at `position` to one weighted random candidate
///
/// Selection probability is proportional to each candidate's accumulated
/// weight; weights are not normalized and ties are broken by the draw
/// itself. The side effect is confined to the one cell.
///
/// # Errors
///
/// Returns `Contradiction` when no candidate survives the neighbors'
/// constraints, or when the surviving candidates carry zero total weight
/// (nothing to sample from).
pub fn collapse(
    grid: &mut Grid,
    rules: &RuleTable,
    sampler: &mut Sampler,
    position: [i32; 2],
) -> Result<TileId> {
    let options = candidates(grid, rules, position);
    let weights: Vec<u64> = options.iter().map(|candidate| candidate.weight).collect();

    let chosen = sampler
        .weighted_choice(&weights)
        .and_then(|index| options.get(index))
        .ok_or(GenerationError::Contradiction { position })?;

    grid.resolve(position[0], position[1], chosen.tile);
    Ok(chosen.tile)
}
