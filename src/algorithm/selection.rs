//! Candidate selection and seeded random draws
//!
//! When the queue runs dry under the solved end condition, the solver scans
//! for the cells with the fewest remaining options, draws one uniformly,
//! and draws a tile from its options weighted by catalogue pick weights.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::bitset::TileSet;
use crate::algorithm::model::Wfc;
use crate::catalog::tile::TileId;
use crate::catalog::tileset::catalog;
use crate::io::error::SolverFailure;
use crate::spatial::cell::Cell;
use crate::tilemap::tile::Tile;

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Weighted random selection over an index range
    ///
    /// Walks the cumulative distribution; a non-positive total falls back to
    /// the first index so zero-weight options remain reachable when they are
    /// all that is left.
    pub fn weighted_choice(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0;
        }

        let mut rand_val = self.rng.random::<f64>() * total;
        for (i, &weight) in weights.iter().enumerate() {
            rand_val -= weight;
            if rand_val <= 0.0 {
                return i;
            }
        }
        weights.len().saturating_sub(1)
    }

    /// Uniform random index below `len`
    pub fn uniform_choice(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.random_range(0..len)
    }
}

impl Wfc {
    /// Find the next collapse candidate, if any cell is still open
    ///
    /// Scans every superposition for the minimum entropy (option count),
    /// keeps ties, draws the cell uniformly, then draws the tile weighted.
    /// An empty superposition is a detectable failure, never a candidate.
    pub(crate) fn pick_candidate(&mut self) -> Result<Option<(Cell, TileId)>, SolverFailure> {
        let mut lowest = usize::MAX;
        let mut candidates: Vec<Cell> = Vec::new();
        for cell in self.tilemap.superposition_cells() {
            let Some(entropy) = self
                .tilemap
                .tile_by_cell(cell)
                .and_then(Tile::superposition_options)
                .map(TileSet::len)
            else {
                continue;
            };
            if entropy == 0 {
                return Err(SolverFailure::NoSuperpositionOptions);
            }
            if entropy < lowest {
                lowest = entropy;
                candidates.clear();
                candidates.push(cell);
            } else if entropy == lowest {
                candidates.push(cell);
            }
        }

        if candidates.is_empty() {
            return Ok(None);
        }
        let Some(cell) = candidates
            .get(self.selector.uniform_choice(candidates.len()))
            .copied()
        else {
            return Ok(None);
        };

        let Some(options) = self
            .tilemap
            .tile_by_cell(cell)
            .and_then(Tile::superposition_options)
            .map(TileSet::ids)
        else {
            return Ok(None);
        };
        let weights: Vec<f64> = options.iter().map(|&id| catalog().weight_of(id)).collect();
        let id = options.get(self.selector.weighted_choice(&weights)).copied();
        Ok(id.map(|id| (cell, id)))
    }
}
