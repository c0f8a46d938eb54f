use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random selector for reproducible stochastic choices
///
/// Both the tie-break among equally constrained cells and the weighted tile
/// choice draw from this one generator, so a fixed seed reproduces a board
/// exactly.
#[derive(Debug)]
pub struct Sampler {
    rng: StdRng,
}

impl Sampler {
    /// Create a deterministic sampler from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Weighted random selection over integer weights
    ///
    /// Returns an index with probability proportional to its weight, by
    /// walking the cumulative distribution. Zero-weight entries are never
    /// selected; a zero total means there is nothing to sample from and
    /// yields `None`.
    pub fn weighted_choice(&mut self, weights: &[u64]) -> Option<usize> {
        let total: u64 = weights.iter().sum();
        if total == 0 {
            return None;
        }

        let mut remaining = self.rng.random_range(0..total);
        for (index, &weight) in weights.iter().enumerate() {
            if remaining < weight {
                return Some(index);
            }
            remaining -= weight;
        }
        None
    }

    /// Uniform random selection of one index out of `count`
    pub fn uniform_choice(&mut self, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        Some(self.rng.random_range(0..count))
    }
}
