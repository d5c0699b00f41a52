use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::combinations::ParameterVariations;
use super::conversion::combination_to_parameter_sets;
use super::{ParameterSet, ParameterSpace};

impl ParameterSpace {
    /// Generate random parameter sets (Monte Carlo sampling).
    ///
    /// Samples up to `count` distinct combinations from the space, each expanded
    /// to its replications. Stops early when the space has fewer combinations.
    pub fn sample_random(&self, count: usize, seed: u64) -> Vec<ParameterSet> {
        const MAX_ATTEMPTS: usize = 10_000;

        let variations = ParameterVariations::from_space(self);
        let dims = variations.dimensions();
        let space_size: usize = dims.iter().product();
        let target = count.min(space_size);

        let mut rng = StdRng::seed_from_u64(seed);
        let mut seen = HashSet::new();
        let mut parameter_sets = Vec::new();
        let mut attempts = 0;

        while seen.len() < target && attempts < MAX_ATTEMPTS {
            attempts += 1;
            let picks = dims.map(|len| rng.gen_range(0..len));
            let combo = variations.pick(picks);
            if !seen.insert(combo) {
                continue;
            }
            let experiment_id = seen.len() - 1;
            parameter_sets.extend(combination_to_parameter_sets(
                &self.base,
                combo,
                experiment_id,
                self.replications,
                self.base_seed,
            ));
        }

        parameter_sets
    }
}
