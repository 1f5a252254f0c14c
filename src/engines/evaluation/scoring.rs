use crate::types::Fitness;

/// Deterministic score for a genome, computed on the evaluator side.
pub trait ScoringFunction {
    fn name(&self) -> &'static str;
    fn score(&self, genes: &[u32]) -> Fitness;
}

/// OneMax: the fitness is the sum of the genes (the number of ones for
/// binary genomes).
#[derive(Debug, Clone, Copy, Default)]
pub struct OneMax;

impl ScoringFunction for OneMax {
    fn name(&self) -> &'static str {
        "onemax"
    }

    fn score(&self, genes: &[u32]) -> Fitness {
        genes.iter().map(|&g| g as u64).sum::<u64>() as Fitness
    }
}
