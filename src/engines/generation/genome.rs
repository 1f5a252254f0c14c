/// Genome representation for the distributed evaluator
///
/// A genome is a fixed-length sequence of discrete gene values drawn from the
/// alphabet `0..alleles`. The binary alphabet (`alleles == 2`) is the reference
/// case: OneMax evaluators score a genome by counting its ones.
///
/// Genomes travel over the evaluation channel as whitespace-separated decimal
/// tokens, one genome per line (see `engines::evaluation::protocol`).
///
/// # Example
///
/// ```
/// let genome: evodist::engines::generation::Genome = vec![0, 1, 1, 0, 1];
/// assert_eq!(genome.iter().sum::<u32>(), 3);
/// ```
pub type Genome = Vec<u32>;

use super::operators;
use crate::error::{EvodistError, Result};
use crate::types::Fitness;
use rand::Rng;

/// Recommended per-gene mutation probability.
pub const DEFAULT_MUTATION_RATE: f64 = 0.025;

/// Length and alphabet size shared by every genome in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenomeShape {
    pub length: usize,
    pub alleles: u32,
}

impl GenomeShape {
    pub fn new(length: usize, alleles: u32) -> Result<Self> {
        if length == 0 {
            return Err(EvodistError::Configuration(
                "Genome length must be at least 1".to_string(),
            ));
        }
        if alleles < 2 {
            return Err(EvodistError::Configuration(
                "Gene alphabet needs at least 2 alleles".to_string(),
            ));
        }
        Ok(Self { length, alleles })
    }

    pub fn binary(length: usize) -> Result<Self> {
        Self::new(length, 2)
    }

    /// Whether `genes` has this shape's length and only in-alphabet values.
    pub fn admits(&self, genes: &[u32]) -> bool {
        genes.len() == self.length && genes.iter().all(|&g| g < self.alleles)
    }
}

/// Per-gene mutation probability, guaranteed to lie in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationRate(f64);

impl MutationRate {
    pub fn new(probability: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(EvodistError::Configuration(format!(
                "Mutation rate must be between 0 and 1, got {}",
                probability
            )));
        }
        Ok(Self(probability))
    }

    pub fn probability(self) -> f64 {
        self.0
    }
}

impl Default for MutationRate {
    fn default() -> Self {
        Self(DEFAULT_MUTATION_RATE)
    }
}

/// A genome plus the fitness it was last assigned.
///
/// `Clone` is a deep copy: the clone owns its own gene storage, so mutating one
/// never shows through in the other.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    genes: Genome,
    pub fitness: Fitness,
}

impl Candidate {
    /// Random genome of the given shape with zero fitness.
    pub fn random<R: Rng>(shape: &GenomeShape, rng: &mut R) -> Self {
        Self {
            genes: operators::random_genome(shape.length, shape.alleles, rng),
            fitness: 0.0,
        }
    }

    /// Wrap an existing genome. Fails if it does not fit `shape`.
    pub fn from_genes(genes: Genome, shape: &GenomeShape) -> Result<Self> {
        if !shape.admits(&genes) {
            return Err(EvodistError::Configuration(format!(
                "Genome {:?} does not fit length {} over {} alleles",
                genes, shape.length, shape.alleles
            )));
        }
        Ok(Self {
            genes,
            fitness: 0.0,
        })
    }

    pub fn genes(&self) -> &[u32] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Mutate in place; the genome length never changes.
    pub fn mutate<R: Rng>(&mut self, rate: MutationRate, alleles: u32, rng: &mut R) {
        operators::mutate(&mut self.genes, rate.probability(), alleles, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mutation_rate_bounds() {
        assert!(MutationRate::new(0.0).is_ok());
        assert!(MutationRate::new(1.0).is_ok());
        assert!(MutationRate::new(-0.01).is_err());
        assert!(MutationRate::new(1.5).is_err());
        assert!(MutationRate::new(f64::NAN).is_err());
        assert_eq!(MutationRate::default().probability(), 0.025);
    }

    #[test]
    fn test_shape_rejects_degenerate() {
        assert!(GenomeShape::new(0, 2).is_err());
        assert!(GenomeShape::new(5, 1).is_err());
        assert!(GenomeShape::binary(5).is_ok());
    }

    #[test]
    fn test_random_candidate_fits_shape() {
        let shape = GenomeShape::new(64, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let candidate = Candidate::random(&shape, &mut rng);

        assert_eq!(candidate.len(), 64);
        assert!(shape.admits(candidate.genes()));
        assert_eq!(candidate.fitness, 0.0);
    }

    #[test]
    fn test_clone_is_independent() {
        let shape = GenomeShape::binary(20).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let original = Candidate::random(&shape, &mut rng);
        let snapshot = original.genes().to_vec();

        let mut clone = original.clone();
        assert_eq!(clone, original);

        clone.mutate(MutationRate::new(1.0).unwrap(), 2, &mut rng);
        assert_eq!(original.genes(), snapshot.as_slice());
        assert_ne!(clone.genes(), original.genes());
        assert_eq!(clone.len(), original.len());
    }

    #[test]
    fn test_original_mutation_leaves_clone_alone() {
        let shape = GenomeShape::new(20, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(12);
        let mut original = Candidate::random(&shape, &mut rng);
        original.fitness = 9.0;

        let clone = original.clone();
        let snapshot = clone.genes().to_vec();

        original.mutate(MutationRate::new(1.0).unwrap(), 4, &mut rng);
        original.fitness = 1.0;

        assert_eq!(clone.genes(), snapshot.as_slice());
        assert_eq!(clone.fitness, 9.0);
        assert_ne!(original.genes(), clone.genes());
    }

    #[test]
    fn test_mutate_zero_is_noop() {
        let shape = GenomeShape::binary(50).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut candidate = Candidate::random(&shape, &mut rng);
        let before = candidate.clone();

        candidate.mutate(MutationRate::new(0.0).unwrap(), 2, &mut rng);
        assert_eq!(candidate, before);
    }

    #[test]
    fn test_mutate_one_flips_every_bit() {
        let shape = GenomeShape::binary(5).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut candidate = Candidate::from_genes(vec![1, 0, 1, 0, 0], &shape).unwrap();

        candidate.mutate(MutationRate::new(1.0).unwrap(), 2, &mut rng);
        assert_eq!(candidate.genes(), &[0, 1, 0, 1, 1]);
    }

    #[test]
    fn test_from_genes_validates() {
        let shape = GenomeShape::binary(3).unwrap();
        assert!(Candidate::from_genes(vec![0, 1], &shape).is_err());
        assert!(Candidate::from_genes(vec![0, 1, 2], &shape).is_err());
        assert!(Candidate::from_genes(vec![0, 1, 1], &shape).is_ok());
    }
}
