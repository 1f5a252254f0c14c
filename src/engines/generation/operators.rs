use crate::types::Fitness;
use rand::Rng;

/// Index of the fittest entry; ties go to the earliest index.
pub fn best_index<I>(fitnesses: I) -> Option<usize>
where
    I: IntoIterator<Item = Fitness>,
{
    let mut best: Option<(usize, Fitness)> = None;

    for (idx, fitness) in fitnesses.into_iter().enumerate() {
        let improves = match best {
            Some((_, best_fitness)) => fitness > best_fitness,
            None => true,
        };
        if improves {
            best = Some((idx, fitness));
        }
    }

    best.map(|(idx, _)| idx)
}

/// Mutation: each gene independently changes with probability `mutation_rate`.
///
/// Binary genes toggle. Larger alphabets draw a uniformly random value that
/// differs from the current one, so a rate of 1 changes every gene.
pub fn mutate<R: Rng>(
    genome: &mut [u32],
    mutation_rate: f64,
    alleles: u32,
    rng: &mut R,
) {
    for gene in genome.iter_mut() {
        if rng.gen::<f64>() < mutation_rate {
            *gene = if alleles == 2 {
                1 - (*gene & 1)
            } else {
                // Skip over the current value so the draw always changes it
                let draw = rng.gen_range(0..alleles - 1);
                if draw >= *gene { draw + 1 } else { draw }
            };
        }
    }
}

/// Generate random genome
pub fn random_genome<R: Rng>(length: usize, alleles: u32, rng: &mut R) -> Vec<u32> {
    (0..length).map(|_| rng.gen_range(0..alleles)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_best_index_unique_maximum() {
        assert_eq!(best_index(vec![0.0, 5.0, 3.0, 2.0]), Some(1));
    }

    #[test]
    fn test_best_index_ties_pick_first() {
        assert_eq!(best_index(vec![1.0, 4.0, 4.0, 4.0]), Some(1));
        assert_eq!(best_index(vec![2.0, 2.0]), Some(0));
    }

    #[test]
    fn test_best_index_empty() {
        assert_eq!(best_index(Vec::<Fitness>::new()), None);
    }

    #[test]
    fn test_best_index_negative_scores() {
        assert_eq!(best_index(vec![-3.0, -1.0, -2.0]), Some(1));
    }

    #[test]
    fn test_mutate_multi_allele_always_changes_at_rate_one() {
        let mut rng = StdRng::seed_from_u64(42);
        let original: Vec<u32> = vec![0, 1, 2, 3, 0, 1, 2, 3];
        let mut genome = original.clone();

        mutate(&mut genome, 1.0, 4, &mut rng);

        assert_eq!(genome.len(), original.len());
        for (before, after) in original.iter().zip(&genome) {
            assert_ne!(before, after);
            assert!(*after < 4);
        }
    }

    #[test]
    fn test_random_genome_respects_alphabet() {
        let mut rng = StdRng::seed_from_u64(1);
        let genome = random_genome(200, 3, &mut rng);

        assert_eq!(genome.len(), 200);
        assert!(genome.iter().all(|&g| g < 3));
        // 200 draws over 3 values should hit each of them
        for value in 0..3 {
            assert!(genome.contains(&value));
        }
    }
}
