use super::genome::{Candidate, GenomeShape, MutationRate};
use super::operators::best_index;
use crate::engines::evaluation::EvaluationChannel;
use crate::error::{EvodistError, Phase, Result};
use crate::types::GenerationReport;
use rand::Rng;

/// Fixed-size, ordered collection of candidates sharing one genome shape.
///
/// Order matters: it is the only key correlating the genomes written to the
/// evaluation channel with the fitness lines read back.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    candidates: Vec<Candidate>,
    shape: GenomeShape,
}

impl Population {
    pub fn random<R: Rng>(size: usize, shape: GenomeShape, rng: &mut R) -> Result<Self> {
        let candidates = (0..size).map(|_| Candidate::random(&shape, rng)).collect();
        Self::from_candidates(candidates, shape)
    }

    /// Build from explicit candidates. All must fit `shape`; there must be at least one.
    pub fn from_candidates(candidates: Vec<Candidate>, shape: GenomeShape) -> Result<Self> {
        if candidates.is_empty() {
            return Err(EvodistError::Configuration(
                "Population must hold at least one candidate".to_string(),
            ));
        }
        if let Some(idx) = candidates.iter().position(|c| !shape.admits(c.genes())) {
            return Err(EvodistError::Configuration(format!(
                "Candidate {} does not fit genome length {} over {} alleles",
                idx, shape.length, shape.alleles
            )));
        }
        Ok(Self { candidates, shape })
    }

    pub fn shape(&self) -> GenomeShape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    /// Fittest candidate; ties go to the earliest in population order.
    pub fn best(&self) -> &Candidate {
        let idx = best_index(self.candidates.iter().map(|c| c.fitness)).unwrap_or(0);
        &self.candidates[idx]
    }

    /// Score every candidate through `channel`.
    ///
    /// Two passes: all genomes are sent in population order, then one fitness
    /// is read per candidate in the same order. Any channel failure aborts the
    /// round with the phase, generation and candidate index attached. Fitness
    /// values are only written back once the whole round has been read.
    pub fn evaluate<C: EvaluationChannel + ?Sized>(
        &mut self,
        channel: &mut C,
        generation: usize,
    ) -> Result<()> {
        for (idx, candidate) in self.candidates.iter().enumerate() {
            channel
                .send_genome(candidate.genes())
                .map_err(|e| e.in_round(Phase::Send, generation, idx))?;
        }
        log::debug!("generation {}: sent {} genomes", generation, self.candidates.len());

        let mut scores = Vec::with_capacity(self.candidates.len());
        for idx in 0..self.candidates.len() {
            let fitness = channel
                .receive_fitness()
                .map_err(|e| e.in_round(Phase::Receive, generation, idx))?;
            scores.push(fitness);
        }
        log::debug!("generation {}: received {} scores", generation, scores.len());

        for (candidate, fitness) in self.candidates.iter_mut().zip(scores) {
            candidate.fitness = fitness;
        }
        Ok(())
    }

    /// Replace every candidate with a mutated clone of the current best.
    ///
    /// Elitist asexual reproduction, no crossover: the population keeps its
    /// size and every member descends from the single fittest parent.
    pub fn advance<R: Rng>(&mut self, rate: MutationRate, rng: &mut R) {
        let parent = self.best().clone();
        let alleles = self.shape.alleles;

        self.candidates = (0..self.candidates.len())
            .map(|_| {
                let mut child = parent.clone();
                child.mutate(rate, alleles, rng);
                child
            })
            .collect();
    }

    pub fn report(&self, generation: usize) -> GenerationReport {
        let best = self.best();
        GenerationReport {
            generation,
            best_fitness: best.fitness,
            best_genes: best.genes().to_vec(),
            population_size: self.len(),
        }
    }
}
