use crate::config::evolution::EvolutionConfig as EvolutionSection;
use crate::engines::evaluation::EvaluationChannel;
use crate::engines::generation::{
    genome::{Candidate, GenomeShape, MutationRate},
    population::Population,
};
use crate::error::{EvodistError, Result};
use crate::types::{Fitness, GenerationReport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

/// Validated parameters for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub shape: GenomeShape,
    pub mutation_rate: MutationRate,
    pub seed: Option<u64>,
}

impl TryFrom<&EvolutionSection> for EvolutionConfig {
    type Error = EvodistError;

    fn try_from(section: &EvolutionSection) -> Result<Self> {
        if section.population_size == 0 {
            return Err(EvodistError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            population_size: section.population_size,
            generations: section.num_generations,
            shape: GenomeShape::new(section.genome_length, section.alleles)?,
            mutation_rate: MutationRate::new(section.mutation_rate)?,
            seed: section.seed,
        })
    }
}

/// Where the driver is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running { generation: usize },
    Done,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub generations: usize,
    /// Best fitness of each evaluated generation, in order.
    pub trajectory: Vec<Fitness>,
    /// Best candidate of the terminal population.
    pub best: Candidate,
    /// Wall-clock time from the first evaluation to the final report.
    pub elapsed: Duration,
}

pub struct EvolutionEngine {
    config: EvolutionConfig,
    rng: StdRng,
    state: EngineState,
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, report: &GenerationReport);
    fn on_run_complete(&mut self, report: &GenerationReport);
}

impl EvolutionEngine {
    pub fn new(config: EvolutionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            rng,
            state: EngineState::Idle,
        }
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Random initial population drawn from the engine's generator.
    pub fn initialize_population(&mut self) -> Result<Population> {
        Population::random(self.config.population_size, self.config.shape, &mut self.rng)
    }

    /// Run the evolution process
    ///
    /// Each generation evaluates the population through `channel`, reports
    /// the best candidate, then replaces the population with mutated clones
    /// of that best. After the last generation the terminal population is
    /// reported once more, under the last generation index, without being
    /// evaluated. Termination is purely count-bounded. The first channel
    /// failure aborts the run.
    pub fn run<C, P>(
        &mut self,
        mut population: Population,
        channel: &mut C,
        callback: &mut P,
    ) -> Result<RunSummary>
    where
        C: EvaluationChannel + ?Sized,
        P: ProgressCallback + ?Sized,
    {
        if population.shape() != self.config.shape {
            return Err(EvodistError::Configuration(format!(
                "Population shape {:?} does not match configured shape {:?}",
                population.shape(),
                self.config.shape
            )));
        }

        let started = Instant::now();
        let mut trajectory = Vec::with_capacity(self.config.generations);

        for generation in 0..self.config.generations {
            self.state = EngineState::Running { generation };
            callback.on_generation_start(generation);

            if let Err(e) = population.evaluate(channel, generation) {
                log::error!("aborting run: {}", e);
                self.state = EngineState::Done;
                return Err(e);
            }

            let report = population.report(generation);
            trajectory.push(report.best_fitness);
            callback.on_generation_complete(&report);

            population.advance(self.config.mutation_rate, &mut self.rng);
        }

        let report = population.report(self.config.generations.saturating_sub(1));
        callback.on_run_complete(&report);
        self.state = EngineState::Done;

        Ok(RunSummary {
            generations: self.config.generations,
            trajectory,
            best: population.best().clone(),
            elapsed: started.elapsed(),
        })
    }
}
