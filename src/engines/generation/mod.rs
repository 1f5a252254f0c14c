pub mod operators;
pub mod evolution_engine;
pub mod progress;
pub mod genome;
pub mod population;

pub use genome::{Candidate, Genome, GenomeShape, MutationRate, DEFAULT_MUTATION_RATE};
pub use population::Population;
pub use evolution_engine::{
    EngineState, EvolutionConfig, EvolutionEngine, ProgressCallback, RunSummary,
};
pub use progress::{ConsoleProgressCallback, LogProgressCallback};
