use serde::{Deserialize, Serialize};

/// Scalar quality score assigned by an evaluator.
///
/// Evaluators usually answer with integers (OneMax counts bits), but any finite
/// decimal literal is accepted on the wire.
pub type Fitness = f64;

/// Snapshot of a population's best candidate, handed to progress callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generation: usize,
    pub best_fitness: Fitness,
    pub best_genes: Vec<u32>,
    pub population_size: usize,
}
