use super::traits::{ConfigSection, ConfigManifest, FieldManifest};
use crate::engines::generation::DEFAULT_MUTATION_RATE;
use crate::error::EvodistError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_generations: usize,
    pub genome_length: usize,
    pub alleles: u32,
    pub mutation_rate: f64,
    /// Fixed seed for reproducible runs; entropy when absent.
    pub seed: Option<u64>,
    /// Log total wall-clock run time when the master shuts down.
    pub report_total_time: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            num_generations: 50,
            genome_length: 100,
            alleles: 2,
            mutation_rate: DEFAULT_MUTATION_RATE,
            seed: None,
            report_total_time: false,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), EvodistError> {
        if self.population_size < 1 {
            return Err(EvodistError::Configuration(
                "Population size must be at least 1".to_string()
            ));
        }
        if self.genome_length < 1 {
            return Err(EvodistError::Configuration(
                "Genome length must be at least 1".to_string()
            ));
        }
        if self.alleles < 2 {
            return Err(EvodistError::Configuration(
                "Alleles must be at least 2".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EvodistError::Configuration(
                "Mutation rate must be between 0 and 1".to_string()
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        let defaults = Self::default();
        ConfigManifest {
            section: "Evolution".to_string(),
            fields: vec![
                FieldManifest::new(
                    "population_size",
                    "integer",
                    serde_json::json!(defaults.population_size),
                    "Number of candidates evaluated per generation",
                )
                .bounded(Some(1.0), None),
                FieldManifest::new(
                    "num_generations",
                    "integer",
                    serde_json::json!(defaults.num_generations),
                    "Evaluate/advance cycles before the run stops",
                )
                .bounded(Some(0.0), None),
                FieldManifest::new(
                    "genome_length",
                    "integer",
                    serde_json::json!(defaults.genome_length),
                    "Genes per candidate",
                )
                .bounded(Some(1.0), None),
                FieldManifest::new(
                    "alleles",
                    "integer",
                    serde_json::json!(defaults.alleles),
                    "Distinct values a gene can take (2 = binary)",
                )
                .bounded(Some(2.0), None),
                FieldManifest::new(
                    "mutation_rate",
                    "float",
                    serde_json::json!(defaults.mutation_rate),
                    "Per-gene probability of mutation",
                )
                .bounded(Some(0.0), Some(1.0)),
                FieldManifest::new(
                    "seed",
                    "integer",
                    serde_json::Value::Null,
                    "Random seed; unset draws from entropy",
                ),
                FieldManifest::new(
                    "report_total_time",
                    "boolean",
                    serde_json::json!(defaults.report_total_time),
                    "Report total run time in real time at shutdown",
                ),
            ],
        }
    }
}
