use super::{
    evaluator::EvaluatorConfig,
    evolution::EvolutionConfig,
    traits::{ConfigManifest, ConfigSection},
};
use crate::error::EvodistError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `EVODIST_EVOLUTION__SEED=7`.
/// List fields take space-separated values: `EVODIST_EVALUATOR__ARGS="slave.py 100"`.
pub const ENV_PREFIX: &str = "EVODIST";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub evaluator: EvaluatorConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), EvodistError> {
        self.evolution.validate()?;
        self.evaluator.validate()?;
        Ok(())
    }

    pub fn manifests(&self) -> Vec<ConfigManifest> {
        vec![self.evolution.to_manifest(), self.evaluator.to_manifest()]
    }
}

pub struct ConfigManager {
    config: AppConfig,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Defaults overlaid with `EVODIST_*` environment variables only.
    pub fn from_env() -> Result<Self, EvodistError> {
        let config: AppConfig = ::config::Config::builder()
            .add_source(environment())
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(Self { config })
    }

    /// Load a TOML file, then apply environment overrides on top.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), EvodistError> {
        let path = path.as_ref();
        let config: AppConfig = ::config::Config::builder()
            .add_source(::config::File::from(path).format(::config::FileFormat::Toml))
            .add_source(environment())
            .build()
            .map_err(|e| {
                EvodistError::Configuration(format!("Failed to read config {}: {}", path.display(), e))
            })?
            .try_deserialize()
            .map_err(|e| {
                EvodistError::Configuration(format!("Failed to parse config {}: {}", path.display(), e))
            })?;

        config.validate()?;

        log::debug!("loaded configuration from {}", path.display());
        self.config = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), EvodistError> {
        let toml_str = toml::to_string_pretty(&self.config)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.clone()
    }

    /// Apply `f` to a copy; the change is kept only if it validates.
    pub fn update<F>(&mut self, f: F) -> Result<(), EvodistError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.clone();
        f(&mut config);
        config.validate()?;
        self.config = config;
        Ok(())
    }
}

fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(" ")
        .with_list_parse_key("evaluator.args")
}
