use evodist::config::{AppConfig, ConfigManager, ConfigSection, EvaluatorConfig, EvolutionConfig};
use evodist::engines::generation::EvolutionConfig as EngineEvolutionConfig;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_defaults_are_valid() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.evolution.population_size, 50);
    assert_eq!(config.evolution.num_generations, 50);
    assert_eq!(config.evolution.genome_length, 100);
    assert_eq!(config.evolution.mutation_rate, 0.025);
    assert!(config.evaluator.command.is_none());
    assert!(!config.evolution.report_total_time);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("run.toml");
    fs::write(
        &path,
        "[evolution]\npopulation_size = 8\nseed = 42\nreport_total_time = true\n\n[evaluator]\ncommand = \"python3\"\nargs = [\"slave.py\"]\n",
    )
    .unwrap();

    let mut manager = ConfigManager::new();
    manager.load_from_file(&path).unwrap();
    let config = manager.get();

    assert_eq!(config.evolution.population_size, 8);
    assert_eq!(config.evolution.seed, Some(42));
    assert!(config.evolution.report_total_time);
    assert_eq!(config.evolution.genome_length, 100);
    assert_eq!(config.evaluator.command.as_deref(), Some("python3"));
    assert_eq!(config.evaluator.args, vec!["slave.py".to_string()]);
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[evolution]\nmutation_rate = 1.5\n").unwrap();

    let mut manager = ConfigManager::new();
    assert!(manager.load_from_file(&path).is_err());
    // Failed loads leave the previous configuration in place
    assert_eq!(manager.get(), AppConfig::default());
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let mut manager = ConfigManager::new();
    assert!(manager.load_from_file(dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("saved.toml");

    let mut manager = ConfigManager::new();
    manager
        .update(|c| {
            c.evolution.genome_length = 12;
            c.evolution.alleles = 4;
            c.evolution.seed = Some(9);
        })
        .unwrap();
    manager.save_to_file(&path).unwrap();

    let mut reloaded = ConfigManager::new();
    reloaded.load_from_file(&path).unwrap();
    assert_eq!(reloaded.get(), manager.get());
}

#[test]
fn test_update_rejects_invalid_change() {
    let mut manager = ConfigManager::new();
    let result = manager.update(|c| c.evolution.alleles = 1);

    assert!(result.is_err());
    assert_eq!(manager.get().evolution.alleles, 2);
}

#[test]
fn test_evaluator_args_need_command() {
    let config = EvaluatorConfig {
        command: None,
        args: vec!["--fast".to_string()],
    };
    assert!(config.validate().is_err());

    let config = EvaluatorConfig {
        command: Some("  ".to_string()),
        args: Vec::new(),
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_manifest_lists_every_field() {
    let manifest = EvolutionConfig::default().to_manifest();
    let names: Vec<&str> = manifest.fields.iter().map(|f| f.name.as_str()).collect();

    assert_eq!(EvolutionConfig::section_name(), "evolution");
    assert_eq!(
        names,
        vec![
            "population_size",
            "num_generations",
            "genome_length",
            "alleles",
            "mutation_rate",
            "seed",
            "report_total_time"
        ]
    );
    let rate = &manifest.fields[4];
    assert_eq!(rate.min, Some(0.0));
    assert_eq!(rate.max, Some(1.0));
}

#[test]
fn test_section_converts_to_engine_config() {
    let section = EvolutionConfig {
        population_size: 4,
        num_generations: 3,
        genome_length: 5,
        alleles: 2,
        mutation_rate: 0.5,
        seed: Some(1),
        report_total_time: true,
    };

    let engine = EngineEvolutionConfig::try_from(&section).unwrap();
    assert_eq!(engine.population_size, 4);
    assert_eq!(engine.generations, 3);
    assert_eq!(engine.shape.length, 5);
    assert_eq!(engine.mutation_rate.probability(), 0.5);
}
