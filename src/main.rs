use anyhow::Context;
use clap::Parser;
use evodist::config::{AppConfig, ConfigManager};
use evodist::engines::evaluation::{
    EvaluationChannel, EvaluatorProcess, InProcessChannel, LineChannel, OneMax,
};
use evodist::engines::generation::{
    ConsoleProgressCallback, EvolutionConfig, EvolutionEngine, LogProgressCallback, Population,
    ProgressCallback,
};
use std::path::PathBuf;

/// Evolve a population, delegating fitness to an evaluator over a line protocol.
///
/// Without `[evaluator] command` set, genomes go to stdout and fitness is
/// read from stdin.
#[derive(Parser, Debug)]
#[command(name = "evodist-master", version, about)]
struct Args {
    /// TOML configuration file (EVODIST_* env vars override it)
    #[arg(long, env = "EVODIST_CONFIG")]
    config: Option<PathBuf>,

    /// Score with the built-in OneMax evaluator instead of a channel
    #[arg(long)]
    in_process: bool,

    /// Report progress through the log instead of status lines on stderr
    #[arg(long)]
    log_progress: bool,

    /// Print the configuration fields as JSON and exit
    #[arg(long)]
    describe_config: bool,

    /// Write the effective configuration as TOML and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut manager = ConfigManager::from_env().context("invalid environment configuration")?;
    if let Some(path) = &args.config {
        manager
            .load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
    }
    let app_config = manager.get();

    if args.describe_config {
        println!("{}", serde_json::to_string_pretty(&app_config.manifests())?);
        return Ok(());
    }
    if let Some(path) = &args.write_config {
        manager
            .save_to_file(path)
            .with_context(|| format!("writing {}", path.display()))?;
        return Ok(());
    }

    run(&app_config, &args)
}

fn run(app_config: &AppConfig, args: &Args) -> anyhow::Result<()> {
    let engine_config = EvolutionConfig::try_from(&app_config.evolution)?;
    log::info!(
        "population {} x genome {} over {} alleles, {} generations, mutation rate {}",
        engine_config.population_size,
        engine_config.shape.length,
        engine_config.shape.alleles,
        engine_config.generations,
        engine_config.mutation_rate.probability()
    );

    let mut progress: Box<dyn ProgressCallback> = if args.log_progress {
        Box::new(LogProgressCallback::new(engine_config.generations))
    } else {
        Box::new(ConsoleProgressCallback::new())
    };
    let mut engine = EvolutionEngine::new(engine_config);
    let population = engine.initialize_population()?;
    let report_time = app_config.evolution.report_total_time;

    if args.in_process {
        let mut channel = InProcessChannel::new(OneMax);
        evolve(&mut engine, population, &mut channel, progress.as_mut(), report_time)
    } else if let Some(command) = &app_config.evaluator.command {
        let mut evaluator = EvaluatorProcess::spawn(command, app_config.evaluator.args.as_slice())
            .with_context(|| format!("spawning evaluator {:?}", command))?;
        evolve(&mut engine, population, &mut evaluator, progress.as_mut(), report_time)?;
        let status = evaluator.shutdown()?;
        if !status.success() {
            log::warn!("evaluator {:?} exited with {}", command, status);
        }
        Ok(())
    } else {
        let mut channel = LineChannel::stdio();
        evolve(&mut engine, population, &mut channel, progress.as_mut(), report_time)
    }
}

fn evolve<C: EvaluationChannel>(
    engine: &mut EvolutionEngine,
    population: Population,
    channel: &mut C,
    progress: &mut dyn ProgressCallback,
    report_time: bool,
) -> anyhow::Result<()> {
    let summary = engine
        .run(population, channel, progress)
        .context("evolution run aborted")?;

    log::info!(
        "finished {} generations, best fitness {}",
        summary.generations,
        summary.best.fitness
    );
    if report_time {
        log::info!("total time: {:.3}s", summary.elapsed.as_secs_f64());
    }
    Ok(())
}
