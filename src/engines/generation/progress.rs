use super::evolution_engine::ProgressCallback;
use crate::types::GenerationReport;
use std::io::{self, Stderr, Write};

/// Writes one human-readable status line per generation to a diagnostic
/// sink (stderr unless told otherwise). Never the protocol stream.
pub struct ConsoleProgressCallback<W = Stderr> {
    sink: W,
}

impl ConsoleProgressCallback<Stderr> {
    pub fn new() -> Self {
        Self { sink: io::stderr() }
    }
}

impl Default for ConsoleProgressCallback<Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> ConsoleProgressCallback<W> {
    pub fn with_sink(sink: W) -> Self {
        Self { sink }
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    fn write_report(&mut self, report: &GenerationReport) {
        let genes = report
            .best_genes
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        // Diagnostics only; a broken sink must not stop the run
        let _ = writeln!(
            self.sink,
            "Generation {}, max fitness {}: {}",
            report.generation, report.best_fitness, genes
        );
        let _ = self.sink.flush();
    }
}

impl<W: Write + Send> ProgressCallback for ConsoleProgressCallback<W> {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, report: &GenerationReport) {
        self.write_report(report);
    }

    fn on_run_complete(&mut self, report: &GenerationReport) {
        self.write_report(report);
    }
}

/// Routes status through the `log` facade.
pub struct LogProgressCallback {
    total_generations: usize,
}

impl LogProgressCallback {
    pub fn new(total_generations: usize) -> Self {
        Self { total_generations }
    }

    fn generation_message(&self, report: &GenerationReport) -> String {
        format!(
            "Generation {}/{} complete. Best fitness: {}",
            report.generation + 1,
            self.total_generations,
            report.best_fitness
        )
    }

    fn completion_message(&self, report: &GenerationReport) -> String {
        format!(
            "Run complete after {} generations. Best fitness: {}",
            self.total_generations, report.best_fitness
        )
    }
}

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {}/{} starting", generation + 1, self.total_generations);
    }

    fn on_generation_complete(&mut self, report: &GenerationReport) {
        log::info!("{}", self.generation_message(report));
    }

    fn on_run_complete(&mut self, report: &GenerationReport) {
        log::info!("{}", self.completion_message(report));
    }
}
