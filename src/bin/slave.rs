//! Reference OneMax evaluator: reads genome lines on stdin, answers each with
//! the sum of its genes on stdout, and exits cleanly when stdin closes.

use anyhow::Context;
use clap::Parser;
use evodist::engines::evaluation::{serve, OneMax};
use evodist::engines::generation::GenomeShape;
use std::io;

/// Score genomes from stdin with OneMax, one fitness line per genome.
#[derive(Parser, Debug)]
#[command(name = "evodist-slave", version, about)]
struct Args {
    /// Reject genome lines of any other length
    genome_length: Option<usize>,

    /// Gene alphabet size checked together with genome_length
    #[arg(default_value_t = 2)]
    alleles: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let shape = args
        .genome_length
        .map(|length| GenomeShape::new(length, args.alleles))
        .transpose()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let scored = serve(stdin.lock(), stdout.lock(), &OneMax, shape.as_ref())
        .context("evaluator stopped on bad input")?;

    log::info!("scored {} genomes", scored);
    Ok(())
}
