//! Line codec for the master/evaluator wire protocol.
//!
//! Master -> evaluator: one genome per line, genes as space-separated decimal
//! integers. Evaluator -> master: one fitness per line, a single numeric token.
//! Lines carry no sequence numbers; position in the stream is the only
//! correlation between a genome and its score.

use crate::engines::generation::{Genome, GenomeShape};
use crate::error::{EvodistError, Result};
use crate::types::Fitness;

/// Serialize genes as a newline-terminated protocol line.
pub fn encode_genome(genes: &[u32]) -> String {
    let mut line = genes
        .iter()
        .map(|g| g.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    line.push('\n');
    line
}

/// Parse a genome line of any length. Blank lines are rejected.
pub fn parse_genome(line: &str) -> Result<Genome> {
    let genes = line
        .split_whitespace()
        .map(|token| {
            token.parse::<u32>().map_err(|_| EvodistError::MalformedGenomeLine {
                line: trim_eol(line).to_string(),
                reason: format!("token {:?} is not an unsigned integer", token),
            })
        })
        .collect::<Result<Genome>>()?;

    if genes.is_empty() {
        return Err(EvodistError::MalformedGenomeLine {
            line: trim_eol(line).to_string(),
            reason: "no genes on line".to_string(),
        });
    }

    Ok(genes)
}

/// Parse a genome line that must match `shape` exactly.
pub fn decode_genome(line: &str, shape: &GenomeShape) -> Result<Genome> {
    let genes = parse_genome(line)?;

    if genes.len() != shape.length {
        return Err(EvodistError::MalformedGenomeLine {
            line: trim_eol(line).to_string(),
            reason: format!("expected {} genes, found {}", shape.length, genes.len()),
        });
    }
    if let Some(bad) = genes.iter().find(|&&g| g >= shape.alleles) {
        return Err(EvodistError::MalformedGenomeLine {
            line: trim_eol(line).to_string(),
            reason: format!("gene {} outside alphabet 0..{}", bad, shape.alleles),
        });
    }

    Ok(genes)
}

/// Parse a fitness line: exactly one finite numeric token.
pub fn parse_fitness(line: &str) -> Result<Fitness> {
    let malformed = || EvodistError::MalformedFitnessLine {
        line: trim_eol(line).to_string(),
    };

    let mut tokens = line.split_whitespace();
    let token = tokens.next().ok_or_else(malformed)?;
    if tokens.next().is_some() {
        return Err(malformed());
    }

    let fitness: Fitness = token.parse().map_err(|_| malformed())?;
    if !fitness.is_finite() {
        return Err(malformed());
    }
    Ok(fitness)
}

/// Serialize a fitness as a newline-terminated protocol line.
///
/// Integral scores print without a fractional part (`37`, not `37.0`).
pub fn format_fitness(fitness: Fitness) -> String {
    format!("{}\n", fitness)
}

fn trim_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}
