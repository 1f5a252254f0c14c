use super::channel::{closed_stream, read_line};
use super::protocol;
use super::scoring::ScoringFunction;
use crate::engines::generation::GenomeShape;
use crate::error::{EvodistError, Result};
use std::io::{BufRead, Write};

/// Evaluator side of the protocol.
///
/// Reads genome lines until end of input, answering each with one fitness
/// line (flushed immediately). End of input is a clean shutdown and returns
/// the number of genomes scored. A malformed line aborts before anything is
/// written for it, so the response stream never drifts out of step with the
/// requests.
///
/// With `shape` set, every genome must match its length and alphabet.
pub fn serve<R, W, S>(
    mut reader: R,
    mut writer: W,
    scorer: &S,
    shape: Option<&GenomeShape>,
) -> Result<usize>
where
    R: BufRead,
    W: Write,
    S: ScoringFunction + ?Sized,
{
    let mut buf = Vec::new();
    let mut scored = 0;

    loop {
        let line = match read_line(&mut reader, &mut buf)? {
            Some(Ok(line)) => line,
            Some(Err(line)) => {
                return Err(EvodistError::MalformedGenomeLine {
                    line,
                    reason: "not valid UTF-8".to_string(),
                })
            }
            None => {
                log::debug!("input closed after {} genomes", scored);
                return Ok(scored);
            }
        };

        let genes = match shape {
            Some(shape) => protocol::decode_genome(line, shape)?,
            None => protocol::parse_genome(line)?,
        };

        let fitness = scorer.score(&genes);
        writer
            .write_all(protocol::format_fitness(fitness).as_bytes())
            .and_then(|_| writer.flush())
            .map_err(closed_stream)?;

        scored += 1;
        log::trace!("genome {} scored {} by {}", scored, fitness, scorer.name());
    }
}
