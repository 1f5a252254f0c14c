use super::protocol;
use super::scoring::ScoringFunction;
use crate::error::{EvodistError, Result};
use crate::types::Fitness;
use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, ErrorKind, Stdin, Stdout, Write};

/// Duplex stream to a single evaluator.
///
/// Every `send_genome` must eventually be matched by exactly one
/// `receive_fitness`, and responses come back in send order.
pub trait EvaluationChannel {
    /// Write one genome line and flush it.
    fn send_genome(&mut self, genes: &[u32]) -> Result<()>;

    /// Block until the next fitness line arrives.
    fn receive_fitness(&mut self) -> Result<Fitness>;
}

impl<C: EvaluationChannel + ?Sized> EvaluationChannel for &mut C {
    fn send_genome(&mut self, genes: &[u32]) -> Result<()> {
        (**self).send_genome(genes)
    }

    fn receive_fitness(&mut self) -> Result<Fitness> {
        (**self).receive_fitness()
    }
}

/// Evaluation channel over any line-oriented reader/writer pair.
pub struct LineChannel<R, W> {
    reader: R,
    writer: W,
    line: Vec<u8>,
}

impl<R: BufRead, W: Write> LineChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            line: Vec::new(),
        }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl LineChannel<BufReader<Stdin>, Stdout> {
    /// Talk to the evaluator through this process's own stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> EvaluationChannel for LineChannel<R, W> {
    fn send_genome(&mut self, genes: &[u32]) -> Result<()> {
        let line = protocol::encode_genome(genes);
        self.writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(closed_stream)?;
        log::trace!("sent genome of {} genes", genes.len());
        Ok(())
    }

    fn receive_fitness(&mut self) -> Result<Fitness> {
        let line = read_line(&mut self.reader, &mut self.line)?
            .ok_or(EvodistError::PrematureStreamClose)?;
        let fitness = protocol::parse_fitness(line.map_err(|line| {
            EvodistError::MalformedFitnessLine { line }
        })?)?;
        log::trace!("received fitness {}", fitness);
        Ok(fitness)
    }
}

/// A peer that hung up while we were writing counts as a closed stream.
pub(crate) fn closed_stream(e: io::Error) -> EvodistError {
    match e.kind() {
        ErrorKind::BrokenPipe | ErrorKind::ConnectionReset => EvodistError::PrematureStreamClose,
        _ => EvodistError::Io(e),
    }
}

/// Read one line into `buf`. `None` at end of stream; the inner `Err`
/// carries a lossy rendering of a line that is not valid UTF-8.
pub(crate) fn read_line<'a, R: BufRead>(
    reader: &mut R,
    buf: &'a mut Vec<u8>,
) -> Result<Option<std::result::Result<&'a str, String>>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(std::str::from_utf8(buf).map_err(|_| {
        String::from_utf8_lossy(buf).trim_end_matches(['\n', '\r']).to_string()
    })))
}

/// Evaluates in-process with a scoring function, keeping the queueing
/// behaviour of a real evaluator: scores are produced in send order and a
/// receive with nothing outstanding fails like a closed stream.
pub struct InProcessChannel<S> {
    scorer: S,
    pending: VecDeque<Vec<u32>>,
    evaluated: usize,
}

impl<S: ScoringFunction> InProcessChannel<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            pending: VecDeque::new(),
            evaluated: 0,
        }
    }

    /// Number of genomes scored so far.
    pub fn evaluated(&self) -> usize {
        self.evaluated
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl<S: ScoringFunction> EvaluationChannel for InProcessChannel<S> {
    fn send_genome(&mut self, genes: &[u32]) -> Result<()> {
        self.pending.push_back(genes.to_vec());
        Ok(())
    }

    fn receive_fitness(&mut self) -> Result<Fitness> {
        let genes = self
            .pending
            .pop_front()
            .ok_or(EvodistError::PrematureStreamClose)?;
        self.evaluated += 1;
        Ok(self.scorer.score(&genes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::evaluation::scoring::OneMax;
    use std::io::Cursor;

    #[test]
    fn test_line_channel_writes_and_reads() {
        let mut channel = LineChannel::new(Cursor::new("3\n0\n"), Vec::new());

        channel.send_genome(&[1, 1, 0, 1]).unwrap();
        channel.send_genome(&[0, 0, 0, 0]).unwrap();
        assert_eq!(channel.receive_fitness().unwrap(), 3.0);
        assert_eq!(channel.receive_fitness().unwrap(), 0.0);

        let (_, written) = channel.into_parts();
        assert_eq!(String::from_utf8(written).unwrap(), "1 1 0 1\n0 0 0 0\n");
    }

    #[test]
    fn test_line_channel_end_of_stream() {
        let mut channel = LineChannel::new(Cursor::new("5\n"), Vec::new());
        assert_eq!(channel.receive_fitness().unwrap(), 5.0);
        assert!(matches!(
            channel.receive_fitness(),
            Err(EvodistError::PrematureStreamClose)
        ));
    }

    #[test]
    fn test_line_channel_last_line_without_newline() {
        let mut channel = LineChannel::new(Cursor::new("12"), Vec::new());
        assert_eq!(channel.receive_fitness().unwrap(), 12.0);
    }

    #[test]
    fn test_line_channel_malformed_fitness() {
        let mut channel = LineChannel::new(Cursor::new("twelve\n"), Vec::new());
        assert!(matches!(
            channel.receive_fitness(),
            Err(EvodistError::MalformedFitnessLine { .. })
        ));
    }

    #[test]
    fn test_line_channel_invalid_utf8_is_malformed() {
        let mut channel = LineChannel::new(Cursor::new(vec![0xff, 0xfe, b'\n']), Vec::new());
        assert!(matches!(
            channel.receive_fitness(),
            Err(EvodistError::MalformedFitnessLine { .. })
        ));
    }

    struct HungUp;

    impl Write for HungUp {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "peer hung up"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_line_channel_send_to_closed_peer() {
        let mut channel = LineChannel::new(Cursor::new(""), HungUp);
        assert!(matches!(
            channel.send_genome(&[1, 0]),
            Err(EvodistError::PrematureStreamClose)
        ));
    }

    #[test]
    fn test_in_process_channel_preserves_order() {
        let mut channel = InProcessChannel::new(OneMax);
        channel.send_genome(&[1, 1, 1]).unwrap();
        channel.send_genome(&[0, 1, 0]).unwrap();
        assert_eq!(channel.pending(), 2);

        assert_eq!(channel.receive_fitness().unwrap(), 3.0);
        assert_eq!(channel.receive_fitness().unwrap(), 1.0);
        assert_eq!(channel.evaluated(), 2);
        assert!(channel.receive_fitness().is_err());
    }
}
