use super::channel::{EvaluationChannel, LineChannel};
use crate::error::{EvodistError, Result};
use crate::types::Fitness;
use std::io::BufReader;
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};

/// An evaluator running as a child process, reached through its stdin/stdout.
///
/// Stderr is inherited so the evaluator's own diagnostics stay visible.
pub struct EvaluatorProcess {
    child: Child,
    channel: Option<LineChannel<BufReader<ChildStdout>, ChildStdin>>,
}

impl EvaluatorProcess {
    pub fn spawn<S: AsRef<str>>(command: &str, args: &[S]) -> Result<Self> {
        let mut child = Command::new(command)
            .args(args.iter().map(|a| a.as_ref()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let stdin = child.stdin.take().ok_or_else(|| {
            EvodistError::Configuration(format!("Evaluator {:?} has no stdin pipe", command))
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            EvodistError::Configuration(format!("Evaluator {:?} has no stdout pipe", command))
        })?;

        log::info!("spawned evaluator {:?} (pid {})", command, child.id());

        Ok(Self {
            child,
            channel: Some(LineChannel::new(BufReader::new(stdout), stdin)),
        })
    }

    /// Close the evaluator's input and wait for it to exit.
    pub fn shutdown(mut self) -> Result<ExitStatus> {
        // Dropping the channel closes the child's stdin, which is its signal to stop.
        self.channel.take();
        let status = self.child.wait()?;
        log::info!("evaluator exited with {}", status);
        Ok(status)
    }

    fn channel(&mut self) -> Result<&mut LineChannel<BufReader<ChildStdout>, ChildStdin>> {
        self.channel.as_mut().ok_or(EvodistError::PrematureStreamClose)
    }
}

impl EvaluationChannel for EvaluatorProcess {
    fn send_genome(&mut self, genes: &[u32]) -> Result<()> {
        self.channel()?.send_genome(genes)
    }

    fn receive_fitness(&mut self) -> Result<Fitness> {
        self.channel()?.receive_fitness()
    }
}

/// Dropped without `shutdown`: the run was abandoned, so the evaluator is
/// killed rather than waited on.
impl Drop for EvaluatorProcess {
    fn drop(&mut self) {
        if self.channel.take().is_some() {
            if let Err(e) = self.child.kill() {
                log::debug!("evaluator already gone: {}", e);
            }
            let _ = self.child.wait();
        }
    }
}
