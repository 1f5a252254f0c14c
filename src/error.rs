use std::fmt;
use thiserror::Error;

/// Which half of an evaluation round a channel failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Send,
    Receive,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Send => write!(f, "send"),
            Phase::Receive => write!(f, "receive"),
        }
    }
}

#[derive(Error, Debug)]
pub enum EvodistError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Malformed genome line {line:?}: {reason}")]
    MalformedGenomeLine { line: String, reason: String },

    #[error("Malformed fitness line {line:?}")]
    MalformedFitnessLine { line: String },

    #[error("Evaluation channel closed before a fitness line arrived")]
    PrematureStreamClose,

    #[error("{phase} phase failed in generation {generation} at candidate {candidate}: {source}")]
    Round {
        phase: Phase,
        generation: usize,
        candidate: usize,
        #[source]
        source: Box<EvodistError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config source error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl EvodistError {
    /// Attach round context to a channel failure.
    pub fn in_round(self, phase: Phase, generation: usize, candidate: usize) -> Self {
        EvodistError::Round {
            phase,
            generation,
            candidate,
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through any round context.
    pub fn root(&self) -> &EvodistError {
        match self {
            EvodistError::Round { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, EvodistError>;
