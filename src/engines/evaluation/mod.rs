pub mod channel;
pub mod evaluator;
pub mod process;
pub mod protocol;
pub mod scoring;

pub use channel::{EvaluationChannel, InProcessChannel, LineChannel};
pub use evaluator::serve;
pub use process::EvaluatorProcess;
pub use scoring::{OneMax, ScoringFunction};
