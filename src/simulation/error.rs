//! Errors raised by the simulation core.
//!
//! Every variant is a configuration or programming error (topology drift,
//! mismatched genome lengths, invalid parameters). None of them are retried.

use thiserror::Error;

/// Error type shared by the brain, the genetic algorithm and the trainer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The feature vector does not match the topology's input count.
    #[error("expected {expected} brain inputs, got {actual}")]
    InputLength {
        /// Inputs required by the topology.
        expected: usize,
        /// Inputs that were supplied.
        actual: usize,
    },
    /// The weight vector does not match the topology's weight count.
    #[error("expected {expected} brain weights, got {actual}")]
    WeightLength {
        /// Weights required by the topology.
        expected: usize,
        /// Weights that were supplied.
        actual: usize,
    },
    /// Parents and child of a crossover disagree on genome length.
    #[error("genome length mismatch: expected {expected} weights, got {actual}")]
    GenomeLength {
        /// Length every genome in the population must have.
        expected: usize,
        /// Length of the offending genome.
        actual: usize,
    },
    /// A parameter set failed validation.
    #[error("invalid params: {0}")]
    InvalidParams(String),
}
