//! Proof errors

use thiserror::Error;

/// Errors that stop a proof from being checked at all.
///
/// A proof that is checked and does not match is not an error; see
/// `Outcome`.
#[derive(Error, Debug)]
pub enum ProofError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed proof document: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("empty merkle proof file")]
    EmptyProof,

    #[error("Path step {step} has a sibling hash but no position")]
    MissingPosition { step: usize },
}
