//! CLI commands

use anyhow::Context;
use solvency_proof::{verify, MerkleProof, Outcome, ProofError, Verification};
use std::path::Path;

/// Read and decode a proof file
pub fn load_proof(path: &Path) -> Result<MerkleProof, anyhow::Error> {
    MerkleProof::from_file(path).context("invalid merkle proof file")
}

/// Validate the proof stored at `path` and print the report.
///
/// A proof that fails validation is still `Ok`; errors mean the proof could
/// not be checked at all.
pub fn validate_file(path: &Path) -> Result<Verification, anyhow::Error> {
    let proof = load_proof(path)?;
    tracing::debug!(path = %path.display(), steps = proof.path.len(), "loaded merkle proof");

    let verification = match verify(&proof) {
        Ok(verification) => verification,
        Err(e @ ProofError::EmptyProof) => return Err(e.into()),
        Err(e) => return Err(e).context("invalid merkle proof file"),
    };

    print!("{}", render_report(&proof, &verification));
    Ok(verification)
}

/// Report text: computed vs. published hash, then (only if the hashes match)
/// computed vs. published balances, then the verdict.
pub fn render_report(proof: &MerkleProof, verification: &Verification) -> String {
    let mut lines = vec![
        format!("proofed hash: {}", verification.computed_hash),
        format!("root hash: {}", proof.root.hash),
    ];

    if verification.outcome != Outcome::HashMismatch {
        lines.push(format!(
            "proofed balances: {}",
            verification.computed_balances.canonical_form()
        ));
        lines.push(format!(
            "root balances: {}",
            proof.root.balances.canonical_form()
        ));
    }

    lines.push(verdict(verification.outcome).to_string());

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

/// Human-readable verdict line
pub fn verdict(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Valid => "Merkle tree path validation passed",
        Outcome::HashMismatch | Outcome::BalanceMismatch => "Merkle tree path validation failed.",
    }
}
