//! Path folding and root comparison

use crate::document::{MerkleProof, Side};
use crate::error::ProofError;
use crate::hash::{combine, leaf_hash, self_paired_hash};
use solvency_core::Balances;
use tracing::{debug, info, warn};

/// Hash and cumulative balances recomputed from the leaf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Computed {
    pub hash: String,
    pub balances: Balances,
}

/// Result of comparing the recomputed root against the published one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Valid,
    /// Recomputed hash differs from the root hash; balances were not compared
    HashMismatch,
    /// Hashes agree but the cumulative balances differ from the root's
    BalanceMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub computed_hash: String,
    pub computed_balances: Balances,
    pub outcome: Outcome,
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        self.outcome == Outcome::Valid
    }
}

/// Recompute the root from the leaf by folding `proof.path` in document order.
///
/// A step with a sibling merges the sibling's balances first, then hashes
/// the two nodes in positional order followed by the merged balances. A step
/// without a sibling hashes the running node with itself and leaves the
/// balances as they are.
pub fn fold_path(proof: &MerkleProof) -> Result<Computed, ProofError> {
    let mut hash = leaf_hash(&proof.leaf.nonce, &proof.leaf.balances);
    let mut balances = proof.leaf.balances.clone();
    debug!(hash = %hash, balances = %balances, "leaf");

    for (step, node) in proof.path.iter().enumerate() {
        hash = match (&node.sibling, node.pos) {
            (None, _) => self_paired_hash(&hash, &balances),
            (Some(sibling), Some(side)) => {
                balances = balances.add(&node.balances);
                match side {
                    Side::Left => combine(sibling, &hash, &balances),
                    Side::Right => combine(&hash, sibling, &balances),
                }
            }
            (Some(_), None) => return Err(ProofError::MissingPosition { step }),
        };
        debug!(step, hash = %hash, balances = %balances, "folded path step");
    }

    Ok(Computed { hash, balances })
}

/// Check a proof against its own published root.
///
/// The hash comparison takes precedence: balances are only compared once the
/// recomputed hash matches the root hash.
pub fn verify(proof: &MerkleProof) -> Result<Verification, ProofError> {
    proof.check_preconditions()?;

    let Computed { hash, balances } = fold_path(proof)?;

    let outcome = if hash != proof.root.hash {
        warn!(computed = %hash, expected = %proof.root.hash, "root hash mismatch");
        Outcome::HashMismatch
    } else if !balances.numerically_eq(&proof.root.balances) {
        warn!(
            computed = %balances,
            expected = %proof.root.balances,
            "root balance mismatch"
        );
        Outcome::BalanceMismatch
    } else {
        info!(steps = proof.path.len(), root = %hash, "merkle proof verified");
        Outcome::Valid
    };

    Ok(Verification {
        computed_hash: hash,
        computed_balances: balances,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{LeafNode, PathStep, RootNode};
    use solvency_core::Amount;

    fn usd(value: &str) -> Balances {
        [("USD", value.parse::<Amount>().unwrap())].into_iter().collect()
    }

    fn leaf() -> LeafNode {
        LeafNode {
            balances: usd("10"),
            nonce: "n1".to_string(),
        }
    }

    fn sibling(hash: &str, value: &str, pos: Side) -> PathStep {
        PathStep {
            balances: usd(value),
            sibling: Some(hash.to_string()),
            pos: Some(pos),
        }
    }

    fn proof_with(path: Vec<PathStep>) -> MerkleProof {
        let mut proof = MerkleProof {
            root: RootNode::default(),
            leaf: leaf(),
            path,
        };
        let computed = fold_path(&proof).unwrap();
        proof.root = RootNode {
            balances: computed.balances,
            hash: computed.hash,
        };
        proof
    }

    #[test]
    fn test_fold_right_sibling() {
        let proof = proof_with(vec![sibling("s1", "5", Side::Right)]);

        let leaf = leaf_hash("n1", &usd("10"));
        let expected = combine(&leaf, "s1", &usd("15"));
        assert_eq!(proof.root.hash, expected);
        assert_eq!(proof.root.balances, usd("15"));
    }

    #[test]
    fn test_fold_left_sibling() {
        let proof = proof_with(vec![sibling("s1", "5", Side::Left)]);

        let leaf = leaf_hash("n1", &usd("10"));
        let expected = combine("s1", &leaf, &usd("15"));
        assert_eq!(proof.root.hash, expected);
    }

    #[test]
    fn test_fold_self_paired_ignores_step_balances() {
        let step = PathStep {
            balances: usd("99"),
            sibling: None,
            pos: None,
        };
        let proof = proof_with(vec![step]);

        let leaf = leaf_hash("n1", &usd("10"));
        assert_eq!(proof.root.hash, self_paired_hash(&leaf, &usd("10")));
        assert_eq!(proof.root.balances, usd("10"));
    }

    #[test]
    fn test_fold_missing_position() {
        let mut proof = proof_with(vec![sibling("s1", "5", Side::Right)]);
        proof.path[0].pos = None;

        assert!(matches!(
            fold_path(&proof),
            Err(ProofError::MissingPosition { step: 0 })
        ));
    }

    #[test]
    fn test_verify_valid() {
        let proof = proof_with(vec![
            sibling("s1", "5", Side::Right),
            PathStep::default(),
            sibling("s2", "2.5", Side::Left),
        ]);

        let verification = verify(&proof).unwrap();
        assert!(verification.is_valid());
        assert_eq!(verification.computed_balances, usd("17.5"));
    }

    #[test]
    fn test_verify_balance_mismatch() {
        let mut proof = proof_with(vec![sibling("s1", "5", Side::Right)]);
        proof.root.balances = usd("16");

        let verification = verify(&proof).unwrap();
        assert_eq!(verification.outcome, Outcome::BalanceMismatch);
        assert_eq!(verification.computed_hash, proof.root.hash);
    }

    #[test]
    fn test_verify_hash_mismatch_takes_precedence() {
        let mut proof = proof_with(vec![sibling("s1", "5", Side::Right)]);
        proof.root.hash = "00".repeat(32);
        proof.root.balances = usd("16");

        let verification = verify(&proof).unwrap();
        assert_eq!(verification.outcome, Outcome::HashMismatch);
    }

    #[test]
    fn test_verify_empty_path_rejected() {
        let mut proof = proof_with(vec![sibling("s1", "5", Side::Right)]);
        proof.path.clear();

        assert!(matches!(verify(&proof), Err(ProofError::EmptyProof)));
    }
}
