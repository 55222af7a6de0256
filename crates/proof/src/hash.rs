//! Node hashing for balance-sum Merkle trees
//!
//! Every preimage ends with the canonical form of the balance vector the
//! node commits to.

use sha2::{Digest, Sha256};
use solvency_core::Balances;

/// SHA256 of `preimage`, lowercase hex
pub fn hash(preimage: &str) -> String {
    digest(&[preimage])
}

/// Leaf hash: `SHA256(nonce || canonical(balances))`
pub fn leaf_hash(nonce: &str, balances: &Balances) -> String {
    digest(&[nonce, &balances.canonical_form()])
}

/// Node without a sibling, paired with itself: `SHA256(node || node || canonical(balances))`
pub fn self_paired_hash(node: &str, balances: &Balances) -> String {
    digest(&[node, node, &balances.canonical_form()])
}

/// Parent of two nodes: `SHA256(left || right || canonical(balances))`
///
/// `balances` is the parent's cumulative vector, i.e. after the sibling's
/// balances have been merged in.
pub fn combine(left: &str, right: &str, balances: &Balances) -> String {
    digest(&[left, right, &balances.canonical_form()])
}

fn digest(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}
