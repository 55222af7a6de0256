//! Solvency Proof - Merkle balance-sum proof verification
//!
//! A proof walks from one account's leaf up to a published root. Every level
//! commits to both a hash and the cumulative balance vector below it, so a
//! successful check shows inclusion of the leaf and conservation of totals.
//!
//! # Key Types
//! - `MerkleProof`: Decoded proof document (root, leaf, path)
//! - `PathStep`: One level of the path, with an optional sibling
//! - `Verification`: Computed hash/balances and the outcome

pub mod document;
pub mod error;
pub mod hash;
pub mod verify;

pub use document::{LeafNode, MerkleProof, PathStep, RootNode, Side};
pub use error::ProofError;
pub use verify::{fold_path, verify, Computed, Outcome, Verification};
