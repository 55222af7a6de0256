//! Proof document model
//!
//! Field names follow the published JSON (`Root`, `Self`, `Path`, ...); the
//! lowercase spellings are accepted as well. Unknown fields are ignored.

use crate::error::ProofError;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use solvency_core::Balances;
use std::path::Path;

/// Which side of the running node a sibling sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Top of the tree: the published commitment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RootNode {
    #[serde(rename = "Balances", alias = "balances", default, deserialize_with = "nullable")]
    pub balances: Balances,

    #[serde(rename = "Hash", alias = "hash", default, deserialize_with = "nullable")]
    pub hash: String,
}

/// The audited account's own leaf
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeafNode {
    #[serde(rename = "Balances", alias = "balances", default, deserialize_with = "nullable")]
    pub balances: Balances,

    #[serde(rename = "Nonce", alias = "nonce", default, deserialize_with = "nullable")]
    pub nonce: String,
}

/// One level of the path from leaf to root
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathStep {
    /// Sibling's balance vector, merged into the running total
    #[serde(rename = "Balances", alias = "balances", default, deserialize_with = "nullable")]
    pub balances: Balances,

    /// Sibling hash; `None` when the node is carried up paired with itself
    #[serde(rename = "Hash", alias = "hash", default, deserialize_with = "sibling_hash")]
    pub sibling: Option<String>,

    #[serde(rename = "Pos", alias = "pos", default, deserialize_with = "position")]
    pub pos: Option<Side>,
}

/// A complete inclusion proof for one account
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MerkleProof {
    #[serde(rename = "Root", alias = "root", default, deserialize_with = "nullable")]
    pub root: RootNode,

    #[serde(rename = "Self", alias = "self", default, deserialize_with = "nullable")]
    pub leaf: LeafNode,

    #[serde(rename = "Path", alias = "path", default, deserialize_with = "nullable")]
    pub path: Vec<PathStep>,
}

impl MerkleProof {
    /// Decode a proof from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, ProofError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Read and decode a proof file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProofError> {
        let bytes = std::fs::read(path)?;
        Self::from_json(&bytes)
    }

    /// Structural checks that must hold before the path is folded.
    ///
    /// A proof with no root hash or no path proves nothing and is rejected
    /// rather than treated as vacuously valid.
    pub fn check_preconditions(&self) -> Result<(), ProofError> {
        if self.root.hash.is_empty() || self.path.is_empty() {
            return Err(ProofError::EmptyProof);
        }

        if let Some(step) = self
            .path
            .iter()
            .position(|p| p.sibling.is_some() && p.pos.is_none())
        {
            return Err(ProofError::MissingPosition { step });
        }

        Ok(())
    }
}

/// `null` decodes like a missing field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Empty string means "no sibling"
fn sibling_hash<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let hash = Option::<String>::deserialize(deserializer)?;
    Ok(hash.filter(|h| !h.is_empty()))
}

/// Case-insensitive `left` / `right`. Empty string means "unspecified",
/// which is only meaningful for self-paired steps.
fn position<'de, D>(deserializer: D) -> Result<Option<Side>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(pos) if pos.eq_ignore_ascii_case("left") => Ok(Some(Side::Left)),
        Some(pos) if pos.eq_ignore_ascii_case("right") => Ok(Some(Side::Right)),
        Some(other) => Err(de::Error::unknown_variant(other, &["left", "right"])),
    }
}
