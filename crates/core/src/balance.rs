//! Balances - per-asset balance vector
//!
//! The canonical form of a vector is part of every node's hash preimage, so
//! it must be byte-for-byte reproducible: keys ascend by byte value, values
//! are canonical amount strings, and no whitespace is emitted.

use crate::amount::Amount;
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::io;

/// Per-asset balance vector.
///
/// Backed by a `BTreeMap`, so iteration (and therefore the canonical form)
/// is always in key order regardless of how the vector was built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balances(BTreeMap<String, Amount>);

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, asset: &str) -> Option<&Amount> {
        self.0.get(asset)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Amount> {
        self.0.iter()
    }

    /// Pointwise sum. Assets present in only one operand pass through.
    pub fn add(&self, other: &Balances) -> Balances {
        let mut sum = self.0.clone();

        for (asset, amount) in &other.0 {
            match sum.entry(asset.clone()) {
                btree_map::Entry::Vacant(slot) => {
                    slot.insert(amount.clone());
                }
                btree_map::Entry::Occupied(mut slot) => {
                    let total = slot.get() + amount;
                    slot.insert(total);
                }
            }
        }

        Balances(sum)
    }

    /// Same key set and numerically equal amounts for every key.
    pub fn numerically_eq(&self, other: &Balances) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .all(|(asset, amount)| other.0.get(asset) == Some(amount))
    }

    /// Compact JSON object used as hash preimage material,
    /// e.g. `{"BTC":"1.5","USD":"10"}`.
    pub fn canonical_form(&self) -> String {
        let mut out = Vec::with_capacity(16 * (self.0.len() + 1));
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, HtmlSafeFormatter);
        self.serialize(&mut serializer)
            .expect("Balances serialization should never fail");
        // serde_json only ever writes UTF-8
        String::from_utf8_lossy(&out).into_owned()
    }
}

impl fmt::Display for Balances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_form())
    }
}

impl<K: Into<String>> FromIterator<(K, Amount)> for Balances {
    fn from_iter<I: IntoIterator<Item = (K, Amount)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<'a> IntoIterator for &'a Balances {
    type Item = (&'a String, &'a Amount);
    type IntoIter = btree_map::Iter<'a, String, Amount>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Compact formatter that additionally escapes `<`, `>`, `&`, U+2028 and
/// U+2029, matching the encoder the published proofs were produced with.
struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            let escaped = match c {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(fragment[start..i].as_bytes())?;
            writer.write_all(escaped.as_bytes())?;
            start = i + c.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
