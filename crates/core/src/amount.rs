//! Amount - Exact decimal wrapper for audited balances
//!
//! Amounts are arbitrary-precision base-10 values. They are never routed
//! through binary floating point: JSON numbers are read from their source
//! text, and sums never round or overflow.

use bigdecimal::{BigDecimal, Zero};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::ops::Add;
use std::str::FromStr;
use thiserror::Error;

/// Largest decimal exponent accepted on input.
///
/// Canonical text is fixed-point, so `1e1000000000` would otherwise expand
/// to a billion digits.
pub const MAX_EXPONENT: i64 = 10_000;

/// Errors that can occur when reading amounts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Not a decimal number: {0:?}")]
    InvalidFormat(String),

    #[error("Amount {input:?} has a decimal exponent out of range")]
    ExponentTooLarge { input: String },
}

/// An exact, unbounded base-10 amount.
///
/// Equality is numeric, so `1.50` and `1.5` compare equal even though they
/// were written differently.
///
/// # Example
/// ```
/// use solvency_core::Amount;
///
/// let amount: Amount = "10.50".parse().unwrap();
/// assert_eq!(amount.canonical(), "10.5");
///
/// // No fixed width: 18-decimal token balances keep every digit
/// let wei: Amount = "1000000000000.123456789012345678".parse().unwrap();
/// assert_eq!(wei.canonical(), "1000000000000.123456789012345678");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigDecimal);

impl Amount {
    pub fn new(value: BigDecimal) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(BigDecimal::zero())
    }

    /// Get the inner BigDecimal value
    #[inline]
    pub fn value(&self) -> &BigDecimal {
        &self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Canonical text used in hash preimages.
    ///
    /// Fixed-point notation with trailing fractional zeros removed and no
    /// exponent: `10.50` renders as `10.5`, `1e3` as `1000`, and any zero
    /// (including `-0.00`) as `0`.
    pub fn canonical(&self) -> String {
        if self.0.is_zero() {
            return "0".to_string();
        }

        let (digits, scale) = self.0.normalized().into_bigint_and_exponent();
        let text = digits.to_string();
        let (sign, magnitude) = match text.strip_prefix('-') {
            Some(magnitude) => ("-", magnitude),
            None => ("", text.as_str()),
        };

        if scale <= 0 {
            let zeros = "0".repeat(scale.unsigned_abs() as usize);
            return format!("{sign}{magnitude}{zeros}");
        }

        let scale = scale as usize;
        if magnitude.len() > scale {
            let (int_part, frac_part) = magnitude.split_at(magnitude.len() - scale);
            format!("{sign}{int_part}.{frac_part}")
        } else {
            let zeros = "0".repeat(scale - magnitude.len());
            format!("{sign}0.{zeros}{magnitude}")
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl Add for &Amount {
    type Output = Amount;

    fn add(self, other: &Amount) -> Amount {
        Amount(&self.0 + &other.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // BigDecimal tolerates `_` separators; proof producers never emit them
        if s.is_empty() || s.contains('_') {
            return Err(AmountError::InvalidFormat(s.to_string()));
        }

        let value =
            BigDecimal::from_str(s).map_err(|_| AmountError::InvalidFormat(s.to_string()))?;

        let (_, scale) = value.normalized().into_bigint_and_exponent();
        if scale.unsigned_abs() > MAX_EXPONENT as u64 {
            return Err(AmountError::ExponentTooLarge {
                input: s.to_string(),
            });
        }

        Ok(Self(value))
    }
}

impl From<BigDecimal> for Amount {
    fn from(value: BigDecimal) -> Self {
        Self(value)
    }
}

impl From<Amount> for BigDecimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for Amount {
    /// Accepts a decimal string or a JSON number. Numbers arrive as their
    /// source text (serde_json `arbitrary_precision`).
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(text) => text.parse().map_err(de::Error::custom),
            Value::Number(number) => number.to_string().parse().map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "expected a decimal string or number, got {other}"
            ))),
        }
    }
}
