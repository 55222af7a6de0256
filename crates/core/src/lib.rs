//! Solvency Core - Domain types
//!
//! This crate contains the value types a proof-of-reserves audit works with:
//! - `Amount`: Exact arbitrary-precision decimal amount, any sign
//! - `Balances`: Per-asset balance vector with a canonical, hashable form

pub mod amount;
pub mod balance;

pub use amount::{Amount, AmountError};
pub use balance::Balances;
