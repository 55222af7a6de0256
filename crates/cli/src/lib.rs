//! Solvency CLI - Merkle proof validator
//!
//! This crate provides the `merkle-validator` binary and the command it runs.

pub mod commands;
