//! Swapform - a terminal token-swap form.
//!
//! This library provides:
//! - Half/Max balance apportionment with a native-token reserve
//! - Swap form state, field disablement and numeric input masking
//! - Offline quoting from a USD price table
//! - A local JSON ledger standing in for wallet balances and swap submission

pub mod config;
pub mod domain;
pub mod infra;
