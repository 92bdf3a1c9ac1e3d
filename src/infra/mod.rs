//! Collaborators the swap form talks to: balances, quotes and submission.

pub mod ledger;
pub mod quote;

use color_eyre::eyre::Result;

use crate::domain::{
    balance::Balances,
    quote::{Quote, QuoteRequest},
    swap::{SwapRequest, SwapResult},
};

/// Source of wallet balances.
pub trait BalanceSource {
    /// Balances held by `wallet`, keyed by mint.
    fn balances(&self, wallet: &str) -> Result<Balances>;
}

/// Prices a swap between two tokens.
pub trait QuoteProvider {
    fn quote(&self, request: &QuoteRequest) -> Result<Quote>;
}

/// Signs and sends a quoted swap.
pub trait SwapSubmitter {
    fn submit(&self, request: &SwapRequest) -> Result<SwapResult>;
}
