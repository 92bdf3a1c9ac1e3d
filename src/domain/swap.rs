//! Swap submission request and outcome.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::Display;

use super::{quote::Quote, token::Token};

/// Progress of the last submitted swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum TxStatus {
    Pending,
    Sending,
    Success,
    Fail(String),
}

/// Everything a submitter needs to sign and send a swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRequest {
    /// Public key of the connected wallet.
    pub wallet: String,
    pub from_token: Token,
    pub to_token: Token,
    pub quote: Quote,
}

/// A landed swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapResult {
    pub signature: String,
    pub input_mint: String,
    pub output_mint: String,
    pub in_amount: Decimal,
    pub out_amount: Decimal,
}
