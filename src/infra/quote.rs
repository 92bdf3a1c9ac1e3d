//! Offline quotes priced from the configured USD reference prices.

use std::collections::HashMap;

use color_eyre::eyre::{Result, eyre};
use rust_decimal::Decimal;
use tracing::debug;

use super::QuoteProvider;
use crate::domain::{
    form::SwapMode,
    quote::{Quote, QuoteRequest},
    token::Token,
};

const BPS_DENOMINATOR: u32 = 10_000;

/// Quotes every pair at the ratio of its USD prices, minus a flat fee.
pub struct PriceTableQuoter {
    prices: HashMap<String, Decimal>,
    fee_bps: u16,
}

impl PriceTableQuoter {
    pub fn new(tokens: &[Token], fee_bps: u16) -> Self {
        let prices = tokens
            .iter()
            .filter_map(|t| t.price_usd.map(|p| (t.id.clone(), p)))
            .collect();
        Self { prices, fee_bps }
    }

    fn price(&self, mint: &str) -> Result<Decimal> {
        self.prices
            .get(mint)
            .copied()
            .filter(|p| !p.is_zero())
            .ok_or_else(|| eyre!("No price for {}", mint))
    }
}

impl QuoteProvider for PriceTableQuoter {
    fn quote(&self, request: &QuoteRequest) -> Result<Quote> {
        if request.input_mint == request.output_mint {
            return Err(eyre!("Input and output token are the same"));
        }

        let price_in = self.price(&request.input_mint)?;
        let price_out = self.price(&request.output_mint)?;
        let after_fee = Decimal::ONE - Decimal::from(self.fee_bps) / Decimal::from(BPS_DENOMINATOR);
        let overflow = || eyre!("Quote amount out of range: {}", request.amount);

        let (in_amount, out_amount) = match request.swap_mode {
            SwapMode::ExactOut => {
                let in_amount = request
                    .amount
                    .checked_mul(price_out)
                    .and_then(|v| v.checked_div(price_in))
                    .and_then(|v| v.checked_div(after_fee))
                    .ok_or_else(overflow)?;
                (in_amount, request.amount)
            }
            _ => {
                let out_amount = request
                    .amount
                    .checked_mul(price_in)
                    .and_then(|v| v.checked_div(price_out))
                    .and_then(|v| v.checked_mul(after_fee))
                    .ok_or_else(overflow)?;
                (request.amount, out_amount)
            }
        };

        debug!(
            "Quoted {} {} -> {} {} ({})",
            in_amount, request.input_mint, out_amount, request.output_mint, request.swap_mode
        );

        Ok(Quote::new(
            in_amount,
            out_amount,
            request.swap_mode,
            request.slippage_bps,
        ))
    }
}
