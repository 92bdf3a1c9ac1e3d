//! Swap quotes and price display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{amount::format_fixed, form::SwapMode, token::Token};

const BPS_DENOMINATOR: u32 = 10_000;

/// Parameters sent to a quote provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub input_mint: String,
    pub output_mint: String,
    /// Input amount for `ExactIn`, desired output for `ExactOut`.
    pub amount: Decimal,
    pub swap_mode: SwapMode,
    pub slippage_bps: u16,
}

/// A priced route between two tokens, in UI units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub in_amount: Decimal,
    pub out_amount: Decimal,
    pub swap_mode: SwapMode,
    pub slippage_bps: u16,
}

impl Quote {
    pub fn new(in_amount: Decimal, out_amount: Decimal, swap_mode: SwapMode, slippage_bps: u16) -> Self {
        Self {
            in_amount,
            out_amount,
            swap_mode,
            slippage_bps,
        }
    }

    /// Output units received per input unit.
    pub fn price(&self) -> Option<Decimal> {
        self.out_amount.checked_div(self.in_amount)
    }

    fn slippage(&self) -> Decimal {
        Decimal::from(self.slippage_bps) / Decimal::from(BPS_DENOMINATOR)
    }

    /// Worst-case output once slippage is applied. Exact for `ExactOut`.
    pub fn minimum_received(&self) -> Decimal {
        match self.swap_mode {
            SwapMode::ExactOut => self.out_amount,
            _ => self.out_amount * (Decimal::ONE - self.slippage()),
        }
    }

    /// Worst-case input once slippage is applied. Exact for `ExactIn`.
    pub fn maximum_sent(&self) -> Decimal {
        match self.swap_mode {
            SwapMode::ExactOut => self.in_amount * (Decimal::ONE + self.slippage()),
            _ => self.in_amount,
        }
    }
}

/// Human readable rate, e.g. `1 SOL ≈ 150.25 USDC`.
pub fn format_rate(quote: &Quote, from: &Token, to: &Token) -> Option<String> {
    let price = quote.price()?;
    let price = price.round_dp(to.display_decimals()).normalize();
    Some(format!("1 {} ≈ {} {}", from.symbol, price, to.symbol))
}

/// USD value of `amount` of `token`, when the token has a reference price.
pub fn usd_value(token: &Token, amount: &str) -> Option<String> {
    let amount = super::form::parse_amount(amount)?;
    let price = token.price_usd?;
    Some(format!("${}", format_fixed(amount * price, 2)))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_price_and_minimum_received() {
        let quote = Quote::new(d("2"), d("300"), SwapMode::ExactIn, 50);
        assert_eq!(quote.price(), Some(d("150")));
        assert_eq!(quote.minimum_received(), d("298.5"));
        assert_eq!(quote.maximum_sent(), d("2"));
    }

    #[test]
    fn test_exact_out_maximum_sent() {
        let quote = Quote::new(d("2"), d("300"), SwapMode::ExactOut, 100);
        assert_eq!(quote.minimum_received(), d("300"));
        assert_eq!(quote.maximum_sent(), d("2.02"));
    }

    #[test]
    fn test_zero_input_has_no_price() {
        let quote = Quote::new(Decimal::ZERO, d("1"), SwapMode::ExactIn, 0);
        assert_eq!(quote.price(), None);
    }

    #[test]
    fn test_format_rate_and_usd_value() {
        let sol = Token::new("sol", "SOL", "", 9).with_price(d("150"));
        let usdc = Token::new("usdc", "USDC", "", 6);
        let quote = Quote::new(d("2"), d("300.5"), SwapMode::ExactIn, 50);

        assert_eq!(
            format_rate(&quote, &sol, &usdc).unwrap(),
            "1 SOL ≈ 150.25 USDC"
        );
        assert_eq!(usd_value(&sol, "1.5").unwrap(), "$225.00");
        assert_eq!(usd_value(&usdc, "1.5"), None);
        assert_eq!(usd_value(&sol, ""), None);
    }
}
