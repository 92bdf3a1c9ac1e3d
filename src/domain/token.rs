//! Token metadata as seen by the swap form.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Mint address of wrapped SOL, the chain's native-asset wrapper.
pub const WRAPPED_SOL_MINT: &str = "So11111111111111111111111111111111111111112";

/// Precision used when a token's decimals are not known yet.
pub const DEFAULT_DECIMALS: u32 = 9;

/// A swappable token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Mint address.
    pub id: String,
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    /// Display precision. `None` until the token metadata has loaded.
    #[serde(default)]
    pub decimals: Option<u8>,
    /// Reference price used for the USD value line and offline quotes.
    #[serde(default)]
    pub price_usd: Option<Decimal>,
}

impl Token {
    pub fn new(id: &str, symbol: &str, name: &str, decimals: u8) -> Self {
        Self {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals: Some(decimals),
            price_usd: None,
        }
    }

    pub fn with_price(mut self, price_usd: Decimal) -> Self {
        self.price_usd = Some(price_usd);
        self
    }

    /// True only for the wrapped native asset, which keeps a fee reserve.
    pub fn is_native_wrapped(&self) -> bool {
        self.id == WRAPPED_SOL_MINT
    }

    /// Decimals to format amounts with, falling back to [`DEFAULT_DECIMALS`].
    pub fn display_decimals(&self) -> u32 {
        self.decimals.map(u32::from).unwrap_or(DEFAULT_DECIMALS)
    }

    /// Shortened mint address for list views, e.g. `So11...1112`.
    pub fn short_id(&self) -> String {
        short_address(&self.id, 10)
    }
}

/// Keep the first and last four characters of `addr` when it is longer than `max`.
pub fn short_address(addr: &str, max: usize) -> String {
    let len = addr.chars().count();
    if len <= max {
        return addr.to_string();
    }
    let head: String = addr.chars().take(4).collect();
    let tail: String = addr.chars().skip(len - 4).collect();
    format!("{head}...{tail}")
}

/// Look up a token by mint address.
pub fn find_token<'a>(tokens: &'a [Token], id: &str) -> Option<&'a Token> {
    tokens.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_wrapped_identity() {
        let sol = Token::new(WRAPPED_SOL_MINT, "SOL", "Wrapped SOL", 9);
        let usdc = Token::new(
            "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "USDC",
            "USD Coin",
            6,
        );
        assert!(sol.is_native_wrapped());
        assert!(!usdc.is_native_wrapped());
    }

    #[test]
    fn test_display_decimals_default() {
        let mut token = Token::new("mint", "TKN", "Token", 6);
        assert_eq!(token.display_decimals(), 6);

        token.decimals = Some(0);
        assert_eq!(token.display_decimals(), 0);

        token.decimals = None;
        assert_eq!(token.display_decimals(), DEFAULT_DECIMALS);
    }

    #[test]
    fn test_short_id() {
        let sol = Token::new(WRAPPED_SOL_MINT, "SOL", "Wrapped SOL", 9);
        assert_eq!(sol.short_id(), "So11...1112");

        let short = Token::new("abc", "ABC", "", 0);
        assert_eq!(short.short_id(), "abc");
    }

    #[test]
    fn test_short_address_counts_chars() {
        let token = Token::new("ééééxxxxxxxxüüüü", "UNI", "", 6);
        assert_eq!(token.short_id(), "éééé...üüüü");
        assert_eq!(short_address("ab€", 12), "ab€");
        assert_eq!(short_address("€€€€€€€€€€€€€", 12), "€€€€...€€€€");
    }
}
