//! Per-token wallet balances.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// UI-denominated balances of one wallet, keyed by mint address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balances {
    amounts: HashMap<String, Decimal>,
}

impl Balances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, mint: &str, ui_amount: Decimal) {
        self.amounts.insert(mint.to_string(), ui_amount);
    }

    /// Balance for `mint`, or `None` when it is unknown.
    pub fn get(&self, mint: &str) -> Option<Decimal> {
        self.amounts.get(mint).copied()
    }

    /// Balance for `mint` formatted for the balance label; unknown shows as `0`.
    pub fn display(&self, mint: &str) -> String {
        self.get(mint)
            .map(|b| b.normalize().to_string())
            .unwrap_or_else(|| "0".to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }
}

impl FromIterator<(String, Decimal)> for Balances {
    fn from_iter<I: IntoIterator<Item = (String, Decimal)>>(iter: I) -> Self {
        Self {
            amounts: iter.into_iter().collect(),
        }
    }
}
