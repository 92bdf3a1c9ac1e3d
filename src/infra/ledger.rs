//! Local balance ledger used in place of an RPC node and a signing wallet.
//!
//! Balances are read from `balances.json` in the data directory:
//!
//! ```json
//! { "<wallet>": { "<mint>": "1.5" } }
//! ```
//!
//! Swaps are settled in memory and written back to the same file.

use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
    sync::{Arc, Mutex, MutexGuard},
};

use color_eyre::eyre::{Result, WrapErr, eyre};
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use super::{BalanceSource, SwapSubmitter};
use crate::{
    config::get_data_dir,
    domain::{
        balance::Balances,
        swap::{SwapRequest, SwapResult},
    },
};

/// File name of the ledger inside the data dir.
pub const BALANCES_FILE: &str = "balances.json";

type Accounts = HashMap<String, Balances>;

/// Shared, cloneable ledger of wallet balances.
#[derive(Clone, Default)]
pub struct LocalLedger {
    accounts: Arc<Mutex<Accounts>>,
    path: Option<PathBuf>,
}

impl LocalLedger {
    /// In-memory ledger that is never persisted.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Ledger backed by `balances.json` in the data dir.
    pub fn new() -> Result<Self> {
        Self::with_path(get_data_dir().join(BALANCES_FILE))
    }

    /// Ledger backed by `path`. A missing file starts an empty ledger.
    pub fn with_path(path: PathBuf) -> Result<Self> {
        let accounts = if path.exists() {
            let raw = fs::read_to_string(&path)
                .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .wrap_err_with(|| format!("Invalid balances file {}", path.display()))?
        } else {
            Accounts::new()
        };
        Ok(Self {
            accounts: Arc::new(Mutex::new(accounts)),
            path: Some(path),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Accounts>> {
        self.accounts
            .lock()
            .map_err(|_| eyre!("Balance ledger lock poisoned"))
    }

    /// Set the balance of `mint` held by `wallet`.
    pub fn set_balance(&self, wallet: &str, mint: &str, amount: Decimal) -> Result<()> {
        self.lock()?
            .entry(wallet.to_string())
            .or_default()
            .set(mint, amount);
        Ok(())
    }

    fn persist(&self, accounts: &Accounts) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(accounts)?)?;
        Ok(())
    }
}

impl BalanceSource for LocalLedger {
    fn balances(&self, wallet: &str) -> Result<Balances> {
        Ok(self.lock()?.get(wallet).cloned().unwrap_or_default())
    }
}

impl SwapSubmitter for LocalLedger {
    fn submit(&self, request: &SwapRequest) -> Result<SwapResult> {
        let quote = &request.quote;
        let input_mint = &request.from_token.id;
        let output_mint = &request.to_token.id;

        let mut accounts = self.lock()?;
        let balances = accounts.entry(request.wallet.clone()).or_default();

        let held = balances.get(input_mint).unwrap_or_default();
        if quote.in_amount > held {
            warn!(
                "Rejected swap: {} {} requested, {} held",
                quote.in_amount, request.from_token.symbol, held
            );
            return Err(eyre!(
                "Insufficient {} balance: {} > {}",
                request.from_token.symbol,
                quote.in_amount,
                held
            ));
        }

        balances.set(input_mint, held - quote.in_amount);
        let received = balances.get(output_mint).unwrap_or_default();
        balances.set(output_mint, received + quote.out_amount);

        let signature = signature_for(request);
        self.persist(&accounts)?;

        info!(
            "Swapped {} {} for {} {} ({})",
            quote.in_amount,
            request.from_token.symbol,
            quote.out_amount,
            request.to_token.symbol,
            signature
        );

        Ok(SwapResult {
            signature,
            input_mint: input_mint.clone(),
            output_mint: output_mint.clone(),
            in_amount: quote.in_amount,
            out_amount: quote.out_amount,
        })
    }
}

/// Deterministic transaction id derived from the request contents.
fn signature_for(request: &SwapRequest) -> String {
    let mut hasher = Sha256::new();
    hasher.update(request.wallet.as_bytes());
    hasher.update(request.from_token.id.as_bytes());
    hasher.update(request.to_token.id.as_bytes());
    hasher.update(request.quote.in_amount.to_string().as_bytes());
    hasher.update(request.quote.out_amount.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::domain::{form::SwapMode, quote::Quote, token::Token};

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn request(in_amount: &str, out_amount: &str) -> SwapRequest {
        SwapRequest {
            wallet: "wallet-1".to_string(),
            from_token: Token::new("sol", "SOL", "", 9),
            to_token: Token::new("usdc", "USDC", "", 6),
            quote: Quote::new(d(in_amount), d(out_amount), SwapMode::ExactIn, 50),
        }
    }

    #[test]
    fn test_unknown_wallet_has_empty_balances() {
        let ledger = LocalLedger::in_memory();
        assert!(ledger.balances("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_submit_moves_balances() {
        let ledger = LocalLedger::in_memory();
        ledger.set_balance("wallet-1", "sol", d("3")).unwrap();

        let result = ledger.submit(&request("1", "150")).unwrap();
        assert_eq!(result.signature.len(), 64);
        assert_eq!(result.out_amount, d("150"));

        let balances = ledger.balances("wallet-1").unwrap();
        assert_eq!(balances.get("sol"), Some(d("2")));
        assert_eq!(balances.get("usdc"), Some(d("150")));
    }

    #[test]
    fn test_submit_rejects_insufficient_balance() {
        let ledger = LocalLedger::in_memory();
        ledger.set_balance("wallet-1", "sol", d("0.5")).unwrap();

        assert!(ledger.submit(&request("1", "150")).is_err());
        assert_eq!(ledger.balances("wallet-1").unwrap().get("sol"), Some(d("0.5")));
    }

    #[test]
    fn test_persists_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(BALANCES_FILE);
        fs::write(&path, r#"{"wallet-1": {"sol": "2"}}"#).unwrap();

        let ledger = LocalLedger::with_path(path.clone()).unwrap();
        ledger.submit(&request("1", "150")).unwrap();

        let reloaded = LocalLedger::with_path(path).unwrap();
        let balances = reloaded.balances("wallet-1").unwrap();
        assert_eq!(balances.get("sol"), Some(d("1")));
        assert_eq!(balances.get("usdc"), Some(d("150")));
    }
}
