//! Integration tests for swapform.
//!
//! Each test gets a fresh environment:
//! - the mainnet config preset
//! - a file-backed ledger in a temporary data dir
//! - a price-table quoter over the configured tokens

pub mod e2e_apportionment;
pub mod e2e_swap_flow;

use std::path::PathBuf;

use rust_decimal::Decimal;
use swapform::{
    config::Config,
    domain::form::{FormState, SwapForm, SwapMode},
    infra::{ledger::LocalLedger, quote::PriceTableQuoter},
};
use tempfile::TempDir;

/// Wallet used by every flow test.
pub const WALLET: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

/// Test environment for integration tests.
pub struct TestEnv {
    /// Keeps the data dir alive for the duration of the test.
    pub dir: TempDir,
    pub config: Config,
    pub ledger: LocalLedger,
    pub quoter: PriceTableQuoter,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = Config::mainnet();
        let ledger = LocalLedger::with_path(dir.path().join("balances.json"))
            .expect("Failed to open ledger");
        let quoter = PriceTableQuoter::new(&config.tokens, 0);
        Self {
            dir,
            config,
            ledger,
            quoter,
        }
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.dir.path().join("balances.json")
    }

    /// Form on the configured initial pair.
    pub fn form(&self, mode: SwapMode) -> SwapForm {
        SwapForm::new(
            FormState::new(
                &self.config.swap.initial_from_mint,
                &self.config.swap.initial_to_mint,
            ),
            self.config.swap.props.clone(),
            mode,
        )
        .with_minimum_reserve(self.config.swap.minimum_reserve)
    }

    pub fn fund(&self, mint: &str, amount: &str) {
        let amount: Decimal = amount.parse().expect("Invalid amount");
        self.ledger
            .set_balance(WALLET, mint, amount)
            .expect("Failed to fund wallet");
    }
}

/// Macro for creating integration tests with a fresh environment.
#[macro_export]
macro_rules! integration_test {
    ($name:ident, $body:expr) => {
        #[test]
        fn $name() {
            let env = $crate::TestEnv::new();
            $body(&env);
        }
    };
}
