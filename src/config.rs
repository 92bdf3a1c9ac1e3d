use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::eyre::{Result, WrapErr};
use directories::ProjectDirs;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    amount::MINIMUM_SOL_BALANCE,
    form::{FormProps, MAX_INPUT_LIMIT, SwapMode},
    token::{Token, WRAPPED_SOL_MINT},
};

/// File name of the optional JSON config overlay inside the config dir.
pub const CONFIG_FILE: &str = "config.json";

const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
const USDT_MINT: &str = "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB";
const JUP_MINT: &str = "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN";
const BONK_MINT: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";
const DEVNET_USDC_MINT: &str = "4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU";

/// Get the data directory for the application.
pub fn get_data_dir() -> PathBuf {
    if let Ok(s) = std::env::var("SWAPFORM_DATA") {
        PathBuf::from(s)
    } else if let Some(proj_dirs) = ProjectDirs::from("com", "swapform", "swapform") {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

/// Get the config directory for the application.
pub fn get_config_dir() -> PathBuf {
    if let Ok(s) = std::env::var("SWAPFORM_CONFIG") {
        PathBuf::from(s)
    } else if let Some(proj_dirs) = ProjectDirs::from("com", "swapform", "swapform") {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapConfig {
    #[serde(default)]
    pub swap_mode: SwapMode,
    pub initial_from_mint: String,
    pub initial_to_mint: String,
    pub slippage_bps: u16,
    /// Native balance withheld by the Max and Half shortcuts.
    #[serde(default = "default_minimum_reserve")]
    pub minimum_reserve: Decimal,
    #[serde(default = "default_max_input_limit")]
    pub max_input_limit: Decimal,
    #[serde(flatten)]
    pub props: FormProps,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// `.` or `,`; the other one groups thousands.
    pub decimal_separator: char,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub tokens: Vec<Token>,
    pub swap: SwapConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_minimum_reserve() -> Decimal {
    MINIMUM_SOL_BALANCE
}

fn default_max_input_limit() -> Decimal {
    Decimal::from(MAX_INPUT_LIMIT)
}

impl Default for Config {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl Config {
    /// Create config from CLI args.
    pub fn new(network: Option<&str>) -> Self {
        Self::from_network(network.unwrap_or("mainnet"))
    }

    /// `config.json` from the config dir when it exists, else the network preset.
    pub fn load(network: Option<&str>) -> Result<Self> {
        let path = get_config_dir().join(CONFIG_FILE);
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::new(network))
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .wrap_err_with(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn mainnet() -> Self {
        Self {
            network: NetworkConfig {
                name: "mainnet".to_string(),
            },
            tokens: vec![
                Token::new(WRAPPED_SOL_MINT, "SOL", "Wrapped SOL", 9)
                    .with_price(Decimal::new(150, 0)),
                Token::new(USDC_MINT, "USDC", "USD Coin", 6).with_price(Decimal::ONE),
                Token::new(USDT_MINT, "USDT", "USDT", 6).with_price(Decimal::ONE),
                Token::new(JUP_MINT, "JUP", "Jupiter", 6).with_price(Decimal::new(8, 1)),
                Token::new(BONK_MINT, "Bonk", "Bonk", 5).with_price(Decimal::new(2, 5)),
            ],
            swap: SwapConfig {
                swap_mode: SwapMode::ExactIn,
                initial_from_mint: WRAPPED_SOL_MINT.to_string(),
                initial_to_mint: USDC_MINT.to_string(),
                slippage_bps: 50,
                minimum_reserve: MINIMUM_SOL_BALANCE,
                max_input_limit: default_max_input_limit(),
                props: FormProps::default(),
            },
            display: DisplayConfig::default(),
        }
    }

    pub fn devnet() -> Self {
        Self {
            network: NetworkConfig {
                name: "devnet".to_string(),
            },
            tokens: vec![
                Token::new(WRAPPED_SOL_MINT, "SOL", "Wrapped SOL", 9)
                    .with_price(Decimal::new(150, 0)),
                Token::new(DEVNET_USDC_MINT, "USDC", "USD Coin (devnet)", 6)
                    .with_price(Decimal::ONE),
            ],
            swap: SwapConfig {
                swap_mode: SwapMode::ExactIn,
                initial_from_mint: WRAPPED_SOL_MINT.to_string(),
                initial_to_mint: DEVNET_USDC_MINT.to_string(),
                slippage_bps: 100,
                minimum_reserve: MINIMUM_SOL_BALANCE,
                max_input_limit: default_max_input_limit(),
                props: FormProps::default(),
            },
            display: DisplayConfig::default(),
        }
    }

    pub fn from_network(network: &str) -> Self {
        match network {
            "devnet" => Self::devnet(),
            _ => Self::mainnet(),
        }
    }

    /// Token metadata for `mint`, if listed.
    pub fn token(&self, mint: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == mint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let config = Config::new(None);
        assert_eq!(config.network.name, "mainnet");
        assert!(config.token(WRAPPED_SOL_MINT).unwrap().is_native_wrapped());
        assert_eq!(config.swap.minimum_reserve, MINIMUM_SOL_BALANCE);

        let config = Config::new(Some("devnet"));
        assert_eq!(config.network.name, "devnet");
        assert!(config.token(&config.swap.initial_to_mint).is_some());
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"{
                "network": { "name": "mainnet" },
                "tokens": [
                    { "id": "So11111111111111111111111111111111111111112", "symbol": "SOL", "decimals": 9 },
                    { "id": "mint-b", "symbol": "B", "decimals": 2, "price_usd": "3.5" }
                ],
                "swap": {
                    "swap_mode": "ExactOut",
                    "initial_from_mint": "So11111111111111111111111111111111111111112",
                    "initial_to_mint": "mint-b",
                    "slippage_bps": 30,
                    "fixed_mint": "mint-b"
                }
            }"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.swap.swap_mode, SwapMode::ExactOut);
        assert_eq!(config.swap.minimum_reserve, MINIMUM_SOL_BALANCE);
        assert_eq!(config.swap.props.fixed_mint.as_deref(), Some("mint-b"));
        assert!(!config.swap.props.fixed_amount);
        assert_eq!(config.display.decimal_separator, '.');
        assert_eq!(config.token("mint-b").unwrap().price_usd, Some(Decimal::new(35, 1)));
    }

    #[test]
    fn test_from_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "not json").unwrap();
        assert!(Config::from_file(&path).is_err());
    }
}
