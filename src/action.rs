use serde::{Deserialize, Serialize};
use strum::Display;
use swapform::domain::form::Side;

/// Actions that can be triggered by user input or internal events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Tick,
    Resize(u16, u16),
    Suspend,
    Quit,

    // Screens
    ShowForm,
    ShowWallet,

    // Form
    FormChanged,
    OpenPairSelector(Side),
    SelectPair(Side, String),
    SwitchPair,
    SubmitSwap,

    // Wallet
    ConnectWallet(String),
    DisconnectWallet,
    RefreshBalances,
}
