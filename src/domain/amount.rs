//! Half/Max apportionment of a wallet balance into a swap amount field.
//!
//! All arithmetic is done on [`Decimal`]. On-chain amounts are integers scaled
//! by the token's decimals, so any binary floating-point error here would show
//! up as a mismatched transaction amount.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use strum::Display;

use super::token::Token;

/// Native balance kept out of "Max" so the wallet can still pay fees (0.05).
pub const MINIMUM_SOL_BALANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Fractional digits used for native-wrapped amounts.
pub const NATIVE_DECIMALS: u32 = 9;

/// Largest scale a `Decimal` can carry.
const MAX_SCALE: u32 = 28;

/// Balance shortcut offered next to each amount field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Shortcut {
    Half,
    Max,
}

/// Format `value` with exactly `dp` fractional digits, rounding half up.
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let dp = dp.min(MAX_SCALE);
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded.to_string()
}

/// Amount usable from `balance` once the native reserve is set aside.
fn available(balance: Decimal, is_native_wrapped: bool, minimum_reserve: Decimal) -> Decimal {
    if !is_native_wrapped {
        return balance;
    }
    if balance > minimum_reserve {
        balance - minimum_reserve
    } else {
        Decimal::ZERO
    }
}

/// Amount written into the field by the "Max" shortcut.
pub fn compute_max_amount(
    balance: Decimal,
    is_native_wrapped: bool,
    minimum_reserve: Decimal,
) -> String {
    if !is_native_wrapped {
        return balance.to_string();
    }

    let usable = available(balance, true, minimum_reserve);
    if usable > Decimal::ZERO {
        format_fixed(usable, NATIVE_DECIMALS)
    } else {
        "0".to_string()
    }
}

/// Amount written into the field by the "Half" shortcut.
///
/// `token_decimals` only applies to non-native tokens; native-wrapped halves
/// always use [`NATIVE_DECIMALS`].
pub fn compute_half_amount(
    balance: Decimal,
    is_native_wrapped: bool,
    minimum_reserve: Decimal,
    token_decimals: u32,
) -> String {
    let half = available(balance, is_native_wrapped, minimum_reserve) / Decimal::TWO;

    if !is_native_wrapped {
        return format_fixed(half, token_decimals);
    }

    if half > Decimal::ZERO {
        format_fixed(half, NATIVE_DECIMALS)
    } else {
        "0".to_string()
    }
}

/// Apply a shortcut to whichever side's token and balance the caller passes.
pub fn apportion(
    shortcut: Shortcut,
    balance: Decimal,
    token: &Token,
    minimum_reserve: Decimal,
) -> String {
    match shortcut {
        Shortcut::Max => compute_max_amount(balance, token.is_native_wrapped(), minimum_reserve),
        Shortcut::Half => compute_half_amount(
            balance,
            token.is_native_wrapped(),
            minimum_reserve,
            token.display_decimals(),
        ),
    }
}
