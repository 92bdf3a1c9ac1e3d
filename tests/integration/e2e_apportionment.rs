//! Half/Max shortcuts driven through the form with ledger balances.

use std::str::FromStr;

use rust_decimal::Decimal;
use swapform::{
    domain::{
        amount::{Shortcut, compute_half_amount, compute_max_amount},
        form::{Side, SwapMode, derive_amount_disablement},
        token::WRAPPED_SOL_MINT,
    },
    infra::BalanceSource,
};

use super::{TestEnv, WALLET};
use crate::integration_test;

fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

integration_test!(test_native_max_keeps_reserve, |env: &TestEnv| {
    env.fund(WRAPPED_SOL_MINT, "1.5");
    let balances = env.ledger.balances(WALLET).unwrap();
    let mut form = env.form(SwapMode::ExactIn);
    let sol = env.config.token(WRAPPED_SOL_MINT).cloned();

    let balance = balances.get(WRAPPED_SOL_MINT);
    assert!(form.apply_shortcut(Side::From, Shortcut::Max, balance, sol.as_ref()));
    assert_eq!(form.state.from_value, "1.450000000");
    assert_eq!(d(&form.state.from_value), d("1.45"));

    assert!(form.apply_shortcut(Side::From, Shortcut::Half, balance, sol.as_ref()));
    assert_eq!(form.state.from_value, "0.725000000");
});

integration_test!(test_native_below_reserve_gives_zero, |env: &TestEnv| {
    env.fund(WRAPPED_SOL_MINT, "0.03");
    let balance = env.ledger.balances(WALLET).unwrap().get(WRAPPED_SOL_MINT);
    let mut form = env.form(SwapMode::ExactIn);
    let sol = env.config.token(WRAPPED_SOL_MINT).cloned();

    form.apply_shortcut(Side::From, Shortcut::Max, balance, sol.as_ref());
    assert_eq!(form.state.from_value, "0");
    form.apply_shortcut(Side::From, Shortcut::Half, balance, sol.as_ref());
    assert_eq!(form.state.from_value, "0");
});

integration_test!(test_half_on_buying_side_uses_its_token, |env: &TestEnv| {
    let usdc_mint = env.config.swap.initial_to_mint.clone();
    env.fund(&usdc_mint, "100");
    let balance = env.ledger.balances(WALLET).unwrap().get(&usdc_mint);
    let mut form = env.form(SwapMode::ExactInOrOut);
    let usdc = env.config.token(&usdc_mint).cloned();

    assert!(form.apply_shortcut(Side::To, Shortcut::Half, balance, usdc.as_ref()));
    assert_eq!(form.state.to_value, "50.000000");
    assert_eq!(form.focused, Side::To);
    assert_eq!(form.input_side(), Side::To);
});

integration_test!(test_unfunded_token_leaves_field_alone, |env: &TestEnv| {
    let balance = env.ledger.balances(WALLET).unwrap().get(WRAPPED_SOL_MINT);
    assert_eq!(balance, None);

    let mut form = env.form(SwapMode::ExactIn);
    let sol = env.config.token(WRAPPED_SOL_MINT).cloned();
    assert!(!form.apply_shortcut(Side::From, Shortcut::Max, balance, sol.as_ref()));
    assert_eq!(form.state.from_value, "");
});

integration_test!(test_half_never_exceeds_max, |env: &TestEnv| {
    let reserve = env.config.swap.minimum_reserve;
    for raw in ["0", "0.01", "0.05", "0.050000001", "1", "7.123456789", "123456.5"] {
        let b = d(raw);
        for native in [true, false] {
            let max = d(&compute_max_amount(b, native, reserve));
            let half = d(&compute_half_amount(b, native, reserve, 6));
            assert!(half <= max, "half {} > max {} for {}", half, max, raw);
            assert!(max >= Decimal::ZERO);
        }
    }
});

integration_test!(test_disablement_follows_typed_side, |env: &TestEnv| {
    let mut form = env.form(SwapMode::ExactIn);
    let sol = env.config.token(WRAPPED_SOL_MINT).cloned();
    assert!(form.input_char(Side::From, '5', sol.as_ref()));
    assert!(!form.amount_disabled(Side::From));
    assert!(form.amount_disabled(Side::To));

    let r = derive_amount_disablement(SwapMode::ExactOut, false, "", "2");
    assert!(r.input_disabled);
    assert!(!r.output_disabled);
});
