//! Quote and submit flow over the offline quoter and the file ledger.

use std::str::FromStr;

use rust_decimal::Decimal;
use swapform::{
    domain::{
        amount::Shortcut,
        form::{Side, SwapMode},
        swap::SwapRequest,
        token::WRAPPED_SOL_MINT,
    },
    infra::{BalanceSource, QuoteProvider, SwapSubmitter, ledger::LocalLedger},
};

use super::{TestEnv, WALLET};
use crate::integration_test;

fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

integration_test!(test_exact_in_quote_and_submit, |env: &TestEnv| {
    env.fund(WRAPPED_SOL_MINT, "3");
    let usdc_mint = env.config.swap.initial_to_mint.clone();
    let sol = env.config.token(WRAPPED_SOL_MINT).cloned().unwrap();
    let usdc = env.config.token(&usdc_mint).cloned().unwrap();

    let mut form = env.form(SwapMode::ExactIn);
    assert!(form.input_char(Side::From, '2', Some(&sol)));

    let request = form.quote_request(env.config.swap.slippage_bps).unwrap();
    let quote = env.quoter.quote(&request).unwrap();
    form.apply_quote(Some(&quote), Some(&usdc));
    assert_eq!(form.state.to_value, "300");
    assert_eq!(quote.minimum_received(), d("298.5"));

    let result = env
        .ledger
        .submit(&SwapRequest {
            wallet: WALLET.to_string(),
            from_token: sol,
            to_token: usdc,
            quote,
        })
        .unwrap();
    assert_eq!(result.in_amount, d("2"));

    let balances = env.ledger.balances(WALLET).unwrap();
    assert_eq!(balances.get(WRAPPED_SOL_MINT), Some(d("1")));
    assert_eq!(balances.get(&usdc_mint), Some(d("300")));

    // Settled balances survive a reopen of the ledger file.
    let reopened = LocalLedger::with_path(env.ledger_path()).unwrap();
    assert_eq!(reopened.balances(WALLET).unwrap(), balances);
});

integration_test!(test_exact_out_fills_selling_side, |env: &TestEnv| {
    let usdc_mint = env.config.swap.initial_to_mint.clone();
    let sol = env.config.token(WRAPPED_SOL_MINT).cloned();
    let usdc = env.config.token(&usdc_mint).cloned();

    let mut form = env.form(SwapMode::ExactOut);
    for c in "75".chars() {
        assert!(form.input_char(Side::To, c, usdc.as_ref()));
    }

    let request = form.quote_request(50).unwrap();
    assert_eq!(request.swap_mode, SwapMode::ExactOut);
    let quote = env.quoter.quote(&request).unwrap();
    form.apply_quote(Some(&quote), sol.as_ref());
    assert_eq!(form.state.from_value, "0.5");
});

integration_test!(test_max_then_submit_leaves_reserve, |env: &TestEnv| {
    env.fund(WRAPPED_SOL_MINT, "1.5");
    let usdc_mint = env.config.swap.initial_to_mint.clone();
    let sol = env.config.token(WRAPPED_SOL_MINT).cloned().unwrap();
    let usdc = env.config.token(&usdc_mint).cloned().unwrap();

    let mut form = env.form(SwapMode::ExactIn);
    let balance = env.ledger.balances(WALLET).unwrap().get(WRAPPED_SOL_MINT);
    form.apply_shortcut(Side::From, Shortcut::Max, balance, Some(&sol));

    let request = form.quote_request(50).unwrap();
    let quote = env.quoter.quote(&request).unwrap();
    env.ledger
        .submit(&SwapRequest {
            wallet: WALLET.to_string(),
            from_token: sol,
            to_token: usdc,
            quote,
        })
        .unwrap();

    let left = env.ledger.balances(WALLET).unwrap().get(WRAPPED_SOL_MINT);
    assert_eq!(left, Some(env.config.swap.minimum_reserve));
});

integration_test!(test_insufficient_balance_is_rejected, |env: &TestEnv| {
    env.fund(WRAPPED_SOL_MINT, "0.5");
    let usdc_mint = env.config.swap.initial_to_mint.clone();
    let sol = env.config.token(WRAPPED_SOL_MINT).cloned().unwrap();
    let usdc = env.config.token(&usdc_mint).cloned().unwrap();

    let mut form = env.form(SwapMode::ExactIn);
    form.input_char(Side::From, '1', Some(&sol));
    let quote = env
        .quoter
        .quote(&form.quote_request(50).unwrap())
        .unwrap();

    let err = env
        .ledger
        .submit(&SwapRequest {
            wallet: WALLET.to_string(),
            from_token: sol,
            to_token: usdc,
            quote,
        })
        .unwrap_err();
    assert!(err.to_string().contains("Insufficient"));
    assert_eq!(
        env.ledger.balances(WALLET).unwrap().get(WRAPPED_SOL_MINT),
        Some(d("0.5"))
    );
});

integration_test!(test_switch_pair_reverses_quote, |env: &TestEnv| {
    let usdc_mint = env.config.swap.initial_to_mint.clone();
    let usdc = env.config.token(&usdc_mint).cloned();
    let sol = env.config.token(WRAPPED_SOL_MINT).cloned();

    let mut form = env.form(SwapMode::ExactIn);
    form.input_char(Side::From, '1', sol.as_ref());
    form.switch_pair();
    assert_eq!(form.state.from_mint, usdc_mint);
    assert_eq!(form.state.from_value, "");
    assert!(form.quote_request(50).is_none());

    for c in "150".chars() {
        form.input_char(Side::From, c, usdc.as_ref());
    }
    let quote = env.quoter.quote(&form.quote_request(50).unwrap()).unwrap();
    form.apply_quote(Some(&quote), sol.as_ref());
    assert_eq!(form.state.to_value, "1");
});

integration_test!(test_buying_half_is_quoted_backwards, |env: &TestEnv| {
    let usdc_mint = env.config.swap.initial_to_mint.clone();
    env.fund(&usdc_mint, "300");
    let sol = env.config.token(WRAPPED_SOL_MINT).cloned();
    let usdc = env.config.token(&usdc_mint).cloned();

    let mut form = env.form(SwapMode::ExactIn);
    let balance = env.ledger.balances(WALLET).unwrap().get(&usdc_mint);
    assert!(form.apply_shortcut(Side::To, Shortcut::Half, balance, usdc.as_ref()));

    let request = form.quote_request(50).unwrap();
    assert_eq!(request.swap_mode, SwapMode::ExactOut);
    let quote = env.quoter.quote(&request).unwrap();
    form.apply_quote(Some(&quote), sol.as_ref());

    assert_eq!(form.state.to_value, "150.000000");
    assert_eq!(form.state.from_value, "1");
});
