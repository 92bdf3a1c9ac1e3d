//! Swap form state and the rules derived from it.
//!
//! The form owns every piece of mutable state: the two mints, the two amount
//! strings and which side currently has focus. The apportionment functions in
//! [`super::amount`] only ever read from it.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{
    amount::{MINIMUM_SOL_BALANCE, Shortcut, apportion},
    quote::{Quote, QuoteRequest},
    token::{DEFAULT_DECIMALS, Token},
};

/// Largest amount a user can type into either field.
pub const MAX_INPUT_LIMIT: u64 = 100_000_000_000_000;

/// Which side of the trade has a user-fixed amount.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum SwapMode {
    #[default]
    ExactIn,
    ExactOut,
    ExactInOrOut,
}

/// One half of the form: selling (`From`) or buying (`To`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Side {
    #[default]
    From,
    To,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::From => Side::To,
            Side::To => Side::From,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Side::From => "Selling",
            Side::To => "Buying",
        }
    }
}

/// Raw form values. Amounts use `.` as decimal separator regardless of locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub from_mint: String,
    pub to_mint: String,
    pub from_value: String,
    pub to_value: String,
}

impl FormState {
    pub fn new(from_mint: &str, to_mint: &str) -> Self {
        Self {
            from_mint: from_mint.to_string(),
            to_mint: to_mint.to_string(),
            from_value: String::new(),
            to_value: String::new(),
        }
    }

    pub fn mint(&self, side: Side) -> &str {
        match side {
            Side::From => &self.from_mint,
            Side::To => &self.to_mint,
        }
    }

    pub fn value(&self, side: Side) -> &str {
        match side {
            Side::From => &self.from_value,
            Side::To => &self.to_value,
        }
    }

    fn value_mut(&mut self, side: Side) -> &mut String {
        match side {
            Side::From => &mut self.from_value,
            Side::To => &mut self.to_value,
        }
    }

    fn mint_mut(&mut self, side: Side) -> &mut String {
        match side {
            Side::From => &mut self.from_mint,
            Side::To => &mut self.to_mint,
        }
    }

    /// Apply an edited value for `side`.
    ///
    /// Clearing either field clears both, and a lone separator becomes `0.`.
    pub fn change_value(&mut self, side: Side, value: &str) {
        match value {
            "" => {
                self.from_value.clear();
                self.to_value.clear();
            }
            "." => *self.value_mut(side) = "0.".to_string(),
            _ => *self.value_mut(side) = value.to_string(),
        }
    }

    /// Swap the two mints and drop both amounts.
    pub fn switch_pair(&mut self) {
        std::mem::swap(&mut self.from_mint, &mut self.to_mint);
        self.from_value.clear();
        self.to_value.clear();
    }
}

/// Externally configured constraints on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormProps {
    /// Amounts are preset by the embedder and cannot be edited.
    #[serde(default)]
    pub fixed_amount: bool,
    /// Mint whose selector is locked.
    #[serde(default)]
    pub fixed_mint: Option<String>,
}

/// Which amount fields refuse input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountDisablement {
    pub input_disabled: bool,
    pub output_disabled: bool,
}

impl AmountDisablement {
    pub fn for_side(&self, side: Side) -> bool {
        match side {
            Side::From => self.input_disabled,
            Side::To => self.output_disabled,
        }
    }
}

/// Parse an amount string, accepting a trailing separator such as `0.`.
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    if trimmed.is_empty() || trimmed.starts_with('-') {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

/// True when `value` holds a number, including `0` and `0.`.
pub fn has_numeric_value(value: &str) -> bool {
    parse_amount(value).is_some()
}

/// Decide which amount field is editable.
pub fn derive_amount_disablement(
    swap_mode: SwapMode,
    fixed_amount: bool,
    from_value: &str,
    to_value: &str,
) -> AmountDisablement {
    if fixed_amount {
        return AmountDisablement {
            input_disabled: true,
            output_disabled: true,
        };
    }

    match swap_mode {
        SwapMode::ExactIn => AmountDisablement {
            input_disabled: false,
            output_disabled: has_numeric_value(from_value),
        },
        SwapMode::ExactOut => AmountDisablement {
            input_disabled: has_numeric_value(to_value),
            output_disabled: false,
        },
        SwapMode::ExactInOrOut => AmountDisablement {
            input_disabled: false,
            output_disabled: false,
        },
    }
}

/// A token selector is locked when it currently shows the fixed mint.
pub fn selector_disabled(props: &FormProps, token_id: &str) -> bool {
    props.fixed_mint.as_deref() == Some(token_id)
}

/// Numeric mask applied to every keystroke and paste.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub decimal_scale: u32,
    pub max_input_limit: Decimal,
}

impl NumberFormat {
    pub fn new(decimal_separator: char, decimal_scale: u32) -> Self {
        Self {
            decimal_separator,
            decimal_scale,
            max_input_limit: Decimal::from(MAX_INPUT_LIMIT),
        }
    }

    pub fn thousand_separator(&self) -> char {
        if self.decimal_separator == ',' { '.' } else { ',' }
    }

    /// Allow empty input, a lone separator, and numbers at or below the limit.
    ///
    /// Text that does not parse, including integers too long for a `Decimal`,
    /// is refused.
    pub fn is_allowed(&self, value: &str) -> bool {
        match parse_amount(value) {
            None => value.is_empty() || value == ".",
            Some(v) => v <= self.max_input_limit,
        }
    }

    /// Normalise pasted text into a raw value, or `None` to reject it.
    ///
    /// Thousands separators and whitespace are dropped and the locale separator
    /// becomes `.`; anything else that is not a digit rejects the paste.
    pub fn normalize(&self, text: &str) -> Option<String> {
        let thousand = self.thousand_separator();
        let mut raw = String::with_capacity(text.len());
        for c in text.chars() {
            if c.is_ascii_digit() {
                raw.push(c);
            } else if c == self.decimal_separator {
                raw.push('.');
            } else if c == thousand || c.is_whitespace() {
                continue;
            } else {
                return None;
            }
        }
        self.validate(raw)
    }

    /// Append one keystroke to the raw value `current`.
    ///
    /// Both `.` and the locale separator insert the decimal point.
    pub fn accept_char(&self, current: &str, c: char) -> Option<String> {
        let mut raw = current.to_string();
        if c.is_ascii_digit() {
            raw.push(c);
        } else if c == self.decimal_separator || c == '.' {
            raw.push('.');
        } else {
            return None;
        }
        self.validate(raw)
    }

    /// Refuse a second separator, excess fractional digits and values over the limit.
    fn validate(&self, raw: String) -> Option<String> {
        if let Some((_, frac)) = raw.split_once('.') {
            if self.decimal_scale == 0
                || frac.contains('.')
                || frac.len() > self.decimal_scale as usize
            {
                return None;
            }
        }

        if !self.is_allowed(&raw) {
            return None;
        }
        Some(raw)
    }

    /// Render a raw value with locale separators and thousands grouping.
    pub fn display(&self, value: &str) -> String {
        let (int, frac) = match value.split_once('.') {
            Some((int, frac)) => (int, Some(frac)),
            None => (value, None),
        };

        let mut grouped = String::with_capacity(int.len() + int.len() / 3);
        for (i, c) in int.chars().enumerate() {
            if i > 0 && (int.len() - i) % 3 == 0 {
                grouped.push(self.thousand_separator());
            }
            grouped.push(c);
        }

        match frac {
            Some(frac) => format!("{}{}{}", grouped, self.decimal_separator, frac),
            None => grouped,
        }
    }
}

/// Complete state of the swap form and the operations the UI performs on it.
#[derive(Debug, Clone)]
pub struct SwapForm {
    pub state: FormState,
    pub props: FormProps,
    pub swap_mode: SwapMode,
    /// The side the user last interacted with.
    pub focused: Side,
    pub minimum_reserve: Decimal,
    pub decimal_separator: char,
    pub max_input_limit: Decimal,
}

impl SwapForm {
    pub fn new(state: FormState, props: FormProps, swap_mode: SwapMode) -> Self {
        Self {
            state,
            props,
            swap_mode,
            focused: Side::From,
            minimum_reserve: MINIMUM_SOL_BALANCE,
            decimal_separator: '.',
            max_input_limit: Decimal::from(MAX_INPUT_LIMIT),
        }
    }

    pub fn with_minimum_reserve(mut self, minimum_reserve: Decimal) -> Self {
        self.minimum_reserve = minimum_reserve;
        self
    }

    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    pub fn with_max_input_limit(mut self, limit: Decimal) -> Self {
        self.max_input_limit = limit;
        self
    }

    pub fn focus(&mut self, side: Side) {
        self.focused = side;
    }

    pub fn disablement(&self) -> AmountDisablement {
        derive_amount_disablement(
            self.swap_mode,
            self.props.fixed_amount,
            &self.state.from_value,
            &self.state.to_value,
        )
    }

    pub fn amount_disabled(&self, side: Side) -> bool {
        self.disablement().for_side(side)
    }

    pub fn selector_disabled(&self, side: Side) -> bool {
        selector_disabled(&self.props, self.state.mint(side))
    }

    /// Number mask for `side`, using the token's precision.
    pub fn number_format(&self, token: Option<&Token>) -> NumberFormat {
        let scale = token.map(Token::display_decimals).unwrap_or_default();
        NumberFormat {
            decimal_separator: self.decimal_separator,
            decimal_scale: scale,
            max_input_limit: self.max_input_limit,
        }
    }

    /// Side whose amount the user fixes; the other side is filled by quotes.
    ///
    /// The mode picks the side, unless the focused side was just filled (by
    /// typing or a Half/Max shortcut) while the mode's side is empty.
    pub fn input_side(&self) -> Side {
        let preferred = match self.swap_mode {
            SwapMode::ExactIn => Side::From,
            SwapMode::ExactOut => Side::To,
            SwapMode::ExactInOrOut => return self.focused,
        };
        if has_numeric_value(self.state.value(self.focused))
            && !has_numeric_value(self.state.value(preferred))
        {
            self.focused
        } else {
            preferred
        }
    }

    /// Run a Half or Max shortcut on `side`.
    ///
    /// The other side only ever holds a quoted amount afterwards, so it is
    /// cleared until the next quote fills it. Returns `false` when the balance
    /// is unknown and nothing was written.
    pub fn apply_shortcut(
        &mut self,
        side: Side,
        shortcut: Shortcut,
        balance: Option<Decimal>,
        token: Option<&Token>,
    ) -> bool {
        self.focus(side);
        let Some(balance) = balance else {
            return false;
        };

        let amount = match token {
            Some(token) => apportion(shortcut, balance, token, self.minimum_reserve),
            None => {
                let fallback = Token {
                    id: self.state.mint(side).to_string(),
                    symbol: String::new(),
                    name: String::new(),
                    decimals: None,
                    price_usd: None,
                };
                apportion(shortcut, balance, &fallback, self.minimum_reserve)
            }
        };
        *self.state.value_mut(side) = amount;
        self.state.value_mut(side.other()).clear();
        true
    }

    /// Type one character into `side`. Returns whether the keystroke was kept.
    pub fn input_char(&mut self, side: Side, c: char, token: Option<&Token>) -> bool {
        self.focus(side);
        if token.is_none() || self.amount_disabled(side) {
            return false;
        }

        match self.number_format(token).accept_char(self.state.value(side), c) {
            Some(raw) => {
                self.state.change_value(side, &raw);
                true
            }
            None => false,
        }
    }

    /// Replace the whole value of `side` with pasted `text`.
    pub fn paste(&mut self, side: Side, text: &str, token: Option<&Token>) -> bool {
        self.focus(side);
        if token.is_none() || self.amount_disabled(side) {
            return false;
        }

        match self.number_format(token).normalize(text.trim()) {
            Some(raw) => {
                self.state.change_value(side, &raw);
                true
            }
            None => false,
        }
    }

    pub fn backspace(&mut self, side: Side) -> bool {
        self.focus(side);
        if self.amount_disabled(side) {
            return false;
        }
        let mut value = self.state.value(side).to_string();
        if value.pop().is_none() {
            return false;
        }
        self.state.change_value(side, &value);
        true
    }

    /// Point `side` at a new mint. Picking the other side's mint swaps the pair.
    pub fn select_mint(&mut self, side: Side, mint: &str) -> bool {
        if self.selector_disabled(side) {
            return false;
        }
        if self.state.mint(side.other()) == mint {
            self.switch_pair();
            return true;
        }
        if self.state.mint(side) != mint {
            *self.state.mint_mut(side) = mint.to_string();
            self.state.from_value.clear();
            self.state.to_value.clear();
        }
        true
    }

    pub fn switch_pair(&mut self) {
        self.focused = Side::From;
        self.state.switch_pair();
    }

    /// Amount on the input side, when it holds a positive number.
    pub fn input_amount(&self) -> Option<Decimal> {
        parse_amount(self.state.value(self.input_side())).filter(|v| *v > Decimal::ZERO)
    }

    /// Quote request for the current input amount, if there is one to price.
    ///
    /// `ExactInOrOut` resolves to `ExactIn` or `ExactOut` depending on focus.
    pub fn quote_request(&self, slippage_bps: u16) -> Option<QuoteRequest> {
        let amount = self.input_amount()?;
        let swap_mode = match self.input_side() {
            Side::From => SwapMode::ExactIn,
            Side::To => SwapMode::ExactOut,
        };
        Some(QuoteRequest {
            input_mint: self.state.from_mint.clone(),
            output_mint: self.state.to_mint.clone(),
            amount,
            swap_mode,
            slippage_bps,
        })
    }

    /// Fill the quoted side from `quote`, or clear it when there is none.
    ///
    /// `token` is the token of the quoted side.
    pub fn apply_quote(&mut self, quote: Option<&Quote>, token: Option<&Token>) {
        let output_side = self.input_side().other();
        let decimals = token.map(Token::display_decimals).unwrap_or(DEFAULT_DECIMALS);

        let value = match quote {
            Some(q) => {
                let amount = match output_side {
                    Side::To => q.out_amount,
                    Side::From => q.in_amount,
                };
                amount
                    .round_dp_with_strategy(decimals, RoundingStrategy::ToZero)
                    .normalize()
                    .to_string()
            }
            None => String::new(),
        };
        *self.state.value_mut(output_side) = value;
    }
}
