//! Swap form: selling and buying fields with token selectors, Half/Max
//! shortcuts, a pair switch and the submit button.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use rust_decimal::Decimal;
use swapform::domain::{
    amount::Shortcut,
    balance::Balances,
    form::{Side, SwapForm},
    quote::{Quote, format_rate, usd_value},
    token::{Token, find_token},
};
use tokio::sync::mpsc::UnboundedSender;

use super::Component;
use crate::{action::Action, tui::Frame};

/// Focusable elements of the form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FromToken,
    FromAmount,
    ToToken,
    ToAmount,
    Submit,
}

impl FormField {
    const ORDER: [FormField; 5] = [
        FormField::FromToken,
        FormField::FromAmount,
        FormField::ToToken,
        FormField::ToAmount,
        FormField::Submit,
    ];

    pub fn side(self) -> Option<Side> {
        match self {
            FormField::FromToken | FormField::FromAmount => Some(Side::From),
            FormField::ToToken | FormField::ToAmount => Some(Side::To),
            FormField::Submit => None,
        }
    }

    pub fn is_amount(self) -> bool {
        matches!(self, FormField::FromAmount | FormField::ToAmount)
    }

    fn amount_of(side: Side) -> FormField {
        match side {
            Side::From => FormField::FromAmount,
            Side::To => FormField::ToAmount,
        }
    }

    fn token_of(side: Side) -> FormField {
        match side {
            Side::From => FormField::FromToken,
            Side::To => FormField::ToToken,
        }
    }

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }
}

pub struct SwapFormComponent {
    action_tx: UnboundedSender<Action>,
    pub form: SwapForm,
    pub tokens: Vec<Token>,
    pub balances: Balances,
    pub wallet: Option<String>,
    pub quote: Option<Quote>,
    pub focused_field: FormField,
    pub is_editing: bool,
    pub show_help: bool,
    pub error_message: Option<String>,
}

impl SwapFormComponent {
    pub fn new(action_tx: UnboundedSender<Action>, form: SwapForm, tokens: Vec<Token>) -> Self {
        Self {
            action_tx,
            form,
            tokens,
            balances: Balances::new(),
            wallet: None,
            quote: None,
            focused_field: FormField::FromAmount,
            is_editing: false,
            show_help: false,
            error_message: None,
        }
    }

    pub fn set_balances(&mut self, balances: Balances) {
        self.balances = balances;
    }

    pub fn set_wallet(&mut self, wallet: Option<String>) {
        if wallet.is_none() {
            self.balances = Balances::new();
        }
        self.wallet = wallet;
    }

    pub fn set_quote(&mut self, quote: Option<Quote>) {
        self.quote = quote;
    }

    pub fn is_wallet_connected(&self) -> bool {
        self.wallet.is_some()
    }

    pub fn token(&self, side: Side) -> Option<&Token> {
        find_token(&self.tokens, self.form.state.mint(side))
    }

    /// Balance of the token on `side`, or `None` when it is unknown.
    pub fn balance(&self, side: Side) -> Option<Decimal> {
        self.wallet.as_ref()?;
        self.balances.get(self.form.state.mint(side))
    }

    /// Clear both amounts.
    pub fn clear(&mut self) -> Result<()> {
        self.form.state.change_value(Side::From, "");
        self.is_editing = false;
        self.error_message = None;
        self.action_tx.send(Action::FormChanged)?;
        Ok(())
    }

    fn notify_changed(&self) -> Result<()> {
        self.action_tx.send(Action::FormChanged)?;
        Ok(())
    }

    fn focus_field(&mut self, field: FormField) {
        self.focused_field = field;
        if let Some(side) = field.side() {
            self.form.focus(side);
        }
    }

    fn next_field(&mut self) {
        let i = (self.focused_field.position() + 1) % FormField::ORDER.len();
        self.focus_field(FormField::ORDER[i]);
    }

    fn prev_field(&mut self) {
        let i = self.focused_field.position();
        let i = if i == 0 { FormField::ORDER.len() - 1 } else { i - 1 };
        self.focus_field(FormField::ORDER[i]);
    }

    fn focused_side(&self) -> Side {
        self.focused_field.side().unwrap_or(self.form.focused)
    }

    /// Half, Max or a click on the balance label, acting on `side`.
    fn shortcut(&mut self, side: Side, shortcut: Shortcut) -> Result<()> {
        let token = self.token(side).cloned();
        let balance = self.balance(side);
        self.focused_field = FormField::amount_of(side);
        if self.form.apply_shortcut(side, shortcut, balance, token.as_ref()) {
            self.notify_changed()?;
        }
        Ok(())
    }

    fn open_selector(&mut self, side: Side) -> Result<()> {
        if self.form.selector_disabled(side) {
            self.error_message = Some(format!("{} token is fixed", side.title()));
            return Ok(());
        }
        self.action_tx.send(Action::OpenPairSelector(side))?;
        Ok(())
    }

    fn handle_editing_key(&mut self, key: KeyEvent, side: Side) -> Result<()> {
        let token = self.token(side).cloned();
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.is_editing = false;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.is_editing = false;
                self.next_field();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.is_editing = false;
                self.prev_field();
            }
            KeyCode::Char(_)
                if key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
            KeyCode::Char(c) => {
                if self.form.input_char(side, c, token.as_ref()) {
                    self.notify_changed()?;
                }
            }
            KeyCode::Backspace => {
                if self.form.backspace(side) {
                    self.notify_changed()?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn draw_side(&self, f: &mut Frame, area: Rect, side: Side) {
        let token = self.token(side);
        let field_focused = self.focused_field.side() == Some(side);
        let amount_field = FormField::amount_of(side);
        let token_field = FormField::token_of(side);
        let amount_disabled = self.form.amount_disabled(side);
        let selector_disabled = self.form.selector_disabled(side);

        // Balance label with shortcuts, shown once a token is known.
        let mut balance_spans = Vec::new();
        if let Some(token) = token {
            balance_spans.push(Span::styled(
                format!(" ◎ {} {} ", self.balances.display(&token.id), token.symbol),
                Style::default().fg(Color::DarkGray),
            ));
            if self.is_wallet_connected() {
                let shortcut_style = if field_focused {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                balance_spans.push(Span::styled(
                    format!("[h]{} [m]{} ", Shortcut::Half, Shortcut::Max),
                    shortcut_style,
                ));
            }
        }

        let block = Block::default()
            .title(if field_focused {
                format!("> {}", side.title())
            } else {
                format!("  {}", side.title())
            })
            .title(Line::from(balance_spans).right_aligned())
            .borders(Borders::ALL)
            .border_style(if field_focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            });
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::horizontal([Constraint::Length(18), Constraint::Min(0)]).split(inner);

        // Token selector
        let symbol = token.map(|t| t.symbol.as_str()).unwrap_or("Select");
        let selector_label = if selector_disabled {
            format!("[ {} ]", symbol)
        } else {
            format!("[ {} ▾ ]", symbol)
        };
        let selector_style = if self.focused_field == token_field {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if selector_disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };
        let mut selector_lines = vec![Line::from(Span::styled(selector_label, selector_style))];
        if let Some(token) = token {
            selector_lines.push(Line::from(Span::styled(
                token.short_id(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        f.render_widget(Paragraph::new(selector_lines), chunks[0]);

        // Amount
        let value = self.form.state.value(side);
        let number_format = self.form.number_format(token);
        let editing_here = self.is_editing && self.focused_field == amount_field;
        let mut amount_text = if value.is_empty() && !editing_here {
            "0.00".to_string()
        } else {
            number_format.display(value)
        };
        if editing_here {
            amount_text.push('│');
        }
        let amount_style = if amount_disabled {
            Style::default().fg(Color::DarkGray)
        } else if editing_here {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if self.focused_field == amount_field {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };

        let usd = token
            .and_then(|t| usd_value(t, value))
            .unwrap_or_default();
        let amount_widget = Paragraph::new(vec![
            Line::from(Span::styled(amount_text, amount_style)),
            Line::from(Span::styled(usd, Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Right);
        f.render_widget(amount_widget, chunks[1]);
    }

    fn draw_price_info(&self, f: &mut Frame, area: Rect) {
        let mut lines = vec![];

        if let Some(err) = &self.error_message {
            lines.push(Line::from(Span::styled(
                format!("Error: {}", err),
                Style::default().fg(Color::Red),
            )));
        }

        if let (Some(quote), Some(from), Some(to)) =
            (&self.quote, self.token(Side::From), self.token(Side::To))
        {
            if let Some(rate) = format_rate(quote, from, to) {
                lines.push(Line::from(vec![
                    Span::styled("Rate: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(rate, Style::default().fg(Color::White)),
                ]));
            }
            lines.push(Line::from(vec![
                Span::styled("Minimum received: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!(
                        "{} {}",
                        quote.minimum_received().round_dp(to.display_decimals()).normalize(),
                        to.symbol
                    ),
                    Style::default().fg(Color::Green),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Maximum sent: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!(
                        "{} {}",
                        quote.maximum_sent().round_dp(from.display_decimals()).normalize(),
                        from.symbol
                    ),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("  (slippage {} bps)", quote.slippage_bps),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }

        lines.push(Line::from(""));
        let help = if self.is_editing {
            "[Esc/Enter] Stop editing  [Tab/↓] Next field  [Shift+Tab/↑] Prev field"
        } else if self.show_help {
            "[Enter] Edit/Select  [h] Half  [m] Max  [b] Balance  [x] Switch  [c] Clear  [w] Wallet  [r] Refresh  [q] Quit"
        } else {
            "[Enter] Edit/Select  [h/m] Half/Max  [x] Switch pair  [?] Help"
        };
        lines.push(Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))));

        let widget = Paragraph::new(lines).block(
            Block::default()
                .title("Price Info")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(widget, area);
    }
}

impl Component for SwapFormComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        self.error_message = None;

        if self.is_editing
            && let Some(side) = self.focused_field.side()
        {
            return self.handle_editing_key(key, side);
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Enter => match self.focused_field {
                FormField::FromToken => self.open_selector(Side::From)?,
                FormField::ToToken => self.open_selector(Side::To)?,
                FormField::FromAmount | FormField::ToAmount => {
                    let side = self.focused_side();
                    if self.form.amount_disabled(side) {
                        self.error_message = Some(format!("{} amount is locked", side.title()));
                    } else {
                        self.form.focus(side);
                        self.is_editing = true;
                    }
                }
                FormField::Submit => {
                    self.action_tx.send(Action::SubmitSwap)?;
                }
            },
            KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
                let side = self.focused_side();
                match c {
                    'j' => self.next_field(),
                    'k' => self.prev_field(),
                    'e' if self.focused_field.is_amount() => {
                        if !self.form.amount_disabled(side) {
                            self.form.focus(side);
                            self.is_editing = true;
                        }
                    }
                    'h' if self.is_wallet_connected() => self.shortcut(side, Shortcut::Half)?,
                    'm' if self.is_wallet_connected() => self.shortcut(side, Shortcut::Max)?,
                    'b' => self.shortcut(side, Shortcut::Max)?,
                    'x' => self.action_tx.send(Action::SwitchPair)?,
                    'c' => self.clear()?,
                    '?' => self.show_help = !self.show_help,
                    _ => {}
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(4), // Selling
            Constraint::Length(1), // Switch
            Constraint::Length(4), // Buying
            Constraint::Length(3), // Submit
            Constraint::Min(0),    // Price info
        ])
        .split(area);

        self.draw_side(f, chunks[0], Side::From);

        let switch = Paragraph::new(Line::from(Span::styled(
            "⇅ [x] switch",
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center);
        f.render_widget(switch, chunks[1]);

        self.draw_side(f, chunks[2], Side::To);

        let submit_focused = self.focused_field == FormField::Submit;
        let label = if self.is_wallet_connected() {
            "[ Swap ]"
        } else {
            "[ Connect Wallet ]"
        };
        let submit_style = if submit_focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green)
        };
        let submit = Paragraph::new(Line::from(Span::styled(label, submit_style)))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(if submit_focused {
                        Style::default().fg(Color::Cyan)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    }),
            );
        f.render_widget(submit, chunks[3]);

        self.draw_price_info(f, chunks[4]);
    }

    fn is_editing(&self) -> bool {
        self.is_editing
    }

    fn paste(&mut self, text: &str) -> Result<()> {
        if !self.is_editing {
            return Ok(());
        }
        let Some(side) = self.focused_field.side() else {
            return Ok(());
        };
        let token = self.token(side).cloned();
        if self.form.paste(side, text, token.as_ref()) {
            self.notify_changed()?;
        } else {
            self.error_message = Some("Pasted text is not a valid amount".to_string());
        }
        Ok(())
    }
}
