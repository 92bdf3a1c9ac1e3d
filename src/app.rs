use color_eyre::eyre::{Result, eyre};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use swapform::{
    config::Config,
    domain::{
        form::{FormState, Side, SwapForm},
        swap::{SwapRequest, TxStatus},
        token::{find_token, short_address},
    },
    infra::{
        BalanceSource, QuoteProvider, SwapSubmitter, ledger::LocalLedger, quote::PriceTableQuoter,
    },
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::{
    action::Action,
    cli::Args,
    components::{
        Component, swap_form::SwapFormComponent, swapping::SwappingComponent,
        token_select::TokenSelectComponent,
        wallet::{WalletComponent, validate_public_key},
    },
    tui::{Event, Frame, Tui},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    SelectPair(Side),
    Wallet,
    Swapping,
}

pub struct App {
    pub should_quit: bool,
    pub should_suspend: bool,
    pub config: Config,
    pub screen: Screen,
    pub action_tx: UnboundedSender<Action>,
    pub action_rx: UnboundedReceiver<Action>,
    pub tui: Tui,
    pub ledger: LocalLedger,
    pub quoter: PriceTableQuoter,
    pub wallet: Option<String>,
    pub form_component: SwapFormComponent,
    pub token_select_component: TokenSelectComponent,
    pub wallet_component: WalletComponent,
    pub swapping_component: SwappingComponent,
    pub status_message: String,
}

impl App {
    pub fn new(args: &Args) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let mut config = Config::load(args.network.as_deref())?;
        if let Some(mode) = args.swap_mode {
            config.swap.swap_mode = mode;
        }
        if args.fixed_amount {
            config.swap.props.fixed_amount = true;
        }
        if let Some(ref mint) = args.fixed_mint {
            config.swap.props.fixed_mint = Some(mint.clone());
        }

        let form = SwapForm::new(
            FormState::new(&config.swap.initial_from_mint, &config.swap.initial_to_mint),
            config.swap.props.clone(),
            config.swap.swap_mode,
        )
        .with_minimum_reserve(config.swap.minimum_reserve)
        .with_decimal_separator(config.display.decimal_separator)
        .with_max_input_limit(config.swap.max_input_limit);

        let ledger = LocalLedger::new()?;
        let quoter = PriceTableQuoter::new(&config.tokens, 0);

        let form_component = SwapFormComponent::new(action_tx.clone(), form, config.tokens.clone());
        let token_select_component =
            TokenSelectComponent::new(action_tx.clone(), config.tokens.clone());
        let wallet_component = WalletComponent::new(action_tx.clone());
        let swapping_component = SwappingComponent::new(action_tx.clone());

        let tui = Tui::new()?
            .tick_rate(args.tick_rate)
            .frame_rate(args.frame_rate)
            .paste(true);

        if let Some(ref wallet) = args.wallet {
            action_tx.send(Action::ConnectWallet(wallet.clone()))?;
        }

        Ok(Self {
            should_quit: false,
            should_suspend: false,
            config,
            screen: Screen::Form,
            action_tx,
            action_rx,
            tui,
            ledger,
            quoter,
            wallet: None,
            form_component,
            token_select_component,
            wallet_component,
            swapping_component,
            status_message: "Ready".to_string(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        info!(
            "Swap form started on {} ({})",
            self.config.network.name, self.config.swap.swap_mode
        );

        loop {
            if let Some(event) = self.tui.next().await {
                self.handle_event(event)?;
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.handle_action(action)?;
            }

            if self.should_suspend {
                self.tui.suspend()?;
                self.should_suspend = false;
                self.tui.resume()?;
            }

            if self.should_quit {
                break;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Tick => self.action_tx.send(Action::Tick)?,
            Event::Render => self.draw_ui()?,
            Event::Key(key) => self.handle_key_event(key)?,
            Event::Paste(text) => self.active_component().paste(&text)?,
            Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
            Event::Init => info!("Application initialized"),
            Event::Error => {}
        }
        Ok(())
    }

    fn active_component(&mut self) -> &mut dyn Component {
        match self.screen {
            Screen::Form => &mut self.form_component,
            Screen::SelectPair(_) => &mut self.token_select_component,
            Screen::Wallet => &mut self.wallet_component,
            Screen::Swapping => &mut self.swapping_component,
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.action_tx.send(Action::Quit)?;
            return Ok(());
        }

        if self.active_component().is_editing() {
            return self.active_component().handle_key_event(key);
        }

        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => {
                self.action_tx.send(Action::Quit)?;
            }
            KeyCode::Char('z') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.action_tx.send(Action::Suspend)?;
            }
            KeyCode::Char('w') if key.modifiers.is_empty() => {
                self.action_tx.send(Action::ShowWallet)?;
            }
            KeyCode::Char('r') if key.modifiers.is_empty() => {
                self.action_tx.send(Action::RefreshBalances)?;
            }
            _ => self.active_component().handle_key_event(key)?,
        }
        Ok(())
    }

    fn handle_action(&mut self, action: Action) -> Result<()> {
        if action != Action::Tick {
            debug!("Handling action: {:?}", action);
        }
        match action {
            Action::Tick => {}
            Action::Quit => self.should_quit = true,
            Action::Suspend => self.should_suspend = true,
            Action::Resize(w, h) => {
                self.tui.resize(Rect::new(0, 0, w, h))?;
                self.draw_ui()?;
            }
            Action::ShowForm => self.screen = Screen::Form,
            Action::ShowWallet => {
                self.wallet_component.set_connected(self.wallet.clone());
                self.screen = Screen::Wallet;
            }
            Action::FormChanged => self.refresh_quote(),
            Action::SwitchPair => {
                self.form_component.form.switch_pair();
                self.refresh_quote();
            }
            Action::OpenPairSelector(side) => {
                let mint = self.form_component.form.state.mint(side).to_string();
                self.token_select_component
                    .open(side, &mint, self.form_component.balances.clone());
                self.screen = Screen::SelectPair(side);
            }
            Action::SelectPair(side, mint) => {
                if self.form_component.form.select_mint(side, &mint) {
                    self.refresh_quote();
                } else {
                    self.status_message = format!("{} token is fixed", side.title());
                }
                self.screen = Screen::Form;
            }
            Action::SubmitSwap => self.submit_swap()?,
            Action::ConnectWallet(key) => {
                if let Some(err) = validate_public_key(&key) {
                    warn!("Rejected wallet {}: {}", key, err);
                    self.status_message = err;
                    return Ok(());
                }
                info!("Connected wallet {}", key);
                self.wallet = Some(key.clone());
                self.form_component.set_wallet(Some(key));
                self.refresh_balances();
                self.screen = Screen::Form;
            }
            Action::DisconnectWallet => {
                info!("Disconnected wallet");
                self.wallet = None;
                self.form_component.set_wallet(None);
                self.wallet_component.set_connected(None);
                self.status_message = "Wallet disconnected".to_string();
            }
            Action::RefreshBalances => self.refresh_balances(),
        }
        Ok(())
    }

    fn refresh_balances(&mut self) {
        let Some(ref wallet) = self.wallet else {
            return;
        };
        match self.ledger.balances(wallet) {
            Ok(balances) => {
                self.status_message = format!("Loaded {} balances", balances.len());
                self.form_component.set_balances(balances);
            }
            Err(e) => {
                error!("Failed to load balances for {}: {:#}", wallet, e);
                self.status_message = format!("Failed to load balances: {}", e);
            }
        }
    }

    /// Re-price the pair and fill the quoted side of the form.
    fn refresh_quote(&mut self) {
        let form = &self.form_component.form;
        let quote = match form.quote_request(self.config.swap.slippage_bps) {
            Some(request) => match self.quoter.quote(&request) {
                Ok(quote) => Some(quote),
                Err(e) => {
                    warn!("Quote failed: {}", e);
                    self.status_message = format!("No quote: {}", e);
                    None
                }
            },
            None => None,
        };

        let quoted_side = form.input_side().other();
        let token = self.form_component.token(quoted_side).cloned();
        self.form_component
            .form
            .apply_quote(quote.as_ref(), token.as_ref());
        self.form_component.set_quote(quote);
    }

    fn submit_swap(&mut self) -> Result<()> {
        let Some(wallet) = self.wallet.clone() else {
            self.action_tx.send(Action::ShowWallet)?;
            return Ok(());
        };
        let Some(quote) = self.form_component.quote.clone() else {
            self.status_message = "Enter an amount to get a quote first".to_string();
            return Ok(());
        };

        let state = &self.form_component.form.state;
        let tokens = &self.config.tokens;
        let from_token = find_token(tokens, &state.from_mint).cloned();
        let to_token = find_token(tokens, &state.to_mint).cloned();

        let status = match (from_token, to_token) {
            (Some(from_token), Some(to_token)) => {
                self.swapping_component
                    .set_pair(&from_token.symbol, &to_token.symbol);
                self.swapping_component.set_status(TxStatus::Sending);
                let request = SwapRequest {
                    wallet,
                    from_token,
                    to_token,
                    quote,
                };
                match self.ledger.submit(&request) {
                    Ok(result) => {
                        self.status_message = format!("Swap sent: {}", result.signature);
                        self.swapping_component.set_result(Some(result));
                        self.form_component.clear()?;
                        TxStatus::Success
                    }
                    Err(e) => {
                        error!("Swap failed: {:#}", e);
                        self.swapping_component.set_result(None);
                        TxStatus::Fail(e.to_string())
                    }
                }
            }
            _ => {
                let e = eyre!("Missing token info for {} -> {}", state.from_mint, state.to_mint);
                error!("{}", e);
                self.swapping_component.set_result(None);
                TxStatus::Fail(e.to_string())
            }
        };

        self.swapping_component.set_status(status);
        self.screen = Screen::Swapping;
        self.refresh_balances();
        Ok(())
    }

    fn draw_ui(&mut self) -> Result<()> {
        let Self {
            tui,
            screen,
            config,
            wallet,
            status_message,
            form_component,
            token_select_component,
            wallet_component,
            swapping_component,
            ..
        } = self;

        tui.draw(|f| {
            let chunks = Layout::vertical([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Content
                Constraint::Length(3), // Status
            ])
            .split(f.area());

            let mode = form_component.form.swap_mode.to_string();
            draw_header(f, chunks[0], &config.network.name, &mode, wallet.as_deref());
            match *screen {
                Screen::Form => form_component.draw(f, chunks[1]),
                Screen::SelectPair(_) => token_select_component.draw(f, chunks[1]),
                Screen::Wallet => wallet_component.draw(f, chunks[1]),
                Screen::Swapping => swapping_component.draw(f, chunks[1]),
            }
            draw_status(f, chunks[2], status_message);
        })?;
        Ok(())
    }
}

fn draw_header(f: &mut Frame, area: Rect, network: &str, mode: &str, wallet: Option<&str>) {
    let wallet = match wallet {
        Some(key) => short_address(key, 12),
        None => "not connected".to_string(),
    };
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "Swap",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("[{}]", network), Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(format!("[{}]", mode), Style::default().fg(Color::Magenta)),
        Span::raw("  "),
        Span::styled(format!("Wallet: {}", wallet), Style::default().fg(Color::Gray)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(title, area);
}

fn draw_status(f: &mut Frame, area: Rect, status_message: &str) {
    let status = Paragraph::new(Line::from(vec![
        Span::styled("Status: ", Style::default().fg(Color::DarkGray)),
        Span::styled(status_message, Style::default().fg(Color::Green)),
        Span::raw("  |  "),
        Span::styled(
            "[q]Quit [w]Wallet [r]Refresh [?]Help",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(status, area);
}
