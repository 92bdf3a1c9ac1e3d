//! Token picker for one side of the pair.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use swapform::domain::{balance::Balances, form::Side, token::Token};
use tokio::sync::mpsc::UnboundedSender;

use super::Component;
use crate::{action::Action, tui::Frame};

pub struct TokenSelectComponent {
    action_tx: UnboundedSender<Action>,
    pub side: Side,
    pub tokens: Vec<Token>,
    pub balances: Balances,
    pub current_mint: String,
    pub query: String,
    pub selected_index: usize,
    list_state: ListState,
}

impl TokenSelectComponent {
    pub fn new(action_tx: UnboundedSender<Action>, tokens: Vec<Token>) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            action_tx,
            side: Side::From,
            tokens,
            balances: Balances::new(),
            current_mint: String::new(),
            query: String::new(),
            selected_index: 0,
            list_state,
        }
    }

    /// Reset the picker for `side`, preselecting the token it shows now.
    pub fn open(&mut self, side: Side, current_mint: &str, balances: Balances) {
        self.side = side;
        self.current_mint = current_mint.to_string();
        self.balances = balances;
        self.query.clear();
        self.selected_index = self
            .tokens
            .iter()
            .position(|t| t.id == current_mint)
            .unwrap_or(0);
        self.list_state.select(Some(self.selected_index));
    }

    /// Tokens whose symbol, name or mint matches the search query.
    pub fn filtered(&self) -> Vec<&Token> {
        let query = self.query.to_lowercase();
        self.tokens
            .iter()
            .filter(|t| {
                query.is_empty()
                    || t.symbol.to_lowercase().contains(&query)
                    || t.name.to_lowercase().contains(&query)
                    || t.id.to_lowercase().starts_with(&query)
            })
            .collect()
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
        self.list_state.select(Some(self.selected_index));
    }

    fn next(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
        self.list_state.select(Some(self.selected_index));
    }

    fn previous(&mut self) {
        let len = self.filtered().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
        self.list_state.select(Some(self.selected_index));
    }

    fn select(&self) -> Result<()> {
        if let Some(token) = self.filtered().get(self.selected_index) {
            self.action_tx
                .send(Action::SelectPair(self.side, token.id.clone()))?;
        }
        Ok(())
    }
}

impl Component for TokenSelectComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Down | KeyCode::Tab => self.next(),
            KeyCode::Up | KeyCode::BackTab => self.previous(),
            KeyCode::Enter => self.select()?,
            KeyCode::Esc => self.action_tx.send(Action::ShowForm)?,
            KeyCode::Backspace => {
                self.query.pop();
                self.clamp_selection();
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.selected_index = 0;
                self.clamp_selection();
            }
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(area);

        let search = Paragraph::new(Line::from(vec![
            Span::styled(format!("{}│", self.query), Style::default().fg(Color::Yellow)),
        ]))
        .block(
            Block::default()
                .title(format!("Select {} token (type to search)", self.side.title()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(search, chunks[0]);

        let items: Vec<ListItem> = self
            .filtered()
            .iter()
            .map(|t| {
                let marker = if t.id == self.current_mint { " ✓" } else { "" };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<8}", t.symbol),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("{:<20}", t.name), Style::default().fg(Color::Gray)),
                    Span::styled(format!("{:<14}", t.short_id()), Style::default().fg(Color::DarkGray)),
                    Span::styled(self.balances.display(&t.id), Style::default().fg(Color::Green)),
                    Span::styled(marker, Style::default().fg(Color::Green)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title("[↑/↓] Move  [Enter] Select  [Esc] Back")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        f.render_stateful_widget(list, chunks[1], &mut self.list_state);
    }

    fn is_editing(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    fn tokens() -> Vec<Token> {
        vec![
            Token::new("So11111111111111111111111111111111111111112", "SOL", "Wrapped SOL", 9),
            Token::new("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", "USDC", "USD Coin", 6),
            Token::new("JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN", "JUP", "Jupiter", 6),
        ]
    }

    #[test]
    fn test_open_preselects_current_token() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut c = TokenSelectComponent::new(tx, tokens());
        c.open(Side::To, "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN", Balances::new());
        assert_eq!(c.selected_index, 2);
    }

    #[test]
    fn test_search_and_select() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut c = TokenSelectComponent::new(tx, tokens());
        c.open(Side::From, "So11111111111111111111111111111111111111112", Balances::new());

        for ch in "usd".chars() {
            c.handle_key_event(KeyEvent::from(KeyCode::Char(ch))).unwrap();
        }
        assert_eq!(c.filtered().len(), 1);

        c.handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            Action::SelectPair(
                Side::From,
                "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string()
            )
        );
    }

    #[test]
    fn test_escape_returns_to_form() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut c = TokenSelectComponent::new(tx, tokens());
        c.handle_key_event(KeyEvent::from(KeyCode::Esc)).unwrap();
        assert_eq!(rx.try_recv().unwrap(), Action::ShowForm);
    }
}
