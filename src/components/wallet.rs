//! Wallet connect prompt.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tokio::sync::mpsc::UnboundedSender;

use super::Component;
use crate::{action::Action, tui::Frame};

/// Length of an ed25519 public key in bytes.
const PUBLIC_KEY_LEN: usize = 32;

/// Check that `key` is a base58 ed25519 public key; `Some` holds the reason it is not.
pub fn validate_public_key(key: &str) -> Option<String> {
    match bs58::decode(key).into_vec() {
        Ok(bytes) if bytes.len() == PUBLIC_KEY_LEN => None,
        Ok(bytes) => Some(format!(
            "Invalid public key: {} bytes (expected {})",
            bytes.len(),
            PUBLIC_KEY_LEN
        )),
        Err(e) => Some(format!("Invalid base58 public key: {}", e)),
    }
}

pub struct WalletComponent {
    action_tx: UnboundedSender<Action>,
    pub connected: Option<String>,
    pub input: String,
    pub error_message: Option<String>,
}

impl WalletComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            connected: None,
            input: String::new(),
            error_message: None,
        }
    }

    pub fn set_connected(&mut self, wallet: Option<String>) {
        self.connected = wallet;
        self.input.clear();
        self.error_message = None;
    }

    fn connect(&mut self) -> Result<()> {
        let key = self.input.trim().to_string();
        if let Some(err) = validate_public_key(&key) {
            self.error_message = Some(err);
            return Ok(());
        }
        self.action_tx.send(Action::ConnectWallet(key))?;
        Ok(())
    }
}

impl Component for WalletComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        self.error_message = None;
        match key.code {
            KeyCode::Enter => self.connect()?,
            KeyCode::Esc => self.action_tx.send(Action::ShowForm)?,
            KeyCode::Delete if self.connected.is_some() => {
                self.action_tx.send(Action::DisconnectWallet)?;
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

        let status = match &self.connected {
            Some(key) => Line::from(vec![
                Span::styled("Connected: ", Style::default().fg(Color::DarkGray)),
                Span::styled(key.as_str(), Style::default().fg(Color::Green)),
            ]),
            None => Line::from(Span::styled(
                "No wallet connected.",
                Style::default().fg(Color::Yellow),
            )),
        };
        let status_widget = Paragraph::new(vec![Line::from(""), status]).block(
            Block::default()
                .title("Wallet")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(status_widget, chunks[0]);

        let input = Paragraph::new(Line::from(Span::styled(
            format!("{}│", self.input),
            Style::default().fg(Color::Yellow),
        )))
        .block(
            Block::default()
                .title("> Public key")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(input, chunks[1]);

        let mut lines = vec![Line::from("")];
        if let Some(err) = &self.error_message {
            lines.push(Line::from(Span::styled(
                format!("Error: {}", err),
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(Span::styled(
            "[Enter] Connect  [Del] Disconnect  [Esc] Back",
            Style::default().fg(Color::DarkGray),
        )));
        let help = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(help, chunks[2]);
    }

    fn is_editing(&self) -> bool {
        true
    }

    fn paste(&mut self, text: &str) -> Result<()> {
        self.input.push_str(text.trim());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    const KEY: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

    #[test]
    fn test_validate_public_key() {
        assert_eq!(validate_public_key(KEY), None);
        assert!(validate_public_key("short").is_some());
        assert!(validate_public_key("0WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM").is_some());
    }

    #[test]
    fn test_key_must_decode_to_32_bytes() {
        assert!(validate_public_key(&"z".repeat(44)).is_some());
        assert!(validate_public_key(&"1".repeat(32)).is_none());
        assert!(validate_public_key("").is_some());
    }

    #[test]
    fn test_connect_sends_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut c = WalletComponent::new(tx);
        c.paste(KEY).unwrap();
        c.handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap();
        assert_eq!(rx.try_recv().unwrap(), Action::ConnectWallet(KEY.to_string()));
    }

    #[test]
    fn test_invalid_key_shows_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut c = WalletComponent::new(tx);
        c.handle_key_event(KeyEvent::from(KeyCode::Char('x'))).unwrap();
        c.handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap();
        assert!(c.error_message.is_some());
        assert!(rx.try_recv().is_err());
    }
}
