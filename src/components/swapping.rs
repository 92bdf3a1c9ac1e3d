//! Result screen shown after a swap was submitted.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use swapform::domain::swap::{SwapResult, TxStatus};
use tokio::sync::mpsc::UnboundedSender;

use super::Component;
use crate::{action::Action, tui::Frame};

pub struct SwappingComponent {
    action_tx: UnboundedSender<Action>,
    pub status: TxStatus,
    pub last_result: Option<SwapResult>,
    pub from_symbol: String,
    pub to_symbol: String,
}

impl SwappingComponent {
    pub fn new(action_tx: UnboundedSender<Action>) -> Self {
        Self {
            action_tx,
            status: TxStatus::Pending,
            last_result: None,
            from_symbol: String::new(),
            to_symbol: String::new(),
        }
    }

    pub fn set_pair(&mut self, from_symbol: &str, to_symbol: &str) {
        self.from_symbol = from_symbol.to_string();
        self.to_symbol = to_symbol.to_string();
    }

    pub fn set_status(&mut self, status: TxStatus) {
        self.status = status;
    }

    pub fn set_result(&mut self, result: Option<SwapResult>) {
        self.last_result = result;
    }
}

impl Component for SwappingComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.action_tx.send(Action::ShowForm)?;
        }
        Ok(())
    }

    fn draw(&mut self, f: &mut Frame, area: Rect) {
        let (label, color) = match &self.status {
            TxStatus::Pending => ("Waiting for wallet...".to_string(), Color::Yellow),
            TxStatus::Sending => ("Sending transaction...".to_string(), Color::Yellow),
            TxStatus::Success => ("Swap successful".to_string(), Color::Green),
            TxStatus::Fail(reason) => (format!("Swap failed: {}", reason), Color::Red),
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                label,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if let (TxStatus::Success, Some(result)) = (&self.status, &self.last_result) {
            lines.push(Line::from(vec![
                Span::styled("Sold:      ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{} {}", result.in_amount.normalize(), self.from_symbol),
                    Style::default().fg(Color::White),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Bought:    ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{} {}", result.out_amount.normalize(), self.to_symbol),
                    Style::default().fg(Color::Green),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Signature: ", Style::default().fg(Color::DarkGray)),
                Span::styled(result.signature.as_str(), Style::default().fg(Color::Cyan)),
            ]));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "[Enter/Esc] Back to swap",
            Style::default().fg(Color::DarkGray),
        )));

        let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .title("Swapping")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        f.render_widget(widget, area);
    }
}
