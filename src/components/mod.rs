pub mod swap_form;
pub mod swapping;
pub mod token_select;
pub mod wallet;

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;

use crate::tui::Frame;

/// A component is a reusable UI element that can handle events and render itself.
pub trait Component {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<()>;
    fn draw(&mut self, f: &mut Frame, area: Rect);

    /// Whether keystrokes are currently going into a text field.
    fn is_editing(&self) -> bool {
        false
    }

    fn paste(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }
}
