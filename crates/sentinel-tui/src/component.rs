//! Component trait: the building block for every screen.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;

/// Lifecycle: `init` → (`handle_key_event` | `update` | `render`)*
pub trait Component: Send {
    /// Runs once before the first frame.
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    /// Maps a key press to at most one action.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Reacts to an action from the app loop.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect);

    /// Whether the component wants raw key input (text fields), which
    /// suspends single-letter global shortcuts.
    fn captures_input(&self) -> bool {
        false
    }

    fn set_focused(&mut self, _focused: bool) {}
}
