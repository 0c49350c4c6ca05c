//! Component trait - Interface for dashboard panels and dialogs
//!
//! Components turn key events into Actions, apply Actions to their own local
//! state, and render themselves. Data they display (the snapshot) is passed
//! in by the App rather than owned.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

pub trait Component {
    /// Called once by the owner before the first draw
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Map a key event to an Action without changing state
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Apply an Action; may return a follow-up Action
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
