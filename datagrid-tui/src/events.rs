//! Event types for the TUI event loop.

use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    /// Drives the text filter debounce.
    Tick,
    Resize { width: u16, height: u16 },
}
