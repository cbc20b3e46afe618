//! Keybinding definitions for the TUI.
//!
//! [`map_key`] covers the table screen. Popovers read keys through
//! [`map_menu_key`], and text inputs take every key that is not a menu key.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use datagrid_core::{BulkAction, PageNav};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Cycle focus between the filter bar and the table.
    NextFocus,
    PrevFocus,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    ToggleRow,
    TogglePage,
    Page(PageNav),
    Sort,
    /// Open the focused filter control, or the focused column's one.
    OpenFilter,
    /// Jump to the first text filter.
    Search,
    ClearFilters,
    Export,
    ViewOptions,
    MoveColumnLeft,
    MoveColumnRight,
    RowActions,
    Bulk(BulkAction),
    OpenHelp,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Left => Some(Action::MoveColumnLeft),
            KeyCode::Right => Some(Action::MoveColumnRight),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Char('/') => Some(Action::Search),
        KeyCode::Char('f') | KeyCode::Enter => Some(Action::OpenFilter),
        KeyCode::Char('c') => Some(Action::ClearFilters),
        KeyCode::Char('x') => Some(Action::Export),
        KeyCode::Char('v') => Some(Action::ViewOptions),
        KeyCode::Char('s') => Some(Action::Sort),
        KeyCode::Char('r') => Some(Action::RowActions),
        KeyCode::Char('a') => Some(Action::TogglePage),
        KeyCode::Char(' ') => Some(Action::ToggleRow),
        KeyCode::Char('<') => Some(Action::MoveColumnLeft),
        KeyCode::Char('>') => Some(Action::MoveColumnRight),
        KeyCode::Char('e') => Some(Action::Bulk(BulkAction::Edit)),
        KeyCode::Char('d') => Some(Action::Bulk(BulkAction::Delete)),
        KeyCode::Esc => Some(Action::Bulk(BulkAction::Reset)),
        KeyCode::Tab => Some(Action::NextFocus),
        KeyCode::BackTab => Some(Action::PrevFocus),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveRight),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::Page(PageNav::First)),
        KeyCode::Char('[') | KeyCode::PageUp => Some(Action::Page(PageNav::Previous)),
        KeyCode::Char(']') | KeyCode::PageDown => Some(Action::Page(PageNav::Next)),
        KeyCode::End | KeyCode::Char('G') => Some(Action::Page(PageNav::Last)),
        _ => None,
    }
}

/// Keys understood inside a popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Up,
    Down,
    Left,
    Right,
    /// Toggle or choose the entry under the cursor.
    Toggle,
    Apply,
    /// Close without applying.
    Dismiss,
    /// Clear the control's filter.
    Reset,
}

/// Menu keys. With `typing` set, letters and space are left to the text input
/// and only arrows, Enter, Esc and Ctrl+R are menu keys.
pub fn map_menu_key(event: KeyEvent, typing: bool) -> Option<MenuAction> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('r') => Some(MenuAction::Reset),
            KeyCode::Char('c') => Some(MenuAction::Dismiss),
            _ => None,
        };
    }

    match code {
        KeyCode::Enter => Some(MenuAction::Apply),
        KeyCode::Esc => Some(MenuAction::Dismiss),
        KeyCode::Up => Some(MenuAction::Up),
        KeyCode::Down | KeyCode::Tab => Some(MenuAction::Down),
        KeyCode::BackTab => Some(MenuAction::Up),
        KeyCode::Left if !typing => Some(MenuAction::Left),
        KeyCode::Right if !typing => Some(MenuAction::Right),
        _ if typing => None,
        KeyCode::Char('k') => Some(MenuAction::Up),
        KeyCode::Char('j') => Some(MenuAction::Down),
        KeyCode::Char('h') => Some(MenuAction::Left),
        KeyCode::Char('l') => Some(MenuAction::Right),
        KeyCode::Char(' ') => Some(MenuAction::Toggle),
        KeyCode::Char('r') | KeyCode::Backspace => Some(MenuAction::Reset),
        KeyCode::Char('q') => Some(MenuAction::Dismiss),
        _ => None,
    }
}
