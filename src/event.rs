//! Keyboard event handling.
//!
//! This module manages keyboard input with Vim-style navigation:
//! - `j`/`k` or arrows: move between rows
//! - `Ctrl+D`/`Ctrl+U`: half page down/up
//! - `PageDown`/`PageUp`: full page
//! - `g`/`G`: first/last row
//! - `Tab`, `h`/`l`: switch panel focus
//! - `Space`: select/deselect the verse under the cursor
//! - `y`: copy the selection (printed when the app exits)
//! - `Esc`: clear the selection
//! - `b`: toggle Unicode-bold copy formatting
//! - `[` / `]`: previous/next reading day
//! - `1` / `2`: cycle the left/right translation
//! - `:`: enter command mode
//!   - `:q` or `:quit`: quit the application
//!   - `:h` or `:help`: show help
//!   - `:MM-DD`: jump to a date
//! - `?`: show help
//! - `q`: quit

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::model::{AppMode, AppState, Side};

/// Actions that can be triggered by keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action (key not recognized)
    None,
    /// Quit the application
    Quit,
    /// Move cursor up one row
    MoveUp,
    /// Move cursor down one row
    MoveDown,
    /// Scroll half a page up (Ctrl+U)
    HalfPageUp,
    /// Scroll half a page down (Ctrl+D)
    HalfPageDown,
    /// Scroll a full page up (PageUp)
    PageUp,
    /// Scroll a full page down (PageDown)
    PageDown,
    /// Jump to the first row (g)
    GotoTop,
    /// Jump to the last row (G)
    GotoBottom,
    /// Switch focus to the other panel
    SwitchFocus,
    /// Toggle selection of the cursor row
    ToggleSelect,
    /// Clear the selection
    ClearSelection,
    /// Copy the selection
    Yank,
    /// Toggle Unicode-bold copy formatting
    ToggleBoldCopy,
    /// Go to the previous reading day
    PrevDay,
    /// Go to the next reading day
    NextDay,
    /// Cycle the left panel's translation
    CycleVersionLeft,
    /// Cycle the right panel's translation
    CycleVersionRight,
    /// Enter command mode
    EnterCommandMode,
    /// Add character to command buffer
    CommandChar(char),
    /// Execute current command
    ExecuteCommand,
    /// Cancel command mode
    CancelCommand,
    /// Backspace in command mode
    CommandBackspace,
    /// Show the help overlay
    ShowHelp,
    /// Dismiss the help overlay
    DismissHelp,
    /// Resize event (terminal resized)
    Resize(u16, u16),
}

/// Polls for keyboard events with a timeout.
///
/// Returns `None` if no event occurred within the timeout.
pub fn poll_event(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).ok()? {
        event::read().ok()
    } else {
        None
    }
}

/// Converts a crossterm event to an Action based on current app mode.
pub fn handle_event(event: Event, mode: &AppMode, show_help: bool) -> Action {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, mode, show_help),
        Event::Resize(width, height) => Action::Resize(width, height),
        _ => Action::None,
    }
}

/// Handles a key event based on the current application mode.
fn handle_key_event(key: KeyEvent, mode: &AppMode, show_help: bool) -> Action {
    // If help is shown, any key dismisses it
    if show_help {
        return Action::DismissHelp;
    }

    match mode {
        AppMode::Normal => handle_normal_mode(key),
        AppMode::Command(_) => handle_command_mode(key),
    }
}

/// Handles key events in normal mode (Vim-style navigation).
fn handle_normal_mode(key: KeyEvent) -> Action {
    // Handle Ctrl+C for emergency quit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // Handle Ctrl+U for half page up
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('u') {
        return Action::HalfPageUp;
    }

    // Handle Ctrl+D for half page down
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('d') {
        return Action::HalfPageDown;
    }

    match key.code {
        // Row navigation
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,

        // Page navigation
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,

        // Jump to start/end
        KeyCode::Char('g') | KeyCode::Home => Action::GotoTop,
        KeyCode::Char('G') | KeyCode::End => Action::GotoBottom,

        // Panel focus
        KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => Action::SwitchFocus,
        KeyCode::Left | KeyCode::Right => Action::SwitchFocus,

        // Selection and copy
        KeyCode::Char(' ') => Action::ToggleSelect,
        KeyCode::Esc => Action::ClearSelection,
        KeyCode::Char('y') => Action::Yank,
        KeyCode::Char('b') => Action::ToggleBoldCopy,

        // Date navigation
        KeyCode::Char('[') => Action::PrevDay,
        KeyCode::Char(']') => Action::NextDay,

        // Translation cycling
        KeyCode::Char('1') => Action::CycleVersionLeft,
        KeyCode::Char('2') => Action::CycleVersionRight,

        // Command mode
        KeyCode::Char(':') => Action::EnterCommandMode,

        // Help
        KeyCode::Char('?') => Action::ShowHelp,

        // Quick quit
        KeyCode::Char('q') => Action::Quit,

        _ => Action::None,
    }
}

/// Handles key events in command mode.
fn handle_command_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::ExecuteCommand,
        KeyCode::Esc => Action::CancelCommand,
        KeyCode::Backspace => Action::CommandBackspace,
        KeyCode::Char(c) => Action::CommandChar(c),
        _ => Action::None,
    }
}

/// Applies an action to the application state.
pub fn apply_action(state: &mut AppState, action: Action) {
    match action {
        Action::None => {}
        Action::Quit => {
            state.should_quit = true;
        }
        Action::MoveUp => {
            state.move_up();
        }
        Action::MoveDown => {
            state.move_down();
        }
        Action::HalfPageUp => {
            state.half_page_up();
        }
        Action::HalfPageDown => {
            state.half_page_down();
        }
        Action::PageUp => {
            state.page_up();
        }
        Action::PageDown => {
            state.page_down();
        }
        Action::GotoTop => {
            state.goto_top();
        }
        Action::GotoBottom => {
            state.goto_bottom();
        }
        Action::SwitchFocus => {
            state.switch_focus();
        }
        Action::ToggleSelect => {
            state.toggle_select();
        }
        Action::ClearSelection => {
            state.clear_selection();
        }
        Action::Yank => {
            state.yank_selection();
        }
        Action::ToggleBoldCopy => {
            state.toggle_bold_copy();
        }
        Action::PrevDay => {
            state.prev_day();
        }
        Action::NextDay => {
            state.next_day();
        }
        Action::CycleVersionLeft => {
            state.cycle_version(Side::Left);
        }
        Action::CycleVersionRight => {
            state.cycle_version(Side::Right);
        }
        Action::EnterCommandMode => {
            state.enter_command_mode();
        }
        Action::CommandChar(c) => {
            state.command_input(c);
        }
        Action::ExecuteCommand => {
            state.execute_command();
        }
        Action::CancelCommand => {
            state.cancel_command();
        }
        Action::CommandBackspace => {
            state.command_backspace();
        }
        Action::ShowHelp => {
            state.show_help = true;
        }
        Action::DismissHelp => {
            state.dismiss_help();
        }
        Action::Resize(_, _) => {
            // Resize is handled in the main loop with actual terminal dimensions
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn test_normal_mode_navigation_keys() {
        let mode = AppMode::Normal;
        assert_eq!(handle_event(key(KeyCode::Char('j')), &mode, false), Action::MoveDown);
        assert_eq!(handle_event(key(KeyCode::Up), &mode, false), Action::MoveUp);
        assert_eq!(handle_event(ctrl('d'), &mode, false), Action::HalfPageDown);
        assert_eq!(handle_event(ctrl('u'), &mode, false), Action::HalfPageUp);
        assert_eq!(handle_event(key(KeyCode::Char('g')), &mode, false), Action::GotoTop);
        assert_eq!(handle_event(key(KeyCode::Char('G')), &mode, false), Action::GotoBottom);
        assert_eq!(handle_event(key(KeyCode::Tab), &mode, false), Action::SwitchFocus);
        assert_eq!(handle_event(key(KeyCode::Char(' ')), &mode, false), Action::ToggleSelect);
        assert_eq!(handle_event(key(KeyCode::Char('[')), &mode, false), Action::PrevDay);
        assert_eq!(handle_event(key(KeyCode::Char(']')), &mode, false), Action::NextDay);
        assert_eq!(handle_event(key(KeyCode::Char('q')), &mode, false), Action::Quit);
    }

    #[test]
    fn test_command_mode_keys() {
        let mode = AppMode::Command("12-2".to_string());
        assert_eq!(
            handle_event(key(KeyCode::Char('5')), &mode, false),
            Action::CommandChar('5')
        );
        assert_eq!(handle_event(key(KeyCode::Enter), &mode, false), Action::ExecuteCommand);
        assert_eq!(handle_event(key(KeyCode::Esc), &mode, false), Action::CancelCommand);
        assert_eq!(
            handle_event(key(KeyCode::Backspace), &mode, false),
            Action::CommandBackspace
        );
    }

    #[test]
    fn test_any_key_dismisses_help() {
        let mode = AppMode::Normal;
        assert_eq!(handle_event(key(KeyCode::Char('j')), &mode, true), Action::DismissHelp);
        assert_eq!(handle_event(key(KeyCode::Esc), &mode, true), Action::DismissHelp);
    }

    #[test]
    fn test_apply_action_quit_and_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let mut state = AppState::new(date, "ESV", "TB");

        apply_action(&mut state, Action::NextDay);
        assert_eq!(state.date, NaiveDate::from_ymd_opt(2026, 3, 11).unwrap());
        assert!(state.needs_reload);

        apply_action(&mut state, Action::Quit);
        assert!(state.should_quit);
    }
}
