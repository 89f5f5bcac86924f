//! Key handling for the storage-report TUI.
//!
//! Two input modes: Normal, where keys drive the drive picker, the Analyze
//! trigger and chart selection, and Help, where any key closes the overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The current input mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Drive picker, Analyze trigger and chart navigation.
    #[default]
    Normal,
    /// Help overlay showing all keyboard shortcuts.
    Help,
}

/// Commands that can be triggered by user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Quit the application
    Quit,
    /// Select the previous drive in the picker
    PrevDrive,
    /// Select the next drive in the picker
    NextDrive,
    /// Analyze the selected drive
    Analyze,
    /// Move focus to the next chart slot
    FocusNext,
    /// Move focus to the previous chart slot
    FocusPrev,
    /// Select the previous slice in the focused chart
    SelectPrev,
    /// Select the next slice in the focused chart
    SelectNext,
    /// Copy the selected slice's path to the clipboard
    CopyPath,
    /// Open the selected slice's path with the system opener
    OpenPath,
    ShowHelp,
    HideHelp,
    /// No operation (unrecognized key)
    Noop,
}

/// Handle a key event and return the corresponding command.
///
/// `Ctrl-C` quits from every mode. Otherwise the behavior depends on the
/// current input mode; unrecognized keys map to `Command::Noop`.
pub fn handle_key(key: KeyEvent, mode: &InputMode) -> Command {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Command::Quit;
    }

    match mode {
        InputMode::Normal => handle_normal_mode(key),
        InputMode::Help => handle_help_mode(key),
    }
}

/// Handle key events in Normal mode.
fn handle_normal_mode(key: KeyEvent) -> Command {
    match key.code {
        // Drive picker
        KeyCode::Char('h') | KeyCode::Left => Command::PrevDrive,
        KeyCode::Char('l') | KeyCode::Right => Command::NextDrive,

        // Analyze trigger
        KeyCode::Enter | KeyCode::Char('a') => Command::Analyze,

        // Chart focus
        KeyCode::Tab => Command::FocusNext,
        KeyCode::BackTab => Command::FocusPrev,

        // Slice selection
        KeyCode::Char('k') | KeyCode::Up => Command::SelectPrev,
        KeyCode::Char('j') | KeyCode::Down => Command::SelectNext,

        // Actions on the selected slice
        KeyCode::Char('c') => Command::CopyPath,
        KeyCode::Char('o') => Command::OpenPath,

        KeyCode::Char('?') => Command::ShowHelp,
        KeyCode::Char('q') => Command::Quit,

        _ => Command::Noop,
    }
}

/// Handle key events in Help mode.
fn handle_help_mode(_key: KeyEvent) -> Command {
    // Any key closes help
    Command::HideHelp
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn key_event_with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_normal_mode_drive_picker() {
        let mode = InputMode::Normal;

        assert_eq!(handle_key(key_event(KeyCode::Char('h')), &mode), Command::PrevDrive);
        assert_eq!(handle_key(key_event(KeyCode::Left), &mode), Command::PrevDrive);
        assert_eq!(handle_key(key_event(KeyCode::Char('l')), &mode), Command::NextDrive);
        assert_eq!(handle_key(key_event(KeyCode::Right), &mode), Command::NextDrive);
        assert_eq!(handle_key(key_event(KeyCode::Enter), &mode), Command::Analyze);
        assert_eq!(handle_key(key_event(KeyCode::Char('a')), &mode), Command::Analyze);
    }

    #[test]
    fn test_normal_mode_chart_navigation() {
        let mode = InputMode::Normal;

        assert_eq!(handle_key(key_event(KeyCode::Tab), &mode), Command::FocusNext);
        assert_eq!(
            handle_key(
                key_event_with_modifiers(KeyCode::BackTab, KeyModifiers::SHIFT),
                &mode
            ),
            Command::FocusPrev
        );
        assert_eq!(handle_key(key_event(KeyCode::Char('j')), &mode), Command::SelectNext);
        assert_eq!(handle_key(key_event(KeyCode::Down), &mode), Command::SelectNext);
        assert_eq!(handle_key(key_event(KeyCode::Char('k')), &mode), Command::SelectPrev);
        assert_eq!(handle_key(key_event(KeyCode::Up), &mode), Command::SelectPrev);
    }

    #[test]
    fn test_normal_mode_actions() {
        let mode = InputMode::Normal;

        assert_eq!(handle_key(key_event(KeyCode::Char('q')), &mode), Command::Quit);
        assert_eq!(handle_key(key_event(KeyCode::Char('c')), &mode), Command::CopyPath);
        assert_eq!(handle_key(key_event(KeyCode::Char('o')), &mode), Command::OpenPath);
        assert_eq!(handle_key(key_event(KeyCode::Char('?')), &mode), Command::ShowHelp);
        assert_eq!(handle_key(key_event(KeyCode::Char('x')), &mode), Command::Noop);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let ctrl_c = key_event_with_modifiers(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(ctrl_c, &InputMode::Normal), Command::Quit);
        assert_eq!(handle_key(ctrl_c, &InputMode::Help), Command::Quit);
    }

    #[test]
    fn test_help_mode() {
        let mode = InputMode::Help;

        assert_eq!(handle_key(key_event(KeyCode::Esc), &mode), Command::HideHelp);
        assert_eq!(handle_key(key_event(KeyCode::Char('q')), &mode), Command::HideHelp);
    }
}
