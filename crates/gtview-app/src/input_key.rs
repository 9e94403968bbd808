//! Keys the dashboard reacts to
//!
//! The TUI converts crossterm events into `InputKey` so that key maps in
//! `handler::keys` can be tested without a terminal.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character: shortcuts and text input in the submit forms
    Char(char),
    /// Ctrl+char; only Ctrl+C (force quit) is bound
    CharCtrl(char),

    // Table and cell cursor
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    /// Next form field or dialog option
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
}
