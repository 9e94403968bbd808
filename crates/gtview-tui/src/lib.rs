//! gtview-tui - Terminal UI for gtview
//!
//! Renders [`gtview_app::AppState`] with ratatui and turns crossterm input
//! into [`gtview_app::Message`]s. All state transitions happen in the app
//! crate; this crate only draws and forwards keys.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use runner::run;
