//! gtview-app - Application state and orchestration for gtview
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! comparison dashboard: the view-state store, the fetch orchestrator that
//! reacts to it, the three-way viewer's editable state, the submission
//! dialogs and configuration loading. It has no terminal dependency; the
//! TUI crate renders [`AppState`] and feeds [`Message`]s back in.

pub mod actions;
pub mod config;
pub mod confirm_dialog;
pub mod effects;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod signals;
pub mod state;
pub mod submit_dialog;
pub mod view;
pub mod viewer;

// Re-export primary types
pub use actions::FetchTaskMap;
pub use config::Settings;
pub use effects::{Effects, FetchRequest, FetchRule};
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use state::{AppState, UiMode};
pub use view::{View, ViewState};
pub use viewer::ThreeWayViewer;
